//! Bounded memoization cache for evaluated positions
//!
//! The recursive evaluator revisits transposed positions constantly, so
//! results are cached by board contents. The cache holds a fixed number
//! of entries and discards the least recently used one when full.
//!
//! # Example
//!
//! ```
//! use connectk::board::Board;
//! use connectk::eval::{CacheKey, Score, ScoreCache};
//!
//! let mut cache = ScoreCache::new(1024);
//! let board = Board::new(3, 3).expect("valid dimensions");
//! let key = CacheKey::from_board(&board);
//!
//! cache.insert(key.clone(), Score::Draw);
//! assert_eq!(cache.probe(&key), Some(Score::Draw));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::board::{Board, Pos};
use crate::eval::Score;

/// Memoization key: the exact cell contents plus the dimensions that
/// give them meaning.
///
/// Size and win condition are part of the key, so equal grids from
/// boards with different rules never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Box<[u8]>);

impl CacheKey {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let mut bytes = Vec::with_capacity(size * size + 16);
        for row in 0..size {
            for col in 0..size {
                bytes.push(board.get(Pos::new(row, col)) as u8);
            }
        }
        bytes.extend_from_slice(&(size as u64).to_le_bytes());
        bytes.extend_from_slice(&(board.condition() as u64).to_le_bytes());
        Self(bytes.into_boxed_slice())
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    score: Score,
    stamp: u64,
}

/// LRU cache mapping positions to their evaluated scores.
///
/// Recency is tracked with a queue of stamped keys. Touching a key
/// appends a fresh stamp instead of moving the old node, and eviction
/// skips nodes whose stamp no longer matches the live entry.
#[derive(Debug)]
pub struct ScoreCache {
    map: HashMap<CacheKey, CacheEntry>,
    queue: VecDeque<(CacheKey, u64)>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl ScoreCache {
    /// Create a cache holding at most `capacity` positions.
    ///
    /// A capacity of zero disables caching: every probe misses and
    /// inserts are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use connectk::eval::ScoreCache;
    ///
    /// let cache = ScoreCache::new(20_000);
    /// assert_eq!(cache.len(), 0);
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1024)),
            queue: VecDeque::new(),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a position, refreshing its recency on a hit.
    ///
    /// # Returns
    ///
    /// * `Some(score)` - Cached result for this exact position
    /// * `None` - Not cached (or caching is disabled)
    pub fn probe(&mut self, key: &CacheKey) -> Option<Score> {
        if self.capacity == 0 {
            return None;
        }

        self.tick += 1;
        let stamp = self.tick;
        match self.map.get_mut(key) {
            Some(entry) => {
                entry.stamp = stamp;
                self.queue.push_back((key.clone(), stamp));
                self.hits += 1;
                let score = entry.score;
                self.compact_if_oversized();
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a score, evicting the least recently used entry when the
    /// cache is full. Inserting an existing key overwrites its score.
    pub fn insert(&mut self, key: CacheKey, score: Score) {
        if self.capacity == 0 {
            return;
        }

        self.tick += 1;
        let stamp = self.tick;
        self.map.insert(key.clone(), CacheEntry { score, stamp });
        self.queue.push_back((key, stamp));

        while self.map.len() > self.capacity {
            match self.queue.pop_front() {
                Some((front, front_stamp)) => {
                    let live = self
                        .map
                        .get(&front)
                        .is_some_and(|entry| entry.stamp == front_stamp);
                    if live {
                        self.map.remove(&front);
                    }
                }
                None => break,
            }
        }

        self.compact_if_oversized();
    }

    /// Drop stale queue nodes once they outnumber live entries 4 to 1.
    fn compact_if_oversized(&mut self) {
        if self.queue.len() > self.capacity.saturating_mul(4) {
            let map = &self.map;
            self.queue
                .retain(|(key, stamp)| map.get(key).is_some_and(|entry| entry.stamp == *stamp));
        }
    }

    /// Number of cached positions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of cached positions.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Probes that found an entry.
    #[inline]
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Probes that found nothing.
    #[inline]
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Discard all entries and reset the counters.
    pub fn clear(&mut self) {
        self.map.clear();
        self.queue.clear();
        self.tick = 0;
        self.hits = 0;
        self.misses = 0;
    }

    /// Statistics about cache usage.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        let hit_percent = if lookups == 0 {
            0
        } else {
            (self.hits as f64 / lookups as f64 * 100.0) as u8
        };
        CacheStats {
            capacity: self.capacity,
            entries: self.map.len(),
            hits: self.hits,
            misses: self.misses,
            hit_percent,
        }
    }
}

/// Statistics about score cache usage.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Maximum number of entries
    pub capacity: usize,
    /// Entries currently cached
    pub entries: usize,
    /// Probes that found an entry
    pub hits: u64,
    /// Probes that found nothing
    pub misses: u64,
    /// Share of probes that hit (0-100)
    pub hit_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    fn key_with_cross_at(row: usize, col: usize) -> CacheKey {
        let mut board = Board::new(3, 3).unwrap();
        board.place(Pos::new(row, col), Mark::Cross);
        CacheKey::from_board(&board)
    }

    #[test]
    fn test_cache_store_probe() {
        let mut cache = ScoreCache::new(16);
        let key = key_with_cross_at(0, 0);

        cache.insert(key.clone(), Score::Win);
        assert_eq!(cache.probe(&key), Some(Score::Win));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let mut cache = ScoreCache::new(16);
        let key = key_with_cross_at(0, 0);

        assert_eq!(cache.probe(&key), None);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_cache_overwrite_same_key() {
        let mut cache = ScoreCache::new(16);
        let key = key_with_cross_at(1, 1);

        cache.insert(key.clone(), Score::Draw);
        cache.insert(key.clone(), Score::Loss);

        assert_eq!(cache.probe(&key), Some(Score::Loss));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_win_condition() {
        // Same empty grid, different win condition: two distinct keys.
        let three = Board::new(3, 3).unwrap();
        let two = Board::new(3, 2).unwrap();
        let key_three = CacheKey::from_board(&three);
        let key_two = CacheKey::from_board(&two);
        assert_ne!(key_three, key_two);

        let mut cache = ScoreCache::new(16);
        cache.insert(key_three, Score::Win);
        assert_eq!(cache.probe(&key_two), None);
    }

    #[test]
    fn test_cache_key_reflects_cells() {
        let key_a = key_with_cross_at(0, 0);
        let key_b = key_with_cross_at(0, 1);
        assert_ne!(key_a, key_b);
        assert_eq!(key_a, key_with_cross_at(0, 0));
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut cache = ScoreCache::new(2);
        let first = key_with_cross_at(0, 0);
        let second = key_with_cross_at(0, 1);
        let third = key_with_cross_at(0, 2);

        cache.insert(first.clone(), Score::Win);
        cache.insert(second.clone(), Score::Draw);

        // Touch the first entry so the second becomes the LRU victim.
        assert_eq!(cache.probe(&first), Some(Score::Win));
        cache.insert(third.clone(), Score::Loss);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.probe(&first), Some(Score::Win));
        assert_eq!(cache.probe(&second), None);
        assert_eq!(cache.probe(&third), Some(Score::Loss));
    }

    #[test]
    fn test_cache_eviction_order_without_touches() {
        let mut cache = ScoreCache::new(1);
        let first = key_with_cross_at(1, 0);
        let second = key_with_cross_at(1, 1);

        cache.insert(first.clone(), Score::Win);
        cache.insert(second.clone(), Score::Draw);

        assert_eq!(cache.probe(&first), None);
        assert_eq!(cache.probe(&second), Some(Score::Draw));
    }

    #[test]
    fn test_cache_survives_heavy_touching() {
        // Repeated probes pile up stale queue nodes; eviction must
        // still pick the untouched entry.
        let mut cache = ScoreCache::new(2);
        let hot = key_with_cross_at(2, 0);
        let cold = key_with_cross_at(2, 1);

        cache.insert(hot.clone(), Score::Win);
        cache.insert(cold.clone(), Score::Draw);
        for _ in 0..100 {
            assert_eq!(cache.probe(&hot), Some(Score::Win));
        }

        cache.insert(key_with_cross_at(2, 2), Score::Loss);
        assert_eq!(cache.probe(&hot), Some(Score::Win));
        assert_eq!(cache.probe(&cold), None);
    }

    #[test]
    fn test_cache_capacity_zero_disables() {
        let mut cache = ScoreCache::new(0);
        let key = key_with_cross_at(0, 0);

        cache.insert(key.clone(), Score::Win);
        assert_eq!(cache.probe(&key), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = ScoreCache::new(16);
        let key = key_with_cross_at(0, 0);

        cache.insert(key.clone(), Score::Win);
        let _ = cache.probe(&key);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.probe(&key), None);
    }

    #[test]
    fn test_cache_stats() {
        let mut cache = ScoreCache::new(16);
        let key = key_with_cross_at(0, 0);

        cache.insert(key.clone(), Score::Win);
        let _ = cache.probe(&key);
        let _ = cache.probe(&key_with_cross_at(0, 1));

        let stats = cache.stats();
        assert_eq!(stats.capacity, 16);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_percent, 50);
    }
}
