//! Bounded LRU cache of parse results keyed by the raw input text.
//!
//! Entries carry a monotonic access stamp; lookups restamp, and inserting
//! into a full cache evicts the entry with the oldest stamp. Text longer than
//! the configured maximum is never stored, so very long inputs cannot push
//! out many short, frequently rendered ones.

use std::sync::Arc;

use markup_spans_config::CacheConfig;
use markup_spans_syntax::{DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_CACHE_KEY_LENGTH, ParsedText};
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CacheConfigError {
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,

    #[error("maximum cache key length must be at least 1")]
    ZeroKeyLength,
}

/// Counters since the cache was created. [`ParseCache::clear`] keeps them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Lookups skipped because the text exceeded the maximum key length.
    pub bypassed: u64,
    pub evictions: u64,
}

#[derive(Debug)]
struct CacheEntry {
    value: Arc<ParsedText>,
    access_count: u64,
}

#[derive(Debug)]
pub struct ParseCache {
    map: FxHashMap<String, CacheEntry>,
    capacity: usize,
    max_key_length: usize,
    access_counter: u64,
    stats: CacheStats,
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::with_limits(DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_CACHE_KEY_LENGTH)
    }
}

impl ParseCache {
    /// Creates an empty cache holding at most `capacity` entries whose keys
    /// are at most `max_key_length` bytes long.
    ///
    /// Any non-zero limit is accepted. Storage grows with the entries
    /// actually inserted, never with `capacity`.
    pub fn new(capacity: usize, max_key_length: usize) -> Result<Self, CacheConfigError> {
        if capacity == 0 {
            return Err(CacheConfigError::ZeroCapacity);
        }
        if max_key_length == 0 {
            return Err(CacheConfigError::ZeroKeyLength);
        }
        Ok(Self::with_limits(capacity, max_key_length))
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheConfigError> {
        Self::new(config.capacity, config.max_key_length)
    }

    fn with_limits(capacity: usize, max_key_length: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            capacity,
            max_key_length,
            access_counter: 0,
            stats: CacheStats::default(),
        }
    }

    /// True if `text` is short enough to be cached.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        text.len() <= self.max_key_length
    }

    /// Looks up `text`, marking it most recently used.
    pub fn get(&mut self, text: &str) -> Option<Arc<ParsedText>> {
        if !self.accepts(text) {
            self.stats.bypassed += 1;
            return None;
        }
        self.access_counter += 1;
        match self.map.get_mut(text) {
            Some(entry) => {
                entry.access_count = self.access_counter;
                self.stats.hits += 1;
                Some(Arc::clone(&entry.value))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Stores `value` under `text`.
    ///
    /// Returns false, storing nothing, if `text` is longer than the maximum
    /// key length. Inserting a new key into a full cache evicts exactly the
    /// least recently used entry.
    pub fn put(&mut self, text: &str, value: Arc<ParsedText>) -> bool {
        if !self.accepts(text) {
            log::debug!(
                "not caching {} byte text (limit {})",
                text.len(),
                self.max_key_length
            );
            return false;
        }
        self.access_counter += 1;

        if let Some(entry) = self.map.get_mut(text) {
            entry.value = value;
            entry.access_count = self.access_counter;
            return true;
        }

        if self.map.len() >= self.capacity {
            self.evict_lru();
        }
        self.map.insert(
            text.to_owned(),
            CacheEntry {
                value,
                access_count: self.access_counter,
            },
        );
        true
    }

    fn evict_lru(&mut self) {
        let lru_key = self
            .map
            .iter()
            .min_by_key(|(_, entry)| entry.access_count)
            .map(|(key, _)| key.clone());
        if let Some(key) = lru_key {
            log::debug!("evicting least recently used entry ({} bytes)", key.len());
            self.map.remove(&key);
            self.stats.evictions += 1;
        }
    }

    /// Checks for `text` without touching its recency.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.map.contains_key(text)
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.access_counter = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
