//! Cache-backed parsing shared by both span builders.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use markup_spans_config::Config;
use markup_spans_syntax::{DEFAULT_MAX_NESTING_DEPTH, ParsedText, parse_with_depth};

use crate::cache::{CacheConfigError, CacheStats, ParseCache};
use crate::render::plain::to_plain_text;

/// Parses text through its own [`ParseCache`].
///
/// Safe to share between threads. Results are handed out as `Arc`s, so a
/// caller still holding one is unaffected by eviction or
/// [`MarkupParser::clear_cache`].
#[derive(Debug)]
pub struct MarkupParser {
    cache: Mutex<ParseCache>,
    max_depth: usize,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new(ParseCache::default(), DEFAULT_MAX_NESTING_DEPTH)
    }
}

impl MarkupParser {
    #[must_use]
    pub fn new(cache: ParseCache, max_depth: usize) -> Self {
        Self {
            cache: Mutex::new(cache),
            max_depth,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CacheConfigError> {
        Ok(Self::new(
            ParseCache::from_config(&config.cache)?,
            config.parser.max_nesting_depth,
        ))
    }

    /// Returns the parse of `text`, from the cache when possible.
    pub fn parse(&self, text: &str) -> Arc<ParsedText> {
        if let Some(parsed) = self.lock().get(text) {
            return parsed;
        }

        let parsed = Arc::new(parse_with_depth(text, self.max_depth));
        self.lock().put(text, Arc::clone(&parsed));
        parsed
    }

    /// The text a reader sees once formatting is applied.
    pub fn plain_text(&self, text: &str) -> String {
        to_plain_text(&self.parse(text))
    }

    /// Drops every cached result.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn is_cached(&self, text: &str) -> bool {
        self.lock().contains(text)
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.lock().stats()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // A poisoned cache still holds only complete entries.
    fn lock(&self) -> MutexGuard<'_, ParseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
