// Caller-owned cache of analysis results.

use hashbrown::HashMap;
use morfo_core::Analysis;

/// Default number of words an [`AnalysisCache`] holds.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// A bounded map from words to their analyses.
///
/// Used through [`crate::FinnishAnalyzer::analyze_cached`]. When the cache is
/// full, inserting a new word empties it first, so there is no eviction order
/// to maintain. A hit skips the transducer but still clones the stored
/// analyses for the caller.
///
/// The cache is keyed on the word exactly as given, so `Talo` and `talo` are
/// cached separately: their segment surfaces differ.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    capacity: usize,
    entries: HashMap<String, Vec<Analysis>>,
}

impl AnalysisCache {
    /// Create a cache holding at most `capacity` words. A capacity of zero
    /// caches nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached analyses of `word`, if present.
    pub fn get(&self, word: &str) -> Option<&[Analysis]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Store the analyses of `word`, replacing any earlier entry.
    pub fn insert(&mut self, word: &str, analyses: Vec<Analysis>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity && !self.entries.contains_key(word) {
            tracing::trace!(capacity = self.capacity, "analysis cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(word.to_string(), analyses);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
