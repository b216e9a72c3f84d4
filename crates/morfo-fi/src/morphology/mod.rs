// Morphological analysis: the Finnish rule layer and the analyzer on top of it.

mod attributes;
mod baseform;
mod buffer;
mod finnish;
mod organization;
mod parts;
mod rules;
mod structure;
mod validate;
mod word;

pub use finnish::FinnishAnalyzer;
pub use rules::FinnishRules;

use morfo_core::Analysis;

use crate::error::AnalysisError;

/// Trait for morphological analyzers.
///
/// An empty result is a normal outcome for a word the dictionary does not
/// know; an error means the word could not be put to the dictionary at all.
pub trait Analyzer {
    /// Analyze a word and return all valid analyses, ranked.
    fn analyze(&self, word: &str) -> Result<Vec<Analysis>, AnalysisError>;

    /// Distinct base forms of `word` in rank order.
    fn base_forms(&self, word: &str) -> Result<Vec<String>, AnalysisError>;
}
