// Analyzer configuration.

use morfo_fst::TraversalLimits;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest word, in characters, that is analysed at all.
pub const MAX_WORD_LENGTH: usize = 255;

/// Maximum number of accepting paths interpreted per word.
pub const MAX_ANALYSIS_COUNT: usize = 100;

/// Limits on how deeply compounds may be built.
///
/// `None` leaves a limit unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundPolicy {
    /// Minimum number of non-hyphen characters in every constituent except
    /// the last.
    pub min_constituent_length: Option<usize>,
    /// Maximum number of compound boundaries, that is segments minus one.
    pub max_compound_depth: Option<usize>,
}

impl CompoundPolicy {
    /// Whether the constituent surfaces satisfy the policy. The head
    /// (last constituent) is exempt from the length limit.
    pub fn allows<'a, I>(&self, constituents: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: ExactSizeIterator,
    {
        let constituents = constituents.into_iter();
        let count = constituents.len();
        if let Some(max) = self.max_compound_depth {
            if count.saturating_sub(1) > max {
                return false;
            }
        }
        match self.min_constituent_length {
            Some(min) => constituents
                .take(count.saturating_sub(1))
                .all(|c| c.chars().filter(|&ch| ch != '-').count() >= min),
            None => true,
        }
    }
}

/// Configuration of a [`crate::FinnishAnalyzer`].
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub include_structure: bool,
    pub include_base_form: bool,
    pub include_fst_output: bool,
    pub include_base_form_parts: bool,
    pub include_word: bool,
    pub include_basic_attributes: bool,
    pub include_organization_name_analysis: bool,
    pub compound_policy: CompoundPolicy,
    pub traversal: TraversalLimits,
    pub max_word_length: usize,
    pub max_analyses: usize,
    /// Dictionary symbol used for input characters the dictionary lacks.
    /// Ignored when the dictionary does not define it.
    pub fallback_symbol: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include_structure: true,
            include_base_form: true,
            include_fst_output: true,
            include_base_form_parts: true,
            include_word: true,
            include_basic_attributes: true,
            include_organization_name_analysis: true,
            compound_policy: CompoundPolicy::default(),
            traversal: TraversalLimits::default(),
            max_word_length: MAX_WORD_LENGTH,
            max_analyses: MAX_ANALYSIS_COUNT,
            fallback_symbol: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_word_length == 0 {
            return Err(ConfigError::ZeroWordLength);
        }
        if self.max_analyses == 0 {
            return Err(ConfigError::ZeroAnalyses);
        }
        if self.traversal.max_depth == 0 {
            return Err(ConfigError::ZeroTraversalLimit("max_depth"));
        }
        if self.traversal.max_steps == 0 {
            return Err(ConfigError::ZeroTraversalLimit("max_steps"));
        }
        if self.fallback_symbol.as_deref() == Some("") {
            return Err(ConfigError::EmptyFallbackSymbol);
        }
        Ok(())
    }

    /// Whether the structure string has to be computed for an analysis.
    pub(crate) fn needs_structure(&self) -> bool {
        self.include_structure || self.include_base_form || self.include_organization_name_analysis
    }
}
