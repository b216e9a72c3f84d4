// Error types of the analysis API.

/// Error returned by [`crate::Analyzer::analyze`].
///
/// A path that the rule layer rejects is never an error; it just yields no
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The word contains a character the dictionary does not know and no
    /// fallback symbol is configured.
    #[error("unsupported character {character:?} at position {position}")]
    UnsupportedCharacter { character: char, position: usize },
}

/// Invalid [`crate::AnalyzerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_word_length must be greater than zero")]
    ZeroWordLength,
    #[error("max_analyses must be greater than zero")]
    ZeroAnalyses,
    #[error("traversal limit {0} must be greater than zero")]
    ZeroTraversalLimit(&'static str),
    #[error("fallback symbol must not be empty")]
    EmptyFallbackSymbol,
}
