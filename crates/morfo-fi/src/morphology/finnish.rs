// Finnish morphological analyzer.
//
// Prepares the word for the transducer, interprets every accepting path
// through the rule layer, then removes duplicate readings and ranks what is
// left.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use morfo_core::Analysis;
use morfo_core::attributes::WordClass;
use morfo_core::character::lower_each;
use morfo_core::tags::Tag;
use morfo_fst::Dictionary;

use super::Analyzer;
use super::rules::FinnishRules;
use crate::cache::AnalysisCache;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, ConfigError};

/// Analyzer for a Finnish VFST dictionary (`mor.vfst`).
///
/// Holds no per-call state, so one analyzer can serve any number of threads
/// through a shared reference or an `Arc`.
#[derive(Debug)]
pub struct FinnishAnalyzer {
    dictionary: Dictionary,
    config: AnalyzerConfig,
    /// Symbol substituted for input characters the dictionary lacks.
    fallback: Option<u16>,
}

/// Identity of an analysis for duplicate removal.
type AnalysisKey = (Option<String>, Option<WordClass>, Vec<(String, Vec<Tag>)>);

impl FinnishAnalyzer {
    /// Analyzer with the default configuration.
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            config: AnalyzerConfig::default(),
            fallback: None,
        }
    }

    pub fn with_config(dictionary: Dictionary, config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fallback = config
            .fallback_symbol
            .as_deref()
            .and_then(|name| dictionary.symbol(name));
        if let (Some(name), None) = (&config.fallback_symbol, fallback) {
            tracing::debug!(symbol = %name, "fallback symbol not in dictionary, ignoring");
        }
        Ok(Self {
            dictionary,
            config,
            fallback,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The rule layer this analyzer interprets paths with.
    pub fn rules(&self) -> FinnishRules<'_> {
        FinnishRules::new(&self.dictionary, &self.config)
    }

    /// Analyze through a caller-owned cache.
    ///
    /// Results are cached exactly as [`Analyzer::analyze`] returns them;
    /// errors are not cached.
    pub fn analyze_cached(
        &self,
        word: &str,
        cache: &mut AnalysisCache,
    ) -> Result<Vec<Analysis>, AnalysisError> {
        if let Some(cached) = cache.get(word) {
            return Ok(cached.to_vec());
        }
        let analyses = self.analyze(word)?;
        cache.insert(word, analyses.clone());
        Ok(analyses)
    }

    /// Map `word` to input symbols, lowercasing each character first.
    ///
    /// `None` means the word is longer than the configured limit.
    fn prepare(&self, word: &str) -> Result<Option<Vec<u16>>, AnalysisError> {
        if word.chars().count() > self.config.max_word_length {
            return Ok(None);
        }
        let lowered = lower_each(word);
        let mut input = Vec::with_capacity(word.len());
        for (position, (character, lower)) in word.chars().zip(lowered.chars()).enumerate() {
            let symbol = self
                .dictionary
                .symbol_of(lower)
                .or(self.fallback)
                .ok_or(AnalysisError::UnsupportedCharacter { character, position })?;
            input.push(symbol);
        }
        Ok(Some(input))
    }
}

impl Analyzer for FinnishAnalyzer {
    fn analyze(&self, word: &str) -> Result<Vec<Analysis>, AnalysisError> {
        let Some(input) = self.prepare(word)? else {
            return Ok(Vec::new());
        };

        let rules = self.rules();
        let mut index: HashMap<AnalysisKey, usize> = HashMap::new();
        let mut analyses: Vec<Analysis> = Vec::new();
        let paths = self
            .dictionary
            .traverse_with(&input, self.config.traversal)
            .take(self.config.max_analyses);
        for analysis in paths.flat_map(|path| rules.interpret(word, &path)) {
            match index.entry(key(&analysis)) {
                Entry::Vacant(slot) => {
                    slot.insert(analyses.len());
                    analyses.push(analysis);
                }
                // A repeated reading keeps its first position and the
                // cheapest path.
                Entry::Occupied(slot) => {
                    let kept = &mut analyses[*slot.get()];
                    if analysis.weight < kept.weight {
                        *kept = analysis;
                    }
                }
            }
        }

        if self.dictionary.is_weighted() {
            analyses.sort_by_key(|a| a.weight);
        }
        for (rank, analysis) in analyses.iter_mut().enumerate() {
            analysis.rank = rank;
        }
        Ok(analyses)
    }

    fn base_forms(&self, word: &str) -> Result<Vec<String>, AnalysisError> {
        let mut base_forms: Vec<String> = Vec::new();
        for analysis in self.analyze(word)? {
            if let Some(base_form) = analysis.base_form {
                if !base_forms.contains(&base_form) {
                    base_forms.push(base_form);
                }
            }
        }
        Ok(base_forms)
    }
}

fn key(analysis: &Analysis) -> AnalysisKey {
    (
        analysis.base_form.clone(),
        analysis.word_class,
        analysis
            .segments
            .iter()
            .map(|s| (s.surface.clone(), s.tags.clone()))
            .collect(),
    )
}
