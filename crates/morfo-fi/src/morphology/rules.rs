// Interpretation of one accepting path under the Finnish dictionary rules.

use morfo_core::Analysis;
use morfo_fst::{Dictionary, Path};

use super::attributes::{parse_basic_attributes, post_process};
use super::baseform::parse_base_form;
use super::buffer::OutputBuffer;
use super::organization::organization_name_analysis;
use super::parts::parse_base_form_parts;
use super::structure::parse_structure;
use super::validate::rejection;
use super::word::parse_word;
use crate::config::AnalyzerConfig;

/// Turns transducer paths into analyses.
///
/// Borrowed from a [`crate::FinnishAnalyzer`] through
/// [`crate::FinnishAnalyzer::rules`], or built directly around a dictionary
/// to interpret paths from a custom traversal.
#[derive(Debug, Clone, Copy)]
pub struct FinnishRules<'a> {
    dictionary: &'a Dictionary,
    config: &'a AnalyzerConfig,
}

impl<'a> FinnishRules<'a> {
    pub fn new(dictionary: &'a Dictionary, config: &'a AnalyzerConfig) -> Self {
        Self { dictionary, config }
    }

    /// Analyses of `word` read along `path`.
    ///
    /// `word` is the input as the caller wrote it; segment surfaces are cut
    /// from it. An invalid path yields nothing. An organization name yields
    /// its noun reading followed by its proper-name reading.
    pub fn interpret(&self, word: &str, path: &Path) -> Vec<Analysis> {
        let buffer = OutputBuffer::from_path(path, self.dictionary);

        if let Some(reason) = rejection(&buffer) {
            tracing::trace!(word, output = buffer.contents(), ?reason, "rejected path");
            return Vec::new();
        }

        let parsed = parse_word(&buffer, word);
        let policy = &self.config.compound_policy;
        if !policy.allows(parsed.segments.iter().map(|s| s.surface.as_str())) {
            tracing::trace!(
                word,
                output = buffer.contents(),
                segments = parsed.segments.len(),
                "compound policy rejected path"
            );
            return Vec::new();
        }

        let config = self.config;
        let word_len = word.chars().count();
        let structure = config
            .needs_structure()
            .then(|| parse_structure(&buffer, word_len));

        let mut analysis = Analysis {
            segments: parsed.segments,
            weight: self.dictionary.is_weighted().then_some(path.weight),
            ..Analysis::default()
        };
        if let Some(structure) = &structure {
            if config.include_structure {
                analysis.structure = Some(structure.clone());
            }
            if config.include_base_form {
                analysis.base_form = parse_base_form(&buffer, structure);
            }
        }
        if config.include_fst_output {
            analysis.fst_output = Some(buffer.contents().to_string());
        }
        if config.include_base_form_parts {
            analysis.base_form_parts = Some(parse_base_form_parts(&parsed.word));
        }
        if config.include_word {
            analysis.word = Some(parsed.word);
        }
        if config.include_basic_attributes {
            parse_basic_attributes(&buffer, &mut analysis);
            post_process(&mut analysis);
        }

        let organization = match &structure {
            Some(structure) if config.include_organization_name_analysis => {
                organization_name_analysis(&analysis, &buffer, structure, config)
            }
            _ => None,
        };

        let mut analyses = vec![analysis];
        analyses.extend(organization);
        analyses
    }
}
