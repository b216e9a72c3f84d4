// Organization names.
//
// A compound noun whose head carries `[Ion]` ("Kansaneläkelaitos") is also
// a proper name. The rule layer reports it twice: once as the noun, once as
// a name with a capitalized first letter.

use morfo_core::Analysis;
use morfo_core::attributes::WordClass;
use morfo_core::tags::Tag;

use super::baseform::parse_base_form;
use super::buffer::OutputBuffer;
use crate::config::AnalyzerConfig;

/// The proper-name reading of `analysis`, if its output is an organization
/// name.
pub(crate) fn organization_name_analysis(
    analysis: &Analysis,
    buffer: &OutputBuffer,
    structure: &str,
    config: &AnalyzerConfig,
) -> Option<Analysis> {
    if analysis.word_class != Some(WordClass::Noun) || !is_organization_name(buffer) {
        return None;
    }

    let mut symbols: Vec<char> = structure.chars().collect();
    if let Some(first) = symbols.get_mut(1) {
        *first = 'i';
    }
    let structure: String = symbols.into_iter().collect();

    let mut name = analysis.clone();
    name.word_class = Some(WordClass::ProperName);
    name.possible_geographical_name = false;
    if config.include_base_form {
        name.base_form = parse_base_form(buffer, &structure);
    }
    if config.include_structure {
        name.structure = Some(structure);
    }
    Some(name)
}

/// `[Ion]` in the last constituent of a compound, in output that starts
/// neither with a hyphen nor as an abbreviation.
fn is_organization_name(buffer: &OutputBuffer) -> bool {
    let tokens = buffer.tokens();
    match tokens.first() {
        None => return false,
        Some(first) if first.first_char() == Some('-') || first.is(&Tag::Abbreviation) => {
            return false;
        }
        Some(_) => {}
    }

    for (i, token) in tokens.iter().enumerate().rev() {
        if token.is(&Tag::CompoundBoundary) {
            return false;
        }
        if token.is(&Tag::OrganizationName) {
            return tokens[..i].iter().any(|t| t.is(&Tag::CompoundBoundary));
        }
    }
    false
}
