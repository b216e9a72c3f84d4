// Compound validity checks on transducer output.
//
// A seam between identical vowels, or after a digit, must be written with a
// hyphen; any other seam must not be, unless a tag allows it. A compound that
// starts as a proper name and ends as a common noun is rejected unless the
// dictionary marks it with `[Ica]`.

use morfo_core::character::{is_vowel, simple_lower};
use morfo_core::tags::Tag;

use super::buffer::OutputBuffer;

/// Why a path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    /// A seam that needs a hyphen was written without one.
    MissingHyphen,
    /// A seam that forbids a hyphen was written with one.
    UnexpectedHyphen,
    /// The compound starts as a proper name and ends as a common noun.
    ProperNameWithCommonHead,
}

/// Check the output of a path; `None` means it is valid.
pub(crate) fn rejection(buffer: &OutputBuffer) -> Option<Rejection> {
    let tokens = buffer.tokens();
    let mut before_last_char = '\0';
    let mut last_char = '\0';
    let mut boundary_passed = false;
    let mut hyphen_present = false;
    let mut hyphen_allowed = false;
    let mut hyphen_allowed_just_set = false;
    let mut hyphen_required = false;
    let mut required_hyphen_missing = false;
    let mut starts_with_proper_noun = false;
    let mut ends_with_non_ica_noun = false;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match &token.tag {
            Some(Tag::QuotationLoan) => {
                hyphen_allowed = true;
                hyphen_allowed_just_set = true;
            }
            Some(Tag::HyphenRequired) => {
                boundary_passed = false;
                hyphen_allowed = true;
                hyphen_required = true;
            }
            Some(Tag::HyphenOptional) => {
                required_hyphen_missing = false;
                ends_with_non_ica_noun = false;
            }
            Some(_) if token.is_name_tag() => {
                starts_with_proper_noun = true;
                ends_with_non_ica_noun = false;
            }
            Some(Tag::Noun | Tag::NounAdjective) => ends_with_non_ica_noun = true,
            Some(Tag::DerivedCommonNoun) => starts_with_proper_noun = false,
            Some(_) if token.is_parameter() => i = buffer.skip_parameter(i),
            Some(Tag::HyphenBoundary) => {
                boundary_passed = true;
                hyphen_present = false;
                if required_hyphen_missing {
                    return Some(Rejection::MissingHyphen);
                }
                if hyphen_required {
                    required_hyphen_missing = true;
                }
            }
            Some(_) => {}
            None => {
                let len = token.text.chars().count();
                for (pos, current) in token.text.chars().enumerate() {
                    if current == '-' {
                        starts_with_proper_noun = false;
                        ends_with_non_ica_noun = false;
                        if pos + 1 == len && buffer.next_is_raw(i, "[Bh]") {
                            // The hyphen carries this boundary, so `[Bh]` is consumed here.
                            i += 1;
                            boundary_passed = true;
                            hyphen_present = true;
                        }
                        continue;
                    }
                    if boundary_passed {
                        if last_char == '\0' || (before_last_char == 'i' && last_char == 's') {
                            hyphen_allowed = true;
                        }
                        if hyphen_present {
                            hyphen_required = false;
                        }
                        if !hyphen_allowed || !hyphen_present {
                            last_char = simple_lower(last_char);
                            let need_hyphen = (last_char == simple_lower(current) && is_vowel(last_char))
                                || last_char.is_ascii_digit();
                            if need_hyphen != hyphen_present {
                                return Some(if need_hyphen {
                                    Rejection::MissingHyphen
                                } else {
                                    Rejection::UnexpectedHyphen
                                });
                            }
                        }
                        boundary_passed = false;
                        if hyphen_allowed_just_set {
                            hyphen_allowed_just_set = false;
                        } else {
                            hyphen_allowed = false;
                        }
                    }
                    before_last_char = last_char;
                    last_char = current;
                }
            }
        }
        i += 1;
    }

    if required_hyphen_missing {
        Some(Rejection::MissingHyphen)
    } else if starts_with_proper_noun && ends_with_non_ica_noun {
        Some(Rejection::ProperNameWithCommonHead)
    } else {
        None
    }
}
