// Base form (lemma) reconstruction.
//
// The surface characters of the output are copied, cased by the structure
// string, and every `[Xp]`/`[Xj]` block replaces the text emitted since it
// started with the base form it declares. Numerals follow their own rules.

use morfo_core::character::simple_upper;
use morfo_core::tags::Tag;

use super::buffer::OutputBuffer;
use super::structure::convert;

/// Base form of the analysed word, or `None` if the output does not yield one.
pub(crate) fn parse_base_form(buffer: &OutputBuffer, structure: &str) -> Option<String> {
    let tokens = buffer.tokens();
    let mut base_form = String::with_capacity(buffer.total_len());
    let mut latest: Option<String> = None;
    let mut latest_start = 0;
    let mut hyphens_in_latest = 0;
    let mut allow_de = true;
    let mut inside_de = false;
    let mut class_tag_seen = false;
    let mut structure_symbols = structure.chars().filter(|&c| c != '=');

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.is_text() {
            let chars: Vec<char> = token.text.chars().collect();
            for (pos, &c) in chars.iter().enumerate() {
                if c == '-' {
                    if hyphens_in_latest > 0 {
                        hyphens_in_latest -= 1;
                    } else {
                        // "Isolla-Britannialla" needs "Isolla" replaced with "Iso",
                        // but "-is" is never replaced ("Pohjois-Suomella").
                        let after_is = pos >= 2 && chars[pos - 2] == 'i' && chars[pos - 1] == 's';
                        if inside_de
                            && !after_is
                            && buffer.contains_after(i, |t| t.is(&Tag::PlaceName))
                        {
                            if let Some(replacement) = &latest {
                                base_form.truncate(latest_start);
                                base_form.push_str(&capitalize(replacement));
                            }
                        }
                        latest = None;
                    }
                    inside_de = false;
                }
                base_form.push(structure_symbols.next().map_or(c, |s| convert(s, c)));
            }
        } else if token.is_base_form_parameter() {
            let (contents, end) = buffer.read_parameter(i);
            let declared: String = contents.chars().filter(|&c| c != '=').collect();
            hyphens_in_latest = declared.chars().filter(|&c| c == '-').count();
            latest_start = base_form.len();
            latest = Some(declared);
            i = end;
        } else if token.is_parameter() {
            i = buffer.skip_parameter(i);
        } else if token.is(&Tag::CapitalizedPrefix) {
            inside_de = allow_de;
        } else if token.is_class_tag() {
            if !class_tag_seen && token.is(&Tag::Numeral) {
                if let Some(numeral) = parse_numeral_base_form(buffer, i) {
                    base_form.push_str(&numeral);
                    return Some(base_form);
                }
            }
            class_tag_seen = true;
            inside_de = false;
            allow_de = token.is(&Tag::Adjective) || token.is(&Tag::NounAdjective);
        }
        i += 1;
    }

    if let Some(declared) = latest {
        base_form.truncate(latest_start);
        base_form.push_str(&declared);
    }

    (!base_form.is_empty()).then_some(base_form)
}

/// Numeral rules, starting after the `[Lu]` at `at`. Digit sequences and
/// declared base forms are kept. `None` hands the word back to the general
/// rules.
fn parse_numeral_base_form(buffer: &OutputBuffer, at: usize) -> Option<String> {
    let tokens = buffer.tokens();
    let mut in_digit_sequence = false;
    let mut xp_passed = false;
    let mut base_form = String::new();

    if let Some(first) = tokens.get(at + 1).and_then(|t| t.first_char()) {
        in_digit_sequence = first.is_ascii_digit() || first == '-';
    }

    let mut i = at + 1;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.is_text() {
            if in_digit_sequence || !xp_passed {
                base_form.push_str(&token.text);
            } else {
                // Past the declared form only the letter after each hyphen survives.
                let mut chars = token.text.chars();
                while let Some(c) = chars.next() {
                    if c == '-' {
                        if let Some(next) = chars.next() {
                            base_form.push(next);
                        }
                    }
                }
            }
        } else {
            if in_digit_sequence {
                in_digit_sequence = false;
                xp_passed = true;
            }
            if token.is_base_form_parameter() {
                let (contents, end) = buffer.read_parameter(i);
                base_form.push_str(contents);
                xp_passed = true;
                i = end;
            } else if token.is_parameter() {
                i = buffer.skip_parameter(i);
            } else if token.is(&Tag::CompoundBoundary) {
                if i + 1 == tokens.len() {
                    // An unfinished numeral is really a prefix.
                    return None;
                }
                xp_passed = false;
            } else if token.is(&Tag::Noun)
                || token.is(&Tag::Adjective)
                || token.is(&Tag::NounAdjective)
            {
                return None;
            }
        }
        i += 1;
    }

    Some(base_form)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => std::iter::once(simple_upper(first)).chain(chars).collect(),
        None => String::new(),
    }
}
