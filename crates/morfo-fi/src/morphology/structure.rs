// STRUCTURE attribute parsing.
//
// The structure string describes morpheme boundaries, letter case and
// hyphenation restrictions, one symbol per character of the word:
//
// - `=` start of a morpheme (also present at the start of the word)
// - `-` hyphen
// - `:` colon
// - `p` lowercase letter, `q` lowercase with hyphenation forbidden before it
// - `i` uppercase letter, `j` uppercase with hyphenation forbidden before it
//
// Examples: `Matti-niminen` gives `=ipppp-=ppppppp`, `DNA-näyte` gives
// `=jjj-=ppppp` and `autokauppa` gives `=pppp=pppppp`.

use morfo_core::character::{simple_lower, simple_upper};
use morfo_core::tags::Tag;

use super::buffer::{OutputBuffer, XR};

/// Build the structure string for a word of `word_len` characters.
pub(crate) fn parse_structure(buffer: &OutputBuffer, word_len: usize) -> String {
    let tokens = buffer.tokens();
    let mut structure: Vec<char> = Vec::with_capacity(word_len * 2 + 1);
    structure.push('=');

    let mut chars_missing = word_len;
    let mut chars_seen = 0;
    let mut chars_from_default = 0;
    let mut default_title_case = false;
    let mut is_abbr = false;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.is_text() {
            for (pos, c) in token.text.chars().enumerate() {
                match c {
                    '-' => {
                        if chars_seen > chars_from_default {
                            default_title_case = push_default(
                                &mut structure,
                                chars_seen - chars_from_default,
                                default_title_case,
                                is_abbr,
                            );
                            decrease_missing(&mut chars_missing, chars_seen, chars_from_default);
                            structure.push('-');
                            chars_seen = 0;
                            chars_from_default = 0;
                        } else if i != 0 || pos != 0 {
                            if chars_seen == chars_from_default {
                                structure.push('-');
                            } else {
                                chars_seen += 1;
                            }
                        }
                        chars_missing = chars_missing.saturating_sub(1);
                        if structure.len() == 1 {
                            structure[0] = '-';
                        }
                    }
                    ':' => {
                        if is_abbr {
                            if chars_seen > chars_from_default {
                                default_title_case = push_default(
                                    &mut structure,
                                    chars_seen - chars_from_default,
                                    default_title_case,
                                    true,
                                );
                                decrease_missing(&mut chars_missing, chars_seen, chars_from_default);
                                chars_seen = 0;
                                chars_from_default = 0;
                            }
                            is_abbr = false;
                        }
                        structure.push(':');
                        chars_missing = chars_missing.saturating_sub(1);
                    }
                    _ => chars_seen += 1,
                }
            }
        } else if token.is_boundary() && !token.is(&Tag::HyphenBoundary) {
            if token.offset == 1 {
                structure.push('=');
            }
            if chars_seen > chars_from_default {
                default_title_case = push_default(
                    &mut structure,
                    chars_seen - chars_from_default,
                    default_title_case,
                    is_abbr,
                );
                decrease_missing(&mut chars_missing, chars_seen, chars_from_default);
            }
            if token.offset != 1
                && token.offset + 5 < buffer.total_len()
                && structure.last() != Some(&'=')
            {
                structure.push('=');
            }
            chars_seen = 0;
            chars_from_default = 0;
        } else if token.is_raw(XR) {
            default_title_case = false;
            let (explicit, end) = buffer.read_parameter(i);
            for c in explicit.chars() {
                if chars_missing == 0 {
                    break;
                }
                structure.push(c);
                if c != '=' {
                    chars_from_default += 1;
                    if c != '-' {
                        chars_missing -= 1;
                    }
                }
            }
            i = end;
        } else if token.is_parameter() {
            i = buffer.skip_parameter(i);
        } else if token.is_name_tag() {
            default_title_case = true;
            is_abbr = false;
        } else if token.is_class_tag() {
            is_abbr = token.is(&Tag::Abbreviation)
                || token.is(&Tag::RomanNumeral)
                || (token.is(&Tag::Numeral) && buffer.next_starts_with_digit(i));
        }
        i += 1;
    }

    push_default(&mut structure, chars_missing, default_title_case, is_abbr);
    capitalize(&mut structure, buffer);

    structure.into_iter().collect()
}

/// Append `count` default symbols. Returns the title-case flag left over.
fn push_default(structure: &mut Vec<char>, count: usize, title_case: bool, abbr: bool) -> bool {
    if count == 0 {
        return title_case;
    }
    let mut remaining = count;
    if title_case {
        structure.push(if abbr { 'j' } else { 'i' });
        remaining -= 1;
    }
    let lower = if abbr { 'q' } else { 'p' };
    structure.extend(std::iter::repeat_n(lower, remaining));
    false
}

fn decrease_missing(chars_missing: &mut usize, chars_seen: usize, chars_from_default: usize) {
    let consumed = chars_seen - chars_from_default;
    // More characters than the word has means a lexicon error; keep going.
    if consumed <= *chars_missing {
        *chars_missing -= consumed;
    }
}

/// Case fix-ups driven by derivation tags.
///
/// `[Dg]` lowercases the uppercase letter after the current hyphen. After a
/// `[De]`, a hyphen followed by a place name (or ending the output)
/// capitalizes the first letter of the word.
fn capitalize(structure: &mut [char], buffer: &OutputBuffer) {
    let tokens = buffer.tokens();
    let mut is_de = false;
    let mut hyphens = 0;

    for (i, token) in tokens.iter().enumerate() {
        match &token.tag {
            Some(Tag::DerivedCommonNoun) => lowercase_after_hyphen(structure, hyphens),
            Some(Tag::CapitalizedPrefix) => is_de = true,
            Some(Tag::Noun) => is_de = false,
            Some(_) => {}
            None => {
                let count = token.text.chars().filter(|&c| c == '-').count();
                if count > 0
                    && is_de
                    && (buffer.contains_after(i, |t| t.is(&Tag::PlaceName)) || i + 1 == tokens.len())
                {
                    if let Some(first) = structure.iter_mut().find(|s| matches!(**s, 'i' | 'p')) {
                        *first = 'i';
                    }
                    return;
                }
                hyphens += count;
            }
        }
    }
}

fn lowercase_after_hyphen(structure: &mut [char], hyphen_index: usize) {
    let mut seen = 0;
    for symbol in structure.iter_mut() {
        match *symbol {
            'i' if seen == hyphen_index => *symbol = 'p',
            '-' => seen += 1,
            _ => {}
        }
    }
}

/// Apply a structure string to `c`, the next letter of the word.
pub(crate) fn convert(symbol: char, c: char) -> char {
    match symbol {
        'i' | 'j' => simple_upper(c),
        'p' | 'q' => simple_lower(c),
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure(output: &str, word: &str) -> String {
        parse_structure(&OutputBuffer::parse(output), word.chars().count())
    }

    #[test]
    fn simple_noun() {
        assert_eq!(structure("[Ln][Xp]koira[X]koira[Sn][Ny]", "koira"), "=ppppp");
    }

    #[test]
    fn compound_boundary_starts_morpheme() {
        assert_eq!(
            structure("[Ln][Xp]auto[X]auto[Sn][Ny][Bc][Ln][Xp]kauppa[X]kauppa[Sn][Ny]", "autokauppa"),
            "=pppp=pppppp"
        );
    }

    #[test]
    fn proper_name_is_title_case() {
        assert_eq!(structure("[Lee][Xp]Matti[X]matti[Sn][Ny]", "matti"), "=ipppp");
    }

    #[test]
    fn hyphenated_name_compound() {
        assert_eq!(
            structure("[Lee][Xp]Matti[X]matti-[Bh][Bc][Ll][Xp]niminen[X]niminen[Sn][Ny]", "Matti-niminen"),
            "=ipppp-=ppppppp"
        );
    }

    #[test]
    fn abbreviation_uses_no_hyphenation_symbols() {
        assert_eq!(
            structure("[La][Xp]DNA[X][Xr]jjj[X]dna-[Bh][Bc][Ln][Xp]näyte[X]näyte[Sn][Ny]", "DNA-näyte"),
            "=jjj-=ppppp"
        );
    }

    #[test]
    fn explicit_structure_block() {
        assert_eq!(structure("[Lep][Xr]ipp=ip[X]abcde[Sn][Ny]", "abcde"), "=ipp=ip");
    }

    #[test]
    fn leading_hyphen_replaces_start() {
        assert_eq!(structure("-[Ln]kin", "-kin"), "-ppp");
    }

    #[test]
    fn derived_common_noun_lowercases() {
        let s = structure(
            "[Lep][Xp]Pohjois[X]pohjois[Dg]-[Bh][Bc][Lep][Xp]Suomi[X]suomi[Sn][Ny]",
            "pohjois-suomi",
        );
        assert_eq!(s, "=ppppppp-=ipppp");
    }

    #[test]
    fn convert_follows_symbol() {
        assert_eq!(convert('i', 'a'), 'A');
        assert_eq!(convert('j', 'ä'), 'Ä');
        assert_eq!(convert('p', 'K'), 'k');
        assert_eq!(convert('-', '-'), '-');
    }
}
