// Character helpers for Finnish text.

/// Finnish vowels (lowercase): a e i o u y ä ö
const FINNISH_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y', '\u{00E4}', '\u{00F6}'];

/// Check whether a character is a Finnish vowel (case-insensitive).
pub fn is_vowel(c: char) -> bool {
    FINNISH_VOWELS.contains(&simple_lower(c))
}

/// One-to-one lowercase mapping.
///
/// Characters whose lowercase form expands to several characters keep only
/// the first one, so the result always has the same length as the input.
pub fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// One-to-one uppercase mapping. See [`simple_lower`].
pub fn simple_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Lowercase every character with [`simple_lower`].
pub fn lower_each(s: &str) -> String {
    s.chars().map(simple_lower).collect()
}

/// Strip one leading and one trailing hyphen. A lone hyphen becomes empty.
pub fn trim_hyphens(s: &str) -> &str {
    let s = s.strip_prefix('-').unwrap_or(s);
    s.strip_suffix('-').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowels() {
        for c in ['a', 'e', 'i', 'o', 'u', 'y', '\u{00E4}', '\u{00F6}'] {
            assert!(is_vowel(c), "{c} should be a vowel");
        }
        assert!(is_vowel('A'));
        assert!(is_vowel('\u{00C4}')); // Ä
        assert!(!is_vowel('k'));
        assert!(!is_vowel('1'));
    }

    #[test]
    fn case_mapping_keeps_length() {
        assert_eq!(simple_lower('K'), 'k');
        assert_eq!(simple_lower('\u{00D6}'), '\u{00F6}');
        assert_eq!(simple_upper('\u{00E4}'), '\u{00C4}');
        assert_eq!(simple_lower('5'), '5');
        // U+0130 lowercases to "i̇" (two chars); only the first is kept.
        assert_eq!(simple_lower('\u{0130}'), 'i');
    }

    #[test]
    fn lower_each_maps_per_char() {
        assert_eq!(lower_each("KISSA"), "kissa");
        assert_eq!(lower_each("Pohjois-Suomi").chars().count(), 13);
    }

    #[test]
    fn trimming_hyphens() {
        assert_eq!(trim_hyphens("-kin-"), "kin");
        assert_eq!(trim_hyphens("talo-"), "talo");
        assert_eq!(trim_hyphens("-talo"), "talo");
        assert_eq!(trim_hyphens("talo"), "talo");
        assert_eq!(trim_hyphens("-"), "");
        assert_eq!(trim_hyphens(""), "");
    }
}
