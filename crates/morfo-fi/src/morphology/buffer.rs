// Token view over the output of one transducer path.
//
// The Finnish transducer writes bracketed tags interleaved with surface
// characters, e.g.:
//   [Ln][Xp]koira[X]koira[Sn][Ny]
//
// Consecutive single-character symbols form one text token, every tag is a
// token of its own and epsilons are dropped. Each token remembers where it
// starts in the rendered text and how much input had been consumed when it
// ended, which is what lets segments carry exact input spans.

use morfo_core::tags::Tag;
use morfo_fst::{Dictionary, Path};

// Parameter block markers.
pub(crate) const XP: &str = "[Xp]";
pub(crate) const XJ: &str = "[Xj]";
pub(crate) const XR: &str = "[Xr]";
pub(crate) const X_END: &str = "[X]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    /// Characters of a text token, or the bracketed spelling of a tag.
    pub text: String,
    /// Parsed tag, `None` for text tokens.
    pub tag: Option<Tag>,
    /// Character offset of the token in the rendered output.
    pub offset: usize,
    /// Number of input symbols consumed up to the end of this token.
    pub input_end: usize,
}

impl Token {
    pub fn is_text(&self) -> bool {
        self.tag.is_none()
    }

    /// Tag with exactly this spelling, brackets included.
    pub fn is_raw(&self, raw: &str) -> bool {
        self.tag.is_some() && self.text == raw
    }

    pub fn is(&self, tag: &Tag) -> bool {
        self.tag.as_ref() == Some(tag)
    }

    fn tag_starts_with(&self, prefix: &str) -> bool {
        self.tag.is_some() && self.text.starts_with(prefix)
    }

    /// Any `[L…]` word class tag.
    pub fn is_class_tag(&self) -> bool {
        self.tag_starts_with("[L")
    }

    /// Proper name classes `[Lee]`, `[Les]`, `[Lep]`, `[Lem]`.
    pub fn is_name_tag(&self) -> bool {
        self.tag_starts_with("[Le")
    }

    /// Opening or closing marker of a parameter block.
    pub fn is_parameter(&self) -> bool {
        self.tag_starts_with("[X")
    }

    pub fn is_base_form_parameter(&self) -> bool {
        self.is_raw(XP) || self.is_raw(XJ)
    }

    pub fn is_boundary(&self) -> bool {
        self.tag_starts_with("[B")
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct OutputBuffer {
    tokens: Vec<Token>,
    contents: String,
    char_len: usize,
}

impl OutputBuffer {
    /// Tokenize the output of `path`.
    pub fn from_path(path: &Path, dictionary: &Dictionary) -> Self {
        let mut consumed = 0;
        let symbols = path.steps.iter().map(|step| {
            if step.input.is_some() {
                consumed += 1;
            }
            (dictionary.symbol_str(step.output), consumed)
        });
        Self::from_symbols(symbols)
    }

    /// Build from `(symbol, input consumed so far)` pairs.
    pub fn from_symbols<'a, I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let mut buffer = Self::default();
        let mut previous_char = false;

        for (symbol, consumed) in symbols {
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (None, _) => {
                    // Input consumed without output belongs to the running text.
                    if let Some(last) = buffer.tokens.last_mut().filter(|t| t.is_text()) {
                        last.input_end = consumed;
                    }
                }
                (Some(ch), None) => {
                    if previous_char {
                        if let Some(last) = buffer.tokens.last_mut() {
                            last.text.push(ch);
                            last.input_end = consumed;
                        }
                    } else {
                        buffer.tokens.push(Token {
                            text: ch.to_string(),
                            tag: None,
                            offset: buffer.char_len,
                            input_end: consumed,
                        });
                        previous_char = true;
                    }
                    buffer.contents.push(ch);
                    buffer.char_len += 1;
                }
                (Some(_), Some(_)) => {
                    let tag = Tag::parse(symbol)
                        .unwrap_or_else(|| Tag::Unknown(symbol.to_string()));
                    buffer.tokens.push(Token {
                        text: symbol.to_string(),
                        tag: Some(tag),
                        offset: buffer.char_len,
                        input_end: consumed,
                    });
                    buffer.contents.push_str(symbol);
                    buffer.char_len += symbol.chars().count();
                    previous_char = false;
                }
            }
        }

        buffer
    }

    /// Tokenize a rendered output string. Every character outside brackets
    /// and parameter blocks counts as one consumed input symbol.
    #[cfg(test)]
    pub fn parse(output: &str) -> Self {
        let mut symbols = Vec::new();
        let mut consumed = 0;
        let mut in_parameter = false;
        let mut rest = output;
        while let Some(ch) = rest.chars().next() {
            let len = if ch == '[' {
                rest.find(']').map_or(rest.len(), |i| i + 1)
            } else {
                if !in_parameter {
                    consumed += 1;
                }
                ch.len_utf8()
            };
            let symbol = &rest[..len];
            if symbol.starts_with("[X") {
                in_parameter = symbol != X_END;
            }
            symbols.push((symbol, consumed));
            rest = &rest[len..];
        }
        Self::from_symbols(symbols)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The whole rendered output.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Length of the rendered output in characters.
    pub fn total_len(&self) -> usize {
        self.char_len
    }

    /// Contents of the parameter block opened at `at`, and the index of its
    /// last token.
    pub fn read_parameter(&self, at: usize) -> (&str, usize) {
        match self.tokens.get(at + 1) {
            None => ("", at),
            Some(next) if next.is_raw(X_END) => ("", at + 1),
            Some(next) => {
                let end = if at + 2 < self.tokens.len() { at + 2 } else { at + 1 };
                (next.text.as_str(), end)
            }
        }
    }

    /// Index of the `[X]` closing the block opened at `at`, or of the last
    /// token if the block is never closed.
    pub fn skip_parameter(&self, at: usize) -> usize {
        let mut i = at;
        while i + 1 < self.tokens.len() {
            i += 1;
            if self.tokens[i].is_raw(X_END) {
                break;
            }
        }
        i
    }

    pub fn contains_after(&self, at: usize, pred: impl Fn(&Token) -> bool) -> bool {
        self.tokens.iter().skip(at + 1).any(pred)
    }

    pub fn next_is_raw(&self, at: usize, raw: &str) -> bool {
        self.tokens.get(at + 1).is_some_and(|t| t.is_raw(raw))
    }

    pub fn next_is_boundary(&self, at: usize) -> bool {
        self.tokens.get(at + 1).is_some_and(Token::is_boundary)
    }

    pub fn next_starts_with_digit(&self, at: usize) -> bool {
        self.tokens
            .get(at + 1)
            .and_then(Token::first_char)
            .is_some_and(|c| c.is_ascii_digit())
    }

    /// Whether the token at `at` exists and its text ends with `c`.
    pub fn ends_with_char(&self, at: Option<usize>, c: char) -> bool {
        at.and_then(|i| self.tokens.get(i))
            .and_then(Token::last_char)
            .is_some_and(|last| last == c)
    }

    pub fn first_char(&self) -> Option<char> {
        self.contents.chars().next()
    }

    pub fn first_is(&self, tag: &Tag) -> bool {
        self.tokens.first().is_some_and(|t| t.is(tag))
    }

    pub fn last_is(&self, tag: &Tag) -> bool {
        self.tokens.last().is_some_and(|t| t.is(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(buffer: &OutputBuffer) -> Vec<&str> {
        buffer.tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn characters_merge_and_tags_split() {
        let buffer = OutputBuffer::parse("[Ln][Xp]koira[X]koira[Sn][Ny]");
        assert_eq!(
            texts(&buffer),
            vec!["[Ln]", "[Xp]", "koira", "[X]", "koira", "[Sn]", "[Ny]"]
        );
        assert_eq!(buffer.contents(), "[Ln][Xp]koira[X]koira[Sn][Ny]");
        assert_eq!(buffer.total_len(), 29);
        assert!(buffer.tokens()[0].is(&Tag::Noun));
        assert!(buffer.tokens()[2].is_text());
    }

    #[test]
    fn offsets_count_characters() {
        let buffer = OutputBuffer::parse("[Lep]pää[Sn]");
        let offsets: Vec<usize> = buffer.tokens().iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 5, 8]);
        assert_eq!(buffer.total_len(), 12);
    }

    #[test]
    fn epsilon_symbols_are_skipped() {
        let buffer = OutputBuffer::from_symbols([("a", 1), ("", 1), ("b", 2), ("[Bc]", 2)]);
        assert_eq!(texts(&buffer), vec!["ab", "[Bc]"]);
        assert_eq!(buffer.tokens()[0].input_end, 2);
    }

    #[test]
    fn silent_input_extends_text_only() {
        let buffer = OutputBuffer::from_symbols([("a", 1), ("", 2), ("[Bc]", 2), ("", 3), ("b", 4)]);
        let ends: Vec<usize> = buffer.tokens().iter().map(|t| t.input_end).collect();
        assert_eq!(ends, vec![2, 2, 4]);
    }

    #[test]
    fn parameter_blocks() {
        let buffer = OutputBuffer::parse("[Xp]koira[X]koira[Xs]123[X][Xr][X]");
        assert_eq!(buffer.read_parameter(0), ("koira", 2));
        assert_eq!(buffer.skip_parameter(4), 6);
        assert_eq!(buffer.read_parameter(7), ("", 8));
        assert!(buffer.tokens()[0].is_base_form_parameter());
        assert!(buffer.tokens()[2].is_raw(X_END));
    }

    #[test]
    fn unclosed_parameter_stops_at_end() {
        let buffer = OutputBuffer::parse("[Xp]koira");
        assert_eq!(buffer.read_parameter(0), ("koira", 1));
        assert_eq!(buffer.skip_parameter(0), 1);
        let lone = OutputBuffer::parse("[Xp]");
        assert_eq!(lone.read_parameter(0), ("", 0));
    }

    #[test]
    fn neighbour_queries() {
        let buffer = OutputBuffer::parse("[Lu]5[Bc]-[Bh]vuotias[Ln]");
        assert!(buffer.next_starts_with_digit(0));
        assert!(buffer.next_is_boundary(1));
        assert!(buffer.next_is_raw(3, "[Bh]"));
        assert!(buffer.ends_with_char(Some(3), '-'));
        assert!(!buffer.ends_with_char(None, '-'));
        assert!(buffer.first_is(&Tag::Numeral));
        assert!(buffer.last_is(&Tag::Noun));
        assert!(buffer.contains_after(0, |t| t.is(&Tag::HyphenBoundary)));
        assert!(!buffer.contains_after(5, |t| t.is(&Tag::HyphenBoundary)));
    }
}
