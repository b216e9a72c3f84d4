// Segmentation of one transducer path.
//
// The output is cut at every run of boundary tags. Each piece becomes a
// segment carrying its exact span of the input word; the same pieces are
// grouped into word parts, where a `[Xp]` that declares `=`-separated base
// forms spans several pieces as one strong morpheme.

use morfo_core::analysis::{Segment, Word, WordPart};

use super::buffer::{OutputBuffer, XJ, XP};

/// Segments and word parts of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedWord {
    pub segments: Vec<Segment>,
    pub word: Word,
}

/// A piece of output between two boundary runs.
#[derive(Debug, Default)]
struct Piece {
    segment: Segment,
    /// Base forms as the word-part view sees them: a strong morpheme's
    /// declaration is not one of them.
    part_base_forms: Vec<String>,
    /// Base forms of a strong morpheme declared in this piece.
    strong_morpheme: Option<Vec<String>>,
}

impl Piece {
    fn is_hyphen_only(&self) -> bool {
        self.segment.form.chars().all(|c| c == '-') && self.segment.surface.chars().all(|c| c == '-')
    }
}

pub(crate) fn parse_word(buffer: &OutputBuffer, word: &str) -> ParsedWord {
    let pieces = split(buffer, word);
    ParsedWord {
        word: group_word_parts(&pieces),
        segments: merge_segments(pieces),
    }
}

fn split(buffer: &OutputBuffer, word: &str) -> Vec<Piece> {
    let chars: Vec<char> = word.chars().collect();
    let surface = |start: usize, end: usize| -> String {
        let end = end.min(chars.len());
        chars[start.min(end)..end].iter().collect()
    };

    let tokens = buffer.tokens();
    let mut pieces = Vec::new();
    let mut current = Piece::default();
    let mut start = 0;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match &token.tag {
            None => current.segment.form.push_str(&token.text),
            Some(_) if token.is_raw(XP) => {
                let (contents, end) = buffer.read_parameter(i);
                let declared: String = contents.chars().filter(|&c| c != '=').collect();
                let mut parts: Vec<&str> = contents.split('=').collect();
                while parts.last().is_some_and(|p| p.is_empty()) {
                    parts.pop();
                }
                if parts.len() > 1 {
                    current.strong_morpheme = Some(parts.into_iter().map(str::to_string).collect());
                } else if !declared.is_empty() {
                    current.part_base_forms.push(declared.clone());
                }
                if !declared.is_empty() {
                    current.segment.base_forms.push(declared);
                }
                i = end;
            }
            Some(_) if token.is_raw(XJ) => {
                let (contents, end) = buffer.read_parameter(i);
                let declared: String = current
                    .segment
                    .form
                    .chars()
                    .chain(contents.chars().filter(|&c| c != '='))
                    .collect();
                if !declared.is_empty() {
                    current.part_base_forms.push(declared.clone());
                    current.segment.base_forms.push(declared);
                }
                i = end;
            }
            Some(_) if token.is_parameter() => i = buffer.skip_parameter(i),
            Some(tag) if token.is_boundary() => {
                current.segment.tags.push(tag.clone());
                while buffer.next_is_boundary(i) {
                    i += 1;
                    if let Some(next) = &tokens[i].tag {
                        current.segment.tags.push(next.clone());
                    }
                }
                let end = tokens[i].input_end;
                current.segment.surface = surface(start, end);
                start = end;
                pieces.push(std::mem::take(&mut current));
            }
            Some(tag) => current.segment.tags.push(tag.clone()),
        }
        i += 1;
    }

    current.segment.surface = surface(start, chars.len());
    let Segment { surface, form, tags, .. } = &current.segment;
    if !surface.is_empty() || !form.is_empty() || !tags.is_empty() || pieces.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Segments with hyphen-only pieces folded into their neighbour, so every
/// surface except a bare hyphen holds a letter.
fn merge_segments(pieces: Vec<Piece>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::with_capacity(pieces.len());
    let mut carried: Option<Segment> = None;

    for piece in pieces {
        let hyphen_only = piece.is_hyphen_only();
        let mut segment = piece.segment;
        if hyphen_only {
            match segments.last_mut().or(carried.as_mut()) {
                Some(previous) => append(previous, segment),
                None => carried = Some(segment),
            }
            continue;
        }
        if let Some(mut prefix) = carried.take() {
            append(&mut prefix, segment);
            segment = prefix;
        }
        segments.push(segment);
    }

    segments.extend(carried);
    segments
}

fn append(target: &mut Segment, other: Segment) {
    target.surface.push_str(&other.surface);
    target.form.push_str(&other.form);
    target.tags.extend(other.tags);
    target.base_forms.extend(other.base_forms);
}

fn group_word_parts(pieces: &[Piece]) -> Word {
    let mut parts = Vec::new();
    let mut strong: Option<(std::vec::IntoIter<String>, String, Vec<Segment>)> = None;

    for piece in pieces {
        if let Some(declared) = &piece.strong_morpheme {
            strong = Some((declared.clone().into_iter(), declared.concat(), Vec::new()));
        }

        let mut segment = piece.segment.clone();
        segment.base_forms = piece.part_base_forms.clone();

        match strong.as_mut() {
            Some((remaining, _, gathered)) => {
                if let Some(base_form) = remaining.next().filter(|b| !b.is_empty()) {
                    segment.base_forms.push(base_form);
                }
                gathered.push(segment);
                if remaining.len() == 0 {
                    if let Some((_, base_form, gathered)) = strong.take() {
                        parts.push(WordPart::StrongMorpheme { parts: gathered, base_form });
                    }
                }
            }
            None => {
                if segment.form.chars().any(|c| c != '-') {
                    parts.push(WordPart::Single(segment));
                }
            }
        }
    }

    // A declaration with more parts than the path has is flushed as is.
    if let Some((_, base_form, gathered)) = strong {
        parts.push(WordPart::StrongMorpheme { parts: gathered, base_form });
    }

    Word { parts }
}
