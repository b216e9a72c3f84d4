// Base-form parts for full-text indexing.

use morfo_core::analysis::{Word, WordPart};
use morfo_core::character::trim_hyphens;

/// Every base form a search index should know the word by: the declared
/// base forms of each part, the uninflected parts themselves, and the
/// compound tails ending in an uninflected part.
pub(crate) fn parse_base_form_parts(word: &Word) -> Vec<String> {
    let parts = &word.parts;
    let mut result: Vec<String> = Vec::new();

    for part in parts {
        result.extend(part.base_forms().into_iter().map(str::to_string));
        if part.is_in_base_form() && !part.is_proper_noun() {
            let text = part.text();
            let trimmed = trim_hyphens(&text);
            if !result.iter().any(|r| r == trimmed) {
                result.push(trimmed.to_string());
            }
        }
    }

    for (i, part) in parts.iter().enumerate() {
        if !part.is_in_base_form() {
            continue;
        }
        let first = if i + 1 == parts.len() { 1 } else { 0 };
        for j in first..i {
            result.push(join_tail(&parts[j..=i]));
        }
    }

    result
}

fn join_tail(parts: &[WordPart]) -> String {
    let mut joined = String::new();
    for (n, part) in parts.iter().enumerate() {
        let text = part.text();
        if n + 1 == parts.len() {
            joined.push_str(trim_hyphens(&text));
        } else {
            joined.push_str(&text);
        }
    }
    joined
}
