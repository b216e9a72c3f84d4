// Symbol table: char-to-index and index-to-string mapping.

use crate::DictionaryError;
use crate::flags::{FlagDiacritic, FlagDiacriticParser};
use hashbrown::HashMap;

/// Parsed symbol table of a VFST image.
///
/// Symbols are ordered in the binary as:
/// 1. Epsilon (index 0) -- empty string
/// 2. Flag diacritics -- `@P.FEAT.VAL@` and friends
/// 3. Single-character symbols -- `a`, `ä`, `-`
/// 4. Multi-character symbols -- `[Ln]`, `[Bc]`
#[derive(Debug)]
pub struct SymbolTable {
    /// Symbol index to its string form.
    pub strings: Vec<String>,
    /// Single character to its symbol index (normal characters only).
    pub char_to_symbol: HashMap<char, u16>,
    /// Parsed flag diacritics, indexed by symbol below `first_normal_char`.
    /// Index 0 (epsilon) is `None`.
    pub diacritics: Vec<Option<FlagDiacritic>>,
    /// Index of the first symbol that is neither epsilon nor a flag.
    pub first_normal_char: u16,
    /// Index of the first multi-character symbol.
    pub first_multi_char: u16,
    /// Number of distinct flag diacritic features.
    pub flag_feature_count: u16,
}

impl SymbolTable {
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// String form of a symbol, or `""` for an index outside the table.
    pub fn as_str(&self, symbol: u16) -> &str {
        self.strings.get(symbol as usize).map_or("", String::as_str)
    }

    /// Whether the symbol is epsilon or a flag diacritic.
    #[inline]
    pub fn is_special(&self, symbol: u16) -> bool {
        symbol < self.first_normal_char
    }

    /// Flag diacritic for a special symbol. `None` for epsilon.
    #[inline]
    pub fn diacritic(&self, symbol: u16) -> Option<&FlagDiacritic> {
        self.diacritics.get(symbol as usize).and_then(Option::as_ref)
    }

    /// Find a symbol by its exact string form.
    pub fn find(&self, name: &str) -> Option<u16> {
        self.strings
            .iter()
            .position(|s| s == name)
            .map(|i| i as u16)
    }

    /// Multi-character symbols in table order.
    pub fn multi_char_symbols(&self) -> &[String] {
        &self.strings[self.first_multi_char as usize..]
    }
}

/// Parse the symbol table starting at `offset`.
///
/// Returns the table and the byte offset just past it, before any alignment
/// padding.
pub fn parse_symbol_table(
    data: &[u8],
    offset: usize,
) -> Result<(SymbolTable, usize), DictionaryError> {
    if offset + 2 > data.len() {
        return Err(DictionaryError::TooShort {
            expected: offset + 2,
            actual: data.len(),
        });
    }

    let symbol_count = u16::from_le_bytes([data[offset], data[offset + 1]]);
    if symbol_count == 0 {
        return Err(DictionaryError::InvalidSymbolTable(
            "table has no epsilon symbol".to_string(),
        ));
    }
    let mut pos = offset + 2;

    let mut strings = Vec::with_capacity(symbol_count as usize);
    let mut char_to_symbol = HashMap::new();
    let mut diacritics = vec![None];
    let mut first_normal_char: Option<u16> = None;
    let mut first_multi_char: Option<u16> = None;
    let mut flag_parser = FlagDiacriticParser::new();

    for i in 0..symbol_count {
        let start = pos;
        let Some(len) = data[start..].iter().position(|&b| b == 0) else {
            return Err(DictionaryError::InvalidSymbolTable(format!(
                "symbol {i} is not terminated"
            )));
        };
        pos = start + len + 1;

        if i == 0 {
            strings.push(String::new());
            continue;
        }

        let symbol = std::str::from_utf8(&data[start..start + len]).map_err(|_| {
            DictionaryError::InvalidSymbolTable(format!("invalid UTF-8 in symbol {i}"))
        })?;

        match first_normal_char {
            None if symbol.starts_with('@') => {
                diacritics.push(Some(flag_parser.parse(symbol)?));
            }
            None => first_normal_char = Some(i),
            Some(_) => {
                if first_multi_char.is_none() && symbol.starts_with('[') {
                    first_multi_char = Some(i);
                }
            }
        }

        if first_normal_char.is_some() && first_multi_char.is_none() {
            let mut chars = symbol.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                char_to_symbol.insert(ch, i);
            }
        }

        strings.push(symbol.to_string());
    }

    let first_normal_char = first_normal_char.unwrap_or(symbol_count);
    let first_multi_char = first_multi_char.unwrap_or(symbol_count);

    Ok((
        SymbolTable {
            strings,
            char_to_symbol,
            diacritics,
            first_normal_char,
            first_multi_char,
            flag_feature_count: flag_parser.feature_count(),
        },
        pos,
    ))
}
