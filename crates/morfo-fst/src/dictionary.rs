// Dictionary loading and validation.

use std::collections::VecDeque;
use std::path::Path as FsPath;

use bytemuck::Zeroable;

use crate::DictionaryError;
use crate::format::{self, HEADER_SIZE};
use crate::symbols::{self, SymbolTable};
use crate::transition::{Cell, Transition, WeightedTransition, has_overflow, max_offset};
use crate::traversal::{Paths, TraversalLimits};

/// Transition table in one of the two cell layouts.
pub(crate) enum TransitionTable {
    Unweighted(Vec<Transition>),
    Weighted(Vec<WeightedTransition>),
}

impl TransitionTable {
    fn len(&self) -> usize {
        match self {
            Self::Unweighted(cells) => cells.len(),
            Self::Weighted(cells) => cells.len(),
        }
    }
}

/// A loaded, validated VFST transducer.
///
/// The value is immutable after [`Dictionary::load`] and can be shared
/// between threads behind an `Arc` or a plain reference. Each call to
/// [`Dictionary::traverse`] owns its own traversal state.
pub struct Dictionary {
    symbols: SymbolTable,
    table: TransitionTable,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("weighted", &self.is_weighted())
            .field("transition_count", &self.table.len())
            .field("symbol_count", &self.symbols.len())
            .field("first_normal_char", &self.symbols.first_normal_char)
            .field("first_multi_char", &self.symbols.first_multi_char)
            .finish()
    }
}

impl Dictionary {
    /// Load a dictionary from a VFST image.
    ///
    /// The transition table is copied into owned, aligned storage, so `data`
    /// may be dropped afterwards. Every state reachable from the start state
    /// is checked before this returns: transition counts, symbol indices and
    /// target states must all stay inside their tables, which keeps
    /// traversal free of bounds failures.
    pub fn load(data: &[u8]) -> Result<Self, DictionaryError> {
        let header = format::parse_header(data)?;
        let (symbols, sym_end) = symbols::parse_symbol_table(data, HEADER_SIZE)?;

        let table = if header.weighted {
            let cells = read_cells::<WeightedTransition>(data, sym_end)?;
            validate(&cells, &symbols)?;
            TransitionTable::Weighted(cells)
        } else {
            let cells = read_cells::<Transition>(data, sym_end)?;
            validate(&cells, &symbols)?;
            TransitionTable::Unweighted(cells)
        };

        tracing::debug!(
            weighted = header.weighted,
            symbols = symbols.len(),
            transitions = table.len(),
            flag_features = symbols.flag_feature_count,
            "loaded dictionary"
        );

        Ok(Self { symbols, table })
    }

    /// Read and load a dictionary file.
    pub fn from_file(path: impl AsRef<FsPath>) -> Result<Self, DictionaryError> {
        let data = std::fs::read(path.as_ref())?;
        Self::load(&data)
    }

    pub fn is_weighted(&self) -> bool {
        matches!(self.table, TransitionTable::Weighted(_))
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn transition_count(&self) -> usize {
        self.table.len()
    }

    /// Index of the first symbol that is neither epsilon nor a flag.
    pub fn first_normal_char(&self) -> u16 {
        self.symbols.first_normal_char
    }

    /// Symbol index for a single input character.
    pub fn symbol_of(&self, ch: char) -> Option<u16> {
        self.symbols.char_to_symbol.get(&ch).copied()
    }

    /// Map every character of `word` to its symbol, or `None` if any
    /// character is unknown to the dictionary.
    pub fn symbols_for(&self, word: &str) -> Option<Vec<u16>> {
        word.chars().map(|ch| self.symbol_of(ch)).collect()
    }

    /// Symbol index for an exact symbol string such as `"[Ln]"`.
    pub fn symbol(&self, name: &str) -> Option<u16> {
        self.symbols.find(name)
    }

    /// String form of a symbol. Epsilon and unknown indices give `""`.
    pub fn symbol_str(&self, symbol: u16) -> &str {
        self.symbols.as_str(symbol)
    }

    /// Multi-character symbols (tags) declared by the dictionary.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.symbols.multi_char_symbols().iter().map(String::as_str)
    }

    /// Enumerate accepting paths for `input` with the default limits.
    pub fn traverse(&self, input: &[u16]) -> Paths<'_> {
        self.traverse_with(input, TraversalLimits::default())
    }

    pub fn traverse_with(&self, input: &[u16], limits: TraversalLimits) -> Paths<'_> {
        Paths::new(&self.table, &self.symbols, input, limits)
    }
}

/// Copy the transition table that follows the symbol table.
///
/// The table starts at the next multiple of the cell size.
fn read_cells<C: Cell>(data: &[u8], sym_end: usize) -> Result<Vec<C>, DictionaryError> {
    let cell_size = size_of::<C>();
    let partial = sym_end % cell_size;
    let offset = if partial > 0 {
        sym_end + (cell_size - partial)
    } else {
        sym_end
    };

    if offset + cell_size > data.len() {
        return Err(DictionaryError::TooShort {
            expected: offset + cell_size,
            actual: data.len(),
        });
    }

    let remaining = &data[offset..];
    let count = remaining.len() / cell_size;
    if remaining.len() % cell_size != 0 {
        return Err(DictionaryError::InvalidTransition {
            index: count,
            reason: format!(
                "table ends with a partial cell of {} bytes",
                remaining.len() % cell_size
            ),
        });
    }

    let mut cells = vec![C::zeroed(); count];
    bytemuck::cast_slice_mut::<C, u8>(&mut cells).copy_from_slice(remaining);
    Ok(cells)
}

/// Breadth-first check of every state reachable from state 0.
fn validate<C: Cell>(cells: &[C], symbols: &SymbolTable) -> Result<(), DictionaryError> {
    let len = cells.len();
    let symbol_count = symbols.len() as u32;
    let invalid = |index: usize, reason: String| DictionaryError::InvalidTransition { index, reason };

    let mut visited = vec![false; len];
    let mut queue = VecDeque::from([0u32]);
    visited[0] = true;

    while let Some(state) = queue.pop_front() {
        let head = state as usize;
        let overflow = has_overflow(cells, state);
        if overflow && head + 1 >= len {
            return Err(invalid(head, "overflow cell lies past the table".to_string()));
        }

        let max = max_offset(cells, state) as usize;
        if head + max >= len {
            return Err(invalid(
                head,
                format!("state has {} transitions but the table ends first", max + 1),
            ));
        }

        for offset in 0..=max {
            if offset == 1 && overflow {
                continue;
            }
            let index = head + offset;
            let cell = &cells[index];
            if cell.is_final() {
                continue;
            }
            if cell.sym_in() >= symbol_count {
                return Err(invalid(index, format!("input symbol {} out of range", cell.sym_in())));
            }
            if cell.sym_out() >= symbol_count {
                return Err(invalid(
                    index,
                    format!("output symbol {} out of range", cell.sym_out()),
                ));
            }
            let target = cell.target() as usize;
            if target >= len {
                return Err(invalid(index, format!("target state {target} out of range")));
            }
            if !visited[target] {
                visited[target] = true;
                queue.push_back(cell.target());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use crate::transition::OverflowCell;

    const SYMBOLS: &[&str] = &["", "a", "b", "x", "y", "[Ln]", "[Bc]"];

    fn simple_image() -> Vec<u8> {
        build_unweighted(
            SYMBOLS,
            &[
                make_transition(1, 3, 1, 0), // a:x -> 1
                make_transition(2, 4, 2, 0), // b:y -> 2
                make_final(0),
            ],
        )
    }

    #[test]
    fn load_unweighted() {
        let dict = Dictionary::load(&simple_image()).unwrap();
        assert!(!dict.is_weighted());
        assert_eq!(dict.transition_count(), 3);
        assert_eq!(dict.first_normal_char(), 1);
        assert_eq!(dict.symbol_of('a'), Some(1));
        assert_eq!(dict.symbol_of('z'), None);
        assert_eq!(dict.symbols_for("ab"), Some(vec![1, 2]));
        assert_eq!(dict.symbols_for("az"), None);
        assert_eq!(dict.symbol("[Bc]"), Some(6));
        assert_eq!(dict.symbol_str(5), "[Ln]");
        assert_eq!(dict.tags().collect::<Vec<_>>(), vec!["[Ln]", "[Bc]"]);
    }

    #[test]
    fn load_weighted() {
        let data = build_weighted(
            SYMBOLS,
            &[make_weighted(1, 3, 1, 10, 0), make_weighted(0xFFFF_FFFF, 0, 0, 0, 0)],
        );
        let dict = Dictionary::load(&data).unwrap();
        assert!(dict.is_weighted());
        assert_eq!(dict.transition_count(), 2);
    }

    #[test]
    fn reject_missing_transition_table() {
        let mut data = build_header(false);
        data.extend_from_slice(&build_symbol_table(SYMBOLS));
        let err = Dictionary::load(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::TooShort { .. }));
    }

    #[test]
    fn reject_partial_cell() {
        let mut data = simple_image();
        data.extend_from_slice(&[0u8; 3]);
        let err = Dictionary::load(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidTransition { index: 3, .. }));
    }

    #[test]
    fn reject_target_out_of_range() {
        let data = build_unweighted(SYMBOLS, &[make_transition(1, 3, 9, 0), make_final(0)]);
        let err = Dictionary::load(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidTransition { index: 0, .. }));
        assert!(err.is_malformed());
    }

    #[test]
    fn reject_symbol_out_of_range() {
        let data = build_unweighted(SYMBOLS, &[make_transition(1, 40, 1, 0), make_final(0)]);
        let err = Dictionary::load(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidTransition { index: 0, .. }));

        let data = build_unweighted(SYMBOLS, &[make_transition(7, 1, 1, 0), make_final(0)]);
        assert!(Dictionary::load(&data).is_err());
    }

    #[test]
    fn reject_state_running_past_table() {
        // Head claims four transitions, only two cells exist.
        let data = build_unweighted(SYMBOLS, &[make_transition(1, 3, 1, 3), make_final(0)]);
        let err = Dictionary::load(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidTransition { index: 0, .. }));
    }

    #[test]
    fn reject_overflow_cell_past_table() {
        let data = build_unweighted(SYMBOLS, &[make_transition(1, 3, 0, 255)]);
        assert!(matches!(
            Dictionary::load(&data),
            Err(DictionaryError::InvalidTransition { index: 0, .. })
        ));
    }

    #[test]
    fn accept_overflow_state() {
        let overflow: Transition = bytemuck::cast(OverflowCell {
            more_transitions: 1,
            _padding: 0,
        });
        let data = build_unweighted(
            SYMBOLS,
            &[
                make_transition(1, 3, 3, 255),
                overflow,
                make_transition(2, 4, 3, 0),
                make_final(0),
            ],
        );
        assert!(Dictionary::load(&data).is_ok());
    }

    #[test]
    fn unreachable_cells_are_not_checked() {
        let data = build_unweighted(
            SYMBOLS,
            &[make_final(0), make_transition(1, 3, 999, 0)],
        );
        assert!(Dictionary::load(&data).is_ok());
    }

    #[test]
    fn dictionary_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dictionary>();
    }

    #[test]
    fn from_file_reports_io_errors() {
        let err = Dictionary::from_file("/nonexistent/morfo/mor.vfst").unwrap_err();
        assert!(matches!(err, DictionaryError::Io(_)));
        assert!(!err.is_malformed());
    }
}
