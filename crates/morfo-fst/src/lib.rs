//! VFST dictionary loading and transducer traversal.
//!
//! A VFST file is a compiled finite state transducer: a 16-byte header, a
//! symbol table and a flat transition table in either the unweighted (8-byte)
//! or the weighted (16-byte) layout. [`Dictionary::load`] validates the whole
//! image once and produces an immutable value that any number of threads may
//! traverse concurrently.
//!
//! # Architecture
//!
//! - [`format`] -- Binary header parsing and version checks
//! - [`symbols`] -- Symbol table (char-to-index and index-to-string mapping)
//! - [`flags`] -- Flag diacritic operations (P, C, U, R, D)
//! - [`transition`] -- Transition cell layouts shared by both table variants
//! - [`dictionary`] -- Loading, validation and symbol lookup
//! - [`traversal`] -- Lazy depth-first enumeration of accepting paths

pub mod dictionary;
pub mod flags;
pub mod format;
pub mod symbols;
pub mod transition;
pub mod traversal;

pub use dictionary::Dictionary;
pub use traversal::{Path, Paths, Step, TraversalLimits};

/// Error type for VFST loading.
///
/// Everything except [`DictionaryError::UnsupportedVersion`] and
/// [`DictionaryError::Io`] describes a malformed image; see
/// [`DictionaryError::is_malformed`].
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("invalid magic number in VFST header")]
    InvalidMagic,
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid symbol table: {0}")]
    InvalidSymbolTable(String),
    #[error("invalid flag diacritic: {0}")]
    InvalidFlagDiacritic(String),
    #[error("invalid transition at index {index}: {reason}")]
    InvalidTransition { index: usize, reason: String },
    #[error("unsupported VFST variant: {0}")]
    UnsupportedVersion(String),
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),
}

impl DictionaryError {
    /// Whether the image itself is broken, as opposed to being a variant of
    /// the format this crate does not read.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::UnsupportedVersion(_) | Self::Io(_))
    }
}

/// Default maximum number of outer-loop iterations spent looking for the
/// next accepting path.
pub const MAX_LOOP_COUNT: usize = 100_000;

/// Default maximum traversal stack depth.
pub const BUFFER_SIZE: usize = 2000;

/// Convert a path weight to a probability.
///
/// Weights are stored as negative log probabilities scaled by 100.
pub fn probability(weight: i32) -> f64 {
    (-f64::from(weight) / 100.0).exp()
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Builders for small in-memory VFST images.

    use crate::transition::{Transition, WeightedTransition};

    pub fn build_header(weighted: bool) -> Vec<u8> {
        let mut buf = vec![0u8; 16];
        buf[..4].copy_from_slice(&0x0001_3A6Eu32.to_le_bytes());
        buf[4..8].copy_from_slice(&0x0003_51FAu32.to_le_bytes());
        buf[8] = u8::from(weighted);
        buf
    }

    pub fn build_symbol_table(symbols: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(symbols.len() as u16).to_le_bytes());
        for s in symbols {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }
        buf
    }

    pub fn make_transition(sym_in: u16, sym_out: u16, target: u32, more: u8) -> Transition {
        Transition {
            sym_in,
            sym_out,
            trans_info: (target & 0x00FF_FFFF) | ((more as u32) << 24),
        }
    }

    pub fn make_final(more: u8) -> Transition {
        make_transition(0xFFFF, 0, 0, more)
    }

    pub fn make_weighted(
        sym_in: u32,
        sym_out: u32,
        target: u32,
        weight: i16,
        more: u8,
    ) -> WeightedTransition {
        WeightedTransition {
            sym_in,
            sym_out,
            target_state: target,
            weight,
            more_transitions: more,
            _reserved: 0,
        }
    }

    /// Assemble header, symbol table, alignment padding and transitions.
    pub fn build_unweighted(symbols: &[&str], transitions: &[Transition]) -> Vec<u8> {
        let mut data = build_header(false);
        data.extend_from_slice(&build_symbol_table(symbols));
        pad_to(&mut data, 8);
        for t in transitions {
            data.extend_from_slice(bytemuck::bytes_of(t));
        }
        data
    }

    pub fn build_weighted(symbols: &[&str], transitions: &[WeightedTransition]) -> Vec<u8> {
        let mut data = build_header(true);
        data.extend_from_slice(&build_symbol_table(symbols));
        pad_to(&mut data, 16);
        for t in transitions {
            data.extend_from_slice(bytemuck::bytes_of(t));
        }
        data
    }

    fn pad_to(data: &mut Vec<u8>, alignment: usize) {
        let partial = data.len() % alignment;
        if partial > 0 {
            data.extend(std::iter::repeat_n(0u8, alignment - partial));
        }
    }
}
