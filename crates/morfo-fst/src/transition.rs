// Transition cells of the two VFST table layouts.

use bytemuck::{Pod, Zeroable};

/// Unweighted transition cell (8 bytes).
///
/// - `sym_in` (u16): input symbol index, `0xFFFF` marks a final cell
/// - `sym_out` (u16): output symbol index
/// - `trans_info` (u32): target state in bits 0-23, extra transition count
///   in bits 24-31
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Transition {
    pub sym_in: u16,
    pub sym_out: u16,
    pub trans_info: u32,
}

/// Input symbol of an unweighted final cell.
pub const UNWEIGHTED_FINAL_SYM: u16 = 0xFFFF;

impl Transition {
    #[inline]
    pub fn target_state(&self) -> u32 {
        self.trans_info & 0x00FF_FFFF
    }

    #[inline]
    pub fn more_transitions(&self) -> u8 {
        (self.trans_info >> 24) as u8
    }
}

/// Unweighted overflow cell, stored right after a state head whose
/// extra transition count is 255.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct OverflowCell {
    pub more_transitions: u32,
    pub _padding: u32,
}

/// Weighted transition cell (16 bytes).
///
/// Within a state, weighted cells are sorted by input symbol with final
/// cells and flag diacritics ahead of normal symbols.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct WeightedTransition {
    pub sym_in: u32,
    pub sym_out: u32,
    pub target_state: u32,
    pub weight: i16,
    pub more_transitions: u8,
    pub _reserved: u8,
}

/// Input symbol of a weighted final cell.
pub const WEIGHTED_FINAL_SYM: u32 = 0xFFFF_FFFF;

/// Weighted overflow cell.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct WeightedOverflowCell {
    pub more_transitions: u32,
    pub _short_padding: u32,
    pub _padding: u64,
}

const _: () = assert!(size_of::<Transition>() == 8);
const _: () = assert!(size_of::<OverflowCell>() == 8);
const _: () = assert!(size_of::<WeightedTransition>() == 16);
const _: () = assert!(size_of::<WeightedOverflowCell>() == 16);

/// Uniform access to a transition cell of either layout.
///
/// Symbol indices are widened to `u32` so both layouts compare the same way.
pub trait Cell: Pod {
    /// Whether cells within a state are sorted by input symbol, which lets
    /// traversal stop early and jump ahead with a binary search.
    const SORTED: bool;

    fn is_final(&self) -> bool;
    fn sym_in(&self) -> u32;
    fn sym_out(&self) -> u32;
    fn target(&self) -> u32;
    fn more(&self) -> u8;
    fn weight(&self) -> i32;
    /// Count stored in this cell when it is read as an overflow cell.
    fn overflow_count(&self) -> u32;
}

impl Cell for Transition {
    const SORTED: bool = false;

    #[inline]
    fn is_final(&self) -> bool {
        self.sym_in == UNWEIGHTED_FINAL_SYM
    }
    #[inline]
    fn sym_in(&self) -> u32 {
        u32::from(self.sym_in)
    }
    #[inline]
    fn sym_out(&self) -> u32 {
        u32::from(self.sym_out)
    }
    #[inline]
    fn target(&self) -> u32 {
        self.target_state()
    }
    #[inline]
    fn more(&self) -> u8 {
        self.more_transitions()
    }
    #[inline]
    fn weight(&self) -> i32 {
        0
    }
    #[inline]
    fn overflow_count(&self) -> u32 {
        let oc: OverflowCell = bytemuck::cast(*self);
        oc.more_transitions
    }
}

impl Cell for WeightedTransition {
    const SORTED: bool = true;

    #[inline]
    fn is_final(&self) -> bool {
        self.sym_in == WEIGHTED_FINAL_SYM
    }
    #[inline]
    fn sym_in(&self) -> u32 {
        self.sym_in
    }
    #[inline]
    fn sym_out(&self) -> u32 {
        self.sym_out
    }
    #[inline]
    fn target(&self) -> u32 {
        self.target_state
    }
    #[inline]
    fn more(&self) -> u8 {
        self.more_transitions
    }
    #[inline]
    fn weight(&self) -> i32 {
        i32::from(self.weight)
    }
    #[inline]
    fn overflow_count(&self) -> u32 {
        let oc: WeightedOverflowCell = bytemuck::cast(*self);
        oc.more_transitions
    }
}

/// Whether the state starting at `state` stores its transition count in an
/// overflow cell at `state + 1`.
#[inline]
pub fn has_overflow<C: Cell>(cells: &[C], state: u32) -> bool {
    cells[state as usize].more() == 255
}

/// Highest transition offset (inclusive) of the state starting at `state`.
///
/// A head count below 255 is the offset itself. A count of 255 defers to the
/// overflow cell, whose count is one less than the real offset because the
/// overflow cell occupies offset 1.
///
/// The caller must have checked that `state + 1` exists when the head count
/// is 255; [`crate::Dictionary::load`] guarantees this for every reachable
/// state.
#[inline]
pub fn max_offset<C: Cell>(cells: &[C], state: u32) -> u32 {
    let head = &cells[state as usize];
    match head.more() {
        255 => cells[state as usize + 1].overflow_count().saturating_add(1),
        n => u32::from(n),
    }
}
