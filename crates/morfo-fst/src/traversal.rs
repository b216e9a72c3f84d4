// Lazy depth-first enumeration of accepting paths.

use serde::{Deserialize, Serialize};

use crate::Dictionary;
use crate::dictionary::TransitionTable;
use crate::symbols::SymbolTable;
use crate::transition::{Cell, Transition, WeightedTransition, has_overflow, max_offset};
use crate::{BUFFER_SIZE, MAX_LOOP_COUNT};

/// Bounds on a single traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalLimits {
    /// Maximum number of transitions on one path. Longer branches are pruned
    /// and their siblings are still explored.
    pub max_depth: usize,
    /// Maximum number of push and pop steps spent looking for the next
    /// accepting path. Reaching it ends the enumeration.
    pub max_steps: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: BUFFER_SIZE,
            max_steps: MAX_LOOP_COUNT,
        }
    }
}

/// One transition taken along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index of the transition cell in the table.
    pub transition: usize,
    /// Input symbol consumed, `None` for epsilon and flag diacritics.
    pub input: Option<u16>,
    /// Output symbol emitted, `0` when the transition emits nothing.
    pub output: u16,
}

/// A complete accepting path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub steps: Vec<Step>,
    /// Sum of transition weights plus the final weight. Always 0 for
    /// unweighted dictionaries.
    pub weight: i32,
}

impl Path {
    /// Output symbols in order, skipping empty ones.
    pub fn output_symbols(&self) -> impl Iterator<Item = u16> + '_ {
        self.steps.iter().map(|s| s.output).filter(|&s| s != 0)
    }

    /// Concatenated output string.
    pub fn output(&self, dictionary: &Dictionary) -> String {
        self.output_symbols()
            .map(|s| dictionary.symbol_str(s))
            .collect()
    }

    /// Number of input symbols consumed.
    pub fn consumed(&self) -> usize {
        self.steps.iter().filter(|s| s.input.is_some()).count()
    }

    pub fn probability(&self) -> f64 {
        crate::probability(self.weight)
    }
}

/// Iterator over accepting paths, in depth-first transition order.
///
/// Created by [`crate::Dictionary::traverse`]. Paths are produced on demand,
/// so stopping early costs nothing for the paths not yet visited.
pub struct Paths<'d> {
    walk: Walker<'d>,
}

enum Walker<'d> {
    Unweighted(Walk<'d, Transition>),
    Weighted(Walk<'d, WeightedTransition>),
}

impl<'d> Paths<'d> {
    pub(crate) fn new(
        table: &'d TransitionTable,
        symbols: &'d SymbolTable,
        input: &[u16],
        limits: TraversalLimits,
    ) -> Self {
        let walk = match table {
            TransitionTable::Unweighted(cells) => {
                Walker::Unweighted(Walk::new(cells, symbols, input, limits))
            }
            TransitionTable::Weighted(cells) => {
                Walker::Weighted(Walk::new(cells, symbols, input, limits))
            }
        };
        Self { walk }
    }
}

impl Iterator for Paths<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        match &mut self.walk {
            Walker::Unweighted(w) => w.next_path(),
            Walker::Weighted(w) => w.next_path(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Index of the state's first cell.
    state: u32,
    /// Offset of the next cell to try within the state.
    cursor: u32,
}

struct Walk<'d, C: Cell> {
    cells: &'d [C],
    symbols: &'d SymbolTable,
    input: Vec<u16>,
    limits: TraversalLimits,
    frames: Vec<Frame>,
    /// Cell taken out of each frame except the last.
    taken: Vec<u32>,
    input_depth: usize,
    flags: Vec<u16>,
    /// Feature and previous value for every flag diacritic on the path.
    flag_undo: Vec<(u16, u16)>,
    done: bool,
}

impl<'d, C: Cell> Walk<'d, C> {
    fn new(cells: &'d [C], symbols: &'d SymbolTable, input: &[u16], limits: TraversalLimits) -> Self {
        Self {
            cells,
            symbols,
            input: input.to_vec(),
            limits,
            frames: vec![Frame { state: 0, cursor: 0 }],
            taken: Vec::new(),
            input_depth: 0,
            flags: vec![0; symbols.flag_feature_count as usize],
            flag_undo: Vec::new(),
            done: false,
        }
    }

    fn next_path(&mut self) -> Option<Path> {
        if self.done {
            return None;
        }

        let first_normal = u32::from(self.symbols.first_normal_char);
        let mut steps = 0usize;

        'outer: while steps < self.limits.max_steps {
            steps += 1;
            let Some(&Frame { state, cursor }) = self.frames.last() else {
                self.done = true;
                return None;
            };
            let max = max_offset(self.cells, state);
            let overflow = has_overflow(self.cells, state);
            let input_sym = self.input.get(self.input_depth).map(|&s| u32::from(s));

            let mut tc = cursor;
            while tc <= max {
                if tc == 1 && overflow {
                    tc += 1;
                    continue;
                }

                let index = state + tc;
                let cell = self.cells[index as usize];

                if cell.is_final() {
                    if input_sym.is_none() {
                        self.set_cursor(tc + 1);
                        return Some(self.emit(&cell));
                    }
                } else {
                    let sym = cell.sym_in();
                    if C::SORTED && input_sym.is_none() && sym >= first_normal {
                        break;
                    }

                    let consumes = sym >= first_normal && input_sym == Some(sym);
                    if consumes || sym < first_normal {
                        if self.taken.len() >= self.limits.max_depth {
                            tc += 1;
                            continue;
                        }
                        if consumes || self.apply_flag(sym as u16) {
                            self.set_cursor(tc);
                            self.taken.push(index);
                            self.frames.push(Frame {
                                state: cell.target(),
                                cursor: 0,
                            });
                            if consumes {
                                self.input_depth += 1;
                            }
                            continue 'outer;
                        }
                    } else if let (true, Some(wanted)) = (C::SORTED, input_sym) {
                        if sym > wanted {
                            break;
                        }
                        if tc >= 1 {
                            tc += self.skip_below(index, max - tc, wanted);
                        }
                    }
                }

                tc += 1;
            }

            if !self.backtrack() {
                self.done = true;
                return None;
            }
        }

        if !self.done {
            tracing::warn!(
                max_steps = self.limits.max_steps,
                input_len = self.input.len(),
                "traversal step limit reached"
            );
            self.done = true;
        }
        None
    }

    /// Binary search over the `span` cells after `index` for the last one
    /// whose input symbol sorts below `wanted`. Returns its distance.
    fn skip_below(&self, index: u32, span: u32, wanted: u32) -> u32 {
        let mut min = 0;
        let mut max = span;
        while min + 1 < max {
            let middle = (min + max) / 2;
            if self.cells[(index + middle) as usize].sym_in() < wanted {
                min = middle;
            } else {
                max = middle;
            }
        }
        min
    }

    fn set_cursor(&mut self, cursor: u32) {
        if let Some(frame) = self.frames.last_mut() {
            frame.cursor = cursor;
        }
    }

    fn emit(&self, last: &C) -> Path {
        let first_normal = u32::from(self.symbols.first_normal_char);
        let mut weight = last.weight();
        let steps = self
            .taken
            .iter()
            .map(|&index| {
                let cell = &self.cells[index as usize];
                weight += cell.weight();
                let sym_in = cell.sym_in();
                let sym_out = cell.sym_out();
                Step {
                    transition: index as usize,
                    input: (sym_in >= first_normal).then_some(sym_in as u16),
                    output: if sym_out >= first_normal { sym_out as u16 } else { 0 },
                }
            })
            .collect::<Vec<_>>();
        tracing::trace!(depth = steps.len(), weight, "accepting path");
        Path { steps, weight }
    }

    fn apply_flag(&mut self, symbol: u16) -> bool {
        let Some(flag) = self.symbols.diacritic(symbol) else {
            return true;
        };
        let feature = flag.feature as usize;
        let current = self.flags[feature];
        match flag.apply(current) {
            Some(value) => {
                self.flag_undo.push((flag.feature, current));
                self.flags[feature] = value;
                true
            }
            None => false,
        }
    }

    /// Pop the last frame and move its parent past the cell that led to it.
    /// Returns `false` at the start state.
    fn backtrack(&mut self) -> bool {
        let Some(index) = self.taken.pop() else {
            return false;
        };
        self.frames.pop();

        let sym = self.cells[index as usize].sym_in();
        if sym >= u32::from(self.symbols.first_normal_char) {
            self.input_depth -= 1;
        } else if self.symbols.diacritic(sym as u16).is_some() {
            if let Some((feature, value)) = self.flag_undo.pop() {
                self.flags[feature as usize] = value;
            }
        }

        if let Some(frame) = self.frames.last_mut() {
            frame.cursor += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use crate::transition::OverflowCell;

    fn outputs(dict: &Dictionary, input: &[u16]) -> Vec<String> {
        dict.traverse(input)
            .map(|p| p.output(dict))
            .collect()
    }

    #[test]
    fn single_path_collects_steps() {
        // a:x b:y
        let dict = Dictionary::load(&build_unweighted(
            &["", "a", "b", "x", "y"],
            &[
                make_transition(1, 3, 1, 0),
                make_transition(2, 4, 2, 0),
                make_final(0),
            ],
        ))
        .unwrap();

        let paths: Vec<Path> = dict.traverse(&[1, 2]).collect();
        assert_eq!(paths.len(), 1);
        let path = &paths[0];
        assert_eq!(path.output(&dict), "xy");
        assert_eq!(path.consumed(), 2);
        assert_eq!(path.weight, 0);
        assert_eq!(
            path.steps,
            vec![
                Step { transition: 0, input: Some(1), output: 3 },
                Step { transition: 1, input: Some(2), output: 4 },
            ]
        );

        assert!(outputs(&dict, &[1]).is_empty());
        assert!(outputs(&dict, &[2, 1]).is_empty());
        assert!(outputs(&dict, &[]).is_empty());
    }

    #[test]
    fn ambiguous_paths_in_transition_order() {
        let dict = Dictionary::load(&build_unweighted(
            &["", "a", "x", "y"],
            &[
                make_transition(1, 2, 2, 1),
                make_transition(1, 3, 2, 0),
                make_final(0),
            ],
        ))
        .unwrap();
        assert_eq!(outputs(&dict, &[1]), vec!["x", "y"]);
        // Repeated traversals agree.
        assert_eq!(outputs(&dict, &[1]), outputs(&dict, &[1]));
    }

    #[test]
    fn epsilon_consumes_no_input() {
        let dict = Dictionary::load(&build_unweighted(
            &["", "a", "x"],
            &[
                make_transition(0, 2, 1, 0), // ε:x
                make_transition(1, 0, 2, 0), // a:ε
                make_final(0),
            ],
        ))
        .unwrap();
        let paths: Vec<Path> = dict.traverse(&[1]).collect();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].output(&dict), "x");
        assert_eq!(paths[0].steps[0].input, None);
        assert_eq!(paths[0].steps[1].output, 0);
        assert_eq!(paths[0].consumed(), 1);
    }

    #[test]
    fn empty_input_accepts_at_final_start_state() {
        let dict = Dictionary::load(&build_unweighted(
            &["", "a"],
            &[make_final(1), make_transition(1, 1, 0, 0)],
        ))
        .unwrap();
        let paths: Vec<Path> = dict.traverse(&[]).collect();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].steps.is_empty());
    }

    #[test]
    fn flag_diacritics_prune_and_restore() {
        // 0: @P.X.ON@ -> 2 | ε -> 2
        // 2: @R.X.ON@ -> 4 | @D.X@ -> 5
        // 4: a:x -> 6
        // 5: a:y -> 6
        // 6: final
        let symbols = ["", "@P.X.ON@", "@R.X.ON@", "@D.X@", "a", "x", "y"];
        let dict = Dictionary::load(&build_unweighted(
            &symbols,
            &[
                make_transition(1, 0, 2, 1),
                make_transition(0, 0, 2, 0),
                make_transition(2, 0, 4, 1),
                make_transition(3, 0, 5, 0),
                make_transition(4, 5, 6, 0),
                make_transition(4, 6, 6, 0),
                make_final(0),
            ],
        ))
        .unwrap();
        assert_eq!(dict.symbols().flag_feature_count, 1);
        // P then R passes; P then D is blocked; ε then R is blocked; ε then D passes.
        assert_eq!(outputs(&dict, &[4]), vec!["x", "y"]);
    }

    fn epsilon_loop() -> Dictionary {
        // 0: ε -> 0 | final
        Dictionary::load(&build_unweighted(
            &["", "a"],
            &[make_transition(0, 0, 0, 1), make_final(0)],
        ))
        .unwrap()
    }

    #[test]
    fn depth_limit_prunes_branch_and_keeps_siblings() {
        let dict = epsilon_loop();
        let limits = TraversalLimits {
            max_depth: 4,
            ..TraversalLimits::default()
        };
        let depths: Vec<usize> = dict
            .traverse_with(&[], limits)
            .map(|p| p.steps.len())
            .collect();
        assert_eq!(depths, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn step_limit_ends_enumeration() {
        let dict = epsilon_loop();
        let limits = TraversalLimits {
            max_depth: BUFFER_SIZE,
            max_steps: 2,
        };
        let mut paths = dict.traverse_with(&[], limits);
        assert!(paths.next().is_none());
        assert!(paths.next().is_none());
    }

    #[test]
    fn overflow_cell_is_skipped() {
        let overflow: Transition = bytemuck::cast(OverflowCell {
            more_transitions: 2,
            _padding: 0,
        });
        let dict = Dictionary::load(&build_unweighted(
            &["", "a", "b", "c", "x"],
            &[
                make_transition(1, 4, 4, 255),
                overflow,
                make_transition(2, 4, 4, 0),
                make_transition(3, 4, 4, 0),
                make_final(0),
            ],
        ))
        .unwrap();
        assert_eq!(outputs(&dict, &[3]), vec!["x"]);
        assert_eq!(outputs(&dict, &[1]), vec!["x"]);
    }

    fn weighted_dict() -> Dictionary {
        // 0: final(5) | a:x -> 3 (10) | b:x -> 3 (1)
        // 3: final(2)
        Dictionary::load(&build_weighted(
            &["", "a", "b", "x"],
            &[
                make_weighted(0xFFFF_FFFF, 0, 0, 5, 2),
                make_weighted(1, 3, 3, 10, 0),
                make_weighted(2, 3, 3, 1, 0),
                make_weighted(0xFFFF_FFFF, 0, 0, 2, 0),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn weighted_paths_sum_weights() {
        let dict = weighted_dict();
        let a: Vec<Path> = dict.traverse(&[1]).collect();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].weight, 12);

        let b: Vec<Path> = dict.traverse(&[2]).collect();
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].weight, 3);
        assert_eq!(b[0].steps[0].transition, 2);
        assert!(b[0].probability() < 1.0);
    }

    #[test]
    fn weighted_exhausted_input_stops_at_normal_symbols() {
        let dict = weighted_dict();
        let paths: Vec<Path> = dict.traverse(&[]).collect();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].weight, 5);
        assert!(dict.traverse(&[3]).next().is_none());
    }

    fn weighted_flag_dict() -> Dictionary {
        // 0: @P.X.ON@ -> 2 (1) | @U.X.OFF@ -> 2 (2)
        // 2: @R.X.ON@ -> 9 | @D.X@ -> 10 | a:x b:x c:x d:x e:e -> 11
        // 9: e:x -> 11
        // 10: e:y -> 11
        // 11: final
        Dictionary::load(&build_weighted(
            &["", "@P.X.ON@", "@U.X.OFF@", "@R.X.ON@", "@D.X@", "a", "b", "c", "d", "e", "x", "y"],
            &[
                make_weighted(1, 0, 2, 1, 1),
                make_weighted(2, 0, 2, 2, 0),
                make_weighted(3, 0, 9, 0, 6),
                make_weighted(4, 0, 10, 0, 0),
                make_weighted(5, 10, 11, 0, 0),
                make_weighted(6, 10, 11, 0, 0),
                make_weighted(7, 10, 11, 0, 0),
                make_weighted(8, 10, 11, 0, 0),
                make_weighted(9, 9, 11, 0, 0),
                make_weighted(9, 10, 11, 0, 0),
                make_weighted(9, 11, 11, 0, 0),
                make_weighted(0xFFFF_FFFF, 0, 0, 0, 0),
            ],
        ))
        .unwrap()
    }

    fn outputs_and_weights(dict: &Dictionary, input: &[u16]) -> Vec<(String, i32)> {
        dict.traverse(input)
            .map(|p| (p.output(dict), p.weight))
            .collect()
    }

    #[test]
    fn weighted_flags_restore_on_backtrack() {
        let dict = weighted_flag_dict();
        // The U branch only passes once the P value has been undone, and D
        // stays blocked under both settings.
        assert_eq!(
            outputs_and_weights(&dict, &[9]),
            vec![("x".to_string(), 1), ("e".to_string(), 1), ("e".to_string(), 2)]
        );
        let paths: Vec<Path> = dict.traverse(&[9]).collect();
        assert_eq!(paths[1].steps.last().map(|s| s.transition), Some(8));
    }

    #[test]
    fn weighted_scan_skips_lower_symbols_and_stops_past_input() {
        let dict = weighted_flag_dict();
        // State 9 holds only e, which sorts past c. In state 2 the search
        // jumps from a straight to c and stops at d.
        assert_eq!(
            outputs_and_weights(&dict, &[7]),
            vec![("x".to_string(), 1), ("x".to_string(), 2)]
        );
        for path in dict.traverse(&[7]) {
            assert_eq!(path.steps.last().map(|s| s.transition), Some(6));
            assert_eq!(path.consumed(), 1);
        }
        assert!(dict.traverse(&[11]).next().is_none());
    }

    #[test]
    fn limits_fill_missing_fields_from_defaults() {
        let limits: TraversalLimits = serde_json::from_str(r#"{"max_depth": 12}"#).unwrap();
        assert_eq!(limits.max_depth, 12);
        assert_eq!(limits.max_steps, MAX_LOOP_COUNT);
    }
}
