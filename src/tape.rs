//! This module defines the `Tape` struct, the machine's one-dimensional memory. The tape is
//! logically infinite in both directions but only materializes the cells the head has visited.

use crate::types::Symbol;
use std::collections::VecDeque;
use std::fmt;

/// A bidirectionally growable tape with a single read/write head.
///
/// Cells are addressed by signed logical indices. The backing deque always holds exactly
/// the cells in `leftmost..=rightmost`, with the front of the deque at `leftmost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    head: isize,
    leftmost: isize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates a tape holding a single blank cell at index 0.
    pub fn new() -> Self {
        Self {
            cells: VecDeque::from([Symbol::Blank]),
            head: 0,
            leftmost: 0,
        }
    }

    /// Creates a tape seeded with `symbols`.
    ///
    /// The first symbol becomes the sole cell at index 0, and each following symbol is
    /// added by moving right and writing it, so the head ends on the last seeded cell.
    /// An empty slice yields a single blank cell.
    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        let mut tape = Self::new();
        let Some((first, rest)) = symbols.split_first() else {
            return tape;
        };

        tape.write(*first);
        for &symbol in rest {
            tape.move_right();
            tape.write(symbol);
        }

        tape
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> Symbol {
        self.cells[self.offset()]
    }

    /// Overwrites the cell under the head.
    pub fn write(&mut self, symbol: Symbol) {
        let offset = self.offset();
        self.cells[offset] = symbol;
    }

    /// Overwrites the cell under the head with the blank symbol.
    pub fn erase(&mut self) {
        self.write(Symbol::Blank);
    }

    /// Moves the head one cell to the left, materializing a blank cell at the edge.
    pub fn move_left(&mut self) {
        if self.head == self.leftmost {
            self.cells.push_front(Symbol::Blank);
            self.leftmost -= 1;
        }
        self.head -= 1;
    }

    /// Moves the head one cell to the right, materializing a blank cell at the edge.
    pub fn move_right(&mut self) {
        if self.head == self.rightmost() {
            self.cells.push_back(Symbol::Blank);
        }
        self.head += 1;
    }

    /// Returns the logical index of the head.
    pub fn head(&self) -> isize {
        self.head
    }

    /// Returns the logical index of the leftmost materialized cell.
    pub fn leftmost(&self) -> isize {
        self.leftmost
    }

    /// Returns the logical index of the rightmost materialized cell.
    pub fn rightmost(&self) -> isize {
        self.leftmost + self.cells.len() as isize - 1
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the symbol at a logical index, or `None` if that cell is not materialized.
    pub fn get(&self, index: isize) -> Option<Symbol> {
        let offset = index.checked_sub(self.leftmost)?;
        self.cells.get(usize::try_from(offset).ok()?).copied()
    }

    /// Iterates over the materialized cells from left to right.
    pub fn cells(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cells.iter().copied()
    }

    /// Renders the materialized cells in rule-file spelling, e.g. `"0@1"`.
    pub fn to_input_string(&self) -> String {
        self.cells().map(Symbol::as_input).collect()
    }

    fn offset(&self) -> usize {
        (self.head - self.leftmost) as usize
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.cells() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_tape() {
        let tape = Tape::new();

        assert_eq!(tape.read(), Symbol::Blank);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.leftmost(), 0);
        assert_eq!(tape.rightmost(), 0);
        assert_eq!(tape.len(), 1);
    }

    #[test]
    fn test_from_symbols_head_on_last_cell() {
        let tape = Tape::from_symbols(&[Symbol::One, Symbol::Zero, Symbol::One]);

        assert_eq!(tape.head(), 2);
        assert_eq!(tape.leftmost(), 0);
        assert_eq!(tape.rightmost(), 2);
        assert_eq!(tape.read(), Symbol::One);
        assert_eq!(tape.to_input_string(), "101");
    }

    #[test]
    fn test_from_empty_symbols() {
        assert_eq!(Tape::from_symbols(&[]), Tape::new());
    }

    #[test]
    fn test_write_and_erase() {
        let mut tape = Tape::new();

        tape.write(Symbol::Zero);
        assert_eq!(tape.read(), Symbol::Zero);

        tape.erase();
        assert_eq!(tape.read(), Symbol::Blank);
    }

    #[test]
    fn test_move_left_extends_tape() {
        let mut tape = Tape::from_symbols(&[Symbol::One]);

        tape.move_left();
        assert_eq!(tape.head(), -1);
        assert_eq!(tape.leftmost(), -1);
        assert_eq!(tape.rightmost(), 0);
        assert_eq!(tape.read(), Symbol::Blank);

        tape.write(Symbol::Zero);
        assert_eq!(tape.to_input_string(), "01");
        assert_eq!(tape.get(-1), Some(Symbol::Zero));
        assert_eq!(tape.get(0), Some(Symbol::One));
    }

    #[test]
    fn test_move_within_bounds_does_not_extend() {
        let mut tape = Tape::from_symbols(&[Symbol::Zero, Symbol::One]);

        tape.move_left();
        assert_eq!(tape.len(), 2);
        tape.move_right();
        assert_eq!(tape.len(), 2);
        assert_eq!(tape.read(), Symbol::One);
    }

    #[test]
    fn test_left_then_right_round_trip() {
        let mut tape = Tape::from_symbols(&[Symbol::One]);

        tape.move_left();
        tape.move_right();

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), Symbol::One);
    }

    #[test]
    fn test_get_out_of_range() {
        let tape = Tape::new();

        assert_eq!(tape.get(-1), None);
        assert_eq!(tape.get(1), None);
    }

    #[test]
    fn test_get_far_indices() {
        let mut tape = Tape::new();
        tape.move_left();
        tape.move_right();
        tape.move_right();

        assert_eq!(tape.get(isize::MAX), None);
        assert_eq!(tape.get(isize::MIN), None);
        assert_eq!(tape.get(-1), Some(Symbol::Blank));
        assert_eq!(tape.get(1), Some(Symbol::Blank));

        let tape = Tape::from_symbols(&[Symbol::One]);
        assert_eq!(tape.get(isize::MAX), None);
        assert_eq!(tape.get(isize::MIN), None);
    }

    #[test]
    fn test_display_uses_output_spelling() {
        let tape = Tape::from_symbols(&[Symbol::Zero, Symbol::Blank, Symbol::One]);
        assert_eq!(tape.to_string(), "0 1");
    }

    proptest! {
        #[test]
        fn moves_keep_head_within_bounds(moves in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut tape = Tape::new();
            for right in moves {
                if right {
                    tape.move_right();
                } else {
                    tape.move_left();
                }
                prop_assert!(tape.leftmost() <= tape.head());
                prop_assert!(tape.head() <= tape.rightmost());
                prop_assert_eq!(tape.len() as isize, tape.rightmost() - tape.leftmost() + 1);
            }

            prop_assert!(tape.cells().all(|symbol| symbol == Symbol::Blank));
        }

        #[test]
        fn moves_preserve_written_content(
            seed in proptest::collection::vec(0..3usize, 1..20),
            moves in proptest::collection::vec(any::<bool>(), 0..100),
        ) {
            let symbols: Vec<Symbol> = seed.iter().map(|&i| Symbol::ALL[i]).collect();
            let mut tape = Tape::from_symbols(&symbols);
            for right in moves {
                if right {
                    tape.move_right();
                } else {
                    tape.move_left();
                }
            }

            for (i, symbol) in symbols.iter().enumerate() {
                prop_assert_eq!(tape.get(i as isize), Some(*symbol));
            }
        }
    }
}
