//! This module defines the core data structures and types used throughout the interpreter:
//! the tape alphabet, operations, transitions, step outcomes, snapshots and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The character used in rule files to denote the blank symbol.
pub const INPUT_BLANK_SYMBOL: char = '@';
/// The character a blank cell is rendered as in the output stream.
pub const OUTPUT_BLANK_SYMBOL: char = ' ';
/// The start state used by convention when the driver does not name one.
pub const DEFAULT_START_STATE: &str = "b";

/// A symbol of the fixed tape alphabet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Zero,
    One,
    /// The fill value of every newly materialized cell.
    #[default]
    Blank,
}

impl Symbol {
    /// Every symbol of the alphabet, in a stable order.
    pub const ALL: [Symbol; 3] = [Symbol::Zero, Symbol::One, Symbol::Blank];

    /// Maps a rule-file character onto the alphabet.
    ///
    /// This is the only place where `@` is translated into [`Symbol::Blank`].
    /// Returns `None` for characters outside the alphabet.
    pub fn from_input(c: char) -> Option<Symbol> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            INPUT_BLANK_SYMBOL => Some(Symbol::Blank),
            _ => None,
        }
    }

    /// Returns the rule-file spelling of this symbol.
    pub fn as_input(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => INPUT_BLANK_SYMBOL,
        }
    }

    /// Returns the character emitted on the output stream for this symbol.
    pub fn as_output(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => OUTPUT_BLANK_SYMBOL,
        }
    }

    /// Parses a run of rule-file characters, e.g. `"01@1"`.
    pub fn parse_all(input: &str) -> Option<Vec<Symbol>> {
        input.chars().map(Symbol::from_input).collect()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_output())
    }
}

/// A single tape operation within a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Move the head one cell to the left.
    MoveLeft,
    /// Move the head one cell to the right.
    MoveRight,
    /// Overwrite the current cell with the blank symbol.
    Erase,
    /// Overwrite the current cell and emit the symbol on the output stream.
    Print(Symbol),
    /// Placeholder that does nothing.
    NoOp,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::MoveLeft => write!(f, "L"),
            Operation::MoveRight => write!(f, "R"),
            Operation::Erase => write!(f, "E"),
            Operation::Print(symbol) => write!(f, "P{}", symbol.as_input()),
            Operation::NoOp => write!(f, "-"),
        }
    }
}

/// The behavior triggered by one `(state, symbol)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Operations executed strictly in order.
    pub operations: Vec<Operation>,
    /// The state the machine moves to once all operations have run.
    pub next_state: String,
}

impl Transition {
    /// Returns `true` if any operation of this transition prints.
    pub fn prints(&self) -> bool {
        self.operations
            .iter()
            .any(|op| matches!(op, Operation::Print(_)))
    }
}

/// Represents the outcome of a single machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A PRINT operation fired and execution is suspended right after it.
    Print(Symbol),
    /// The transition completed without a further PRINT.
    Continue,
}

/// A serializable view of a running machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: String,
    pub head: isize,
    pub leftmost: isize,
    pub rightmost: isize,
    /// Materialized cells from `leftmost` to `rightmost` in rule-file spelling.
    pub tape: String,
    pub steps: usize,
    pub printed: usize,
}

/// Represents the errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A rule line is structurally invalid.
    #[error("Malformed rule: {0}")]
    MalformedRule(#[from] Box<pest::error::Error<Rule>>),
    /// The machine reached a `(state, symbol)` pair that has no rule.
    #[error("No rule defined for state {state} and symbol '{}'", .symbol.as_input())]
    UndefinedTransition { state: String, symbol: Symbol },
    /// Reading a rule file failed.
    #[error("File error: {0}")]
    FileError(String),
    /// No embedded program has the requested name.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
}
