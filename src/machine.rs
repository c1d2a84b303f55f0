//! This module defines the `TuringMachine` struct, which couples a tape, a borrowed rule
//! table and a current state, and drives the step loop that produces the printed output
//! stream.

use crate::rules::RuleTable;
use crate::tape::Tape;
use crate::types::{Operation, Snapshot, Step, Symbol, Transition, TuringMachineError};
use std::iter::FusedIterator;

/// A single-tape machine that prints.
///
/// The machine owns its tape and borrows its rule table. Execution can suspend in the
/// middle of a transition, right after a PRINT operation, and later resume exactly there.
pub struct TuringMachine<'a> {
    rules: &'a RuleTable,
    start_state: String,
    state: String,
    tape: Tape,
    cursor: Option<Cursor<'a>>,
    step_count: usize,
    printed_count: usize,
}

/// Position inside a transition whose operations have only partly run.
#[derive(Clone, Copy)]
struct Cursor<'a> {
    transition: &'a Transition,
    next_op: usize,
}

impl<'a> TuringMachine<'a> {
    /// Creates a machine over `rules` with a single blank cell, in `start_state`.
    pub fn new(rules: &'a RuleTable, start_state: impl Into<String>) -> Self {
        let start_state = start_state.into();
        Self {
            rules,
            state: start_state.clone(),
            start_state,
            tape: Tape::new(),
            cursor: None,
            step_count: 0,
            printed_count: 0,
        }
    }

    /// Seeds the tape with `symbols` and puts the machine back in its start state.
    ///
    /// Any transition in progress is abandoned and the counters are cleared, so the
    /// output stream starts over.
    pub fn initialize(&mut self, symbols: &[Symbol]) {
        self.tape = Tape::from_symbols(symbols);
        self.state.clone_from(&self.start_state);
        self.cursor = None;
        self.step_count = 0;
        self.printed_count = 0;
    }

    /// Runs operations until a PRINT fires or the current transition completes.
    ///
    /// If no transition is in progress, the one for the current state and the symbol
    /// under the head is looked up first.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Print(symbol))` right after a PRINT operation.
    /// * `Ok(Step::Continue)` if the transition finished without a further PRINT.
    /// * `Err(TuringMachineError::UndefinedTransition)` if no rule matches.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        let mut cursor = match self.cursor.take() {
            Some(cursor) => cursor,
            None => Cursor {
                transition: self.transition()?,
                next_op: 0,
            },
        };

        let transition = cursor.transition;
        let operations = &transition.operations;
        while let Some(&op) = operations.get(cursor.next_op) {
            cursor.next_op += 1;
            match op {
                Operation::NoOp => {}
                Operation::Erase => self.tape.erase(),
                Operation::MoveLeft => self.tape.move_left(),
                Operation::MoveRight => self.tape.move_right(),
                Operation::Print(symbol) => {
                    self.tape.write(symbol);
                    self.printed_count += 1;

                    if cursor.next_op < operations.len() {
                        self.cursor = Some(cursor);
                    } else {
                        self.complete(transition);
                    }
                    return Ok(Step::Print(symbol));
                }
            }
        }

        self.complete(transition);
        Ok(Step::Continue)
    }

    /// Steps until the next PRINT operation fires and returns the printed symbol.
    ///
    /// This loops forever if the machine never prints again.
    pub fn next_print(&mut self) -> Result<Symbol, TuringMachineError> {
        loop {
            if let Step::Print(symbol) = self.step()? {
                return Ok(symbol);
            }
        }
    }

    /// Returns the output stream of the machine.
    ///
    /// The stream continues from wherever the machine currently is. It is infinite
    /// unless a transition is undefined, in which case it yields that error once and
    /// then ends.
    pub fn execute(&mut self) -> Execution<'_, 'a> {
        Execution {
            machine: self,
            failed: false,
        }
    }

    /// Collects the next `n` printed symbols.
    pub fn take_output(&mut self, n: usize) -> Result<Vec<Symbol>, TuringMachineError> {
        self.execute().take(n).collect()
    }

    /// Finds the transition for the current state and the symbol under the head.
    pub fn transition(&self) -> Result<&'a Transition, TuringMachineError> {
        let symbol = self.tape.read();
        self.rules
            .get(&self.state, symbol)
            .ok_or_else(|| TuringMachineError::UndefinedTransition {
                state: self.state.clone(),
                symbol,
            })
    }

    fn complete(&mut self, transition: &Transition) {
        self.state.clone_from(&transition.next_state);
        self.step_count += 1;
    }

    /// Returns the current state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the state the machine starts in.
    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    /// Returns the machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the rule table the machine runs.
    pub fn rules(&self) -> &'a RuleTable {
        self.rules
    }

    /// Returns the number of completed transitions.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the number of PRINT operations executed so far.
    pub fn printed_count(&self) -> usize {
        self.printed_count
    }

    /// Returns `true` if a transition is suspended after a PRINT.
    pub fn is_suspended(&self) -> bool {
        self.cursor.is_some()
    }

    /// Captures the current configuration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            head: self.tape.head(),
            leftmost: self.tape.leftmost(),
            rightmost: self.tape.rightmost(),
            tape: self.tape.to_input_string(),
            steps: self.step_count,
            printed: self.printed_count,
        }
    }
}

/// The lazy output stream of a machine, created by [`TuringMachine::execute`].
pub struct Execution<'m, 'a> {
    machine: &'m mut TuringMachine<'a>,
    failed: bool,
}

impl Iterator for Execution<'_, '_> {
    type Item = Result<Symbol, TuringMachineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = self.machine.next_print();
        self.failed = result.is_err();
        Some(result)
    }
}

impl FusedIterator for Execution<'_, '_> {}
