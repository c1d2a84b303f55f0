//! This module defines the `RuleTable`, the immutable mapping from `(state, symbol)` pairs
//! to transitions that drives a machine.

use crate::types::{Symbol, Transition};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// The full mapping of defined `(state, symbol)` pairs to transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    entries: HashMap<String, HashMap<Symbol, Transition>>,
}

impl RuleTable {
    /// Creates an empty rule table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry per symbol, all sharing `transition`.
    ///
    /// A pair that is already defined is replaced.
    pub fn insert(&mut self, state: &str, symbols: &[Symbol], transition: Transition) {
        let row = self.entries.entry(state.to_string()).or_default();
        for &symbol in symbols {
            row.insert(symbol, transition.clone());
        }
    }

    /// Looks up the transition for a `(state, symbol)` pair.
    pub fn get(&self, state: &str, symbol: Symbol) -> Option<&Transition> {
        self.entries.get(state)?.get(&symbol)
    }

    /// Returns `true` if at least one rule is defined for `state`.
    pub fn defines(&self, state: &str) -> bool {
        self.entries.get(state).is_some_and(|row| !row.is_empty())
    }

    /// Returns the number of `(state, symbol)` entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every state that has at least one rule, in sorted order.
    pub fn states(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|(_, row)| !row.is_empty())
            .map(|(state, _)| state.as_str())
            .collect()
    }

    /// Returns the transitions defined for `state`, keyed by symbol.
    pub fn transitions(&self, state: &str) -> impl Iterator<Item = (Symbol, &Transition)> {
        self.entries
            .get(state)
            .into_iter()
            .flat_map(|row| row.iter().map(|(symbol, t)| (*symbol, t)))
    }

    /// Iterates over every `(state, symbol, transition)` entry.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Symbol, &Transition)> {
        self.entries.iter().flat_map(|(state, row)| {
            row.iter()
                .map(move |(symbol, t)| (state.as_str(), *symbol, t))
        })
    }
}

impl FromStr for RuleTable {
    type Err = crate::types::TuringMachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

/// Renders the table back into rule-file syntax, one entry per line, sorted.
impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<(&str, Symbol, &Transition)> = self.iter().collect();
        lines.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        for (state, symbol, transition) in lines {
            let ops = transition
                .operations
                .iter()
                .map(|op| op.to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                f,
                "{state} {} {ops} {}",
                symbol.as_input(),
                transition.next_state
            )?;
        }

        Ok(())
    }
}
