//! This module provides static checks over a rule table. Unlike parse errors, its findings
//! are warnings: a machine with gaps in its table still runs, and only fails with
//! `UndefinedTransition` if it actually reaches one of them.

use crate::rules::RuleTable;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// Represents the problems that can be found in a rule table before it runs.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// The table defines no rules at all.
    EmptyRuleTable,
    /// The start state has no rules, so the first step fails.
    UndefinedStartState(String),
    /// Transitions lead to states that have no rules.
    UndefinedNextStates(Vec<String>),
    /// States with rules that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
    /// No transition reachable from the start state prints, so the output stream never
    /// produces a symbol.
    NoPrintReachable,
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::EmptyRuleTable => write!(f, "Rule table is empty"),
            AnalysisWarning::UndefinedStartState(state) => {
                write!(f, "Start state {state} has no rules")
            }
            AnalysisWarning::UndefinedNextStates(states) => {
                write!(f, "Transitions lead to states without rules: {states:?}")
            }
            AnalysisWarning::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {states:?}")
            }
            AnalysisWarning::NoPrintReachable => {
                write!(f, "No reachable transition prints a symbol")
            }
        }
    }
}

/// Analyzes a rule table as it would be run from `start_state`.
///
/// # Returns
///
/// All warnings found, in a fixed order. An empty table only reports
/// `AnalysisWarning::EmptyRuleTable`.
pub fn analyze(rules: &RuleTable, start_state: &str) -> Vec<AnalysisWarning> {
    if rules.is_empty() {
        return vec![AnalysisWarning::EmptyRuleTable];
    }

    [
        check_start_state,
        check_undefined_next_states,
        check_unreachable_states,
        check_reachable_print,
    ]
    .iter()
    .filter_map(|check| check(rules, start_state))
    .collect()
}

/// Checks whether the start state has at least one rule.
fn check_start_state(rules: &RuleTable, start_state: &str) -> Option<AnalysisWarning> {
    (!rules.defines(start_state))
        .then(|| AnalysisWarning::UndefinedStartState(start_state.to_string()))
}

/// Checks that every `next_state` has rules of its own.
fn check_undefined_next_states(rules: &RuleTable, _: &str) -> Option<AnalysisWarning> {
    let undefined: BTreeSet<&str> = rules
        .iter()
        .map(|(_, _, transition)| transition.next_state.as_str())
        .filter(|next| !rules.defines(next))
        .collect();

    (!undefined.is_empty()).then(|| {
        AnalysisWarning::UndefinedNextStates(undefined.into_iter().map(String::from).collect())
    })
}

/// Checks for states that are defined but never reached from the start state.
fn check_unreachable_states(rules: &RuleTable, start_state: &str) -> Option<AnalysisWarning> {
    if !rules.defines(start_state) {
        return None;
    }

    let reachable = reachable_states(rules, start_state);
    let unreachable: Vec<String> = rules
        .states()
        .into_iter()
        .filter(|state| !reachable.contains(state))
        .map(String::from)
        .collect();

    (!unreachable.is_empty()).then_some(AnalysisWarning::UnreachableStates(unreachable))
}

/// Checks that at least one transition reachable from the start state prints.
fn check_reachable_print(rules: &RuleTable, start_state: &str) -> Option<AnalysisWarning> {
    if !rules.defines(start_state) {
        return None;
    }

    let prints = reachable_states(rules, start_state)
        .into_iter()
        .flat_map(|state| rules.transitions(state))
        .any(|(_, transition)| transition.prints());

    (!prints).then_some(AnalysisWarning::NoPrintReachable)
}

/// Collects every state reachable from `start_state` by following next states.
fn reachable_states<'r>(rules: &'r RuleTable, start_state: &'r str) -> BTreeSet<&'r str> {
    let mut reachable = BTreeSet::from([start_state]);
    let mut queue = VecDeque::from([start_state]);

    while let Some(state) = queue.pop_front() {
        for (_, transition) in rules.transitions(state) {
            let next = transition.next_state.as_str();
            if reachable.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reachable
}
