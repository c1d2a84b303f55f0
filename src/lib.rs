//! This crate provides the core logic for interpreting printing Turing machines.
//! It includes modules for parsing rule files into rule tables, a lazily materialized
//! bidirectional tape, the execution engine that turns a rule table into a stream of
//! printed symbols, static analysis of rule tables, and a set of embedded programs.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod rules;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the `RuleLoader` struct from the loader module.
pub use loader::RuleLoader;
/// Re-exports the machine and its output stream from the machine module.
pub use machine::{Execution, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `Program`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramManager, PROGRAMS};
/// Re-exports the `RuleTable` struct from the rules module.
pub use rules::RuleTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the alphabet, operations and error types from the types module.
pub use types::{
    Operation, Snapshot, Step, Symbol, Transition, TuringMachineError, DEFAULT_START_STATE,
};
