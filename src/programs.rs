use crate::parser::parse;
use crate::rules::RuleTable;
use crate::types::TuringMachineError;

// Default embedded programs
const PROGRAM_TEXTS: [(&str, &str); 3] = [
    ("alternate", include_str!("../programs/alternate.tm")),
    (
        "alternate-compact",
        include_str!("../programs/alternate-compact.tm"),
    ),
    ("ones", include_str!("../programs/ones.tm")),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = load_programs();
}

/// A rule table compiled into the binary.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: &'static str,
    /// The leading comment of the rule file.
    pub description: &'static str,
    pub text: &'static str,
    pub rules: RuleTable,
}

fn load_programs() -> Vec<Program> {
    PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, text)| match parse(text) {
            Ok(rules) => Some(Program {
                name,
                description: description(text),
                text,
                rules,
            }),
            Err(e) => {
                eprintln!("Failed to parse program {name}: {e}");
                None
            }
        })
        .collect()
}

fn description(text: &'static str) -> &'static str {
    text.lines()
        .next()
        .and_then(|line| line.strip_prefix('#'))
        .map(str::trim)
        .unwrap_or_default()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// List all programs
    pub fn list() -> &'static [Program] {
        &PROGRAMS
    }

    /// Get a program by its name
    pub fn get(name: &str) -> Result<&'static Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))
    }
}
