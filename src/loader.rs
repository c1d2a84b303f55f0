//! This module provides the `RuleLoader` struct, responsible for loading rule tables from
//! files and strings.

use crate::parser::parse;
use crate::rules::RuleTable;
use crate::types::TuringMachineError;
use std::fs;
use std::path::Path;

/// `RuleLoader` is a utility struct for loading rule tables.
pub struct RuleLoader;

impl RuleLoader {
    /// Loads a rule table from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleTable)` if the file is read and every line parses.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::MalformedRule)` if a line is malformed.
    pub fn load(path: &Path) -> Result<RuleTable, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a rule table from string content, e.g. text piped in by the user.
    pub fn load_from_string(content: &str) -> Result<RuleTable, TuringMachineError> {
        parse(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_rules() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("alternate.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"b @ P0,R c\nc @ R e\ne @ P1,R f\nf @ R b\n")
            .unwrap();

        let rules = RuleLoader::load(&file_path).unwrap();
        assert_eq!(rules.len(), 4);
        assert!(rules.get("e", Symbol::Blank).is_some());
    }

    #[test]
    fn test_load_malformed_rules() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"b @ P0,R\n").unwrap();

        let result = RuleLoader::load(&file_path);
        assert!(matches!(result, Err(TuringMachineError::MalformedRule(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing.tm");

        let error = RuleLoader::load(&file_path).unwrap_err();
        assert!(matches!(error, TuringMachineError::FileError(_)));
        assert!(error.to_string().contains("missing.tm"));
    }

    #[test]
    fn test_load_from_string() {
        let rules = RuleLoader::load_from_string("b 0,1,@ P1 b").unwrap();
        assert_eq!(rules.len(), 3);
    }
}
