//! Operator table
//!
//! A small in-memory list of operators loaded from and saved to a text file:
//!
//! ```text
//! <count>\n
//! <encrypted name>\n
//! <encrypted password>\n
//! ...
//! ```
//!
//! Names are matched case-insensitively and are unique within the table.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::cipher::{decrypt, encrypt};
use crate::codec::FieldError;
use crate::observability::{log_event_with_fields, Event};
use crate::storage::{StoreError, StoreResult};

/// One operator credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub name: String,
    /// Never serialized into CLI output
    #[serde(skip_serializing)]
    pub password: String,
}

/// Operators in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorTable {
    operators: Vec<Operator>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a table saved by [`OperatorTable::save_to_file`].
    ///
    /// Returns `Ok(None)` when no file exists at `path`. A count line that
    /// disagrees with the number of name/password pairs is corruption.
    pub fn load_from_file(path: impl AsRef<Path>, key: &str) -> StoreResult<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log_event_with_fields(
                    Event::StoreMissing,
                    &[("kind", "operator"), ("path", &path.display().to_string())],
                );
                return Ok(None);
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(corruption(path, "Operator table is not valid UTF-8"));
            }
            Err(e) => {
                return Err(StoreError::read_failed(
                    format!("Failed to read operator table: {}", path.display()),
                    e,
                ))
            }
        };

        let mut lines = content.lines();
        let expected: usize = lines
            .next()
            .and_then(|line| line.trim().parse().ok())
            .ok_or_else(|| corruption(path, "Operator table header is not a count"))?;

        let mut table = Self::new();
        let mut pairs = 0;
        while let Some(name) = lines.next() {
            let password = lines
                .next()
                .ok_or_else(|| corruption(path, "Operator table ends after a name"))?;
            table
                .set_operator(&decrypt(key, name), &decrypt(key, password))
                .map_err(|e| corruption(path, format!("Malformed operator entry: {}", e)))?;
            pairs += 1;
        }

        if pairs != expected {
            return Err(corruption(
                path,
                format!(
                    "Operator table header says {} entries, file holds {}",
                    expected, pairs
                ),
            ));
        }

        log_event_with_fields(
            Event::OperatorTableLoaded,
            &[
                ("count", &table.record_count().to_string()),
                ("path", &path.display().to_string()),
            ],
        );
        Ok(Some(table))
    }

    /// Writes the table to `path`, replacing any existing file, and fsyncs it.
    pub fn save_to_file(&self, path: impl AsRef<Path>, key: &str) -> StoreResult<()> {
        let path = path.as_ref();

        let mut content = format!("{}\n", self.operators.len());
        for operator in &self.operators {
            content.push_str(&encrypt(key, &operator.name));
            content.push('\n');
            content.push_str(&encrypt(key, &operator.password));
            content.push('\n');
        }

        let file = File::create(path).map_err(|e| {
            StoreError::write_failed(
                format!("Failed to create operator table: {}", path.display()),
                e,
            )
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .map_err(|e| StoreError::write_failed("Failed to write operator table", e))?;
        let file = writer.into_inner().map_err(|e| {
            StoreError::write_failed("Failed to flush operator table", e.into_error())
        })?;
        file.sync_all()
            .map_err(|e| StoreError::write_failed("Failed to fsync operator table", e))?;

        log_event_with_fields(
            Event::OperatorTableSaved,
            &[
                ("count", &self.record_count().to_string()),
                ("path", &path.display().to_string()),
            ],
        );
        Ok(())
    }

    pub fn record_count(&self) -> usize {
        self.operators.len()
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Name of the operator at `index`.
    pub fn name(&self, index: usize) -> StoreResult<&str> {
        self.get(index).map(|op| op.name.as_str())
    }

    /// Password of the operator at `index`.
    pub fn password(&self, index: usize) -> StoreResult<&str> {
        self.get(index).map(|op| op.password.as_str())
    }

    /// Index of the operator called `name`, ignoring case.
    pub fn find_operator(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.operators
            .iter()
            .position(|op| op.name.to_lowercase() == wanted)
    }

    /// Adds an operator, or changes the password of an existing one.
    ///
    /// Returns the operator's index. An existing operator keeps the spelling
    /// of its name.
    pub fn set_operator(&mut self, name: &str, password: &str) -> Result<usize, FieldError> {
        if name.is_empty() {
            return Err(FieldError::Empty { field: "name" });
        }
        check_line("name", name)?;
        check_line("password", password)?;

        if let Some(index) = self.find_operator(name) {
            self.operators[index].password = password.to_string();
            return Ok(index);
        }
        self.operators.push(Operator {
            name: name.to_string(),
            password: password.to_string(),
        });
        Ok(self.operators.len() - 1)
    }

    /// Removes the operator at `index`; later operators move down one place.
    pub fn remove_record(&mut self, index: usize) -> StoreResult<Operator> {
        if index >= self.operators.len() {
            return Err(StoreError::index_out_of_bounds(index, self.operators.len()));
        }
        Ok(self.operators.remove(index))
    }

    fn get(&self, index: usize) -> StoreResult<&Operator> {
        self.operators
            .get(index)
            .ok_or_else(|| StoreError::index_out_of_bounds(index, self.operators.len()))
    }
}

fn check_line(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.contains(|c: char| c == '\n' || c == '\r') {
        return Err(FieldError::ContainsLineBreak { field });
    }
    Ok(())
}

fn corruption(path: &Path, message: impl Into<String>) -> StoreError {
    let err = StoreError::data_corruption(message);
    log_event_with_fields(
        Event::CorruptionDetected,
        &[
            ("kind", "operator"),
            ("message", err.message()),
            ("path", &path.display().to_string()),
        ],
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreErrorCode;
    use tempfile::TempDir;

    const KEY: &str = "invoice";

    fn sample() -> OperatorTable {
        let mut table = OperatorTable::new();
        table.set_operator("Claire", "tulip").unwrap();
        table.set_operator("Martin", "rose42").unwrap();
        table
    }

    #[test]
    fn test_set_operator_adds_then_replaces() {
        let mut table = sample();
        assert_eq!(table.record_count(), 2);

        let index = table.set_operator("CLAIRE", "daisy").unwrap();
        assert_eq!(index, 0);
        assert_eq!(table.record_count(), 2);
        assert_eq!(table.name(0).unwrap(), "Claire");
        assert_eq!(table.password(0).unwrap(), "daisy");
    }

    #[test]
    fn test_find_operator_ignores_case() {
        let table = sample();
        assert_eq!(table.find_operator("martin"), Some(1));
        assert_eq!(table.find_operator("Nobody"), None);
    }

    #[test]
    fn test_set_operator_rejects_bad_values() {
        let mut table = OperatorTable::new();
        assert_eq!(
            table.set_operator("", "x").unwrap_err(),
            FieldError::Empty { field: "name" }
        );
        assert_eq!(
            table.set_operator("Eve", "a\nb").unwrap_err(),
            FieldError::ContainsLineBreak { field: "password" }
        );
        assert_eq!(table.record_count(), 0);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut table = sample();
        table.set_operator("Zoe", "lily").unwrap();

        let removed = table.remove_record(0).unwrap();
        assert_eq!(removed.name, "Claire");
        assert_eq!(table.name(0).unwrap(), "Martin");
        assert_eq!(table.name(1).unwrap(), "Zoe");

        let err = table.remove_record(2).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::IndexOutOfBounds);
    }

    #[test]
    fn test_name_out_of_range() {
        let table = sample();
        assert_eq!(
            table.name(2).unwrap_err().code(),
            StoreErrorCode::IndexOutOfBounds
        );
        assert!(table.password(5).is_err());
    }

    #[test]
    fn test_saved_file_is_obfuscated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Operators.txt");

        sample().save_to_file(&path, KEY).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], encrypt(KEY, "Claire"));
        assert!(!content.contains("tulip"));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Operators.txt");

        sample().save_to_file(&path, KEY).unwrap();
        let loaded = OperatorTable::load_from_file(&path, KEY).unwrap().unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = OperatorTable::load_from_file(temp_dir.path().join("none.txt"), KEY);
        assert!(loaded.unwrap().is_none());
    }

    #[test]
    fn test_count_mismatch_is_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Operators.txt");
        std::fs::write(&path, "3\nabc\ndef\n").unwrap();

        let err = OperatorTable::load_from_file(&path, KEY).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::DataCorruption);
    }
}
