//! Operator Table Persistence Tests
//!
//! Tests for:
//! - Save then load yields the same operators in the same order
//! - Names and passwords never appear in clear text on disk
//! - A different key does not recover the credentials
//! - Malformed files are reported as corruption

use invoicedb::operator::{cipher, OperatorTable};
use invoicedb::storage::StoreErrorCode;
use std::fs;
use tempfile::TempDir;

const KEY: &str = "invoicedb";

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn staff() -> OperatorTable {
    let mut table = OperatorTable::new();
    table.set_operator("Claire", "Tulip-2010").unwrap();
    table.set_operator("Martin", "rose").unwrap();
    table.set_operator("Zoé", "").unwrap();
    table
}

// =============================================================================
// Round Trip
// =============================================================================

/// Every operator comes back at the same index with the same password.
#[test]
fn test_save_load_keeps_order_and_case() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");

    staff().save_to_file(&path, KEY).unwrap();
    let loaded = OperatorTable::load_from_file(&path, KEY).unwrap().unwrap();

    assert_eq!(loaded.record_count(), 3);
    assert_eq!(loaded.name(0).unwrap(), "Claire");
    assert_eq!(loaded.password(0).unwrap(), "Tulip-2010");
    assert_eq!(loaded.name(2).unwrap(), "Zoé");
    assert_eq!(loaded.password(2).unwrap(), "");
}

/// An empty table saves as a lone count line and loads back empty.
#[test]
fn test_empty_table() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");

    OperatorTable::new().save_to_file(&path, KEY).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "0\n");
    let loaded = OperatorTable::load_from_file(&path, KEY).unwrap().unwrap();
    assert_eq!(loaded.record_count(), 0);
}

/// Changing a password and removing an operator survive a reload.
#[test]
fn test_edits_persist() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");
    staff().save_to_file(&path, KEY).unwrap();

    let mut table = OperatorTable::load_from_file(&path, KEY).unwrap().unwrap();
    assert_eq!(table.set_operator("martin", "lily").unwrap(), 1);
    table.remove_record(0).unwrap();
    table.save_to_file(&path, KEY).unwrap();

    let loaded = OperatorTable::load_from_file(&path, KEY).unwrap().unwrap();
    assert_eq!(loaded.record_count(), 2);
    assert_eq!(loaded.find_operator("MARTIN"), Some(0));
    assert_eq!(loaded.password(0).unwrap(), "lily");
}

// =============================================================================
// Obfuscation
// =============================================================================

/// The file holds the shifted text, not the clear text.
#[test]
fn test_file_is_not_clear_text() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");

    staff().save_to_file(&path, KEY).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("Claire"));
    assert!(!content.contains("Tulip"));
    assert!(content.contains(&cipher::encrypt(KEY, "Tulip-2010")));
}

/// Loading with another key yields other names.
#[test]
fn test_wrong_key_does_not_recover_names() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");

    staff().save_to_file(&path, KEY).unwrap();
    let loaded = OperatorTable::load_from_file(&path, "other").unwrap().unwrap();

    assert_eq!(loaded.record_count(), 3);
    assert_eq!(loaded.find_operator("Claire"), None);
}

// =============================================================================
// Corruption
// =============================================================================

/// A first line that is not a number is corruption.
#[test]
fn test_bad_header_is_corruption() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");
    fs::write(&path, "two\nabc\ndef\n").unwrap();

    let err = OperatorTable::load_from_file(&path, KEY).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::DataCorruption);
}

/// A name without its password line is corruption.
#[test]
fn test_dangling_name_is_corruption() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Operators.txt");
    fs::write(&path, "1\nabc\n").unwrap();

    let err = OperatorTable::load_from_file(&path, KEY).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::DataCorruption);
    assert!(err.is_fatal());
}
