//! Record Store Integrity Tests
//!
//! Tests for:
//! - Records are contiguous and addressed by index
//! - Insert and remove preserve the relative order of other records
//! - Out-of-range indices are explicit errors, never silent reads
//! - Corrupt content is reported, never returned as a record

use invoicedb::record::{CatalogLayout, CatalogRecord, CustomerLayout, CustomerRecord};
use invoicedb::storage::{CatalogDb, CustomerDb, StoreErrorCode, HEADER_SIZE};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn product(code: &str) -> CatalogRecord {
    CatalogRecord::new(code, format!("{} item", code), "pcs", 1.0, 2.0, 20.0).unwrap()
}

fn create_catalog(temp_dir: &TempDir, codes: &[&str]) -> CatalogDb {
    let mut db =
        CatalogDb::create(temp_dir.path().join("Catalog.db"), CatalogLayout::default()).unwrap();
    for code in codes {
        db.append_record(&product(code)).unwrap();
    }
    db
}

fn codes(db: &mut CatalogDb) -> Vec<String> {
    db.read_all().unwrap().into_iter().map(|r| r.code).collect()
}

// =============================================================================
// Index Addressing
// =============================================================================

/// Appending to an empty store makes the record readable at index 0.
#[test]
fn test_append_then_read_first_record() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &[]);

    let widget = CatalogRecord::new("ABC123", "Widget", "pcs", 1.50, 2.00, 20.00).unwrap();
    let index = db.append_record(&widget).unwrap();

    assert_eq!(index, 0);
    assert_eq!(db.record_count(), 1);
    assert_eq!(db.read_record(0).unwrap(), widget);
}

/// Record i lives at HEADER_SIZE + i * record_size.
#[test]
fn test_records_are_contiguous_on_disk() {
    let temp_dir = create_temp_data_dir();
    let db = create_catalog(&temp_dir, &["A", "B", "C"]);
    let record_size = db.record_size() as u64;
    db.close().unwrap();

    let bytes = fs::read(temp_dir.path().join("Catalog.db")).unwrap();
    assert_eq!(bytes.len() as u64, HEADER_SIZE + 3 * record_size);
    for (i, code) in [b'A', b'B', b'C'].iter().enumerate() {
        let offset = (HEADER_SIZE + i as u64 * record_size) as usize;
        assert_eq!(bytes[offset], *code);
        assert_eq!(bytes[offset + 1], 0);
    }
}

// =============================================================================
// Shifting Operations
// =============================================================================

/// Removing the middle record closes the gap.
#[test]
fn test_remove_middle_record() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A", "B", "C"]);

    db.remove_record(1).unwrap();

    assert_eq!(db.record_count(), 2);
    assert_eq!(codes(&mut db), vec!["A", "C"]);
}

/// Removing does not truncate: the last block stays behind as stale data.
#[test]
fn test_remove_leaves_stale_block() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A", "B", "C"]);
    let record_size = db.record_size() as u64;
    db.remove_record(0).unwrap();
    db.close().unwrap();

    let bytes = fs::read(temp_dir.path().join("Catalog.db")).unwrap();
    assert_eq!(&bytes[0..4], &2u32.to_le_bytes());
    assert_eq!(bytes.len() as u64, HEADER_SIZE + 3 * record_size);
}

/// Inserting at every position keeps the other records in order.
#[test]
fn test_insert_at_each_position() {
    for position in 0..=3 {
        let temp_dir = create_temp_data_dir();
        let mut db = create_catalog(&temp_dir, &["A", "B", "C"]);

        db.insert_record(position, &product("N")).unwrap();

        let mut expected = vec!["A", "B", "C"];
        expected.insert(position, "N");
        assert_eq!(codes(&mut db), expected, "insert at {}", position);
    }
}

/// Insert followed by remove at the same index restores the store.
#[test]
fn test_insert_then_remove_is_identity() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A", "B", "C"]);
    let before = db.read_all().unwrap();

    db.insert_record(1, &product("X")).unwrap();
    db.remove_record(1).unwrap();

    assert_eq!(db.read_all().unwrap(), before);
}

/// write_record at index == count behaves as append.
#[test]
fn test_write_at_count_appends() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A"]);

    db.write_record(1, &product("B")).unwrap();

    assert_eq!(codes(&mut db), vec!["A", "B"]);
}

/// Text holding a NUL byte cannot be read back unchanged, so it is refused.
#[test]
fn test_append_rejects_embedded_nul() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A"]);
    let record = CatalogRecord::new("A1", "Wid\0get", "pcs", 1.0, 2.0, 20.0).unwrap();

    let err = db.append_record(&record).unwrap_err();

    assert_eq!(err.code(), StoreErrorCode::InvalidValue);
    assert!(err.message().contains("NUL"));
    assert_eq!(codes(&mut db), vec!["A"]);
}

// =============================================================================
// Out Of Range
// =============================================================================

/// Reading at index == count is an error, not a read past EOF.
#[test]
fn test_read_at_count_fails() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A", "B"]);

    let err = db.read_record(2).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::IndexOutOfBounds);
    assert!(err.is_fatal());
}

/// Removing at index == count fails and changes nothing.
#[test]
fn test_remove_at_count_fails() {
    let temp_dir = create_temp_data_dir();
    let mut db = create_catalog(&temp_dir, &["A", "B"]);

    let err = db.remove_record(2).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::IndexOutOfBounds);
    assert_eq!(codes(&mut db), vec!["A", "B"]);
}

// =============================================================================
// Corruption
// =============================================================================

/// A price slot holding non-numeric text is corruption.
#[test]
fn test_non_numeric_price_is_corruption() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Catalog.db");
    let layout = CatalogLayout::default();
    create_catalog(&temp_dir, &["A"]).close().unwrap();

    let mut contents = fs::read(&path).unwrap();
    let price = HEADER_SIZE as usize + layout.code + layout.designation + layout.unity;
    contents[price..price + 4].copy_from_slice(b"oops");
    fs::write(&path, contents).unwrap();

    let mut db = CatalogDb::open(&path, layout).unwrap().unwrap();
    let err = db.read_record(0).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::DataCorruption);
    assert!(err.details().unwrap().contains("byte_offset: 4"));
}

/// A code slot holding punctuation is corruption.
#[test]
fn test_invalid_code_on_disk_is_corruption() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Catalog.db");
    create_catalog(&temp_dir, &["A"]).close().unwrap();

    let mut contents = fs::read(&path).unwrap();
    contents[HEADER_SIZE as usize] = b'-';
    fs::write(&path, contents).unwrap();

    let mut db = CatalogDb::open(&path, CatalogLayout::default())
        .unwrap()
        .unwrap();
    assert_eq!(
        db.read_record(0).unwrap_err().code(),
        StoreErrorCode::DataCorruption
    );
}

/// A header claiming more records than the file holds is rejected at open.
#[test]
fn test_header_larger_than_file_is_corruption() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("Customer.db");
    fs::write(&path, 7u32.to_le_bytes()).unwrap();

    let err = CustomerDb::open(&path, CustomerLayout::default())
        .err()
        .unwrap();
    assert_eq!(err.code(), StoreErrorCode::DataCorruption);
}

/// Customer text fields survive the fixed-width encoding.
#[test]
fn test_customer_fields_round_trip_through_store() {
    let temp_dir = create_temp_data_dir();
    let mut db =
        CustomerDb::create(temp_dir.path().join("Customer.db"), CustomerLayout::default()).unwrap();
    let customer = CustomerRecord::new("Dupont SARL", "12 rue des Lilas", "37000", "Tours");

    db.append_record(&CustomerRecord::default()).unwrap();
    db.append_record(&customer).unwrap();

    assert_eq!(db.read_record(0).unwrap(), CustomerRecord::default());
    assert_eq!(db.read_record(1).unwrap(), customer);
}
