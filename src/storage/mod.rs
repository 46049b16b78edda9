//! Record store subsystem for invoicedb
//!
//! A store is one file of fixed-size records behind a 4-byte count header.
//! Records are addressed by index; insert and remove keep the records
//! contiguous by shifting later blocks.
//!
//! # Design Principles
//!
//! - One `File` per store, owned exclusively by the caller
//! - Synchronous `std::fs` I/O, no caching
//! - Every failure is a typed `StoreError`; nothing aborts the process
//! - A missing file on `open` is the only soft failure (`Ok(None)`)

mod errors;
mod record_file;

pub use errors::{Severity, StoreError, StoreErrorCode, StoreResult};
pub use record_file::{RecordFile, HEADER_SIZE};

use crate::record::{CatalogRecord, CustomerRecord};

/// Default file name of the catalog store.
pub const CATALOG_DB_FILENAME: &str = "Catalog.db";

/// Default file name of the customer store.
pub const CUSTOMER_DB_FILENAME: &str = "Customer.db";

/// Store of catalog (product) records.
pub type CatalogDb = RecordFile<CatalogRecord>;

/// Store of customer records.
pub type CustomerDb = RecordFile<CustomerRecord>;
