//! Fixed-width record types
//!
//! Catalog and customer entries are stored as fixed-size blocks so that a
//! store can reach record `i` at `HEADER_SIZE + i * record_size`. Each
//! record type declares its field widths through a layout value passed
//! into `encode` / `decode`, and exposes a field accessor table used by
//! editors and the CLI to get, set and validate fields by name.

mod catalog;
mod customer;
mod layout;

pub use catalog::{CatalogField, CatalogRecord};
pub use customer::{CustomerField, CustomerRecord};
pub use layout::{CatalogLayout, CustomerLayout};

use std::fmt;

use crate::codec::FieldError;

/// Accessors for one field of a record type.
pub struct FieldProperties<R> {
    /// Field name as used in configuration and on the command line
    pub name: &'static str,
    /// Renders the field as text
    pub get_value: fn(&R) -> String,
    /// Parses, validates and stores a text value
    pub set_value: fn(&mut R, &str) -> Result<(), FieldError>,
    /// Checks a text value without storing it
    pub is_valid: fn(&str) -> bool,
}

/// A record type that serializes to a fixed-size block.
pub trait FixedRecord: Sized {
    /// Field widths used to encode and decode this record type.
    type Layout: Copy + fmt::Debug;
    /// Field identifier for the accessor table.
    type Field: Copy + fmt::Debug;
    /// Short name used in logs and error messages.
    const KIND: &'static str;

    /// Size in bytes of one encoded record.
    fn record_size(layout: &Self::Layout) -> usize;

    /// Encodes the record into exactly `record_size(layout)` bytes.
    fn encode(&self, layout: &Self::Layout) -> Result<Vec<u8>, FieldError>;

    /// Decodes a block produced by `encode` with the same layout.
    fn decode(block: &[u8], layout: &Self::Layout) -> Result<Self, FieldError>;

    /// Returns the accessor table entry for `field`.
    fn properties(field: Self::Field) -> FieldProperties<Self>;

    fn field_value(&self, field: Self::Field) -> String {
        (Self::properties(field).get_value)(self)
    }

    fn set_field_value(&mut self, field: Self::Field, value: &str) -> Result<(), FieldError> {
        (Self::properties(field).set_value)(self, value)
    }
}
