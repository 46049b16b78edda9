//! Quotation and bill files
//!
//! ```text
//! +------------------------------+
//! | customer block (fixed width) |
//! +------------------------------+
//! | edit_date                    |  length-prefixed strings
//! | expiry_date                  |
//! | doc_number                   |
//! | object                       |
//! | operator                     |
//! +------------------------------+
//! | row 0                        |  eight length-prefixed strings each
//! | row 1                        |
//! | ...                          |  until end of file
//! +------------------------------+
//! ```
//!
//! The document type is not part of the file.

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{DocumentError, DocumentResult};
use super::row::{string_read_error, DocumentRow};
use super::row_list::DocumentRowList;
use crate::codec::{read_string, write_string};
use crate::observability::{log_event_with_fields, Event};
use crate::record::{CustomerLayout, CustomerRecord, FixedRecord};
use crate::storage::StoreError;

/// Kind of commercial document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Quotation,
    Bill,
}

/// A quotation or bill: customer snapshot, header fields and rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub customer: CustomerRecord,
    pub edit_date: String,
    pub expiry_date: String,
    pub doc_number: String,
    pub object: String,
    pub operator: String,
    pub doc_type: DocumentType,
    pub rows: DocumentRowList,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the document to `path`, replacing any existing file, and
    /// fsyncs it.
    ///
    /// The customer and every row are validated before the file is
    /// touched.
    pub fn save_to_file(
        &self,
        path: impl AsRef<Path>,
        layout: &CustomerLayout,
    ) -> DocumentResult<()> {
        let path = path.as_ref();

        let customer_block = self
            .customer
            .encode(layout)
            .map_err(|e| StoreError::invalid_value(CustomerRecord::KIND, e))?;
        for row in &self.rows {
            row.validate()?;
        }

        let file = File::create(path).map_err(|e| {
            StoreError::write_failed(format!("Failed to create document: {}", path.display()), e)
        })?;
        let mut writer = BufWriter::new(file);

        let write_err = |e| StoreError::write_failed("Failed to write document", e);

        writer.write_all(&customer_block).map_err(write_err)?;
        for field in self.header_fields() {
            write_string(&mut writer, field).map_err(write_err)?;
        }
        for row in &self.rows {
            row.write_row(&mut writer).map_err(write_err)?;
        }

        let file = writer
            .into_inner()
            .map_err(|e| StoreError::write_failed("Failed to flush document", e.into_error()))?;
        file.sync_all()
            .map_err(|e| StoreError::write_failed("Failed to fsync document", e))?;

        log_event_with_fields(
            Event::DocumentSaved,
            &[
                ("path", &path.display().to_string()),
                ("rows", &self.rows.row_count().to_string()),
            ],
        );
        Ok(())
    }

    /// Reads a document written by [`Document::save_to_file`].
    ///
    /// Rows are read until the end of the file. The returned document is a
    /// `Quotation`; callers set `doc_type` when they know better.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        layout: &CustomerLayout,
    ) -> DocumentResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            StoreError::read_failed(format!("Failed to read document: {}", path.display()), e)
        })?;
        let len = bytes.len() as u64;
        let mut cursor = Cursor::new(bytes);

        let mut block = vec![0u8; layout.record_size()];
        cursor.read_exact(&mut block).map_err(|_| {
            StoreError::corruption_at_offset(0, "Document customer block is truncated")
        })?;
        let customer = CustomerRecord::decode(&block, layout).map_err(|e| {
            StoreError::corruption_at_offset(0, format!("Undecodable document customer: {}", e))
        })?;

        let mut next = || read_string(&mut cursor).map_err(string_read_error);
        let edit_date = next()?;
        let expiry_date = next()?;
        let doc_number = next()?;
        let object = next()?;
        let operator = next()?;

        let mut document = Document {
            customer,
            edit_date,
            expiry_date,
            doc_number,
            object,
            operator,
            doc_type: DocumentType::Quotation,
            rows: DocumentRowList::new(),
        };

        while cursor.position() < len {
            let offset = cursor.position();
            let row = DocumentRow::read_row(&mut cursor).map_err(|e| match e {
                DocumentError::Store(store) if store.is_fatal() => {
                    DocumentError::Store(StoreError::corruption_at_offset(
                        offset,
                        store.message().to_string(),
                    ))
                }
                other => other,
            })?;
            document.rows.push_back(row);
        }

        log_event_with_fields(
            Event::DocumentLoaded,
            &[
                ("path", &path.display().to_string()),
                ("rows", &document.rows.row_count().to_string()),
            ],
        );
        Ok(document)
    }

    fn header_fields(&self) -> [&str; 5] {
        [
            &self.edit_date,
            &self.expiry_date,
            &self.doc_number,
            &self.object,
            &self.operator,
        ]
    }
}
