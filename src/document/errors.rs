//! # Document Errors

use thiserror::Error;

use crate::codec::FieldError;
use crate::storage::StoreError;

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document and row list errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Row list is empty")]
    EmptyList,

    #[error("Row {position} not found (list holds {count} rows)")]
    RowNotFound { position: usize, count: usize },

    #[error("Invalid row value: {0}")]
    Field(#[from] FieldError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DocumentError {
    /// Stable code used in CLI error responses
    pub fn code(&self) -> &'static str {
        match self {
            DocumentError::EmptyList => "INV_DOCUMENT_EMPTY_LIST",
            DocumentError::RowNotFound { .. } => "INV_DOCUMENT_ROW_NOT_FOUND",
            DocumentError::Field(_) => "INV_INVALID_VALUE",
            DocumentError::Store(e) => e.code().code(),
        }
    }
}
