//! Store error types
//!
//! Error codes:
//! - INV_STORE_IO_ERROR (ERROR severity)
//! - INV_STORE_WRITE_FAILED (ERROR severity)
//! - INV_STORE_READ_FAILED (ERROR severity)
//! - INV_DATA_CORRUPTION (FATAL severity)
//! - INV_INVALID_VALUE (FATAL severity)
//! - INV_INDEX_OUT_OF_BOUNDS (FATAL severity)

use std::fmt;
use std::io;

use crate::codec::FieldError;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, caller may continue
    Error,
    /// Caller must stop using the store
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Open, seek or metadata failure
    StoreIoError,
    /// Short or failed write, or failed fsync
    StoreWriteFailed,
    /// Short or failed read
    StoreReadFailed,
    /// Malformed header, record or document
    DataCorruption,
    /// A record value failed validation on encode
    InvalidValue,
    /// Record index outside the valid range
    IndexOutOfBounds,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::StoreIoError => "INV_STORE_IO_ERROR",
            StoreErrorCode::StoreWriteFailed => "INV_STORE_WRITE_FAILED",
            StoreErrorCode::StoreReadFailed => "INV_STORE_READ_FAILED",
            StoreErrorCode::DataCorruption => "INV_DATA_CORRUPTION",
            StoreErrorCode::InvalidValue => "INV_INVALID_VALUE",
            StoreErrorCode::IndexOutOfBounds => "INV_INDEX_OUT_OF_BOUNDS",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::StoreIoError
            | StoreErrorCode::StoreWriteFailed
            | StoreErrorCode::StoreReadFailed => Severity::Error,
            StoreErrorCode::DataCorruption
            | StoreErrorCode::InvalidValue
            | StoreErrorCode::IndexOutOfBounds => Severity::Fatal,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with code, message and optional context
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a store I/O error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StoreErrorCode::StoreIoError, message)
        }
    }

    /// Create a write failed error
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StoreErrorCode::StoreWriteFailed, message)
        }
    }

    /// Create a write failed error without IO source
    pub fn write_failed_no_source(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::StoreWriteFailed, message)
    }

    /// Create a read failed error
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StoreErrorCode::StoreReadFailed, message)
        }
    }

    /// Create a data corruption error (FATAL)
    pub fn data_corruption(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::DataCorruption, message)
    }

    /// Create a data corruption error with byte offset context
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            details: Some(format!("byte_offset: {}", offset)),
            ..Self::new(StoreErrorCode::DataCorruption, reason)
        }
    }

    /// Create an invalid value error from a field validation failure
    pub fn invalid_value(kind: &str, err: FieldError) -> Self {
        Self::new(
            StoreErrorCode::InvalidValue,
            format!("Invalid {} record: {}", kind, err),
        )
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, count: usize) -> Self {
        Self {
            details: Some(format!("index: {}, record_count: {}", index, count)),
            ..Self::new(
                StoreErrorCode::IndexOutOfBounds,
                "Record index outside the store",
            )
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error is fatal
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
