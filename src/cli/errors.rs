//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status.

use std::fmt;
use std::io;

use crate::codec::FieldError;
use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::storage::{StoreError, StoreErrorCode};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, data directory)
    IoError,
    /// Store file missing
    NotInitialized,
    /// Bad field name or value on the command line
    InvalidArgument,
    /// Failure reported by a store or document operation
    Store(StoreErrorCode),
    /// Row list misuse on a document
    Document(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "INV_CLI_CONFIG_ERROR",
            Self::IoError => "INV_CLI_IO_ERROR",
            Self::NotInitialized => "INV_CLI_NOT_INITIALIZED",
            Self::InvalidArgument => "INV_CLI_INVALID_ARGUMENT",
            Self::Store(code) => code.code(),
            Self::Document(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Store file does not exist
    pub fn not_initialized(path: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!(
                "Store not found: {}. Run 'invoicedb init' first.",
                path.display()
            ),
        )
    }

    /// Invalid command line value
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        let message = match e.details() {
            Some(details) => format!("{} ({})", e.message(), details),
            None => e.message().to_string(),
        };
        Self::new(CliErrorCode::Store(e.code()), message)
    }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::Store(store) => store.into(),
            DocumentError::Field(field) => field.into(),
            other => Self::new(CliErrorCode::Document(other.code()), other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
