//! Field-level validation and decoding errors

use thiserror::Error;

/// Errors raised while validating, encoding or decoding a single field.
///
/// The storage layer decides what a `FieldError` means: raised while
/// encoding it is an invalid value, raised while decoding a block read
/// from disk it is data corruption.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("invalid code '{0}': only ASCII letters and digits are allowed")]
    InvalidCode(String),

    #[error("{field} is not a positive number: '{value}'")]
    NotPositiveNumber { field: &'static str, value: String },

    #[error("{field} does not fit in {width} bytes ({len} bytes given)")]
    TooLong {
        field: &'static str,
        width: usize,
        len: usize,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} contains a NUL byte")]
    ContainsNul { field: &'static str },

    #[error("{field} contains a line break")]
    ContainsLineBreak { field: &'static str },

    #[error("{field} holds invalid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("record block is {actual} bytes, expected {expected}")]
    BlockSize { expected: usize, actual: usize },

    #[error("unknown field: {0}")]
    UnknownField(String),
}
