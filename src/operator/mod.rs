//! Operator credentials
//!
//! The operators allowed to edit documents, kept in a small text file next
//! to the catalog and customer stores. Names and passwords are obfuscated
//! with a keyed Vigenère shift; see [`cipher`].

pub mod cipher;
mod table;

pub use table::{Operator, OperatorTable};

/// Default file name of the operator table inside the data directory
pub const OPERATOR_TABLE_FILENAME: &str = "Operators.txt";

/// Default obfuscation key
pub const DEFAULT_OPERATOR_KEY: &str = "invoicedb";
