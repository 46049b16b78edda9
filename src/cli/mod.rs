//! CLI module for invoicedb
//!
//! Provides command-line interface for:
//! - init: Create the data directory and empty stores
//! - catalog / customer: Record store operations
//! - document: Show a document or append a row to it
//! - operator: Operator table maintenance

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, DocumentAction, OperatorAction, RecordAction};
pub use commands::{execute, init, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
