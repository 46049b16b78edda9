//! CLI argument definitions using clap
//!
//! Commands:
//! - invoicedb init
//! - invoicedb catalog <count|list|show|add|insert|update|remove>
//! - invoicedb customer <count|list|show|add|insert|update|remove>
//! - invoicedb document <show|add-row>
//! - invoicedb operator <count|list|find|set|remove>
//!
//! Every command accepts `--config <path>`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// invoicedb - catalog, customer and quotation files for small invoicing tools
#[derive(Parser, Debug)]
#[command(name = "invoicedb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory, empty catalog and customer stores and an
    /// empty operator table
    Init,

    /// Operate on the catalog store
    Catalog {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Operate on the customer store
    Customer {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Inspect or extend a document file
    Document {
        #[command(subcommand)]
        action: DocumentAction,
    },

    /// Manage the operator table
    Operator {
        #[command(subcommand)]
        action: OperatorAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// Print the number of records
    Count,

    /// Print every record in index order
    List,

    /// Print one record
    Show { index: usize },

    /// Append a record built from --set values
    Add {
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Insert a record at an index, shifting later records
    Insert {
        index: usize,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Change fields of an existing record
    Update {
        index: usize,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Remove a record, shifting later records
    Remove { index: usize },
}

#[derive(Subcommand, Debug)]
pub enum DocumentAction {
    /// Print a document as JSON
    Show { path: PathBuf },

    /// Append a row, creating an empty quotation if the file is missing
    AddRow {
        path: PathBuf,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OperatorAction {
    /// Print the number of operators
    Count,

    /// Print operator names in table order
    List,

    /// Print the index of an operator, matching the name without case
    Find { name: String },

    /// Add an operator or change its password
    Set { name: String, password: String },

    /// Remove an operator by index
    Remove { index: usize },
}

/// Parses `field=value`; the value may itself contain `=`.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((field.to_string(), value.to_string()))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
