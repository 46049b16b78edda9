//! invoicedb - fixed-record catalog and customer stores plus quotation files
//!
//! - `codec`: fixed-width slots and length-prefixed strings
//! - `record`: catalog and customer record types and their layouts
//! - `storage`: index-addressed record files
//! - `document`: quotations and bills with their rows
//! - `observability`: structured JSON logging
//! - `operator`: operator names and passwords
//! - `config`, `cli`: the `invoicedb` binary

pub mod cli;
pub mod codec;
pub mod config;
pub mod document;
pub mod observability;
pub mod operator;
pub mod record;
pub mod storage;
