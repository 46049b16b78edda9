//! invoicedb CLI entry point
//!
//! Parsing, configuration and command dispatch live in `cli::run`; main
//! only turns a failure into a FATAL log line and a non-zero exit.

use invoicedb::cli;
use invoicedb::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        Logger::fatal(
            "CLI_COMMAND_FAILED",
            &[("code", e.code_str()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
