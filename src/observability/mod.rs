//! Observability subsystem for invoicedb
//!
//! Structured JSON log lines for store and document lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only: logging never changes storage behaviour
//! 2. No async or background threads
//! 3. Deterministic output (sorted keys, one line per event)
//!
//! # Usage
//!
//! ```ignore
//! use invoicedb::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::StoreOpened, &[("kind", "catalog"), ("count", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
