//! Observable events for invoicedb
//!
//! Every log line emitted by the storage and document layers names one of
//! these events. Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in invoicedb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Store lifecycle
    /// New store file created with an empty header
    StoreCreated,
    /// Existing store file opened
    StoreOpened,
    /// Open found no file at the path
    StoreMissing,
    /// Header written and handle released
    StoreClosed,
    /// Store dropped without close; header written on drop
    StoreDroppedUnclosed,

    // Record operations
    /// Record written at the end of the store
    RecordAppended,
    /// Record inserted with a shift of later records
    RecordInserted,
    /// Record overwritten in place
    RecordUpdated,
    /// Record removed with a shift of later records
    RecordRemoved,
    /// write_record received an index past the end and appended instead
    WriteFellBackToAppend,

    // Documents
    /// Document written to disk
    DocumentSaved,
    /// Document read from disk
    DocumentLoaded,

    // Operators
    /// Operator table read from disk
    OperatorTableLoaded,
    /// Operator table written to disk
    OperatorTableSaved,

    // Integrity
    /// Malformed header, record or document detected
    CorruptionDetected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::StoreCreated => "STORE_CREATED",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreMissing => "STORE_MISSING",
            Event::StoreClosed => "STORE_CLOSED",
            Event::StoreDroppedUnclosed => "STORE_DROPPED_UNCLOSED",

            Event::RecordAppended => "RECORD_APPENDED",
            Event::RecordInserted => "RECORD_INSERTED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordRemoved => "RECORD_REMOVED",
            Event::WriteFellBackToAppend => "WRITE_FELL_BACK_TO_APPEND",

            Event::DocumentSaved => "DOCUMENT_SAVED",
            Event::DocumentLoaded => "DOCUMENT_LOADED",

            Event::OperatorTableLoaded => "OPERATOR_TABLE_LOADED",
            Event::OperatorTableSaved => "OPERATOR_TABLE_SAVED",

            Event::CorruptionDetected => "DATA_CORRUPTION_DETECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RecordAppended
            | Event::RecordInserted
            | Event::RecordUpdated
            | Event::RecordRemoved => Severity::Trace,
            Event::StoreDroppedUnclosed | Event::WriteFellBackToAppend => Severity::Warn,
            Event::CorruptionDetected => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
