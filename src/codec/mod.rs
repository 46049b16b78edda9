//! Field codec for invoicedb
//!
//! Two encodings live here:
//!
//! - Fixed-width slots, used by catalog and customer records so that every
//!   record of a store has the same size and can be addressed by offset.
//!   Text is zero-padded to the slot width; numbers are stored as
//!   two-decimal text (`"12.50"`), never as binary floats.
//! - Length-prefixed strings, used by document files whose header fields
//!   and rows have no fixed width.
//!
//! ```text
//! fixed slot (width 8):    | '1' '2' '.' '5' '0' 00 00 00 |
//! length-prefixed string:  | len (u32 LE) | UTF-8 bytes ... |
//! ```

mod decimal;
mod errors;
mod fixed;
mod strings;

pub use decimal::{
    format_compact, format_fixed, is_valid_code, is_valid_positive_number, parse_compact,
    parse_non_negative,
};
pub use errors::FieldError;
pub use fixed::{get_decimal, get_text, put_decimal, put_text, SlotReader};
pub use strings::{read_string, write_string};
