//! Fixed-width slot encoding
//!
//! A slot of width N always occupies exactly N bytes. Text shorter than N is
//! followed by zero bytes; text of exactly N bytes has no terminator. Values
//! that do not fit, or that hold a NUL byte, are rejected rather than
//! truncated.

use super::decimal::{format_fixed, parse_non_negative};
use super::errors::FieldError;

/// Appends `value` to `out` as a zero-padded slot of `width` bytes.
pub fn put_text(
    out: &mut Vec<u8>,
    field: &'static str,
    width: usize,
    value: &str,
) -> Result<(), FieldError> {
    let bytes = value.as_bytes();
    if bytes.contains(&0) {
        return Err(FieldError::ContainsNul { field });
    }
    if bytes.len() > width {
        return Err(FieldError::TooLong {
            field,
            width,
            len: bytes.len(),
        });
    }
    out.extend_from_slice(bytes);
    out.resize(out.len() + (width - bytes.len()), 0);
    Ok(())
}

/// Appends `value` as two-decimal text in a slot of `width` bytes.
pub fn put_decimal(
    out: &mut Vec<u8>,
    field: &'static str,
    width: usize,
    value: f64,
) -> Result<(), FieldError> {
    put_text(out, field, width, &format_fixed(value))
}

/// Reads a slot as a NUL-terminated string.
pub fn get_text(field: &'static str, slot: &[u8]) -> Result<String, FieldError> {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    std::str::from_utf8(&slot[..end])
        .map(str::to_owned)
        .map_err(|_| FieldError::InvalidUtf8 { field })
}

/// Reads a slot holding decimal text.
pub fn get_decimal(field: &'static str, slot: &[u8]) -> Result<f64, FieldError> {
    let text = get_text(field, slot)?;
    parse_non_negative(field, &text)
}

/// Hands out consecutive slots of a record block.
///
/// The block length is checked once up front so slot reads never go out
/// of bounds.
pub struct SlotReader<'a> {
    block: &'a [u8],
    pos: usize,
}

impl<'a> SlotReader<'a> {
    /// Creates a reader over `block`, which must be exactly `expected` bytes.
    pub fn new(block: &'a [u8], expected: usize) -> Result<Self, FieldError> {
        if block.len() != expected {
            return Err(FieldError::BlockSize {
                expected,
                actual: block.len(),
            });
        }
        Ok(Self { block, pos: 0 })
    }

    /// Reads the next slot as text.
    pub fn text(&mut self, field: &'static str, width: usize) -> Result<String, FieldError> {
        let slot = self.take(width);
        get_text(field, slot)
    }

    /// Reads the next slot as a non-negative decimal.
    pub fn decimal(&mut self, field: &'static str, width: usize) -> Result<f64, FieldError> {
        let slot = self.take(width);
        get_decimal(field, slot)
    }

    fn take(&mut self, width: usize) -> &'a [u8] {
        let end = (self.pos + width).min(self.block.len());
        let slot = &self.block[self.pos..end];
        self.pos = end;
        slot
    }
}
