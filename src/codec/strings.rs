//! Length-prefixed string encoding
//!
//! Format: byte length (u32 LE) followed by the UTF-8 bytes, no terminator.

use std::io::{self, Read, Write};

/// Writes `value` as a length-prefixed string.
pub fn write_string<W: Write>(writer: &mut W, value: &str) -> io::Result<()> {
    let len = u32::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("String too long: {} bytes", value.len()),
        )
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(value.as_bytes())
}

/// Reads a length-prefixed string.
///
/// A length that runs past the end of the input is `UnexpectedEof`; the
/// buffer grows with the bytes actually read, so a corrupt length cannot
/// trigger a huge allocation.
pub fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as u64;

    let mut buf = Vec::new();
    reader.take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("String truncated: expected {} bytes, got {}", len, buf.len()),
        ));
    }

    String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e)))
}
