//! Document rows
//!
//! A row is written as eight length-prefixed strings. Numbers go through
//! `format_compact`, so a quantity of 3 is stored as `"3"` and a price of
//! 2.5 as `"2.50"`.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use super::errors::{DocumentError, DocumentResult};
use crate::codec::{
    format_compact, parse_compact, parse_non_negative, read_string, write_string, FieldError,
};
use crate::storage::StoreError;

/// One line of a quotation or bill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub code: String,
    pub designation: String,
    pub quantity: f64,
    pub unity: String,
    pub base_price: f64,
    pub selling_price: f64,
    /// Discount in percent
    pub discount: f64,
    pub rate_of_vat: f64,
}

impl DocumentRow {
    /// Field names accepted by [`DocumentRow::set_field_value`], in file order.
    pub const FIELD_NAMES: [&'static str; 8] = [
        "code",
        "designation",
        "quantity",
        "unity",
        "base_price",
        "selling_price",
        "discount",
        "rate_of_vat",
    ];

    /// Sets a field from its text form.
    pub fn set_field_value(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field.to_ascii_lowercase().as_str() {
            "code" => self.code = value.to_string(),
            "designation" => self.designation = value.to_string(),
            "quantity" => self.quantity = parse_non_negative("quantity", value)?,
            "unity" => self.unity = value.to_string(),
            "base_price" => self.base_price = parse_non_negative("base_price", value)?,
            "selling_price" => self.selling_price = parse_non_negative("selling_price", value)?,
            "discount" => self.discount = parse_non_negative("discount", value)?,
            "rate_of_vat" => self.rate_of_vat = parse_non_negative("rate_of_vat", value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Checks that every number is finite and >= 0, the range `read_row`
    /// accepts back.
    pub fn validate(&self) -> Result<(), FieldError> {
        let numbers = [
            ("quantity", self.quantity),
            ("base_price", self.base_price),
            ("selling_price", self.selling_price),
            ("discount", self.discount),
            ("rate_of_vat", self.rate_of_vat),
        ];
        for (field, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(FieldError::NotPositiveNumber {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Writes the row as eight length-prefixed strings.
    pub fn write_row<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_string(writer, &self.code)?;
        write_string(writer, &self.designation)?;
        write_string(writer, &format_compact(self.quantity))?;
        write_string(writer, &self.unity)?;
        write_string(writer, &format_compact(self.base_price))?;
        write_string(writer, &format_compact(self.selling_price))?;
        write_string(writer, &format_compact(self.discount))?;
        write_string(writer, &format_compact(self.rate_of_vat))
    }

    /// Reads a row written by [`DocumentRow::write_row`].
    ///
    /// A truncated row or a number slot that does not parse is corruption.
    pub fn read_row<R: Read>(reader: &mut R) -> DocumentResult<Self> {
        let mut next = || read_string(&mut *reader).map_err(string_read_error);

        let code = next()?;
        let designation = next()?;
        let quantity = next()?;
        let unity = next()?;
        let base_price = next()?;
        let selling_price = next()?;
        let discount = next()?;
        let rate_of_vat = next()?;

        Ok(Self {
            code,
            designation,
            quantity: number("quantity", &quantity)?,
            unity,
            base_price: number("base_price", &base_price)?,
            selling_price: number("selling_price", &selling_price)?,
            discount: number("discount", &discount)?,
            rate_of_vat: number("rate_of_vat", &rate_of_vat)?,
        })
    }
}

fn number(field: &'static str, text: &str) -> DocumentResult<f64> {
    parse_compact(field, text).map_err(|e| {
        DocumentError::Store(StoreError::data_corruption(format!(
            "Malformed document row: {}",
            e
        )))
    })
}

pub(super) fn string_read_error(e: io::Error) -> DocumentError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => DocumentError::Store(
            StoreError::data_corruption(format!("Malformed document: {}", e)),
        ),
        _ => DocumentError::Store(StoreError::read_failed("Failed to read document", e)),
    }
}
