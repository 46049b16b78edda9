//! Catalog (product) records
//!
//! On-disk block, default widths:
//!
//! ```text
//! +-------------+--------------------+-------------+
//! | code (16)   | designation (128)  | unity (20)  |
//! +-------------+--------------------+-------------+
//! | base_price (16) | selling_price (16) | rate_of_vat (16) |
//! +-----------------+--------------------+------------------+
//! ```
//!
//! Prices and VAT are stored as two-decimal text, zero-padded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::layout::CatalogLayout;
use super::{FieldProperties, FixedRecord};
use crate::codec::{
    format_fixed, is_valid_code, is_valid_positive_number, parse_non_negative, put_decimal,
    put_text, FieldError, SlotReader,
};

/// A product entry of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Product code, ASCII letters and digits only
    pub code: String,
    /// Free-text product name
    pub designation: String,
    /// Unit of sale ("pcs", "kg", "h", ...)
    pub unity: String,
    /// Purchase price
    pub base_price: f64,
    /// Selling price
    pub selling_price: f64,
    /// VAT rate in percent
    pub rate_of_vat: f64,
}

impl CatalogRecord {
    /// Builds a validated catalog record.
    pub fn new(
        code: impl Into<String>,
        designation: impl Into<String>,
        unity: impl Into<String>,
        base_price: f64,
        selling_price: f64,
        rate_of_vat: f64,
    ) -> Result<Self, FieldError> {
        let record = Self {
            code: code.into(),
            designation: designation.into(),
            unity: unity.into(),
            base_price,
            selling_price,
            rate_of_vat,
        };
        record.validate()?;
        Ok(record)
    }

    /// Sets the code after checking it is alphanumeric.
    pub fn set_code(&mut self, value: &str) -> Result<(), FieldError> {
        if !is_valid_code(value) {
            return Err(FieldError::InvalidCode(value.to_string()));
        }
        self.code = value.to_string();
        Ok(())
    }

    /// Checks the value constraints of every field.
    pub fn validate(&self) -> Result<(), FieldError> {
        if !is_valid_code(&self.code) {
            return Err(FieldError::InvalidCode(self.code.clone()));
        }
        check_amount("base_price", self.base_price)?;
        check_amount("selling_price", self.selling_price)?;
        check_amount("rate_of_vat", self.rate_of_vat)?;
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::NotPositiveNumber {
            field,
            value: value.to_string(),
        })
    }
}

/// Field identifiers of a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogField {
    Code,
    Designation,
    Unity,
    BasePrice,
    SellingPrice,
    RateOfVat,
}

impl CatalogField {
    /// All fields in on-disk order.
    pub const ALL: [CatalogField; 6] = [
        CatalogField::Code,
        CatalogField::Designation,
        CatalogField::Unity,
        CatalogField::BasePrice,
        CatalogField::SellingPrice,
        CatalogField::RateOfVat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CatalogField::Code => "code",
            CatalogField::Designation => "designation",
            CatalogField::Unity => "unity",
            CatalogField::BasePrice => "base_price",
            CatalogField::SellingPrice => "selling_price",
            CatalogField::RateOfVat => "rate_of_vat",
        }
    }
}

impl fmt::Display for CatalogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CatalogField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogField::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

impl FixedRecord for CatalogRecord {
    type Layout = CatalogLayout;
    type Field = CatalogField;
    const KIND: &'static str = "catalog";

    fn record_size(layout: &CatalogLayout) -> usize {
        layout.record_size()
    }

    fn encode(&self, layout: &CatalogLayout) -> Result<Vec<u8>, FieldError> {
        self.validate()?;

        let mut block = Vec::with_capacity(layout.record_size());
        put_text(&mut block, "code", layout.code, &self.code)?;
        put_text(&mut block, "designation", layout.designation, &self.designation)?;
        put_text(&mut block, "unity", layout.unity, &self.unity)?;
        put_decimal(&mut block, "base_price", layout.base_price, self.base_price)?;
        put_decimal(&mut block, "selling_price", layout.selling_price, self.selling_price)?;
        put_decimal(&mut block, "rate_of_vat", layout.rate_of_vat, self.rate_of_vat)?;
        Ok(block)
    }

    fn decode(block: &[u8], layout: &CatalogLayout) -> Result<Self, FieldError> {
        let mut slots = SlotReader::new(block, layout.record_size())?;

        let code = slots.text("code", layout.code)?;
        if !is_valid_code(&code) {
            return Err(FieldError::InvalidCode(code));
        }

        Ok(Self {
            code,
            designation: slots.text("designation", layout.designation)?,
            unity: slots.text("unity", layout.unity)?,
            base_price: slots.decimal("base_price", layout.base_price)?,
            selling_price: slots.decimal("selling_price", layout.selling_price)?,
            rate_of_vat: slots.decimal("rate_of_vat", layout.rate_of_vat)?,
        })
    }

    fn properties(field: CatalogField) -> FieldProperties<Self> {
        match field {
            CatalogField::Code => FieldProperties {
                name: "code",
                get_value: |r| r.code.clone(),
                set_value: |r, v| r.set_code(v),
                is_valid: is_valid_code,
            },
            CatalogField::Designation => FieldProperties {
                name: "designation",
                get_value: |r| r.designation.clone(),
                set_value: |r, v| {
                    r.designation = v.to_string();
                    Ok(())
                },
                is_valid: |_| true,
            },
            CatalogField::Unity => FieldProperties {
                name: "unity",
                get_value: |r| r.unity.clone(),
                set_value: |r, v| {
                    r.unity = v.to_string();
                    Ok(())
                },
                is_valid: |_| true,
            },
            CatalogField::BasePrice => FieldProperties {
                name: "base_price",
                get_value: |r| format_fixed(r.base_price),
                set_value: |r, v| {
                    r.base_price = parse_non_negative("base_price", v)?;
                    Ok(())
                },
                is_valid: is_valid_positive_number,
            },
            CatalogField::SellingPrice => FieldProperties {
                name: "selling_price",
                get_value: |r| format_fixed(r.selling_price),
                set_value: |r, v| {
                    r.selling_price = parse_non_negative("selling_price", v)?;
                    Ok(())
                },
                is_valid: is_valid_positive_number,
            },
            CatalogField::RateOfVat => FieldProperties {
                name: "rate_of_vat",
                get_value: |r| format_fixed(r.rate_of_vat),
                set_value: |r, v| {
                    r.rate_of_vat = parse_non_negative("rate_of_vat", v)?;
                    Ok(())
                },
                is_valid: is_valid_positive_number,
            },
        }
    }
}
