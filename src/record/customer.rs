//! Customer records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::layout::CustomerLayout;
use super::{FieldProperties, FixedRecord};
use crate::codec::{put_text, FieldError, SlotReader};

/// A customer entry. All fields are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub town: String,
}

impl CustomerRecord {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        postal_code: impl Into<String>,
        town: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            postal_code: postal_code.into(),
            town: town.into(),
        }
    }
}

/// Field identifiers of a customer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    Address,
    PostalCode,
    Town,
}

impl CustomerField {
    /// All fields in on-disk order.
    pub const ALL: [CustomerField; 4] = [
        CustomerField::Name,
        CustomerField::Address,
        CustomerField::PostalCode,
        CustomerField::Town,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Address => "address",
            CustomerField::PostalCode => "postal_code",
            CustomerField::Town => "town",
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CustomerField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerField::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

impl FixedRecord for CustomerRecord {
    type Layout = CustomerLayout;
    type Field = CustomerField;
    const KIND: &'static str = "customer";

    fn record_size(layout: &CustomerLayout) -> usize {
        layout.record_size()
    }

    fn encode(&self, layout: &CustomerLayout) -> Result<Vec<u8>, FieldError> {
        let mut block = Vec::with_capacity(layout.record_size());
        put_text(&mut block, "name", layout.name, &self.name)?;
        put_text(&mut block, "address", layout.address, &self.address)?;
        put_text(&mut block, "postal_code", layout.postal_code, &self.postal_code)?;
        put_text(&mut block, "town", layout.town, &self.town)?;
        Ok(block)
    }

    fn decode(block: &[u8], layout: &CustomerLayout) -> Result<Self, FieldError> {
        let mut slots = SlotReader::new(block, layout.record_size())?;
        Ok(Self {
            name: slots.text("name", layout.name)?,
            address: slots.text("address", layout.address)?,
            postal_code: slots.text("postal_code", layout.postal_code)?,
            town: slots.text("town", layout.town)?,
        })
    }

    fn properties(field: CustomerField) -> FieldProperties<Self> {
        match field {
            CustomerField::Name => FieldProperties {
                name: "name",
                get_value: |r| r.name.clone(),
                set_value: |r, v| {
                    r.name = v.to_string();
                    Ok(())
                },
                is_valid: |_| true,
            },
            CustomerField::Address => FieldProperties {
                name: "address",
                get_value: |r| r.address.clone(),
                set_value: |r, v| {
                    r.address = v.to_string();
                    Ok(())
                },
                is_valid: |_| true,
            },
            CustomerField::PostalCode => FieldProperties {
                name: "postal_code",
                get_value: |r| r.postal_code.clone(),
                set_value: |r, v| {
                    r.postal_code = v.to_string();
                    Ok(())
                },
                is_valid: |_| true,
            },
            CustomerField::Town => FieldProperties {
                name: "town",
                get_value: |r| r.town.clone(),
                set_value: |r, v| {
                    r.town = v.to_string();
                    Ok(())
                },
                is_valid: |_| true,
            },
        }
    }
}
