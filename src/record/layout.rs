//! Field widths for fixed-size records
//!
//! Widths are plain configuration values rather than process-wide
//! constants: every store and document is given the layout it must use.
//! Changing a width changes the file format, so a store must always be
//! reopened with the layout it was created with.

use serde::{Deserialize, Serialize};

pub const CATALOG_CODE_WIDTH: usize = 16;
pub const CATALOG_DESIGNATION_WIDTH: usize = 128;
pub const CATALOG_UNITY_WIDTH: usize = 20;
pub const CATALOG_BASE_PRICE_WIDTH: usize = 16;
pub const CATALOG_SELLING_PRICE_WIDTH: usize = 16;
pub const CATALOG_RATE_OF_VAT_WIDTH: usize = 16;

pub const CUSTOMER_NAME_WIDTH: usize = 70;
pub const CUSTOMER_ADDRESS_WIDTH: usize = 130;
pub const CUSTOMER_POSTAL_CODE_WIDTH: usize = 20;
pub const CUSTOMER_TOWN_WIDTH: usize = 90;

// "0.00" is the shortest text a decimal slot ever holds.
const MIN_DECIMAL_WIDTH: usize = 4;

/// Byte widths of the catalog record fields, in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogLayout {
    pub code: usize,
    pub designation: usize,
    pub unity: usize,
    pub base_price: usize,
    pub selling_price: usize,
    pub rate_of_vat: usize,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self {
            code: CATALOG_CODE_WIDTH,
            designation: CATALOG_DESIGNATION_WIDTH,
            unity: CATALOG_UNITY_WIDTH,
            base_price: CATALOG_BASE_PRICE_WIDTH,
            selling_price: CATALOG_SELLING_PRICE_WIDTH,
            rate_of_vat: CATALOG_RATE_OF_VAT_WIDTH,
        }
    }
}

impl CatalogLayout {
    /// Total size of one catalog record.
    pub fn record_size(&self) -> usize {
        self.code + self.designation + self.unity + self.base_price + self.selling_price
            + self.rate_of_vat
    }

    /// Checks that every slot can hold at least one value.
    pub fn validate(&self) -> Result<(), String> {
        let text = [
            ("code", self.code),
            ("designation", self.designation),
            ("unity", self.unity),
        ];
        for (name, width) in text {
            if width == 0 {
                return Err(format!("catalog_layout.{} must be > 0", name));
            }
        }

        let decimals = [
            ("base_price", self.base_price),
            ("selling_price", self.selling_price),
            ("rate_of_vat", self.rate_of_vat),
        ];
        for (name, width) in decimals {
            if width < MIN_DECIMAL_WIDTH {
                return Err(format!(
                    "catalog_layout.{} must be >= {}",
                    name, MIN_DECIMAL_WIDTH
                ));
            }
        }
        Ok(())
    }
}

/// Byte widths of the customer record fields, in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerLayout {
    pub name: usize,
    pub address: usize,
    pub postal_code: usize,
    pub town: usize,
}

impl Default for CustomerLayout {
    fn default() -> Self {
        Self {
            name: CUSTOMER_NAME_WIDTH,
            address: CUSTOMER_ADDRESS_WIDTH,
            postal_code: CUSTOMER_POSTAL_CODE_WIDTH,
            town: CUSTOMER_TOWN_WIDTH,
        }
    }
}

impl CustomerLayout {
    /// Total size of one customer record.
    pub fn record_size(&self) -> usize {
        self.name + self.address + self.postal_code + self.town
    }

    pub fn validate(&self) -> Result<(), String> {
        let widths = [
            ("name", self.name),
            ("address", self.address),
            ("postal_code", self.postal_code),
            ("town", self.town),
        ];
        for (name, width) in widths {
            if width == 0 {
                return Err(format!("customer_layout.{} must be > 0", name));
            }
        }
        Ok(())
    }
}
