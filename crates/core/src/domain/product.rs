use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived stock condition. Never stored; always recomputed from the
/// current quantity and threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Normal,
    BelowMinimum,
    OutOfStock,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::BelowMinimum => "BELOW MINIMUM",
            Self::OutOfStock => "OUT OF STOCK",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub min_stock: u32,
}

impl Product {
    /// A quantity equal to the threshold still counts as normal.
    pub fn status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity < self.min_stock {
            StockStatus::BelowMinimum
        } else {
            StockStatus::Normal
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Request payload for registering a product. The catalog allocates the id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub min_stock: u32,
}

/// Partial edit of a product. `None` keeps the stored value; the id itself
/// is not editable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub min_stock: Option<u32>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductId, StockStatus};

    fn product(quantity: u32, min_stock: u32) -> Product {
        Product {
            id: ProductId(1),
            name: "Notebook Dell".to_string(),
            category: "Eletrônicos".to_string(),
            quantity,
            unit_price: Decimal::new(350_000, 2),
            min_stock,
        }
    }

    #[test]
    fn status_is_a_pure_function_of_quantity_and_threshold() {
        assert_eq!(product(0, 5).status(), StockStatus::OutOfStock);
        assert_eq!(product(3, 5).status(), StockStatus::BelowMinimum);
        assert_eq!(product(5, 5).status(), StockStatus::Normal);
        assert_eq!(product(15, 5).status(), StockStatus::Normal);
    }

    #[test]
    fn zero_threshold_product_is_never_below_minimum() {
        assert_eq!(product(1, 0).status(), StockStatus::Normal);
        assert_eq!(product(0, 0).status(), StockStatus::OutOfStock);
    }

    #[test]
    fn line_total_is_quantity_times_unit_price() {
        assert_eq!(product(15, 5).line_total(), Decimal::new(5_250_000, 2));
        assert_eq!(product(0, 5).line_total(), Decimal::ZERO);
    }
}
