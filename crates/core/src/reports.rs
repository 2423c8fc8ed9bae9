use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::ProductCatalog;
use crate::domain::product::Product;

/// One row of the low-stock report. `restock_needed` is how many units
/// would bring the product back up to its threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LowStockLine {
    pub product: Product,
    pub restock_needed: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValuationLine {
    pub product: Product,
    pub line_total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValuationReport {
    pub lines: Vec<ValuationLine>,
    pub grand_total: Decimal,
}

/// Products strictly below their threshold, in catalog order. A quantity
/// equal to the threshold is not low stock.
pub fn low_stock_report(catalog: &ProductCatalog) -> Vec<LowStockLine> {
    catalog
        .products()
        .filter(|product| product.quantity < product.min_stock)
        .map(|product| LowStockLine {
            restock_needed: product.min_stock - product.quantity,
            product: product.clone(),
        })
        .collect()
}

/// Line totals and their grand total over the whole catalog. An empty
/// catalog yields an empty line list and a zero total.
pub fn valuation_report(catalog: &ProductCatalog) -> ValuationReport {
    let lines: Vec<ValuationLine> = catalog
        .products()
        .map(|product| ValuationLine { line_total: product.line_total(), product: product.clone() })
        .collect();
    let grand_total = lines.iter().map(|line| line.line_total).sum();

    ValuationReport { lines, grand_total }
}
