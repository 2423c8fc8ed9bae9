use rust_decimal::Decimal;
use stocky_core::{LowStockLine, Product, ValuationReport};

pub const NO_PRODUCTS: &str = "The catalog has no registered products.";
pub const NO_LOW_STOCK: &str = "No products are below their minimum stock.";

pub fn money(value: Decimal, currency: &str) -> String {
    format!("{currency} {:.2}", value.round_dp(2))
}

/// Detail card for a single product, with the derived line total and
/// stock status.
pub fn product_details(product: &Product, currency: &str) -> String {
    [
        format!("ID: {}", product.id),
        format!("Name: {}", product.name),
        format!("Category: {}", product.category),
        format!("Quantity on hand: {}", product.quantity),
        format!("Unit price: {}", money(product.unit_price, currency)),
        format!("Stock value: {}", money(product.line_total(), currency)),
        format!("Minimum stock: {}", product.min_stock),
        format!("Status: {}", product.status().label()),
    ]
    .join("\n")
}

/// Full valuation table: every product with its line total, then the
/// grand total and record count.
pub fn valuation_table(report: &ValuationReport, currency: &str) -> String {
    if report.lines.is_empty() {
        return NO_PRODUCTS.to_string();
    }

    let mut out = Vec::with_capacity(report.lines.len() + 5);
    out.push(format!(
        "{:<5} {:<25} {:<15} {:>8} {:>14} {:>14}",
        "ID", "Name", "Category", "Qty", "Price", "Total"
    ));
    out.push("-".repeat(86));
    for line in &report.lines {
        let product = &line.product;
        out.push(format!(
            "{:<5} {:<25} {:<15} {:>8} {:>14} {:>14}",
            product.id,
            clip(&product.name, 25),
            clip(&product.category, 15),
            product.quantity,
            money(product.unit_price, currency),
            money(line.line_total, currency),
        ));
    }
    out.push("-".repeat(86));
    out.push(format!("Total inventory value: {}", money(report.grand_total, currency)));
    out.push(format!("{} product{} registered.", report.lines.len(), plural(report.lines.len())));

    out.join("\n")
}

/// Low-stock table: current quantity, threshold, and how many units are
/// needed to get back to it.
pub fn low_stock_table(lines: &[LowStockLine]) -> String {
    if lines.is_empty() {
        return NO_LOW_STOCK.to_string();
    }

    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(format!(
        "{:<5} {:<25} {:>8} {:>8} {:>10}",
        "ID", "Name", "Current", "Minimum", "Needed"
    ));
    out.push("-".repeat(60));
    for line in lines {
        out.push(format!(
            "{:<5} {:<25} {:>8} {:>8} {:>10}",
            line.product.id,
            clip(&line.product.name, 25),
            line.product.quantity,
            line.product.min_stock,
            line.restock_needed,
        ));
    }
    out.push("-".repeat(60));
    out.push(format!("{} product{} below minimum stock.", lines.len(), plural(lines.len())));

    out.join("\n")
}

/// Condensed listing: one row per product, no money columns.
pub fn product_list<'a, I>(products: I) -> String
where
    I: IntoIterator<Item = &'a Product>,
{
    let rows: Vec<String> = products
        .into_iter()
        .map(|product| {
            format!(
                "{:<5} {:<30} {:<15} {:>10}",
                product.id,
                clip(&product.name, 30),
                clip(&product.category, 15),
                product.quantity,
            )
        })
        .collect();

    if rows.is_empty() {
        return NO_PRODUCTS.to_string();
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format!("{:<5} {:<30} {:<15} {:>10}", "ID", "Name", "Category", "Quantity"));
    out.push("-".repeat(64));
    out.extend(rows);

    out.join("\n")
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
