use rust_decimal::Decimal;

use crate::catalog::ProductCatalog;
use crate::domain::product::NewProduct;

/// The fixed demonstration fixture: three products with ids 1..=3. Used
/// by default for interactive sessions and as a deterministic base for
/// tests.
pub fn demo_catalog() -> ProductCatalog {
    let mut catalog = ProductCatalog::new();
    for product in demo_products() {
        // Prices are fixed non-negative literals, so registration cannot
        // be rejected.
        let _ = catalog.add(product);
    }
    catalog
}

pub fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Notebook Dell".to_string(),
            category: "Eletrônicos".to_string(),
            quantity: 15,
            unit_price: Decimal::new(350_000, 2),
            min_stock: 5,
        },
        NewProduct {
            name: "Mouse Bluetooth".to_string(),
            category: "Periféricos".to_string(),
            quantity: 30,
            unit_price: Decimal::new(12_000, 2),
            min_stock: 10,
        },
        NewProduct {
            name: "Teclado Mecânico".to_string(),
            category: "Periféricos".to_string(),
            quantity: 20,
            unit_price: Decimal::new(25_000, 2),
            min_stock: 8,
        },
    ]
}

#[cfg(test)]
mod tests {
    use crate::domain::product::ProductId;

    use super::demo_catalog;

    #[test]
    fn demo_catalog_holds_the_three_fixture_products() {
        let catalog = demo_catalog();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find(ProductId(1)).expect("id 1").name, "Notebook Dell");
        assert_eq!(catalog.find(ProductId(2)).expect("id 2").name, "Mouse Bluetooth");
        assert_eq!(catalog.find(ProductId(3)).expect("id 3").name, "Teclado Mecânico");
    }

    #[test]
    fn demo_catalog_continues_allocating_after_the_fixture() {
        let mut catalog = demo_catalog();
        let added = catalog
            .add(crate::domain::product::NewProduct {
                name: "Monitor".to_string(),
                category: "Eletrônicos".to_string(),
                quantity: 5,
                unit_price: rust_decimal::Decimal::new(90_000, 2),
                min_stock: 2,
            })
            .expect("add");

        assert_eq!(added.id, ProductId(4));
    }
}
