use std::collections::BTreeMap;

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};
use crate::errors::CatalogError;

/// Outcome of a successful stock issue. `low_stock` is a side-channel
/// alert for the caller, not a stored field: the remaining quantity has
/// dropped below the product's reorder threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockIssue {
    pub new_quantity: u32,
    pub low_stock: bool,
}

/// In-memory product store. Keys always equal the `id` of their record,
/// and `next_id` stays strictly greater than every id ever allocated, so
/// ids are never reused after removal. Because ids are handed out
/// monotonically, ascending-key iteration is insertion order.
#[derive(Debug)]
pub struct ProductCatalog {
    products: BTreeMap<ProductId, Product>,
    next_id: u64,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self { products: BTreeMap::new(), next_id: 1 }
    }

    /// Registers a product under a freshly allocated id and returns the
    /// stored record. Rejects a negative unit price without allocating.
    pub fn add(&mut self, new: NewProduct) -> Result<Product, CatalogError> {
        if new.unit_price.is_sign_negative() {
            return Err(CatalogError::InvalidAmount(format!(
                "unit price must not be negative, got {}",
                new.unit_price
            )));
        }

        let id = ProductId(self.next_id);
        let product = Product {
            id,
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            unit_price: new.unit_price,
            min_stock: new.min_stock,
        };
        self.products.insert(id, product.clone());
        self.next_id += 1;

        Ok(product)
    }

    /// Deletes the record and returns it. The id is retired permanently;
    /// `next_id` is not rolled back.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, CatalogError> {
        self.products.remove(&id).ok_or(CatalogError::NotFound(id))
    }

    /// Applies the supplied fields and keeps the rest. Validation happens
    /// before any field is touched, so a rejected patch changes nothing.
    pub fn update(&mut self, id: ProductId, patch: ProductPatch) -> Result<Product, CatalogError> {
        if let Some(price) = patch.unit_price {
            if price.is_sign_negative() {
                return Err(CatalogError::InvalidAmount(format!(
                    "unit price must not be negative, got {price}"
                )));
            }
        }

        let product = self.products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(quantity) = patch.quantity {
            product.quantity = quantity;
        }
        if let Some(unit_price) = patch.unit_price {
            product.unit_price = unit_price;
        }
        if let Some(min_stock) = patch.min_stock {
            product.min_stock = min_stock;
        }

        Ok(product.clone())
    }

    /// Records incoming stock and returns the new quantity.
    pub fn receive(&mut self, id: ProductId, amount: u32) -> Result<u32, CatalogError> {
        if amount == 0 {
            return Err(CatalogError::InvalidAmount(
                "stock movements must be for at least one unit".to_string(),
            ));
        }

        let product = self.products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        let new_quantity = product.quantity.checked_add(amount).ok_or_else(|| {
            CatalogError::InvalidAmount(format!(
                "receiving {amount} units would overflow the stored quantity"
            ))
        })?;
        product.quantity = new_quantity;

        Ok(new_quantity)
    }

    /// Records outgoing stock. The quantity can never go negative: a
    /// request for more than is available is rejected untouched.
    pub fn issue(&mut self, id: ProductId, amount: u32) -> Result<StockIssue, CatalogError> {
        if amount == 0 {
            return Err(CatalogError::InvalidAmount(
                "stock movements must be for at least one unit".to_string(),
            ));
        }

        let product = self.products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        if amount > product.quantity {
            return Err(CatalogError::InsufficientStock {
                requested: amount,
                available: product.quantity,
            });
        }

        product.quantity -= amount;

        Ok(StockIssue {
            new_quantity: product.quantity,
            low_stock: product.quantity < product.min_stock,
        })
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Case-insensitive substring match on the product name, in catalog
    /// order. The empty query matches every product.
    pub fn search_by_name(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products().filter(|product| product.name.to_lowercase().contains(&needle)).collect()
    }

    /// Same semantics as `search_by_name`, against the category field.
    pub fn search_by_category(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products()
            .filter(|product| product.category.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{NewProduct, ProductId, ProductPatch};
    use crate::errors::CatalogError;

    use super::ProductCatalog;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Periféricos".to_string(),
            quantity: 10,
            unit_price: Decimal::new(5_000, 2),
            min_stock: 5,
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut catalog = ProductCatalog::new();

        let first = catalog.add(new_product("Mouse")).expect("first add");
        let second = catalog.add(new_product("Teclado")).expect("second add");

        assert_eq!(first.id, ProductId(1));
        assert_eq!(second.id, ProductId(2));
    }

    #[test]
    fn removed_ids_are_never_reissued() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");
        catalog.add(new_product("Teclado")).expect("add");

        catalog.remove(ProductId(1)).expect("remove");
        let third = catalog.add(new_product("Monitor")).expect("add after remove");

        assert_eq!(third.id, ProductId(3));
        assert!(catalog.find(ProductId(1)).is_none());
    }

    #[test]
    fn add_rejects_negative_price_without_allocating() {
        let mut catalog = ProductCatalog::new();
        let mut request = new_product("Mouse");
        request.unit_price = Decimal::new(-500, 2);

        let error = catalog.add(request).expect_err("negative price should be rejected");

        assert!(matches!(error, CatalogError::InvalidAmount(_)));
        assert!(catalog.is_empty());
        assert_eq!(catalog.add(new_product("Mouse")).expect("add").id, ProductId(1));
    }

    #[test]
    fn remove_of_unknown_id_reports_not_found_and_changes_nothing() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let error = catalog.remove(ProductId(99)).expect_err("unknown id");

        assert_eq!(error, CatalogError::NotFound(ProductId(99)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn update_applies_supplied_fields_and_keeps_the_rest() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let updated = catalog
            .update(
                ProductId(1),
                ProductPatch {
                    name: Some("Mouse Bluetooth".to_string()),
                    min_stock: Some(12),
                    ..ProductPatch::default()
                },
            )
            .expect("update");

        assert_eq!(updated.name, "Mouse Bluetooth");
        assert_eq!(updated.min_stock, 12);
        assert_eq!(updated.category, "Periféricos");
        assert_eq!(updated.quantity, 10);
        assert_eq!(updated.unit_price, Decimal::new(5_000, 2));
    }

    #[test]
    fn update_rejects_negative_price_without_touching_any_field() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let error = catalog
            .update(
                ProductId(1),
                ProductPatch {
                    name: Some("renamed".to_string()),
                    unit_price: Some(Decimal::new(-500, 2)),
                    ..ProductPatch::default()
                },
            )
            .expect_err("negative price should be rejected");

        assert!(matches!(error, CatalogError::InvalidAmount(_)));
        let stored = catalog.find(ProductId(1)).expect("still present");
        assert_eq!(stored.name, "Mouse");
        assert_eq!(stored.unit_price, Decimal::new(5_000, 2));
    }

    #[test]
    fn update_of_unknown_id_reports_not_found() {
        let mut catalog = ProductCatalog::new();

        let error = catalog
            .update(ProductId(7), ProductPatch::default())
            .expect_err("unknown id");

        assert_eq!(error, CatalogError::NotFound(ProductId(7)));
    }

    #[test]
    fn receive_adds_stock_and_returns_the_new_quantity() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let quantity = catalog.receive(ProductId(1), 25).expect("receive");

        assert_eq!(quantity, 35);
        assert_eq!(catalog.find(ProductId(1)).expect("present").quantity, 35);
    }

    #[test]
    fn receive_rejects_zero_amount_without_mutation() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let error = catalog.receive(ProductId(1), 0).expect_err("zero amount");

        assert!(matches!(error, CatalogError::InvalidAmount(_)));
        assert_eq!(catalog.find(ProductId(1)).expect("present").quantity, 10);
    }

    #[test]
    fn receive_rejects_quantity_overflow_without_mutation() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let error = catalog.receive(ProductId(1), u32::MAX).expect_err("overflow");

        assert!(matches!(error, CatalogError::InvalidAmount(_)));
        assert_eq!(catalog.find(ProductId(1)).expect("present").quantity, 10);
    }

    #[test]
    fn issue_subtracts_stock_and_flags_a_drop_below_the_threshold() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let issue = catalog.issue(ProductId(1), 7).expect("issue");

        assert_eq!(issue.new_quantity, 3);
        assert!(issue.low_stock, "3 remaining is below the threshold of 5");
    }

    #[test]
    fn issue_down_to_exactly_the_threshold_raises_no_alert() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let issue = catalog.issue(ProductId(1), 5).expect("issue");

        assert_eq!(issue.new_quantity, 5);
        assert!(!issue.low_stock);
    }

    #[test]
    fn issue_never_lets_the_quantity_go_negative() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let error = catalog.issue(ProductId(1), 11).expect_err("more than available");

        assert_eq!(error, CatalogError::InsufficientStock { requested: 11, available: 10 });
        assert_eq!(catalog.find(ProductId(1)).expect("present").quantity, 10);
    }

    #[test]
    fn issue_rejects_zero_amount() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");

        let error = catalog.issue(ProductId(1), 0).expect_err("zero amount");

        assert!(matches!(error, CatalogError::InvalidAmount(_)));
    }

    #[test]
    fn stock_movements_against_unknown_ids_report_not_found() {
        let mut catalog = ProductCatalog::new();

        assert_eq!(
            catalog.receive(ProductId(4), 1).expect_err("receive"),
            CatalogError::NotFound(ProductId(4))
        );
        assert_eq!(
            catalog.issue(ProductId(4), 1).expect_err("issue"),
            CatalogError::NotFound(ProductId(4))
        );
    }

    #[test]
    fn name_search_is_case_insensitive_substring_match() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse Bluetooth")).expect("add");
        catalog.add(new_product("Teclado Mecânico")).expect("add");

        let found = catalog.search_by_name("mouse");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Mouse Bluetooth");
    }

    #[test]
    fn empty_query_matches_every_product() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");
        catalog.add(new_product("Teclado")).expect("add");

        assert_eq!(catalog.search_by_name("").len(), 2);
        assert_eq!(catalog.search_by_category("").len(), 2);
    }

    #[test]
    fn category_search_matches_substrings_in_catalog_order() {
        let mut catalog = ProductCatalog::new();
        let mut notebook = new_product("Notebook Dell");
        notebook.category = "Eletrônicos".to_string();
        catalog.add(notebook).expect("add");
        catalog.add(new_product("Mouse")).expect("add");
        catalog.add(new_product("Teclado")).expect("add");

        let found = catalog.search_by_category("perif");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Mouse");
        assert_eq!(found[1].name, "Teclado");
    }

    #[test]
    fn listing_order_is_insertion_order() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("Mouse")).expect("add");
        catalog.add(new_product("Teclado")).expect("add");
        catalog.remove(ProductId(1)).expect("remove");
        catalog.add(new_product("Monitor")).expect("add");

        let names: Vec<&str> =
            catalog.products().map(|product| product.name.as_str()).collect();

        assert_eq!(names, ["Teclado", "Monitor"]);
    }
}
