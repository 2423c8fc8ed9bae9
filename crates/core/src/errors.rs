use thiserror::Error;

use crate::domain::product::ProductId;

/// Caller-visible catalog signals. These are expected, recoverable
/// conditions; the catalog never panics across its boundary and leaves
/// state untouched whenever one of them is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no product with id {0}")]
    NotFound(ProductId),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
}

#[cfg(test)]
mod tests {
    use crate::domain::product::ProductId;

    use super::CatalogError;

    #[test]
    fn messages_carry_enough_context_for_the_operator() {
        assert_eq!(CatalogError::NotFound(ProductId(99)).to_string(), "no product with id 99");
        assert_eq!(
            CatalogError::InsufficientStock { requested: 12, available: 3 }.to_string(),
            "insufficient stock: requested 12, available 3"
        );
    }
}
