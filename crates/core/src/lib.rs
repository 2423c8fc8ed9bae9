pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod reports;
pub mod seed;

pub use catalog::{ProductCatalog, StockIssue};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::product::{NewProduct, Product, ProductId, ProductPatch, StockStatus};
pub use errors::CatalogError;
pub use reports::{low_stock_report, valuation_report, LowStockLine, ValuationLine, ValuationReport};
