pub mod list;
pub mod low_stock;
pub mod report;

use stocky_core::config::AppConfig;
use stocky_core::{seed, ProductCatalog};

/// Outcome of a one-shot command: what to print and the process exit
/// code to return.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(message: impl Into<String>, exit_code: u8) -> Self {
        Self { exit_code, output: format!("error: {}", message.into()) }
    }
}

/// There is no persistence: every invocation starts from the demo
/// fixture (the default) or from nothing.
pub fn build_catalog(config: &AppConfig) -> ProductCatalog {
    if config.catalog.demo_data {
        seed::demo_catalog()
    } else {
        ProductCatalog::new()
    }
}
