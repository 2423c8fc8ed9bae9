use stocky_core::config::AppConfig;
use stocky_core::Product;

use crate::commands::{build_catalog, CommandResult};
use crate::render;

pub fn run(config: &AppConfig, json: bool) -> CommandResult {
    let catalog = build_catalog(config);
    let products: Vec<Product> = catalog.products().cloned().collect();

    if json {
        match serde_json::to_string_pretty(&products) {
            Ok(payload) => CommandResult::success(payload),
            Err(error) => {
                CommandResult::failure(format!("could not serialize the listing: {error}"), 1)
            }
        }
    } else {
        CommandResult::success(render::product_list(products.iter()))
    }
}
