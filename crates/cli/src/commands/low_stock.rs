use stocky_core::config::AppConfig;
use stocky_core::reports::low_stock_report;

use crate::commands::{build_catalog, CommandResult};
use crate::render;

pub fn run(config: &AppConfig, json: bool) -> CommandResult {
    let catalog = build_catalog(config);
    let lines = low_stock_report(&catalog);

    if json {
        match serde_json::to_string_pretty(&lines) {
            Ok(payload) => CommandResult::success(payload),
            Err(error) => {
                CommandResult::failure(format!("could not serialize the report: {error}"), 1)
            }
        }
    } else {
        CommandResult::success(render::low_stock_table(&lines))
    }
}
