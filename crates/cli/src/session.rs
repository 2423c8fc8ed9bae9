use std::io::{self, BufRead, Write};

use stocky_core::reports::{low_stock_report, valuation_report};
use stocky_core::{CatalogError, NewProduct, ProductCatalog, ProductPatch};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::prompt::{
    parse_id, parse_movement_amount, parse_optional_price, parse_optional_quantity, parse_price,
    parse_quantity, InputError,
};
use crate::render;

const MENU: &str = "\n==== INVENTORY MANAGEMENT ====\n\
1. Add product\n\
2. Remove product\n\
3. Edit product\n\
4. Receive stock\n\
5. Issue stock\n\
6. Look up products\n\
7. Valuation report\n\
8. Low-stock report\n\
9. List products\n\
0. Quit";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// The interactive menu loop. Generic over its reader and writer so
/// scripted sessions can drive it in tests; the binary hands it locked
/// stdin and stdout.
pub struct Session<R, W> {
    catalog: ProductCatalog,
    currency: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(catalog: ProductCatalog, currency: impl Into<String>, input: R, output: W) -> Self {
        Self { catalog, currency: currency.into(), input, output }
    }

    /// Runs until the operator quits or the input reaches end-of-file.
    pub fn run(&mut self) -> Result<(), SessionError> {
        info!(
            event_name = "session.started",
            products = self.catalog.len(),
            "interactive session started"
        );

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt_line("Choose an option: ")? else { break };

            match choice.trim() {
                "1" => self.add_product()?,
                "2" => self.remove_product()?,
                "3" => self.edit_product()?,
                "4" => self.receive_stock()?,
                "5" => self.issue_stock()?,
                "6" => self.look_up()?,
                "7" => self.valuation_report()?,
                "8" => self.low_stock_report()?,
                "9" => self.list_products()?,
                "0" => break,
                _ => writeln!(self.output, "Unknown option, try again.")?,
            }
        }

        writeln!(self.output, "Thank you for using the inventory manager.")?;
        info!(
            event_name = "session.finished",
            products = self.catalog.len(),
            "interactive session finished"
        );
        Ok(())
    }

    fn add_product(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== ADD PRODUCT ====")?;
        let Some(name) = self.prompt_line("Name: ")? else { return Ok(()) };
        let Some(category) = self.prompt_line("Category: ")? else { return Ok(()) };
        let Some(quantity) = self.prompt_parsed("Initial quantity: ", parse_quantity)? else {
            return Ok(());
        };
        let Some(unit_price) = self.prompt_parsed("Unit price: ", parse_price)? else {
            return Ok(());
        };
        let Some(min_stock) = self.prompt_parsed("Minimum stock: ", parse_quantity)? else {
            return Ok(());
        };

        match self.catalog.add(NewProduct { name, category, quantity, unit_price, min_stock }) {
            Ok(product) => {
                debug!(
                    event_name = "catalog.product_added",
                    id = %product.id,
                    name = %product.name,
                    "product registered"
                );
                writeln!(
                    self.output,
                    "Product '{}' registered with id {}.",
                    product.name, product.id
                )?;
            }
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(())
    }

    fn remove_product(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== REMOVE PRODUCT ====")?;
        let Some(id) = self.prompt_parsed("Product id: ", parse_id)? else { return Ok(()) };
        let Some(name) = self.catalog.find(id).map(|product| product.name.clone()) else {
            writeln!(self.output, "No product with id {id}.")?;
            return Ok(());
        };

        let confirm = format!("Remove '{name}' (id {id})? [y/n]: ");
        let Some(answer) = self.prompt_line(&confirm)? else { return Ok(()) };
        if !answer.trim().eq_ignore_ascii_case("y") {
            writeln!(self.output, "Removal cancelled.")?;
            return Ok(());
        }

        match self.catalog.remove(id) {
            Ok(removed) => {
                debug!(
                    event_name = "catalog.product_removed",
                    id = %removed.id,
                    name = %removed.name,
                    "product removed"
                );
                writeln!(self.output, "Product '{}' removed.", removed.name)?;
            }
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(())
    }

    fn edit_product(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== EDIT PRODUCT ====")?;
        let Some(id) = self.prompt_parsed("Product id: ", parse_id)? else { return Ok(()) };
        let Some(current) = self.catalog.find(id).cloned() else {
            writeln!(self.output, "No product with id {id}.")?;
            return Ok(());
        };

        writeln!(
            self.output,
            "Editing '{}' (id {id}). Blank keeps the current value.",
            current.name
        )?;

        let Some(name) = self.prompt_line(&format!("Name [{}]: ", current.name))? else {
            return Ok(());
        };
        let Some(category) = self.prompt_line(&format!("Category [{}]: ", current.category))?
        else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_parsed(
            &format!("Quantity [{}]: ", current.quantity),
            parse_optional_quantity,
        )?
        else {
            return Ok(());
        };
        let price_label =
            format!("Unit price [{}]: ", render::money(current.unit_price, &self.currency));
        let Some(unit_price) = self.prompt_parsed(&price_label, parse_optional_price)? else {
            return Ok(());
        };
        let Some(min_stock) = self.prompt_parsed(
            &format!("Minimum stock [{}]: ", current.min_stock),
            parse_optional_quantity,
        )?
        else {
            return Ok(());
        };

        let patch = ProductPatch {
            name: (!name.trim().is_empty()).then_some(name),
            category: (!category.trim().is_empty()).then_some(category),
            quantity,
            unit_price,
            min_stock,
        };

        match self.catalog.update(id, patch) {
            Ok(updated) => {
                debug!(
                    event_name = "catalog.product_updated",
                    id = %updated.id,
                    name = %updated.name,
                    "product updated"
                );
                writeln!(self.output, "Product {id} updated.")?;
            }
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(())
    }

    fn receive_stock(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== RECEIVE STOCK ====")?;
        let Some(id) = self.prompt_parsed("Product id: ", parse_id)? else { return Ok(()) };
        let Some(product) = self.catalog.find(id).cloned() else {
            writeln!(self.output, "No product with id {id}.")?;
            return Ok(());
        };

        writeln!(self.output, "Product: {}", product.name)?;
        writeln!(self.output, "Current quantity: {}", product.quantity)?;

        let Some(amount) = self.prompt_parsed("Amount to receive: ", parse_movement_amount)?
        else {
            return Ok(());
        };

        match self.catalog.receive(id, amount) {
            Ok(new_quantity) => {
                debug!(
                    event_name = "catalog.stock_received",
                    id = %id,
                    amount,
                    new_quantity,
                    "stock received"
                );
                writeln!(self.output, "Receipt recorded. New quantity: {new_quantity}")?;
            }
            Err(error) => writeln!(self.output, "{error}")?,
        }
        Ok(())
    }

    fn issue_stock(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== ISSUE STOCK ====")?;
        let Some(id) = self.prompt_parsed("Product id: ", parse_id)? else { return Ok(()) };
        let Some(product) = self.catalog.find(id).cloned() else {
            writeln!(self.output, "No product with id {id}.")?;
            return Ok(());
        };

        writeln!(self.output, "Product: {}", product.name)?;
        writeln!(self.output, "Current quantity: {}", product.quantity)?;

        loop {
            let Some(amount) = self.prompt_parsed("Amount to issue: ", parse_movement_amount)?
            else {
                return Ok(());
            };

            match self.catalog.issue(id, amount) {
                Ok(issue) => {
                    debug!(
                        event_name = "catalog.stock_issued",
                        id = %id,
                        amount,
                        new_quantity = issue.new_quantity,
                        "stock issued"
                    );
                    writeln!(self.output, "Issue recorded. New quantity: {}", issue.new_quantity)?;
                    if issue.low_stock {
                        warn!(
                            event_name = "catalog.low_stock",
                            id = %id,
                            name = %product.name,
                            quantity = issue.new_quantity,
                            min_stock = product.min_stock,
                            "stock below minimum"
                        );
                        writeln!(
                            self.output,
                            "WARNING: '{}' is below its minimum stock! Current: {}, minimum: {}",
                            product.name, issue.new_quantity, product.min_stock
                        )?;
                    }
                    return Ok(());
                }
                Err(CatalogError::InsufficientStock { available, .. }) => {
                    writeln!(self.output, "Insufficient stock. Available: {available}")?;
                }
                Err(error) => {
                    writeln!(self.output, "{error}")?;
                    return Ok(());
                }
            }
        }
    }

    fn look_up(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== LOOK UP PRODUCTS ====")?;
        writeln!(self.output, "1. By id\n2. By name\n3. By category")?;
        let Some(choice) = self.prompt_line("Choose an option: ")? else { return Ok(()) };

        match choice.trim() {
            "1" => {
                let Some(id) = self.prompt_parsed("Product id: ", parse_id)? else {
                    return Ok(());
                };
                match self.catalog.find(id) {
                    Some(product) => {
                        let card = render::product_details(product, &self.currency);
                        writeln!(self.output, "\n{card}")?;
                    }
                    None => writeln!(self.output, "No product with id {id}.")?,
                }
            }
            "2" => {
                let Some(query) = self.prompt_line("Name (or part of it): ")? else {
                    return Ok(());
                };
                self.write_matches(&query, true)?;
            }
            "3" => {
                let Some(query) = self.prompt_line("Category (or part of it): ")? else {
                    return Ok(());
                };
                self.write_matches(&query, false)?;
            }
            _ => writeln!(self.output, "Unknown option, try again.")?,
        }
        Ok(())
    }

    fn write_matches(&mut self, query: &str, by_name: bool) -> Result<(), SessionError> {
        let cards: Vec<String> = if by_name {
            self.catalog.search_by_name(query)
        } else {
            self.catalog.search_by_category(query)
        }
        .into_iter()
        .map(|product| render::product_details(product, &self.currency))
        .collect();

        if cards.is_empty() {
            writeln!(self.output, "No products matching '{query}'.")?;
            return Ok(());
        }

        writeln!(self.output, "Found {} product{}:", cards.len(), plural(cards.len()))?;
        for card in cards {
            writeln!(self.output, "\n{card}")?;
            writeln!(self.output, "{}", "-".repeat(40))?;
        }
        Ok(())
    }

    fn valuation_report(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== VALUATION REPORT ====")?;
        let table = render::valuation_table(&valuation_report(&self.catalog), &self.currency);
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    fn low_stock_report(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== LOW-STOCK REPORT ====")?;
        let table = render::low_stock_table(&low_stock_report(&self.catalog));
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    fn list_products(&mut self) -> Result<(), SessionError> {
        writeln!(self.output, "\n==== PRODUCT LIST ====")?;
        let table = render::product_list(self.catalog.products());
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    /// Prints the label and reads one line. `None` means end-of-file:
    /// abort the current flow and let the main loop wind down.
    fn prompt_line(&mut self, label: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompts repeatedly until the input parses, mirroring the catalog's
    /// preconditions so it is only ever called with valid values.
    fn prompt_parsed<T>(
        &mut self,
        label: &str,
        parse: fn(&str) -> Result<T, InputError>,
    ) -> Result<Option<T>, SessionError> {
        loop {
            let Some(raw) = self.prompt_line(label)? else { return Ok(None) };
            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(error) => writeln!(self.output, "Invalid input: {error}.")?,
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
