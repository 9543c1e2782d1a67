//! Receipt
//!
//! Terminal rendering of the catalog and the cart.

use std::{io, ops::Range};

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartState, prices::Price, products::Product};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Output could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Writes the catalog view as a table, marking products already in `cart`.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_catalog(
    mut out: impl io::Write,
    products: &[&Product],
    cart: &CartState,
) -> Result<(), ReceiptError> {
    if products.is_empty() {
        writeln!(out, "No products found matching your filters")?;
        return Ok(());
    }

    let currency = cart.currency();
    let mut builder = Builder::default();

    builder.push_record([
        "ID",
        "Skip",
        "Price",
        "VAT",
        "Hire Period",
        "On Road",
        "Heavy Waste",
        "In Cart",
    ]);

    for product in products {
        let in_cart = cart.quantity_of(product.id);

        builder.push_record([
            product.id.to_string(),
            format!("{} Yard Skip", product.name),
            money(product.current_price, currency),
            money(product.vat, currency),
            format!("{} days", product.hire_period_days),
            yes_no(product.allowed_on_road).to_string(),
            yes_no(product.allows_heavy_waste).to_string(),
            if in_cart == 0 {
                String::new()
            } else {
                in_cart.to_string()
            },
        ]);
    }

    write_table(&mut out, builder, Columns::new(2..4))
}

/// Writes the cart lines followed by the totals.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &CartState) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    let currency = cart.currency();
    let mut builder = Builder::default();

    builder.push_record(["", "Skip", "Hire Period", "Unit Price", "Qty", "Line Total"]);

    for (index, line) in cart.lines().iter().enumerate() {
        let product = line.product();

        builder.push_record([
            (index + 1).to_string(),
            format!("{} Yard Skip", product.name),
            format!("{} days", product.hire_period_days),
            money(line.unit_price(), currency),
            line.quantity().to_string(),
            money(line.subtotal(), currency),
        ]);
    }

    write_table(&mut out, builder, Columns::new(3..6))?;

    writeln!(out, " Total Items: {}", cart.total_items())?;
    writeln!(out, " \x1b[1mTotal:\x1b[0m {}", cart.total_money())?;
    writeln!(out)?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    amount_columns: Columns<Range<usize>>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(amount_columns, Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn money(price: Price, currency: &'static Currency) -> String {
    price.to_money(currency).to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{fixtures::fallback_products, products::ProductId};

    use super::*;

    #[test]
    fn write_cart_lists_lines_and_totals() -> TestResult {
        let products = fallback_products()?;
        let mut cart = CartState::default();

        for product in products.iter().take(2) {
            cart = cart.add(product.clone());
        }

        let cart = cart.set_quantity(ProductId(17_933), 3);

        let mut out = Vec::new();
        write_cart(&mut out, &cart)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("4 Yard Skip"), "missing first line:\n{output}");
        assert!(output.contains("6 Yard Skip"), "missing second line:\n{output}");
        assert!(output.contains("Total Items: 4"), "missing item count:\n{output}");
        assert!(output.contains("Total:"), "missing total:\n{output}");

        Ok(())
    }

    #[test]
    fn write_cart_reports_empty_cart() -> TestResult {
        let mut out = Vec::new();
        write_cart(&mut out, &CartState::default())?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty\n");

        Ok(())
    }

    #[test]
    fn write_catalog_marks_cart_quantities() -> TestResult {
        let products = fallback_products()?;
        let view: Vec<&Product> = products.iter().collect();
        let cart = CartState::default()
            .add(products.first().cloned().ok_or("empty fallback")?);

        let mut out = Vec::new();
        write_catalog(&mut out, &view, &cart)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("17933"), "missing id:\n{output}");
        assert!(output.contains("40 Yard Skip"), "missing last skip:\n{output}");
        assert!(output.contains("Heavy Waste"), "missing header:\n{output}");

        Ok(())
    }

    #[test]
    fn write_catalog_reports_empty_view() -> TestResult {
        let mut out = Vec::new();
        write_catalog(&mut out, &[], &CartState::default())?;

        assert_eq!(
            String::from_utf8(out)?,
            "No products found matching your filters\n"
        );

        Ok(())
    }
}
