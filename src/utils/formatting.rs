use chrono::{DateTime, Local, Utc};
use console::style;
use rust_decimal::Decimal;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{cart::CartLine, payment::{PaymentOutcome, Receipt}, product::Product};

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "In Cart")]
    in_cart: u32,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

/// Formats an amount with two decimal places, sign in front of the symbol.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    if rounded < Decimal::ZERO {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded)
    }
}

pub fn format_catalog_table(products: &[Product], symbol: &str) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<CatalogTableRow> = products
        .iter()
        .map(|product| CatalogTableRow {
            id: product.id,
            name: product.name.clone(),
            price: format_money(product.unit_price, symbol),
            image: product.image_ref.clone(),
            in_cart: product.quantity_in_cart,
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_cart_table(lines: &[CartLine], symbol: &str) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = lines
        .iter()
        .map(|line| CartTableRow {
            id: line.product_id,
            name: line.name.clone(),
            unit_price: format_money(line.unit_price, symbol),
            quantity: line.quantity,
            subtotal: format_money(line.subtotal, symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_payment_outcome(outcome: &PaymentOutcome, symbol: &str) -> String {
    match outcome {
        PaymentOutcome::BalanceDue(amount) => format!(
            "{}: {}",
            style("Balance due").bold(),
            style(format_money(*amount, symbol)).red()
        ),
        PaymentOutcome::Settled => style("Paid in full").green().to_string(),
        PaymentOutcome::ChangeDue(amount) => format!(
            "{} {}: {}",
            style("Paid in full.").green(),
            style("Change due").bold(),
            style(format_money(*amount, symbol)).yellow()
        ),
    }
}

pub fn format_receipt(receipt: &Receipt, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Paid At").bold(), style(format_date(&receipt.paid_at)).dim()));
    output.push_str(&format_cart_table(&receipt.lines, symbol));
    output.push('\n');
    output.push_str(&format!("{}: {}\n", style("Total").bold(), style(format_money(receipt.total, symbol)).green()));
    output.push_str(&format!("{}: {}\n", style("Tendered").bold(), format_money(receipt.tendered, symbol)));
    output.push_str(&format!("{}: {}\n", style("Change").bold(), style(format_money(receipt.change, symbol)).yellow()));

    output
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
