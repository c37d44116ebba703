use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::product::{Product, ProductId};

/// One selected product with its quantity and line subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: product.quantity_in_cart,
            subtotal: product.subtotal(),
        }
    }
}

// Serializable view used by the `export` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub total: Decimal,
    pub pending_payment: Decimal,
}
