use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub type ProductId = u32;

/// Highest unit price a catalog entry may carry.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image_ref: String,
    pub quantity_in_cart: u32,
}

impl Product {
    /// Line subtotal: unit price times quantity currently in the cart.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity_in_cart))
    }

    pub fn is_in_cart(&self) -> bool {
        self.quantity_in_cart > 0
    }
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProductRequest {
    pub id: ProductId,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    #[validate(custom = "validate_unit_price")]
    pub unit_price: Decimal,

    #[validate(length(min = 1, message = "Image reference is required"))]
    pub image_ref: String,
}

impl NewProductRequest {
    pub fn new(id: ProductId, name: &str, unit_price: Decimal, image_ref: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            unit_price,
            image_ref: image_ref.to_string(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_blank"));
    }
    Ok(())
}

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("unit_price_negative"));
    }
    if *price > MAX_UNIT_PRICE {
        return Err(ValidationError::new("unit_price_too_large"));
    }
    Ok(())
}

impl From<NewProductRequest> for Product {
    fn from(request: NewProductRequest) -> Self {
        Self {
            id: request.id,
            name: request.name.trim().to_string(),
            unit_price: request.unit_price,
            image_ref: request.image_ref,
            quantity_in_cart: 0,
        }
    }
}
