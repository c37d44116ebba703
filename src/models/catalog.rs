use std::collections::HashSet;
use std::path::Path;

use rust_decimal_macros::dec;
use thiserror::Error;
use validator::Validate;

use crate::models::product::{NewProductRequest, Product, ProductId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog must contain at least one product")]
    Empty,

    #[error("Duplicate product id: {id}")]
    DuplicateId { id: ProductId },

    #[error("Invalid product {id}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// The fixed list of purchasable products, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(requests: Vec<NewProductRequest>) -> Result<Self, CatalogError> {
        if requests.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(requests.len());
        let mut products = Vec::with_capacity(requests.len());

        for request in requests {
            request
                .validate()
                .map_err(|source| CatalogError::InvalidProduct {
                    id: request.id,
                    source,
                })?;

            if !seen.insert(request.id) {
                return Err(CatalogError::DuplicateId { id: request.id });
            }

            products.push(Product::from(request));
        }

        tracing::debug!("Catalog: built with {} products", products.len());
        Ok(Self { products })
    }

    /// Built-in fruit catalog used when no catalog file is configured.
    pub fn seed() -> Self {
        Self {
            products: vec![
                NewProductRequest::new(990, "strawberry", dec!(0.25), "images/strawberry.jpg").into(),
                NewProductRequest::new(991, "orange", dec!(2), "images/orange.jpg").into(),
                NewProductRequest::new(992, "cherry", dec!(0.30), "images/cherry.jpg").into(),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let requests: Vec<NewProductRequest> = serde_json::from_str(json)?;
        Self::new(requests)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Catalog: loading products from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub(crate) fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }

    pub(crate) fn get(&self, index: usize) -> &Product {
        &self.products[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Product {
        &mut self.products[index]
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Product> {
        self.products.iter_mut()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}
