//! Products as returned by the catalog, including their purchasable variants.
//!
//! # Pricing
//! A product carries its own base price. When a [`Variant`] is selected, the variant's
//! price replaces the product price for that line (see [`crate::pricing::unit_price`]).

use super::string_id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

string_id! {
    /// Type-safe identifier for Products.
    ProductId
}

string_id! {
    /// Type-safe identifier for product Variants.
    VariantId
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Creates a new Product without image or variants.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `name` - Display name
    /// * `price` - Base unit price
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            variants: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Looks a variant up by identity. Returns `None` when the product has no such variant.
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }
}

/// A purchasable configuration of a product (size, color, ...) with its own price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    pub price: Decimal,
}

impl Variant {
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}
