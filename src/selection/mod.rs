//! # Selections
//!
//! What the shopper is about to buy. A checkout is either a whole cart or a single
//! product (optionally a variant of it) with an adjustable quantity.
//!
//! Totals are computed from the current lines on every call through
//! [`crate::pricing`]; nothing here caches a price.

pub mod loader;

pub use loader::*;

use crate::model::{CartId, OrderRequest, Product, Variant};
use crate::pricing::{line_total, unit_price, Quantity};
use rust_decimal::Decimal;

/// One priced line of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product: Product,
    pub variant: Option<Variant>,
    pub quantity: u32,
}

impl LineItem {
    pub fn unit_price(&self) -> Decimal {
        unit_price(&self.product, self.variant.as_ref())
    }

    pub fn total(&self) -> Decimal {
        line_total(self.unit_price(), self.quantity)
    }
}

/// Every item of a cart, with the quantities the cart holds. Not editable here.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSelection {
    /// The cart reference the checkout was opened with; sent back verbatim on submit.
    pub cart_id: CartId,
    pub lines: Vec<LineItem>,
}

/// A single product with a quantity the shopper can adjust.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSelection {
    pub product: Product,
    pub variant: Option<Variant>,
    quantity: Quantity,
}

impl SingleSelection {
    pub fn new(product: Product, variant: Option<Variant>, quantity: Quantity) -> Self {
        Self {
            product,
            variant,
            quantity,
        }
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.increment();
    }

    pub fn decrement(&mut self) {
        self.quantity = self.quantity.decrement();
    }

    pub fn line(&self) -> LineItem {
        LineItem {
            product: self.product.clone(),
            variant: self.variant.clone(),
            quantity: self.quantity.get(),
        }
    }
}

/// The resolved purchase for one checkout session.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Cart(CartSelection),
    Single(SingleSelection),
}

impl Selection {
    pub fn lines(&self) -> Vec<LineItem> {
        match self {
            Selection::Cart(cart) => cart.lines.clone(),
            Selection::Single(single) => vec![single.line()],
        }
    }

    /// Sum of the line totals.
    pub fn total(&self) -> Decimal {
        match self {
            Selection::Cart(cart) => cart.lines.iter().map(LineItem::total).sum(),
            Selection::Single(single) => {
                line_total(unit_price(&single.product, single.variant.as_ref()), single.quantity.get())
            }
        }
    }

    /// Whether the shopper can change quantities.
    pub fn is_editable(&self) -> bool {
        matches!(self, Selection::Single(_))
    }

    /// Builds the order request from the selection as it is right now.
    ///
    /// A cart order carries only the cart reference. A single order snapshots the
    /// current quantity, so later edits do not reach a request already sent.
    pub fn order_request(&self) -> OrderRequest {
        match self {
            Selection::Cart(cart) => OrderRequest::cart(cart.cart_id.clone()),
            Selection::Single(single) => OrderRequest::single(
                single.product.id.clone(),
                single.variant.as_ref().map(|v| v.id.clone()),
                single.quantity.get(),
            ),
        }
    }
}
