//! # Navigation parameters and redirect targets
//!
//! The checkout page is entered with query parameters (`cartId`, `productId`,
//! `variantId`, `quantity`). This module parses them into [`NavigationParams`] and builds
//! the paths the flow hands to the router:
//!
//! - the login redirect, whose `redirect` parameter carries a checkout continuation so the
//!   shopper lands back on the same selection after authenticating;
//! - checkout entry links ([`CheckoutLink`]) for "Buy Now" and cart checkouts.
//!
//! Continuations carry the cart, product and variant references only. The quantity hint
//! is not carried across the login redirect.

use crate::config::Routes;
use crate::model::{CartId, ProductId, VariantId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing or building navigation targets.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigationError {
    /// The query string could not be decoded.
    #[error("Invalid checkout query: {0}")]
    InvalidQuery(String),

    /// A target path could not be encoded.
    #[error("Failed to encode navigation target: {0}")]
    Encode(String),
}

/// Parameters the checkout flow is entered with.
///
/// Empty values are treated as absent, so `?cartId=&productId=p-1` is a product checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationParams {
    #[serde(default)]
    pub cart_id: Option<CartId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// Raw `quantity` hint; interpreted by [`crate::pricing::Quantity::from_hint`].
    #[serde(default)]
    pub quantity: Option<String>,
}

impl NavigationParams {
    pub fn cart(cart_id: impl Into<CartId>) -> Self {
        Self {
            cart_id: Some(cart_id.into()),
            ..Self::default()
        }
        .normalized()
    }

    pub fn product(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
        .normalized()
    }

    pub fn with_variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.variant_id = Some(variant_id.into());
        self.normalized()
    }

    pub fn with_quantity_hint(mut self, hint: impl Into<String>) -> Self {
        self.quantity = Some(hint.into());
        self.normalized()
    }

    /// Parses a query string (with or without a leading `?`).
    ///
    /// Unknown parameters are ignored. A repeated parameter keeps its first value.
    pub fn from_query(query: &str) -> Result<Self, NavigationError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).map_err(|e| NavigationError::InvalidQuery(e.to_string()))?;

        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "cartId" if params.cart_id.is_none() => params.cart_id = Some(value.into()),
                "productId" if params.product_id.is_none() => params.product_id = Some(value.into()),
                "variantId" if params.variant_id.is_none() => params.variant_id = Some(value.into()),
                "quantity" if params.quantity.is_none() => params.quantity = Some(value),
                _ => {}
            }
        }
        Ok(params.normalized())
    }

    /// Parses the query part of a full path such as `/checkout?productId=p-1`.
    pub fn from_path(path: &str) -> Result<Self, NavigationError> {
        match path.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None => Ok(Self::default()),
        }
    }

    /// Whether both parameter sets name the same cart, product and variant.
    ///
    /// The quantity hint is only read when a selection loads, so it does not count.
    pub fn same_selection(&self, other: &Self) -> bool {
        self.cart_id == other.cart_id && self.product_id == other.product_id && self.variant_id == other.variant_id
    }

    /// Whether these parameters can resolve to a selection at all.
    pub fn has_selection(&self) -> bool {
        self.cart_id.is_some() || self.product_id.is_some()
    }

    /// The parameters that survive an authentication redirect: every non-empty one of
    /// cart, product and variant reference, in that order.
    pub fn continuation(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(cart_id) = &self.cart_id {
            pairs.push(("cartId", cart_id.as_str()));
        }
        if let Some(product_id) = &self.product_id {
            pairs.push(("productId", product_id.as_str()));
        }
        if let Some(variant_id) = &self.variant_id {
            pairs.push(("variantId", variant_id.as_str()));
        }
        pairs
    }

    fn normalized(mut self) -> Self {
        self.cart_id = self.cart_id.filter(|id| !id.as_str().is_empty());
        self.product_id = self.product_id.filter(|id| !id.as_str().is_empty());
        self.variant_id = self.variant_id.filter(|id| !id.as_str().is_empty());
        self.quantity = self.quantity.filter(|q| !q.is_empty());
        self
    }
}

/// Checkout path carrying the continuation parameters, e.g. `/checkout?productId=p-1`.
pub fn continuation_path(routes: &Routes, params: &NavigationParams) -> Result<String, NavigationError> {
    with_query(&routes.checkout, &params.continuation())
}

/// Login path whose redirect target returns the shopper to the same checkout.
///
/// The continuation is URL-encoded as a single parameter value:
/// `/auth/login?redirect=%2Fcheckout%3FproductId%3Dp-1%26variantId%3Dv-2`.
pub fn login_redirect(routes: &Routes, params: &NavigationParams) -> Result<String, NavigationError> {
    let continuation = continuation_path(routes, params)?;
    with_query(&routes.login, &[(routes.redirect_param.as_str(), continuation.as_str())])
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> Result<String, NavigationError> {
    if pairs.is_empty() {
        return Ok(path.to_string());
    }
    let query = serde_urlencoded::to_string(pairs).map_err(|e| NavigationError::Encode(e.to_string()))?;
    Ok(format!("{path}?{query}"))
}

/// Builder for checkout entry paths ("Buy Now" on a product, or "Checkout" on a cart).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    params: NavigationParams,
}

impl CheckoutLink {
    pub fn for_product(product_id: impl Into<ProductId>) -> Self {
        Self {
            params: NavigationParams::product(product_id),
        }
    }

    pub fn for_cart(cart_id: impl Into<CartId>) -> Self {
        Self {
            params: NavigationParams::cart(cart_id),
        }
    }

    pub fn with_variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.params = self.params.with_variant(variant_id);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.params = self.params.with_quantity_hint(quantity.to_string());
        self
    }

    pub fn params(&self) -> &NavigationParams {
        &self.params
    }

    /// Direct checkout path including the quantity hint.
    pub fn path(&self, routes: &Routes) -> Result<String, NavigationError> {
        let mut pairs = self.params.continuation();
        if let Some(quantity) = &self.params.quantity {
            pairs.push(("quantity", quantity.as_str()));
        }
        with_query(&routes.checkout, &pairs)
    }

    /// Where the entry point should navigate: the checkout itself when authenticated,
    /// otherwise the login page with a checkout continuation.
    pub fn entry_target(&self, routes: &Routes, authenticated: bool) -> Result<String, NavigationError> {
        if authenticated {
            self.path(routes)
        } else {
            login_redirect(routes, &self.params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect_params(target: &str) -> NavigationParams {
        let (path, query) = target.split_once('?').expect("login target has a query");
        assert_eq!(path, "/auth/login");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "redirect");
        NavigationParams::from_path(&pairs[0].1).unwrap()
    }

    #[test]
    fn test_from_query_reads_storefront_names() {
        let params = NavigationParams::from_query("?productId=p-1&variantId=v-2&quantity=3").unwrap();
        assert_eq!(params.product_id, Some("p-1".into()));
        assert_eq!(params.variant_id, Some("v-2".into()));
        assert_eq!(params.quantity.as_deref(), Some("3"));
        assert!(params.cart_id.is_none());
    }

    #[test]
    fn test_from_query_treats_empty_values_as_absent() {
        let params = NavigationParams::from_query("cartId=&productId=p-1&utm_source=mail").unwrap();
        assert!(params.cart_id.is_none());
        assert_eq!(params.product_id, Some("p-1".into()));
        assert!(params.has_selection());
        assert!(!NavigationParams::from_query("").unwrap().has_selection());
    }

    #[test]
    fn test_from_query_keeps_first_of_repeated_keys() {
        let params = NavigationParams::from_query("productId=p-1&productId=p-2&quantity=2&quantity=9").unwrap();
        assert_eq!(params.product_id, Some("p-1".into()));
        assert_eq!(params.quantity.as_deref(), Some("2"));

        // An empty first value still wins, so the reference stays absent
        let params = NavigationParams::from_query("cartId=&cartId=cart-9&productId=p-1").unwrap();
        assert!(params.cart_id.is_none());
    }

    #[test]
    fn test_same_selection_ignores_quantity_hint() {
        let two = NavigationParams::product("p-1").with_quantity_hint("2");
        assert!(two.same_selection(&NavigationParams::product("p-1").with_quantity_hint("5")));
        assert!(!two.same_selection(&NavigationParams::product("p-1").with_variant("v-2")));
        assert!(!two.same_selection(&NavigationParams::cart("cart-9")));
    }

    #[test]
    fn test_login_redirect_encodes_product_and_variant() {
        let params = NavigationParams::product("p-1").with_variant("v-2").with_quantity_hint("4");
        let target = login_redirect(&Routes::default(), &params).unwrap();

        assert_eq!(target, "/auth/login?redirect=%2Fcheckout%3FproductId%3Dp-1%26variantId%3Dv-2");

        let restored = redirect_params(&target);
        assert_eq!(restored.product_id, Some("p-1".into()));
        assert_eq!(restored.variant_id, Some("v-2".into()));
        assert!(restored.cart_id.is_none());
        assert!(restored.quantity.is_none(), "quantity is not carried across login");
    }

    #[test]
    fn test_login_redirect_for_cart() {
        let target = login_redirect(&Routes::default(), &NavigationParams::cart("cart-9")).unwrap();
        let restored = redirect_params(&target);
        assert_eq!(restored, NavigationParams::cart("cart-9"));
    }

    #[test]
    fn test_continuation_without_references_is_bare_checkout() {
        let path = continuation_path(&Routes::default(), &NavigationParams::default()).unwrap();
        assert_eq!(path, "/checkout");
    }

    #[test]
    fn test_checkout_link_entry_targets() {
        let link = CheckoutLink::for_product("p-1").with_variant("v-2").with_quantity(2);
        let routes = Routes::default();

        assert_eq!(
            link.entry_target(&routes, true).unwrap(),
            "/checkout?productId=p-1&variantId=v-2&quantity=2"
        );

        let behind_login = link.entry_target(&routes, false).unwrap();
        assert!(behind_login.starts_with("/auth/login?redirect="));
        assert_eq!(redirect_params(&behind_login).product_id, Some("p-1".into()));
    }

    #[test]
    fn test_checkout_link_round_trips_through_query() {
        let link = CheckoutLink::for_cart("cart-1");
        let path = link.path(&Routes::default()).unwrap();
        assert_eq!(NavigationParams::from_path(&path).unwrap(), *link.params());
    }
}
