//! Configuration for the checkout flow.
//!
//! Values can be built in code (`CheckoutConfig::default().with_...`) or loaded from
//! `CHECKOUT_*` environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Number shoppers are asked to text before ordering, unless configured otherwise.
pub const DEFAULT_CONTACT_PHONE: &str = "+251905561888";

/// Routes the checkout flow navigates to or encodes into redirect targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    /// Path of the checkout page itself; continuation targets point back here.
    pub checkout: String,
    /// Login page used when the shopper is not authenticated.
    pub login: String,
    /// Query parameter of the login page carrying the "return to" target.
    pub redirect_param: String,
    /// Catalog page ("Continue Shopping").
    pub catalog: String,
    /// Order list ("My Orders").
    pub orders: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            checkout: "/checkout".to_string(),
            login: "/auth/login".to_string(),
            redirect_param: "redirect".to_string(),
            catalog: "/shop".to_string(),
            orders: "/orders".to_string(),
        }
    }
}

/// Checkout flow configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    pub routes: Routes,
    /// Capacity of the actor's request channel.
    ///
    /// Default: 32
    pub channel_capacity: usize,
    /// Upper bound on a single `create_order` call. `None` waits indefinitely.
    ///
    /// Default: `None`
    pub submit_timeout: Option<Duration>,
    /// Phone number shoppers are asked to text before placing an order. `None` hides
    /// the notice.
    ///
    /// Default: [`DEFAULT_CONTACT_PHONE`]
    pub contact_phone: Option<String>,
    /// Currency code used when formatting prices.
    ///
    /// Default: `ETB`
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            routes: Routes::default(),
            channel_capacity: 32,
            submit_timeout: None,
            contact_phone: Some(DEFAULT_CONTACT_PHONE.to_string()),
            currency: "ETB".to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables, falling back to defaults for
    /// anything missing or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            routes: Routes {
                checkout: env::var("CHECKOUT_PATH").unwrap_or(defaults.routes.checkout),
                login: env::var("CHECKOUT_LOGIN_PATH").unwrap_or(defaults.routes.login),
                redirect_param: env::var("CHECKOUT_REDIRECT_PARAM")
                    .unwrap_or(defaults.routes.redirect_param),
                catalog: env::var("CHECKOUT_CATALOG_PATH").unwrap_or(defaults.routes.catalog),
                orders: env::var("CHECKOUT_ORDERS_PATH").unwrap_or(defaults.routes.orders),
            },
            channel_capacity: env::var("CHECKOUT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.channel_capacity),
            submit_timeout: env::var("CHECKOUT_SUBMIT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            // Set but blank hides the notice
            contact_phone: match env::var("CHECKOUT_CONTACT_PHONE") {
                Ok(phone) => Some(phone).filter(|phone| !phone.trim().is_empty()),
                Err(_) => defaults.contact_phone,
            },
            currency: env::var("CHECKOUT_CURRENCY").unwrap_or(defaults.currency),
        }
    }

    /// Set the routes.
    #[must_use]
    pub fn with_routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    /// Bound every `create_order` call by `timeout`.
    #[must_use]
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = Some(timeout);
        self
    }

    /// Set the contact phone shown above the submit button.
    #[must_use]
    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    /// Hide the pre-order contact notice.
    #[must_use]
    pub fn without_contact_phone(mut self) -> Self {
        self.contact_phone = None;
        self
    }

    /// Set the display currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the request channel capacity. Zero is bumped to 1.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_storefront_routes() {
        let config = CheckoutConfig::default();
        assert_eq!(config.routes.checkout, "/checkout");
        assert_eq!(config.routes.login, "/auth/login");
        assert_eq!(config.routes.redirect_param, "redirect");
        assert_eq!(config.routes.catalog, "/shop");
        assert_eq!(config.routes.orders, "/orders");
        assert_eq!(config.currency, "ETB");
        assert!(config.submit_timeout.is_none());
        assert_eq!(config.contact_phone.as_deref(), Some("+251905561888"));
        assert!(config.without_contact_phone().contact_phone.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CheckoutConfig::default()
            .with_submit_timeout(Duration::from_secs(5))
            .with_contact_phone("+251900000000")
            .with_currency("USD")
            .with_channel_capacity(0);

        assert_eq!(config.submit_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.contact_phone.as_deref(), Some("+251900000000"));
        assert_eq!(config.currency, "USD");
        assert_eq!(config.channel_capacity, 1);
    }
}
