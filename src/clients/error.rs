//! Error types for the storefront APIs consumed by the checkout flow.

use thiserror::Error;

/// Message shown to the shopper when a failed order carries no message of its own.
pub const ORDER_FAILED_FALLBACK: &str = "Order failed";

/// Errors returned by the cart, product and order APIs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The session is missing or not allowed to perform the call.
    #[error("Unauthorized")]
    Unauthorized,

    /// The server refused the request; the message is meant for the shopper.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),

    /// The call exceeded the configured submission timeout.
    #[error("Order request timed out")]
    TimedOut,
}

impl ApiError {
    /// The text to surface to the shopper, falling back to [`ORDER_FAILED_FALLBACK`]
    /// when the error carries no message.
    pub fn shopper_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            ORDER_FAILED_FALLBACK.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopper_message_uses_server_text() {
        assert_eq!(ApiError::Rejected("Out of stock".into()).shopper_message(), "Out of stock");
        assert_eq!(ApiError::TimedOut.shopper_message(), "Order request timed out");
    }

    #[test]
    fn test_shopper_message_falls_back_when_empty() {
        assert_eq!(ApiError::Rejected(String::new()).shopper_message(), ORDER_FAILED_FALLBACK);
        assert_eq!(ApiError::Transport("  ".into()).shopper_message(), ORDER_FAILED_FALLBACK);
    }
}
