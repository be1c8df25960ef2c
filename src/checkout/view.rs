//! Render-ready snapshot of the checkout, published by the actor on every change.

use super::state::{Phase, SubmissionState};
use crate::config::{CheckoutConfig, Routes};
use crate::model::{OrderId, ProductId};
use crate::pricing::format_price;
use crate::selection::{LineItem, Selection};
use rust_decimal::Decimal;
use serde::Serialize;

/// Image shown for products without one.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

pub const PLACE_ORDER_LABEL: &str = "Place Order";
pub const PLACING_ORDER_LABEL: &str = "Placing Order...";

pub const CONFIRMATION_TITLE: &str = "Order Placed Successfully";
pub const CONFIRMATION_MESSAGE: &str = "Your order has been placed successfully. \
    Our delivery team will contact you shortly to confirm and deliver your items.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Loading,
    Empty,
    Ready,
    Closed,
}

/// The two ways out of the order confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationExit {
    ContinueShopping,
    ViewOrders,
}

impl ConfirmationExit {
    pub fn label(self) -> &'static str {
        match self {
            ConfirmationExit::ContinueShopping => "Continue Shopping",
            ConfirmationExit::ViewOrders => "My Orders",
        }
    }

    pub fn path(self, routes: &Routes) -> &str {
        match self {
            ConfirmationExit::ContinueShopping => &routes.catalog,
            ConfirmationExit::ViewOrders => &routes.orders,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub product_id: ProductId,
    pub product_name: String,
    pub variant_name: Option<String>,
    pub image: String,
    pub unit_price: Decimal,
    pub unit_price_display: String,
    pub quantity: u32,
    pub line_total: Decimal,
    pub line_total_display: String,
    /// Only a single-product checkout has quantity controls.
    pub editable: bool,
}

impl LineView {
    fn from_line(line: &LineItem, editable: bool, currency: &str) -> Self {
        let unit_price = line.unit_price();
        let line_total = line.total();
        Self {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            variant_name: line.variant.as_ref().map(|v| v.name.clone()),
            image: line
                .product
                .image
                .clone()
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            unit_price,
            unit_price_display: format_price(unit_price, currency),
            quantity: line.quantity,
            line_total,
            line_total_display: format_price(line_total, currency),
            editable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub order_id: OrderId,
    pub exits: [ConfirmationExit; 2],
}

/// Everything a page needs to draw the checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutView {
    pub status: CheckoutStatus,
    pub lines: Vec<LineView>,
    pub total: Decimal,
    pub total_display: String,
    pub submission: SubmissionState,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    /// Last failure shown to the shopper, cleared on the next submit.
    pub notice: Option<String>,
    pub pre_order_notice: Option<String>,
    pub confirmation: Option<Confirmation>,
}

impl CheckoutView {
    pub(crate) fn render(
        phase: &Phase,
        submission: &SubmissionState,
        notice: Option<&str>,
        config: &CheckoutConfig,
    ) -> Self {
        let (status, selection) = match phase {
            Phase::Loading => (CheckoutStatus::Loading, None),
            Phase::Empty => (CheckoutStatus::Empty, None),
            Phase::Ready(selection) => (CheckoutStatus::Ready, Some(selection)),
            Phase::Closed => (CheckoutStatus::Closed, None),
        };

        let lines: Vec<LineView> = selection
            .map(|s| {
                let editable = s.is_editable();
                s.lines()
                    .iter()
                    .map(|line| LineView::from_line(line, editable, &config.currency))
                    .collect()
            })
            .unwrap_or_default();
        let total = selection.map(Selection::total).unwrap_or_default();

        let confirmation = match (status, submission) {
            (CheckoutStatus::Ready, SubmissionState::Succeeded { order_id }) => Some(Confirmation {
                title: CONFIRMATION_TITLE.to_string(),
                message: CONFIRMATION_MESSAGE.to_string(),
                order_id: order_id.clone(),
                exits: [ConfirmationExit::ContinueShopping, ConfirmationExit::ViewOrders],
            }),
            _ => None,
        };

        Self {
            status,
            lines,
            total,
            total_display: format_price(total, &config.currency),
            submission: submission.clone(),
            submit_label: if matches!(submission, SubmissionState::Submitting) {
                PLACING_ORDER_LABEL
            } else {
                PLACE_ORDER_LABEL
            },
            submit_enabled: selection.is_some() && submission.accepts_submit(),
            notice: notice.map(str::to_string),
            pre_order_notice: config
                .contact_phone
                .as_ref()
                .map(|phone| format!("Please send a text message to {phone} before placing your order.")),
            confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::pricing::Quantity;
    use crate::selection::SingleSelection;

    fn ready() -> Phase {
        let product = Product::new("p-1", "Tee", Decimal::new(123450, 2));
        Phase::Ready(Selection::Single(SingleSelection::new(product, None, Quantity::ONE)))
    }

    #[test]
    fn test_ready_view_formats_prices_and_placeholder() {
        let config = CheckoutConfig::default().with_contact_phone("+251900000000");
        let view = CheckoutView::render(&ready(), &SubmissionState::Idle, None, &config);

        assert_eq!(view.status, CheckoutStatus::Ready);
        assert_eq!(view.total_display, "ETB 1,234.50");
        assert_eq!(view.lines[0].image, PLACEHOLDER_IMAGE);
        assert!(view.lines[0].editable);
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, PLACE_ORDER_LABEL);
        assert_eq!(
            view.pre_order_notice.as_deref(),
            Some("Please send a text message to +251900000000 before placing your order.")
        );
    }

    #[test]
    fn test_default_config_shows_store_contact_notice() {
        let view = CheckoutView::render(&ready(), &SubmissionState::Idle, None, &CheckoutConfig::default());
        assert_eq!(
            view.pre_order_notice.as_deref(),
            Some("Please send a text message to +251905561888 before placing your order.")
        );

        let config = CheckoutConfig::default().without_contact_phone();
        let view = CheckoutView::render(&ready(), &SubmissionState::Idle, None, &config);
        assert!(view.pre_order_notice.is_none());
    }

    #[test]
    fn test_submitting_view_disables_button() {
        let view = CheckoutView::render(&ready(), &SubmissionState::Submitting, None, &CheckoutConfig::default());
        assert!(!view.submit_enabled);
        assert_eq!(view.submit_label, PLACING_ORDER_LABEL);
        assert!(view.confirmation.is_none());
    }

    #[test]
    fn test_succeeded_view_offers_both_exits() {
        let succeeded = SubmissionState::Succeeded {
            order_id: "ord-1".into(),
        };
        let view = CheckoutView::render(&ready(), &succeeded, None, &CheckoutConfig::default());

        let confirmation = view.confirmation.unwrap();
        assert_eq!(confirmation.title, CONFIRMATION_TITLE);
        assert_eq!(confirmation.order_id, OrderId::from("ord-1"));
        assert_eq!(confirmation.exits.map(ConfirmationExit::label), ["Continue Shopping", "My Orders"]);
        assert!(!view.submit_enabled);
    }

    #[test]
    fn test_empty_view_has_zero_total() {
        let view = CheckoutView::render(&Phase::Empty, &SubmissionState::Idle, None, &CheckoutConfig::default());
        assert!(view.lines.is_empty());
        assert_eq!(view.total_display, "ETB 0.00");
        assert!(!view.submit_enabled);
    }
}
