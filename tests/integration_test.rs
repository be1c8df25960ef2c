use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use storefront_checkout::checkout::{CheckoutClient, CheckoutStatus, CheckoutView, SubmissionState, SubmitOutcome};
use storefront_checkout::clients::{
    Collaborators, InMemoryStorefront, RecordingNavigator, RecordingNotifier, SessionFlag, SessionStatus,
};
use storefront_checkout::config::CheckoutConfig;
use storefront_checkout::lifecycle::CheckoutSystem;
use storefront_checkout::model::{Cart, CartItem, OrderId, OrderRequest, Product, Variant};
use storefront_checkout::navigation::{CheckoutLink, NavigationParams};

/// Full end-to-end setup: the checkout system running against the in-memory storefront.
struct Shop {
    system: CheckoutSystem,
    storefront: Arc<InMemoryStorefront>,
    session: SessionFlag,
    navigator: RecordingNavigator,
    notifier: RecordingNotifier,
}

impl Shop {
    fn open_for_business(cart: Cart, authenticated: bool) -> Self {
        let storefront = Arc::new(
            InMemoryStorefront::new(cart)
                .with_product(Product::new("p-100", "Scarf", Decimal::from(100)))
                .with_product(
                    Product::new("p-1", "Tee", Decimal::from(90)).with_variant(Variant::new("v-2", "XL", Decimal::from(110))),
                ),
        );
        let session = SessionFlag::new(authenticated);
        let navigator = RecordingNavigator::new();
        let notifier = RecordingNotifier::new();

        let collaborators = Collaborators::from_storefront(
            storefront.clone(),
            Arc::new(session.clone()),
            Arc::new(navigator.clone()),
            Arc::new(notifier.clone()),
        );
        let system = CheckoutSystem::new(CheckoutConfig::default(), collaborators);

        Self {
            system,
            storefront,
            session,
            navigator,
            notifier,
        }
    }

    fn client(&self) -> &CheckoutClient {
        &self.system.client
    }

    async fn settle(&self, predicate: impl FnMut(&CheckoutView) -> bool) -> CheckoutView {
        tokio::time::timeout(Duration::from_secs(5), self.client().wait_for(predicate))
            .await
            .expect("view never reached the expected state")
            .expect("checkout actor stopped")
    }

    async fn open(&self, params: NavigationParams) -> CheckoutView {
        self.client().open(params).await.expect("open failed");
        self.settle(|v| v.status != CheckoutStatus::Loading).await
    }

    async fn place_order(&self) -> CheckoutView {
        let outcome = self.client().submit().await.expect("submit failed");
        assert!(matches!(outcome, SubmitOutcome::Submitting { .. }), "not submitted: {outcome:?}");
        self.settle(|v| v.submission != SubmissionState::Submitting).await
    }

    async fn close(self) {
        self.system.shutdown().await.expect("shutdown failed");
    }
}

fn two_line_cart() -> Cart {
    Cart::new("cart-9")
        .with_item(CartItem::new("i-1", Product::new("p-a", "Mug", Decimal::from(50)), 2))
        .with_item(CartItem::new("i-2", Product::new("p-b", "Cap", Decimal::from(30)), 1))
}

#[tokio::test]
async fn test_single_product_quantity_reprices_and_floors_at_one() {
    let shop = Shop::open_for_business(Cart::new("cart-9"), true);

    let view = shop
        .open(NavigationParams::product("p-100").with_quantity_hint("3"))
        .await;
    assert_eq!(view.status, CheckoutStatus::Ready);
    assert_eq!(view.lines[0].quantity, 3);
    assert_eq!(view.total, Decimal::from(300));

    shop.client().decrement().await.unwrap();
    let view = shop.client().view();
    assert_eq!(view.lines[0].quantity, 2);
    assert_eq!(view.total, Decimal::from(200));

    for _ in 0..3 {
        shop.client().decrement().await.unwrap();
    }
    let view = shop.client().view();
    assert_eq!(view.lines[0].quantity, 1);
    assert_eq!(view.total, Decimal::from(100));
    assert_eq!(view.total_display, "ETB 100.00");

    shop.close().await;
}

#[tokio::test]
async fn test_cart_checkout_totals_and_places_cart_order() {
    let shop = Shop::open_for_business(two_line_cart(), true);

    let view = shop.open(NavigationParams::cart("cart-9")).await;
    assert_eq!(view.total, Decimal::from(130));
    assert_eq!(view.lines.len(), 2);
    assert_eq!(view.lines[0].line_total_display, "ETB 100.00");

    let view = shop.place_order().await;
    assert_eq!(
        view.submission,
        SubmissionState::Succeeded {
            order_id: OrderId::from("order_1")
        }
    );

    let orders = shop.storefront.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].request, OrderRequest::cart("cart-9"));
    assert_eq!(orders[0].total, Decimal::from(130));

    assert_eq!(shop.client().view_orders().await.unwrap(), "/orders");
    assert_eq!(shop.navigator.visited(), vec!["/orders"]);
    assert_eq!(shop.client().view().status, CheckoutStatus::Closed);

    shop.close().await;
}

#[tokio::test]
async fn test_signed_out_buy_now_goes_through_login_and_back() {
    let shop = Shop::open_for_business(Cart::new("cart-9"), false);

    shop.open(NavigationParams::product("p-1").with_variant("v-2").with_quantity_hint("2"))
        .await;
    let SubmitOutcome::RedirectedToLogin { target } = shop.client().submit().await.unwrap() else {
        panic!("expected a login redirect");
    };
    assert!(shop.storefront.orders().is_empty());

    let (_, query) = target.split_once('?').unwrap();
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap();
    assert_eq!(pairs[0].0, "redirect");
    let continuation = NavigationParams::from_path(&pairs[0].1).unwrap();
    assert_eq!(continuation, NavigationParams::product("p-1").with_variant("v-2"));

    shop.session.set_authenticated(true);
    let view = shop.open(continuation).await;
    assert_eq!(view.total, Decimal::from(110));

    let view = shop.place_order().await;
    assert!(view.confirmation.is_some());
    assert_eq!(
        shop.storefront.orders()[0].request,
        OrderRequest::single("p-1", Some("v-2".into()), 1)
    );

    shop.close().await;
}

#[tokio::test]
async fn test_server_rejection_is_surfaced_and_retryable() {
    let shop = Shop::open_for_business(two_line_cart(), true);
    shop.open(NavigationParams::cart("cart-9")).await;

    shop.storefront.set_cart(Cart::new("cart-9")).unwrap();
    let view = shop.place_order().await;
    assert_eq!(view.submission, SubmissionState::Idle);
    assert_eq!(shop.notifier.alerts(), vec!["Your cart is empty"]);

    shop.storefront.set_cart(two_line_cart()).unwrap();
    let view = shop.place_order().await;
    assert!(matches!(view.submission, SubmissionState::Succeeded { .. }));
    assert_eq!(shop.storefront.orders().len(), 1);

    shop.close().await;
}

#[tokio::test]
async fn test_unknown_product_settles_into_empty_checkout() {
    let shop = Shop::open_for_business(Cart::new("cart-9"), true);

    let view = shop.open(NavigationParams::product("p-404")).await;
    assert_eq!(view.status, CheckoutStatus::Empty);
    assert!(view.lines.is_empty());
    assert!(shop.notifier.alerts().is_empty());

    let view = shop.open(NavigationParams::default()).await;
    assert_eq!(view.status, CheckoutStatus::Empty);

    shop.close().await;
}

#[tokio::test]
async fn test_checkout_link_entry_round_trip() {
    let shop = Shop::open_for_business(Cart::new("cart-9"), true);
    let routes = CheckoutConfig::default().routes;

    let path = CheckoutLink::for_product("p-1")
        .with_variant("v-2")
        .with_quantity(4)
        .entry_target(&routes, shop.session.is_authenticated())
        .unwrap();
    let view = shop.open(NavigationParams::from_path(&path).unwrap()).await;

    assert_eq!(view.lines[0].quantity, 4);
    assert_eq!(view.lines[0].variant_name.as_deref(), Some("XL"));
    assert_eq!(view.total, Decimal::from(440));

    shop.close().await;
}
