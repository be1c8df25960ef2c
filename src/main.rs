//! # Checkout Demo
//!
//! Runs the checkout flow against the in-memory storefront:
//! 1. A signed-out shopper presses "Buy Now" and is sent to login.
//! 2. After signing in, the continuation reopens the checkout and the order is placed.
//! 3. The shopper then checks out their cart.
//!
//! Configuration comes from `CHECKOUT_*` variables, optionally via a `.env` file.

use anyhow::{anyhow, Context};
use rust_decimal::Decimal;
use std::sync::Arc;
use storefront_checkout::checkout::{CheckoutClient, CheckoutStatus, CheckoutView, SubmissionState, SubmitOutcome};
use storefront_checkout::clients::{
    Collaborators, InMemoryStorefront, RecordingNavigator, RecordingNotifier, SessionFlag,
};
use storefront_checkout::config::CheckoutConfig;
use storefront_checkout::lifecycle::{setup_tracing, CheckoutSystem};
use storefront_checkout::model::{Cart, CartItem, Product, Variant};
use storefront_checkout::navigation::NavigationParams;
use tracing::{info, Instrument};

fn storefront() -> InMemoryStorefront {
    let tee = Product::new("p-1", "Habesha Tee", Decimal::new(85000, 2))
        .with_image("/images/tee.png")
        .with_variant(Variant::new("v-1", "M", Decimal::new(85000, 2)))
        .with_variant(Variant::new("v-2", "XL", Decimal::new(92500, 2)));
    let mug = Product::new("p-2", "Coffee Mug", Decimal::from(350));
    let beans = Product::new("p-3", "Yirgacheffe Beans 1kg", Decimal::new(125050, 2));

    let cart = Cart::new("cart_1")
        .with_item(CartItem::new("item_1", mug.clone(), 2))
        .with_item(CartItem::new("item_2", beans.clone(), 1));

    InMemoryStorefront::new(cart)
        .with_product(tee)
        .with_product(mug)
        .with_product(beans)
}

fn log_view(view: &CheckoutView) {
    for line in &view.lines {
        info!(
            product = %line.product_name,
            variant = ?line.variant_name,
            unit = %line.unit_price_display,
            quantity = line.quantity,
            total = %line.line_total_display,
            "Line"
        );
    }
    info!(status = ?view.status, total = %view.total_display, button = view.submit_label, "Checkout view");
}

async fn place_order(client: &CheckoutClient) -> anyhow::Result<CheckoutView> {
    match client.submit().await? {
        SubmitOutcome::Submitting { request } => info!(?request, "Order submitted"),
        other => return Err(anyhow!("order was not submitted: {other:?}")),
    }
    let view = client
        .wait_for(|v| !matches!(v.submission, SubmissionState::Submitting))
        .await?;
    if let Some(notice) = &view.notice {
        return Err(anyhow!("order failed: {notice}"));
    }
    Ok(view)
}

/// The continuation carried by a login target such as `/auth/login?redirect=...`.
fn continuation(login_target: &str) -> anyhow::Result<NavigationParams> {
    let (_, query) = login_target
        .split_once('?')
        .context("login target has no query")?;
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
    let (_, redirect) = pairs
        .into_iter()
        .find(|(key, _)| key == "redirect")
        .context("login target has no redirect")?;
    Ok(NavigationParams::from_path(&redirect)?)
}

async fn buy_now_signed_out(client: &CheckoutClient) -> anyhow::Result<String> {
    let params = NavigationParams::from_query("productId=p-1&variantId=v-2&quantity=2")?;
    client.open(params).await?;
    let view = client.wait_for(|v| v.status != CheckoutStatus::Loading).await?;
    log_view(&view);

    client.increment().await?;
    log_view(&client.view());

    match client.submit().await? {
        SubmitOutcome::RedirectedToLogin { target } => Ok(target),
        other => Err(anyhow!("expected a login redirect, got {other:?}")),
    }
}

async fn resume_after_login(client: &CheckoutClient, session: &SessionFlag, login_target: &str) -> anyhow::Result<()> {
    session.set_authenticated(true);
    client.open(continuation(login_target)?).await?;
    let view = client.wait_for(|v| v.status != CheckoutStatus::Loading).await?;
    log_view(&view);

    let view = place_order(client).await?;
    if let Some(confirmation) = &view.confirmation {
        info!(order_id = %confirmation.order_id, "{}", confirmation.title);
    }
    client.view_orders().await?;
    Ok(())
}

async fn checkout_cart(client: &CheckoutClient) -> anyhow::Result<()> {
    client.open(NavigationParams::cart("cart_1")).await?;
    let view = client.wait_for(|v| v.status != CheckoutStatus::Loading).await?;
    log_view(&view);

    place_order(client).await?;
    client.continue_shopping().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = CheckoutConfig::from_env();
    info!(?config, "Starting checkout demo");

    let storefront = Arc::new(storefront());
    let session = SessionFlag::new(false);
    let navigator = RecordingNavigator::new();
    let collaborators = Collaborators::from_storefront(
        storefront.clone(),
        Arc::new(session.clone()),
        Arc::new(navigator.clone()),
        Arc::new(RecordingNotifier::new()),
    );

    let system = CheckoutSystem::new(config, collaborators);

    let login_target = buy_now_signed_out(&system.client)
        .instrument(tracing::info_span!("buy_now"))
        .await?;

    resume_after_login(&system.client, &session, &login_target)
        .instrument(tracing::info_span!("after_login"))
        .await?;

    checkout_cart(&system.client)
        .instrument(tracing::info_span!("cart_checkout"))
        .await?;

    for order in storefront.orders() {
        info!(order_id = %order.id, total = %order.total, request = ?order.request, "Placed order");
    }
    info!(visited = ?navigator.visited(), "Navigation history");

    system.shutdown().await?;
    Ok(())
}
