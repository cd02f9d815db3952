//! Axum router configuration for billing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_subscription, get_subscription, handle_billing_webhook, update_plan, BillingAppState,
};

/// Create the billing API router.
///
/// # Routes
///
/// ## Tenant Endpoints (require tenant context)
/// - `GET /subscription` - Current tenant's subscription
/// - `POST /plan` - Change plan (checkout redirect or direct write)
/// - `POST /cancel` - Cancel at period end
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/subscription", get(get_subscription))
        .route("/plan", post(update_plan))
        .route("/cancel", post(cancel_subscription))
}

/// Create the webhook router.
///
/// Separate from the tenant routes because webhooks carry no tenant
/// context; the tenant is resolved from the payload and deliveries are
/// authenticated by signature instead.
///
/// # Routes
/// - `POST /billing` - Ingest provider webhooks
pub fn webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/billing", post(handle_billing_webhook))
}
