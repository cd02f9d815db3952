//! HTTP handlers for billing endpoints.
//!
//! Connects Axum routes to the application layer handlers. The webhook
//! endpoint owns the HTTP-level concerns the application layer must not
//! see: signature verification and body parsing. Status codes follow the
//! provider's retry contract - understood no-ops are 200, malformed
//! input is 4xx, and store failures are 5xx so the provider redelivers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::billing::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, GetSubscriptionHandler,
    GetSubscriptionQuery, ProcessWebhookCommand, ProcessWebhookHandler, UpdatePlanCommand,
    UpdatePlanHandler, UpdatePlanOutcome,
};
use crate::domain::billing::{IntentError, WebhookError, WebhookVerifier};
use crate::domain::foundation::DomainError;
use crate::ports::{ProviderClient, SubscriptionStore, TenantDirectory};

use super::super::tenant::TenantContext;
use super::dto::{
    ErrorBody, PlanChangeResponse, SubscriptionEnvelope, SubscriptionResponse, UpdatePlanRequest,
    WebhookAck,
};

/// Header carrying the provider's delivery signature.
pub const SIGNATURE_HEADER: &str = "X-Billing-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the billing routes.
///
/// Cloned per request; all dependencies are Arc-wrapped ports.
#[derive(Clone)]
pub struct BillingAppState {
    pub directory: Arc<dyn TenantDirectory>,
    pub store: Arc<dyn SubscriptionStore>,
    pub provider: Arc<dyn ProviderClient>,
    /// Plan key -> external checkout URL mapping from configuration.
    pub checkout_urls: HashMap<String, String>,
    /// Signature verifier; absent means verification is disabled (dev).
    pub webhook_verifier: Option<Arc<WebhookVerifier>>,
}

impl BillingAppState {
    /// Create handlers on demand from the shared state.
    pub fn webhook_handler(&self) -> ProcessWebhookHandler {
        ProcessWebhookHandler::new(self.directory.clone(), self.store.clone())
    }

    pub fn update_plan_handler(&self) -> UpdatePlanHandler {
        UpdatePlanHandler::new(self.store.clone(), self.checkout_urls.clone())
    }

    pub fn cancel_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.store.clone(), self.provider.clone())
    }

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// HTTP-facing error for the billing routes.
pub enum BillingApiError {
    Webhook(WebhookError),
    Intent(IntentError),
    Read(DomainError),
}

impl From<WebhookError> for BillingApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

impl From<IntentError> for BillingApiError {
    fn from(err: IntentError) -> Self {
        Self::Intent(err)
    }
}

impl From<DomainError> for BillingApiError {
    fn from(err: DomainError) -> Self {
        Self::Read(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Webhook(err) => (err.status_code(), err.to_string()),
            Self::Intent(err) => (err.status_code(), err.to_string()),
            Self::Read(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhook Endpoint
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/billing - Ingest one provider delivery.
pub async fn handle_billing_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, BillingApiError> {
    if let Some(verifier) = &state.webhook_verifier {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(WebhookError::InvalidSignature)?;
        verifier.verify(&body, signature)?;
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

    state
        .webhook_handler()
        .handle(ProcessWebhookCommand { payload })
        .await?;

    // Applied and acknowledged-no-op deliveries look identical to the
    // provider: received, do not retry.
    Ok((StatusCode::OK, Json(WebhookAck::received())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Intent Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/billing/plan - Change the current tenant's plan.
pub async fn update_plan(
    State(state): State<BillingAppState>,
    tenant: TenantContext,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.update_plan_handler();
    let outcome = handler
        .handle(UpdatePlanCommand {
            tenant_id: tenant.tenant_id,
            plan_id: request.plan_id,
        })
        .await?;

    let response = match outcome {
        UpdatePlanOutcome::CheckoutRedirect { checkout_url } => PlanChangeResponse {
            checkout_url: Some(checkout_url),
            subscription: None,
        },
        UpdatePlanOutcome::PlanApplied { subscription } => PlanChangeResponse {
            checkout_url: None,
            subscription: Some(SubscriptionResponse::from(subscription)),
        },
    };

    Ok(Json(response))
}

/// POST /api/billing/cancel - Cancel the current tenant's subscription.
pub async fn cancel_subscription(
    State(state): State<BillingAppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.cancel_handler();
    let subscription = handler
        .handle(CancelSubscriptionCommand {
            tenant_id: tenant.tenant_id,
        })
        .await?;

    Ok(Json(SubscriptionEnvelope {
        subscription: Some(SubscriptionResponse::from(subscription)),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Read Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/billing/subscription - Current tenant's subscription, if any.
pub async fn get_subscription(
    State(state): State<BillingAppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, BillingApiError> {
    let handler = state.get_subscription_handler();
    let subscription = handler
        .handle(GetSubscriptionQuery {
            tenant_id: tenant.tenant_id,
        })
        .await?;

    Ok(Json(SubscriptionEnvelope {
        subscription: subscription.map(SubscriptionResponse::from),
    }))
}
