//! ProcessWebhookHandler - applies one provider delivery to tenant state.
//!
//! Orchestrates the webhook pipeline: normalize the payload, resolve the
//! tenant from the customer email, reconcile against stored state, and
//! upsert the result. Every outcome that produces no write is still an
//! acknowledgment - the provider must not retry deliveries we understood
//! and deliberately ignored. Only infrastructure failures surface as
//! errors, because the provider's retry is the sole recovery mechanism.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::billing::{
    normalize, reconcile, BillingEventKind, ReconcileAction, SkipReason, WebhookError,
};
use crate::domain::foundation::{TenantId, Timestamp};
use crate::ports::{SubscriptionStore, TenantDirectory};

use super::resolve_tenant::{ResolveError, TenantResolver};

/// Command to process one webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Parsed JSON body of the delivery.
    pub payload: serde_json::Value,
}

/// Why a delivery was acknowledged without a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckReason {
    /// No customer email in any known payload shape.
    MissingEmail,

    /// Email matched no account profile.
    NoProfile,

    /// Account profile has no tenant membership.
    NoMembership,

    /// Event kind the engine does not handle.
    UnrecognizedKind(String),

    /// Event was not newer than stored state.
    StaleEvent,

    /// Paid order without any plan to apply.
    MissingPlan,

    /// Cancellation with nothing meaningful to write.
    NothingToCancel,
}

impl AckReason {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingEmail => "missing_email",
            Self::NoProfile => "no_profile",
            Self::NoMembership => "no_membership",
            Self::UnrecognizedKind(_) => "unrecognized_kind",
            Self::StaleEvent => "stale_event",
            Self::MissingPlan => "missing_plan",
            Self::NothingToCancel => "nothing_to_cancel",
        }
    }
}

impl From<SkipReason> for AckReason {
    fn from(reason: SkipReason) -> Self {
        match reason {
            SkipReason::UnrecognizedKind(raw) => AckReason::UnrecognizedKind(raw),
            SkipReason::Stale => AckReason::StaleEvent,
            SkipReason::MissingPlan => AckReason::MissingPlan,
            SkipReason::NothingToCancel => AckReason::NothingToCancel,
        }
    }
}

/// Result of processing one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessWebhookResult {
    /// The event changed the tenant's subscription.
    Applied {
        tenant_id: TenantId,
        kind: BillingEventKind,
    },

    /// The delivery was understood and acknowledged with no state change.
    Acknowledged(AckReason),
}

/// Handler for inbound provider webhooks.
pub struct ProcessWebhookHandler {
    resolver: TenantResolver,
    store: Arc<dyn SubscriptionStore>,
}

impl ProcessWebhookHandler {
    pub fn new(directory: Arc<dyn TenantDirectory>, store: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            resolver: TenantResolver::new(directory),
            store,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookResult, WebhookError> {
        // 1. Normalize into the canonical event
        let event = normalize(&cmd.payload);

        if let BillingEventKind::Unrecognized(raw) = &event.kind {
            info!(kind = %raw, "acknowledging unrecognized webhook kind");
            return Ok(ProcessWebhookResult::Acknowledged(
                AckReason::UnrecognizedKind(raw.clone()),
            ));
        }

        // 2. Resolve the tenant from the customer email
        let Some(email) = event.customer_email.clone() else {
            warn!(kind = event.kind.as_str(), reason = "missing_email", "webhook has no resolvable customer email");
            return Ok(ProcessWebhookResult::Acknowledged(AckReason::MissingEmail));
        };

        let tenant_id = match self.resolver.resolve(&email).await {
            Ok(tenant_id) => tenant_id,
            Err(ResolveError::NoProfile) => {
                warn!(kind = event.kind.as_str(), reason = "no_profile", "no account profile for webhook email");
                return Ok(ProcessWebhookResult::Acknowledged(AckReason::NoProfile));
            }
            Err(ResolveError::NoMembership) => {
                warn!(kind = event.kind.as_str(), reason = "no_membership", "account has no tenant membership");
                return Ok(ProcessWebhookResult::Acknowledged(AckReason::NoMembership));
            }
            Err(ResolveError::Lookup(e)) => {
                return Err(WebhookError::StoreReadFailure(e.to_string()));
            }
        };

        // 3. Reconcile against stored state
        let existing = self
            .store
            .find_by_tenant(&tenant_id)
            .await
            .map_err(|e| WebhookError::StoreReadFailure(e.to_string()))?;

        match reconcile(tenant_id, existing.as_ref(), &event, Timestamp::now()) {
            ReconcileAction::Upsert(subscription) => {
                self.store
                    .upsert(&subscription)
                    .await
                    .map_err(|e| WebhookError::StoreWriteFailure(e.to_string()))?;

                info!(
                    tenant_id = %tenant_id,
                    kind = event.kind.as_str(),
                    status = ?subscription.status,
                    "applied billing event"
                );

                Ok(ProcessWebhookResult::Applied {
                    tenant_id,
                    kind: event.kind,
                })
            }
            ReconcileAction::Skip(reason) => {
                info!(
                    tenant_id = %tenant_id,
                    kind = event.kind.as_str(),
                    reason = reason.as_str(),
                    "acknowledged billing event without a write"
                );
                Ok(ProcessWebhookResult::Acknowledged(reason.into()))
            }
        }
    }
}
