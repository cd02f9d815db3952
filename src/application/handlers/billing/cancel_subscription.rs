//! CancelSubscriptionHandler - operator-initiated cancellation.
//!
//! Cancellation must reach the payment provider before the local flip:
//! writing only the local row would leave provider-side billing running
//! and the two states diverged. The local write marks the cancellation as
//! effective at period end; a downstream sweep finishes the transition
//! after the period passes.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::billing::{IntentError, Subscription};
use crate::domain::foundation::{TenantId, Timestamp};
use crate::ports::{ProviderClient, ProviderError, SubscriptionStore};

/// Command to cancel the current tenant's subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub tenant_id: TenantId,
}

/// Handler for cancellation intents.
pub struct CancelSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
    provider: Arc<dyn ProviderClient>,
}

impl CancelSubscriptionHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, provider: Arc<dyn ProviderClient>) -> Self {
        Self { store, provider }
    }

    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
    ) -> Result<Subscription, IntentError> {
        let existing = self
            .store
            .find_by_tenant(&cmd.tenant_id)
            .await
            .map_err(|e| IntentError::StoreReadFailure(e.to_string()))?
            .ok_or(IntentError::SubscriptionNotFound)?;

        // Cancel at the provider first. Rows without provider provenance
        // (direct-provisioned fallback rows) have nothing to cancel there.
        if let Some(order_id) = existing.external_order_id.as_deref() {
            match self.provider.cancel_order(order_id).await {
                Ok(()) => {
                    info!(tenant_id = %cmd.tenant_id, order_id, "provider cancellation confirmed");
                }
                Err(ProviderError::NotConfigured) => {
                    warn!(tenant_id = %cmd.tenant_id, "provider not configured; canceling locally only");
                }
                Err(ProviderError::OrderNotFound(order)) => {
                    warn!(tenant_id = %cmd.tenant_id, order, "provider does not know the order; canceling locally");
                }
                Err(ProviderError::RequestFailed(reason)) => {
                    return Err(IntentError::ProviderUnavailable(reason));
                }
            }
        }

        let subscription = existing.request_cancellation(Timestamp::now());
        self.store
            .upsert(&subscription)
            .await
            .map_err(|e| IntentError::StoreWriteFailure(e.to_string()))?;

        info!(tenant_id = %cmd.tenant_id, "subscription marked to cancel at period end");

        Ok(subscription)
    }
}
