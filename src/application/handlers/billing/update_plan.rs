//! UpdatePlanHandler - operator-initiated plan change.
//!
//! Plans that are mapped to an external checkout redirect the operator
//! there and change nothing locally: the eventual paid-order webhook is
//! the real state transition. Plans with no checkout mapping fall back to
//! a direct upsert, which exists for environments without a configured
//! external checkout.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::billing::{IntentError, Subscription};
use crate::domain::foundation::{PlanId, TenantId, Timestamp};
use crate::ports::SubscriptionStore;

/// Command to change the current tenant's plan.
#[derive(Debug, Clone)]
pub struct UpdatePlanCommand {
    pub tenant_id: TenantId,
    pub plan_id: String,
}

/// Outcome of a plan-change intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlanOutcome {
    /// Send the operator to the external checkout; no local state change.
    CheckoutRedirect { checkout_url: String },

    /// Plan was written directly (no checkout mapping configured).
    PlanApplied { subscription: Subscription },
}

/// Handler for plan-change intents.
pub struct UpdatePlanHandler {
    store: Arc<dyn SubscriptionStore>,
    /// Plan key -> external checkout URL, from billing configuration.
    checkout_urls: HashMap<String, String>,
}

impl UpdatePlanHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, checkout_urls: HashMap<String, String>) -> Self {
        Self {
            store,
            checkout_urls,
        }
    }

    pub async fn handle(&self, cmd: UpdatePlanCommand) -> Result<UpdatePlanOutcome, IntentError> {
        let plan_id =
            PlanId::new(cmd.plan_id).map_err(|e| IntentError::InvalidPlan(e.to_string()))?;

        if let Some(url) = self.checkout_urls.get(plan_id.as_str()) {
            info!(tenant_id = %cmd.tenant_id, plan = %plan_id, "redirecting plan change to external checkout");
            return Ok(UpdatePlanOutcome::CheckoutRedirect {
                checkout_url: url.clone(),
            });
        }

        let now = Timestamp::now();
        let existing = self
            .store
            .find_by_tenant(&cmd.tenant_id)
            .await
            .map_err(|e| IntentError::StoreReadFailure(e.to_string()))?;

        let subscription = match existing {
            Some(current) => current.with_plan_applied(plan_id.clone(), now),
            None => Subscription::provisioned(cmd.tenant_id, plan_id.clone(), now),
        };

        self.store
            .upsert(&subscription)
            .await
            .map_err(|e| IntentError::StoreWriteFailure(e.to_string()))?;

        info!(tenant_id = %cmd.tenant_id, plan = %plan_id, "applied plan directly (no checkout mapping)");

        Ok(UpdatePlanOutcome::PlanApplied { subscription })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::SubscriptionStatus;
    use crate::domain::foundation::DomainError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockStore {
        rows: Mutex<HashMap<TenantId, Subscription>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }

        fn with_row(subscription: Subscription) -> Self {
            Self {
                rows: Mutex::new(HashMap::from([(subscription.tenant_id, subscription)])),
            }
        }

        fn row(&self, tenant_id: &TenantId) -> Option<Subscription> {
            self.rows.lock().unwrap().get(tenant_id).cloned()
        }

        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SubscriptionStore for MockStore {
        async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
            self.rows
                .lock()
                .unwrap()
                .insert(subscription.tenant_id, subscription.clone());
            Ok(())
        }

        async fn find_by_tenant(
            &self,
            tenant_id: &TenantId,
        ) -> Result<Option<Subscription>, DomainError> {
            Ok(self.rows.lock().unwrap().get(tenant_id).cloned())
        }
    }

    fn checkout_map() -> HashMap<String, String> {
        HashMap::from([(
            "pro".to_string(),
            "https://pay.example.com/checkout/pro".to_string(),
        )])
    }

    #[tokio::test]
    async fn mapped_plan_redirects_without_local_write() {
        let store = Arc::new(MockStore::new());
        let handler = UpdatePlanHandler::new(store.clone(), checkout_map());

        let outcome = handler
            .handle(UpdatePlanCommand {
                tenant_id: TenantId::new(),
                plan_id: "pro".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            UpdatePlanOutcome::CheckoutRedirect {
                checkout_url: "https://pay.example.com/checkout/pro".to_string()
            }
        );
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn unmapped_plan_provisions_directly() {
        let tenant_id = TenantId::new();
        let store = Arc::new(MockStore::new());
        let handler = UpdatePlanHandler::new(store.clone(), checkout_map());

        let outcome = handler
            .handle(UpdatePlanCommand {
                tenant_id,
                plan_id: "internal-demo".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(outcome, UpdatePlanOutcome::PlanApplied { .. }));
        let row = store.row(&tenant_id).unwrap();
        assert_eq!(row.plan_id.as_str(), "internal-demo");
        assert_eq!(row.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn unmapped_plan_updates_existing_row() {
        let tenant_id = TenantId::new();
        let existing = Subscription::provisioned(
            tenant_id,
            PlanId::new("starter").unwrap(),
            Timestamp::now(),
        )
        .request_cancellation(Timestamp::now());
        let store = Arc::new(MockStore::with_row(existing));
        let handler = UpdatePlanHandler::new(store.clone(), HashMap::new());

        handler
            .handle(UpdatePlanCommand {
                tenant_id,
                plan_id: "business".to_string(),
            })
            .await
            .unwrap();

        let row = store.row(&tenant_id).unwrap();
        assert_eq!(row.plan_id.as_str(), "business");
        assert!(!row.cancel_at_period_end);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn empty_plan_key_is_rejected() {
        let handler = UpdatePlanHandler::new(Arc::new(MockStore::new()), HashMap::new());

        let result = handler
            .handle(UpdatePlanCommand {
                tenant_id: TenantId::new(),
                plan_id: "  ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(IntentError::InvalidPlan(_))));
    }
}
