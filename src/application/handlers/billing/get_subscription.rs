//! GetSubscriptionHandler - read the tenant's subscription.

use std::sync::Arc;

use crate::domain::billing::Subscription;
use crate::domain::foundation::{DomainError, TenantId};
use crate::ports::SubscriptionStore;

/// Query for the current tenant's subscription.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub tenant_id: TenantId,
}

/// Read-only handler; no caching, every read hits the store fresh.
pub struct GetSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
}

impl GetSubscriptionHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<Option<Subscription>, DomainError> {
        self.store.find_by_tenant(&query.tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PlanId, Timestamp};
    use async_trait::async_trait;

    struct MockStore {
        row: Option<Subscription>,
    }

    #[async_trait]
    impl SubscriptionStore for MockStore {
        async fn upsert(&self, _subscription: &Subscription) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_tenant(
            &self,
            tenant_id: &TenantId,
        ) -> Result<Option<Subscription>, DomainError> {
            Ok(self
                .row
                .clone()
                .filter(|s| &s.tenant_id == tenant_id))
        }
    }

    #[tokio::test]
    async fn returns_the_tenant_row() {
        let tenant_id = TenantId::new();
        let row =
            Subscription::provisioned(tenant_id, PlanId::new("pro").unwrap(), Timestamp::now());
        let handler = GetSubscriptionHandler::new(Arc::new(MockStore { row: Some(row) }));

        let found = handler.handle(GetSubscriptionQuery { tenant_id }).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn returns_none_for_unknown_tenant() {
        let handler = GetSubscriptionHandler::new(Arc::new(MockStore { row: None }));

        let found = handler
            .handle(GetSubscriptionQuery {
                tenant_id: TenantId::new(),
            })
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
