//! Port for subscription persistence.

use async_trait::async_trait;

use crate::domain::billing::Subscription;
use crate::domain::foundation::{DomainError, TenantId};

/// Durable store for subscription rows, keyed by tenant id.
///
/// The upsert is an unconditional overwrite of the whole row. Combined
/// with the at-most-one-row-per-tenant key this makes duplicate and
/// concurrent deliveries idempotent without read-modify-write locking.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Writes the complete row value, inserting or replacing the
    /// tenant's existing row.
    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Fetches the tenant's subscription row, if one exists.
    async fn find_by_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<Subscription>, DomainError>;
}
