//! Port for reading the transaction ledger.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TenantId};
use crate::domain::metrics::Transaction;

/// Read-only access to the tenant's transaction ledger.
///
/// The ledger is owned by an external subsystem; transactions are
/// immutable once recorded and this engine never writes them.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Returns the full transaction list for the tenant.
    async fn transactions_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<Transaction>, DomainError>;
}
