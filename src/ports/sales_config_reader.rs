//! Port for reading tenant sales configuration.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TenantId};
use crate::domain::metrics::SalesConfig;

/// Read-only access to the operator-managed sales configuration.
///
/// Zero or one config exists per tenant. Callers must treat a read
/// failure as "no config" and degrade to defaults; a broken config row
/// must never abort a metrics read.
#[async_trait]
pub trait SalesConfigReader: Send + Sync {
    /// Returns the tenant's sales config, if one exists.
    async fn find_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<SalesConfig>, DomainError>;
}
