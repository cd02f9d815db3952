//! Port for the account/tenant directory.
//!
//! The directory is owned by the surrounding system; this engine only
//! reads it to resolve a webhook's customer email to a tenant.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError, EmailAddress, TenantId};

/// An account profile row, the first hop of tenant resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub account_id: AccountId,
    pub email: EmailAddress,
}

/// A tenant membership row, the second hop of tenant resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantMembership {
    pub account_id: AccountId,
    pub tenant_id: TenantId,
}

/// Read-only lookups against the account/tenant directory.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Finds the single account profile with this exact email, if any.
    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<AccountProfile>, DomainError>;

    /// Finds the single tenant membership for this account, if any.
    async fn find_tenant_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<TenantMembership>, DomainError>;
}
