//! Tenant resolver - maps a customer email to a tenant id.
//!
//! Two-hop lookup against the directory: email -> account profile ->
//! tenant membership. Read-only. The two not-found outcomes are typed
//! separately because operations wants them distinguishable in logs even
//! though the webhook caller reacts identically to both.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::foundation::{DomainError, EmailAddress, TenantId};
use crate::ports::TenantDirectory;

/// Why an email did not resolve to a tenant.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No account profile matches the email.
    #[error("No account profile for email")]
    NoProfile,

    /// The profile exists but has no tenant membership.
    #[error("Account has no tenant membership")]
    NoMembership,

    /// A directory lookup itself failed.
    #[error("Directory lookup failed: {0}")]
    Lookup(#[from] DomainError),
}

/// Resolves customer emails to tenant ids through the directory.
#[derive(Clone)]
pub struct TenantResolver {
    directory: Arc<dyn TenantDirectory>,
}

impl TenantResolver {
    pub fn new(directory: Arc<dyn TenantDirectory>) -> Self {
        Self { directory }
    }

    /// Performs the two-hop resolution.
    pub async fn resolve(&self, email: &EmailAddress) -> Result<TenantId, ResolveError> {
        let profile = self
            .directory
            .find_account_by_email(email)
            .await?
            .ok_or(ResolveError::NoProfile)?;

        let membership = self
            .directory
            .find_tenant_for_account(&profile.account_id)
            .await?
            .ok_or(ResolveError::NoMembership)?;

        debug!(
            account_id = %profile.account_id,
            tenant_id = %membership.tenant_id,
            "resolved customer email to tenant"
        );

        Ok(membership.tenant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AccountId;
    use crate::ports::{AccountProfile, TenantMembership};
    use async_trait::async_trait;

    struct MockDirectory {
        profile: Option<AccountProfile>,
        membership: Option<TenantMembership>,
        fail: bool,
    }

    #[async_trait]
    impl TenantDirectory for MockDirectory {
        async fn find_account_by_email(
            &self,
            email: &EmailAddress,
        ) -> Result<Option<AccountProfile>, DomainError> {
            if self.fail {
                return Err(DomainError::database("directory down"));
            }
            Ok(self
                .profile
                .clone()
                .filter(|p| p.email.as_str() == email.as_str()))
        }

        async fn find_tenant_for_account(
            &self,
            account_id: &AccountId,
        ) -> Result<Option<TenantMembership>, DomainError> {
            if self.fail {
                return Err(DomainError::database("directory down"));
            }
            Ok(self
                .membership
                .clone()
                .filter(|m| &m.account_id == account_id))
        }
    }

    fn email(addr: &str) -> EmailAddress {
        EmailAddress::new(addr).unwrap()
    }

    #[tokio::test]
    async fn resolves_email_through_both_hops() {
        let account_id = AccountId::new();
        let tenant_id = TenantId::new();
        let resolver = TenantResolver::new(Arc::new(MockDirectory {
            profile: Some(AccountProfile {
                account_id,
                email: email("a@x.com"),
            }),
            membership: Some(TenantMembership {
                account_id,
                tenant_id,
            }),
            fail: false,
        }));

        let resolved = resolver.resolve(&email("a@x.com")).await.unwrap();
        assert_eq!(resolved, tenant_id);
    }

    #[tokio::test]
    async fn missing_profile_is_distinct_outcome() {
        let resolver = TenantResolver::new(Arc::new(MockDirectory {
            profile: None,
            membership: None,
            fail: false,
        }));

        let result = resolver.resolve(&email("ghost@x.com")).await;
        assert!(matches!(result, Err(ResolveError::NoProfile)));
    }

    #[tokio::test]
    async fn profile_without_membership_is_distinct_outcome() {
        let account_id = AccountId::new();
        let resolver = TenantResolver::new(Arc::new(MockDirectory {
            profile: Some(AccountProfile {
                account_id,
                email: email("a@x.com"),
            }),
            membership: None,
            fail: false,
        }));

        let result = resolver.resolve(&email("a@x.com")).await;
        assert!(matches!(result, Err(ResolveError::NoMembership)));
    }

    #[tokio::test]
    async fn email_is_matched_exactly() {
        let account_id = AccountId::new();
        let resolver = TenantResolver::new(Arc::new(MockDirectory {
            profile: Some(AccountProfile {
                account_id,
                email: email("a@x.com"),
            }),
            membership: None,
            fail: false,
        }));

        // Different case is a different address for exact matching.
        let result = resolver.resolve(&email("A@X.com")).await;
        assert!(matches!(result, Err(ResolveError::NoProfile)));
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let resolver = TenantResolver::new(Arc::new(MockDirectory {
            profile: None,
            membership: None,
            fail: true,
        }));

        let result = resolver.resolve(&email("a@x.com")).await;
        assert!(matches!(result, Err(ResolveError::Lookup(_))));
    }
}
