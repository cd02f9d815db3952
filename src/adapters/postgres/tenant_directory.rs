//! PostgreSQL implementation of TenantDirectory.
//!
//! Read-only lookups against the directory tables owned by the
//! surrounding system: `account_profiles` for the email hop and
//! `tenant_memberships` for the tenant hop.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AccountId, DomainError, EmailAddress, ErrorCode, TenantId};
use crate::ports::{AccountProfile, TenantDirectory, TenantMembership};

/// PostgreSQL implementation of the TenantDirectory port.
pub struct PostgresTenantDirectory {
    pool: PgPool,
}

impl PostgresTenantDirectory {
    /// Creates a new directory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    account_id: Uuid,
    tenant_id: Uuid,
}

#[async_trait]
impl TenantDirectory for PostgresTenantDirectory {
    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<AccountProfile>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT account_id
            FROM account_profiles
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to look up account profile: {}", e),
            )
        })?;

        Ok(row.map(|row| AccountProfile {
            account_id: AccountId::from_uuid(row.account_id),
            email: email.clone(),
        }))
    }

    async fn find_tenant_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<TenantMembership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(
            r#"
            SELECT account_id, tenant_id
            FROM tenant_memberships
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to look up tenant membership: {}", e),
            )
        })?;

        Ok(row.map(|row| TenantMembership {
            account_id: AccountId::from_uuid(row.account_id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
        }))
    }
}
