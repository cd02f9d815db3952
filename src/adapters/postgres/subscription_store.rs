//! PostgreSQL implementation of SubscriptionStore.
//!
//! The write is a single `INSERT ... ON CONFLICT (tenant_id) DO UPDATE`
//! that replaces the whole row, so the at-most-one-row-per-tenant
//! invariant is enforced by the primary key and duplicate deliveries are
//! idempotent at the database level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Subscription, SubscriptionStatus};
use crate::domain::foundation::{
    DomainError, EmailAddress, ErrorCode, PlanId, TenantId, Timestamp,
};
use crate::ports::SubscriptionStore;

/// PostgreSQL implementation of the SubscriptionStore port.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    tenant_id: Uuid,
    plan_id: String,
    status: String,
    cancel_at_period_end: bool,
    current_period_end: Option<DateTime<Utc>>,
    external_order_id: Option<String>,
    external_customer_email: Option<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            tenant_id: TenantId::from_uuid(row.tenant_id),
            plan_id: PlanId::new(row.plan_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan_id: {}", e))
            })?,
            status: parse_status(&row.status)?,
            cancel_at_period_end: row.cancel_at_period_end,
            current_period_end: row.current_period_end.map(Timestamp::from_datetime),
            external_order_id: row.external_order_id,
            // Provenance only; a historic malformed value degrades to absent.
            external_customer_email: row
                .external_customer_email
                .and_then(|s| EmailAddress::new(s).ok()),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "active" => Ok(SubscriptionStatus::Active),
        "canceled" => Ok(SubscriptionStatus::Canceled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "active",
        SubscriptionStatus::Canceled => "canceled",
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn upsert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                tenant_id, plan_id, status, cancel_at_period_end,
                current_period_end, external_order_id, external_customer_email, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (tenant_id) DO UPDATE SET
                plan_id = EXCLUDED.plan_id,
                status = EXCLUDED.status,
                cancel_at_period_end = EXCLUDED.cancel_at_period_end,
                current_period_end = EXCLUDED.current_period_end,
                external_order_id = EXCLUDED.external_order_id,
                external_customer_email = EXCLUDED.external_customer_email,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(subscription.tenant_id.as_uuid())
        .bind(subscription.plan_id.as_str())
        .bind(status_to_string(&subscription.status))
        .bind(subscription.cancel_at_period_end)
        .bind(
            subscription
                .current_period_end
                .map(|ts| *ts.as_datetime()),
        )
        .bind(&subscription.external_order_id)
        .bind(
            subscription
                .external_customer_email
                .as_ref()
                .map(|e| e.as_str()),
        )
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert subscription: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT tenant_id, plan_id, status, cancel_at_period_end,
                   current_period_end, external_order_id, external_customer_email, updated_at
            FROM subscriptions
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find subscription: {}", e),
            )
        })?;

        row.map(Subscription::try_from).transpose()
    }
}
