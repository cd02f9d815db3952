//! PostgreSQL implementation of SalesConfigReader.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, TenantId};
use crate::domain::metrics::{CustomTax, SalesConfig};
use crate::ports::SalesConfigReader;

/// PostgreSQL implementation of the SalesConfigReader port.
///
/// The `sales_configs` table is operator-managed through the back office;
/// the split columns are stored as the operator typed them and coerced
/// downstream, and a malformed tax list degrades to empty rather than
/// failing the read.
pub struct PostgresSalesConfigReader {
    pool: PgPool,
}

impl PostgresSalesConfigReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SalesConfigRow {
    manual_gross_revenue: Option<Decimal>,
    manual_daily_average: Option<Decimal>,
    manual_projection_days: Option<i32>,
    platform_fee_percentage: Option<String>,
    expert_split_percentage: Option<String>,
    team_split_percentage: Option<String>,
    custom_taxes: serde_json::Value,
    financial_goal_target: Option<Decimal>,
    financial_goal_start_date: Option<NaiveDate>,
}

impl From<SalesConfigRow> for SalesConfig {
    fn from(row: SalesConfigRow) -> Self {
        let custom_taxes: Vec<CustomTax> = match serde_json::from_value(row.custom_taxes.clone()) {
            Ok(taxes) => taxes,
            Err(e) => {
                warn!(error = %e, "malformed custom_taxes column; treating as empty");
                Vec::new()
            }
        };

        SalesConfig {
            manual_gross_revenue: row.manual_gross_revenue,
            manual_daily_average: row.manual_daily_average,
            manual_projection_days: row.manual_projection_days,
            platform_fee_percentage: row.platform_fee_percentage,
            expert_split_percentage: row.expert_split_percentage,
            team_split_percentage: row.team_split_percentage,
            custom_taxes,
            financial_goal_target: row.financial_goal_target,
            financial_goal_start_date: row.financial_goal_start_date,
        }
    }
}

#[async_trait]
impl SalesConfigReader for PostgresSalesConfigReader {
    async fn find_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<SalesConfig>, DomainError> {
        let row: Option<SalesConfigRow> = sqlx::query_as(
            r#"
            SELECT manual_gross_revenue, manual_daily_average, manual_projection_days,
                   platform_fee_percentage, expert_split_percentage, team_split_percentage,
                   custom_taxes, financial_goal_target, financial_goal_start_date
            FROM sales_configs
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to read sales config: {}", e),
            )
        })?;

        Ok(row.map(SalesConfig::from))
    }
}
