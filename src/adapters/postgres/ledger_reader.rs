//! PostgreSQL implementation of LedgerReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, TenantId, Timestamp};
use crate::domain::metrics::{Transaction, TransactionStatus};
use crate::ports::LedgerReader;

/// PostgreSQL implementation of the LedgerReader port.
///
/// The `transactions` table is owned by the ledger subsystem; this
/// adapter only ever reads it.
pub struct PostgresLedgerReader {
    pool: PgPool,
}

impl PostgresLedgerReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    amount: Decimal,
    status: String,
    date: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction::new(
            row.amount,
            parse_transaction_status(&row.status)?,
            Timestamp::from_datetime(row.date),
        ))
    }
}

fn parse_transaction_status(s: &str) -> Result<TransactionStatus, DomainError> {
    match s.to_uppercase().as_str() {
        "APPROVED" => Ok(TransactionStatus::Approved),
        "PENDING" => Ok(TransactionStatus::Pending),
        "REFUNDED" => Ok(TransactionStatus::Refunded),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid transaction status: {}", s),
        )),
    }
}

#[async_trait]
impl LedgerReader for PostgresLedgerReader {
    async fn transactions_for_tenant(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT amount, status, date
            FROM transactions
            WHERE tenant_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to read transactions: {}", e),
            )
        })?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
