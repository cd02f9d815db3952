//! Ledger transactions.
//!
//! Transactions are owned by the ledger subsystem and are a read-only
//! input to the metrics aggregator; once recorded they never change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Settlement status of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Settled; counts toward gross revenue.
    Approved,

    /// Awaiting settlement; excluded from gross revenue.
    Pending,

    /// Returned to the customer; excluded from gross revenue.
    Refunded,
}

impl TransactionStatus {
    /// Returns true if the amount counts toward gross revenue.
    pub fn counts_toward_gross(&self) -> bool {
        matches!(self, TransactionStatus::Approved)
    }
}

/// A single immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monetary amount in the tenant's settlement currency.
    pub amount: Decimal,

    /// Settlement status.
    pub status: TransactionStatus,

    /// When the transaction was recorded.
    pub date: Timestamp,
}

impl Transaction {
    pub fn new(amount: Decimal, status: TransactionStatus, date: Timestamp) -> Self {
        Self {
            amount,
            status,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn only_approved_counts_toward_gross() {
        assert!(TransactionStatus::Approved.counts_toward_gross());
        assert!(!TransactionStatus::Pending.counts_toward_gross());
        assert!(!TransactionStatus::Refunded.counts_toward_gross());
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Refunded).unwrap(),
            "\"REFUNDED\""
        );
    }

    #[test]
    fn status_deserializes_from_ledger_values() {
        let status: TransactionStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, TransactionStatus::Pending);
    }

    #[test]
    fn transaction_preserves_decimal_amount() {
        let tx = Transaction::new(
            dec!(149.90),
            TransactionStatus::Approved,
            Timestamp::from_unix_secs(1_700_000_000).unwrap(),
        );
        assert_eq!(tx.amount, dec!(149.90));
    }
}
