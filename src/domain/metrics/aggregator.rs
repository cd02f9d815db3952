//! Metrics aggregator.
//!
//! Combines a tenant's transaction ledger with its sales configuration to
//! produce the derived `SalesMetrics`. Pure computation, no side effects,
//! safe to recompute on every read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sales_config::{CustomTax, SalesConfig, SplitRates};
use super::transaction::Transaction;

/// Derived financial metrics for one tenant. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesMetrics {
    /// Gross revenue: the manual override when one is set, otherwise the
    /// sum of approved ledger transactions.
    pub gross_total: Decimal,

    /// Fee-split rates after coercion and defaulting.
    pub splits: SplitRates,

    /// Echo of the manual gross override, when set.
    pub manual_gross_revenue: Option<Decimal>,

    /// Echo of the manual daily average, when set.
    pub manual_daily_average: Option<Decimal>,

    /// Echo of the manual projection window, when set.
    pub manual_projection_days: Option<i32>,

    /// Operator tax lines, verbatim from the config.
    pub custom_taxes: Vec<CustomTax>,
}

impl SalesMetrics {
    /// Aggregates the ledger under the tenant's configuration.
    ///
    /// A completely absent config is a normal state, not an error: every
    /// figure falls back to pure defaults. The manual gross override wins
    /// whenever it is set, including an explicit zero.
    pub fn compute(transactions: &[Transaction], config: Option<&SalesConfig>) -> Self {
        let transaction_sum: Decimal = transactions
            .iter()
            .filter(|tx| tx.status.counts_toward_gross())
            .map(|tx| tx.amount)
            .sum();

        let manual_gross = config.and_then(|c| c.manual_gross_revenue);
        let gross_total = manual_gross.unwrap_or(transaction_sum);

        Self {
            gross_total,
            splits: config.map(SplitRates::from_config).unwrap_or_default(),
            manual_gross_revenue: manual_gross,
            manual_daily_average: config.and_then(|c| c.manual_daily_average),
            manual_projection_days: config.and_then(|c| c.manual_projection_days),
            custom_taxes: config.map(|c| c.custom_taxes.clone()).unwrap_or_default(),
        }
    }
}
