//! GetFinancialGoalHandler - derive goal progress for the tenant.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{DomainError, TenantId};
use crate::domain::metrics::{FinancialGoal, SalesMetrics};
use crate::ports::{LedgerReader, SalesConfigReader};

/// Query for the tenant's financial goal progress.
#[derive(Debug, Clone)]
pub struct GetFinancialGoalQuery {
    pub tenant_id: TenantId,
}

/// Derives goal progress from a fresh metrics aggregation on every read.
pub struct GetFinancialGoalHandler {
    ledger: Arc<dyn LedgerReader>,
    config_reader: Arc<dyn SalesConfigReader>,
}

impl GetFinancialGoalHandler {
    pub fn new(ledger: Arc<dyn LedgerReader>, config_reader: Arc<dyn SalesConfigReader>) -> Self {
        Self {
            ledger,
            config_reader,
        }
    }

    pub async fn handle(&self, query: GetFinancialGoalQuery) -> Result<FinancialGoal, DomainError> {
        let transactions = self
            .ledger
            .transactions_for_tenant(&query.tenant_id)
            .await?;

        let config = match self.config_reader.find_for_tenant(&query.tenant_id).await {
            Ok(config) => config,
            Err(e) => {
                warn!(tenant_id = %query.tenant_id, error = %e, "sales config read failed; using goal defaults");
                None
            }
        };

        let metrics = SalesMetrics::compute(&transactions, config.as_ref());
        Ok(FinancialGoal::derive(metrics.gross_total, config.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::metrics::{SalesConfig, Transaction, TransactionStatus};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct MockLedger {
        transactions: Vec<Transaction>,
    }

    #[async_trait]
    impl LedgerReader for MockLedger {
        async fn transactions_for_tenant(
            &self,
            _tenant_id: &TenantId,
        ) -> Result<Vec<Transaction>, DomainError> {
            Ok(self.transactions.clone())
        }
    }

    struct MockConfigReader {
        config: Option<SalesConfig>,
    }

    #[async_trait]
    impl SalesConfigReader for MockConfigReader {
        async fn find_for_tenant(
            &self,
            _tenant_id: &TenantId,
        ) -> Result<Option<SalesConfig>, DomainError> {
            Ok(self.config.clone())
        }
    }

    #[tokio::test]
    async fn goal_current_tracks_approved_ledger_sum() {
        let date = Timestamp::from_unix_secs(1_700_000_000).unwrap();
        let handler = GetFinancialGoalHandler::new(
            Arc::new(MockLedger {
                transactions: vec![
                    Transaction::new(dec!(75), TransactionStatus::Approved, date),
                    Transaction::new(dec!(25), TransactionStatus::Pending, date),
                ],
            }),
            Arc::new(MockConfigReader { config: None }),
        );

        let goal = handler
            .handle(GetFinancialGoalQuery {
                tenant_id: TenantId::new(),
            })
            .await
            .unwrap();

        assert_eq!(goal.current, dec!(75));
        assert_eq!(goal.target, dec!(100000));
    }

    #[tokio::test]
    async fn goal_respects_manual_override_and_configured_target() {
        let handler = GetFinancialGoalHandler::new(
            Arc::new(MockLedger {
                transactions: vec![],
            }),
            Arc::new(MockConfigReader {
                config: Some(SalesConfig {
                    manual_gross_revenue: Some(dec!(900)),
                    financial_goal_target: Some(dec!(1000)),
                    financial_goal_start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
                    ..Default::default()
                }),
            }),
        );

        let goal = handler
            .handle(GetFinancialGoalQuery {
                tenant_id: TenantId::new(),
            })
            .await
            .unwrap();

        assert_eq!(goal.current, dec!(900));
        assert_eq!(goal.target, dec!(1000));
        assert_eq!(goal.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
