//! GetSalesMetricsHandler - aggregate the tenant's financial metrics.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{DomainError, TenantId};
use crate::domain::metrics::{SalesConfig, SalesMetrics};
use crate::ports::{LedgerReader, SalesConfigReader};

/// Query for the tenant's sales metrics.
#[derive(Debug, Clone)]
pub struct GetSalesMetricsQuery {
    pub tenant_id: TenantId,
}

/// Recomputes metrics fresh on every read; there is no cached mirror.
///
/// A failing config read degrades to defaults instead of aborting: the
/// ledger-derived figures are still correct and more useful than an
/// error page.
pub struct GetSalesMetricsHandler {
    ledger: Arc<dyn LedgerReader>,
    config_reader: Arc<dyn SalesConfigReader>,
}

impl GetSalesMetricsHandler {
    pub fn new(ledger: Arc<dyn LedgerReader>, config_reader: Arc<dyn SalesConfigReader>) -> Self {
        Self {
            ledger,
            config_reader,
        }
    }

    pub async fn handle(&self, query: GetSalesMetricsQuery) -> Result<SalesMetrics, DomainError> {
        let transactions = self
            .ledger
            .transactions_for_tenant(&query.tenant_id)
            .await?;
        let config = self.read_config_degraded(&query.tenant_id).await;

        Ok(SalesMetrics::compute(&transactions, config.as_ref()))
    }

    /// Reads the sales config, treating failure as "no config".
    async fn read_config_degraded(&self, tenant_id: &TenantId) -> Option<SalesConfig> {
        match self.config_reader.find_for_tenant(tenant_id).await {
            Ok(config) => config,
            Err(e) => {
                warn!(tenant_id = %tenant_id, error = %e, "sales config read failed; using defaults");
                None
            }
        }
    }
}
