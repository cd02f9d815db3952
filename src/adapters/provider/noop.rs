//! No-op provider client for environments without provider credentials.

use async_trait::async_trait;
use tracing::warn;

use crate::ports::{ProviderClient, ProviderError};

/// Stand-in client used when no provider API token is configured.
///
/// Every call reports `NotConfigured`; callers decide whether that is
/// acceptable (local-only cancellation in demo environments) or fatal.
pub struct NoopProviderClient;

#[async_trait]
impl ProviderClient for NoopProviderClient {
    async fn cancel_order(&self, order_id: &str) -> Result<(), ProviderError> {
        warn!(order_id, "provider client not configured; skipping remote cancellation");
        Err(ProviderError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_reports_not_configured() {
        let client = NoopProviderClient;
        let result = client.cancel_order("O1").await;
        assert!(matches!(result, Err(ProviderError::NotConfigured)));
    }
}
