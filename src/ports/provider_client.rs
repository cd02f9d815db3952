//! Port for the payment provider's management API.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the provider's management API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure or non-success response.
    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    /// The provider does not know the referenced order.
    #[error("Order not found at provider: {0}")]
    OrderNotFound(String),

    /// No provider credentials are configured in this environment.
    #[error("Provider is not configured")]
    NotConfigured,
}

/// Outbound calls to the payment provider.
///
/// Local cancellation must go through the provider first: flipping only
/// the local row would leave provider-side billing running and the two
/// states permanently diverged.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Cancels the provider-side subscription behind the given order.
    async fn cancel_order(&self, order_id: &str) -> Result<(), ProviderError>;
}
