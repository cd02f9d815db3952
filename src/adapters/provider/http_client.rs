//! HTTP client for the payment provider's management API.
//!
//! Implements the `ProviderClient` port against the provider's REST API.
//! Only the cancellation call is needed by this engine; checkout and
//! capture stay entirely on the provider's hosted pages.
//!
//! # Security
//!
//! The API token is held in a `secrecy::SecretString` and only exposed
//! at request-build time.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::ports::{ProviderClient, ProviderError};

/// Provider API configuration.
#[derive(Clone)]
pub struct ProviderApiConfig {
    /// Bearer token for the management API.
    api_token: SecretString,

    /// Base URL for the provider API.
    api_base_url: String,
}

impl ProviderApiConfig {
    /// Creates a new provider configuration.
    pub fn new(api_token: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            api_token: SecretString::new(api_token.into()),
            api_base_url: api_base_url.into(),
        }
    }
}

/// Reqwest-backed implementation of the ProviderClient port.
pub struct HttpProviderClient {
    config: ProviderApiConfig,
    http_client: reqwest::Client,
}

impl HttpProviderClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: ProviderApiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn cancel_order(&self, order_id: &str) -> Result<(), ProviderError> {
        let url = format!(
            "{}/v1/orders/{}/cancel",
            self.config.api_base_url.trim_end_matches('/'),
            order_id
        );

        debug!(order_id, "requesting provider-side cancellation");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_token.expose_secret())
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => {
                Err(ProviderError::OrderNotFound(order_id.to_string()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::RequestFailed(format!(
                    "provider returned {}: {}",
                    status, body
                )))
            }
        }
    }
}
