//! Billing configuration

use serde::Deserialize;
use std::collections::HashMap;

use super::error::ValidationError;

/// Billing configuration (payment provider and checkout mappings)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingConfig {
    /// Webhook signing secret. When absent, signature verification is
    /// disabled (development only).
    pub webhook_secret: Option<String>,

    /// Bearer token for the provider's management API.
    pub provider_api_token: Option<String>,

    /// Base URL for the provider's management API.
    pub provider_api_base_url: Option<String>,

    /// External checkout URL for the starter plan
    pub checkout_url_starter: Option<String>,

    /// External checkout URL for the pro plan
    pub checkout_url_pro: Option<String>,

    /// External checkout URL for the business plan
    pub checkout_url_business: Option<String>,
}

impl BillingConfig {
    /// Returns the plan-key to checkout-URL mapping.
    ///
    /// Plans without a mapping fall back to the direct-upsert path in the
    /// plan-change handler.
    pub fn checkout_urls(&self) -> HashMap<String, String> {
        let mut urls = HashMap::new();
        for (plan, url) in [
            ("starter", &self.checkout_url_starter),
            ("pro", &self.checkout_url_pro),
            ("business", &self.checkout_url_business),
        ] {
            if let Some(url) = url {
                urls.insert(plan.to_string(), url.clone());
            }
        }
        urls
    }

    /// True when webhook signature verification is enabled.
    pub fn verifies_signatures(&self) -> bool {
        self.webhook_secret.is_some()
    }

    /// True when the provider management API is configured.
    pub fn provider_configured(&self) -> bool {
        self.provider_api_token.is_some()
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(secret) = &self.webhook_secret {
            if secret.is_empty() {
                return Err(ValidationError::MissingRequired("WEBHOOK_SECRET"));
            }
        }

        if self.provider_api_token.is_some() {
            match &self.provider_api_base_url {
                None => return Err(ValidationError::MissingRequired("PROVIDER_API_BASE_URL")),
                Some(url) if !url.starts_with("https://") => {
                    return Err(ValidationError::InvalidProviderBaseUrl)
                }
                Some(_) => {}
            }
        }

        for (plan, url) in [
            ("starter", &self.checkout_url_starter),
            ("pro", &self.checkout_url_pro),
            ("business", &self.checkout_url_business),
        ] {
            if let Some(url) = url {
                if !url.starts_with("https://") && !url.starts_with("http://") {
                    return Err(ValidationError::InvalidCheckoutUrl(plan));
                }
            }
        }

        Ok(())
    }
}
