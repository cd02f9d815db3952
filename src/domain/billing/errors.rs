//! Billing error types.
//!
//! Defines the failure taxonomy for webhook processing and plan-change
//! intents, with HTTP status mapping and retryability semantics. The
//! status code is what drives the provider's retry contract: acknowledged
//! no-ops must stay 2xx, store write failures must surface as 5xx so the
//! provider redelivers.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that abort webhook processing.
///
/// Acknowledged no-ops (unresolvable tenant, unrecognized kind, stale
/// event) are not errors; they are successful outcomes reported through
/// the processing result.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Request body is not parseable JSON. Fatal to the request.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature timestamp is outside the acceptable window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signature timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Durable write failed; the provider's retry is the recovery path.
    #[error("Store write failed: {0}")]
    StoreWriteFailure(String),

    /// Reading stored state failed before any write was attempted.
    #[error("Store read failed: {0}")]
    StoreReadFailure(String),
}

impl WebhookError {
    /// Returns true if the provider should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::StoreWriteFailure(_) | WebhookError::StoreReadFailure(_)
        )
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Status codes determine the provider's retry behavior:
    /// - 2xx: acknowledged, no retry
    /// - 4xx: client error, no retry
    /// - 5xx: server error, will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MalformedPayload(_) | WebhookError::InvalidTimestamp => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::StoreWriteFailure(_) | WebhookError::StoreReadFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Errors surfaced to the operator from plan-change intents.
#[derive(Debug, Error)]
pub enum IntentError {
    /// Tenant has no subscription to operate on.
    #[error("No subscription exists for this tenant")]
    SubscriptionNotFound,

    /// Submitted plan key failed validation.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// The payment provider rejected or failed the remote call; local
    /// state was left untouched.
    #[error("Payment provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Durable write failed after remote work succeeded.
    #[error("Store write failed: {0}")]
    StoreWriteFailure(String),

    /// Reading stored state failed.
    #[error("Store read failed: {0}")]
    StoreReadFailure(String),
}

impl IntentError {
    /// Maps the error to an HTTP status code for the UI path.
    pub fn status_code(&self) -> StatusCode {
        match self {
            IntentError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            IntentError::InvalidPlan(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IntentError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            IntentError::StoreWriteFailure(_) | IntentError::StoreReadFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
