//! Request and response DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::billing::{Subscription, SubscriptionPhase};
use crate::domain::foundation::Timestamp;

/// Acknowledgment body returned to the provider for every accepted
/// delivery, including understood no-ops.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Error body for both the webhook and the intent endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Subscription as exposed to the surrounding UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub tenant_id: String,
    pub plan_id: String,
    pub status: String,
    pub phase: SubscriptionPhase,
    pub cancel_at_period_end: bool,
    pub current_period_end: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        let phase = subscription.phase();
        Self {
            tenant_id: subscription.tenant_id.to_string(),
            plan_id: subscription.plan_id.as_str().to_string(),
            status: match subscription.status {
                crate::domain::billing::SubscriptionStatus::Active => "active".to_string(),
                crate::domain::billing::SubscriptionStatus::Canceled => "canceled".to_string(),
            },
            phase,
            cancel_at_period_end: subscription.cancel_at_period_end,
            current_period_end: subscription.current_period_end,
            updated_at: subscription.updated_at,
        }
    }
}

/// Envelope for the subscription read endpoint; `null` when the tenant
/// has no subscription yet.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionEnvelope {
    pub subscription: Option<SubscriptionResponse>,
}

/// Request body for the plan-change intent.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdatePlanRequest {
    pub plan_id: String,
}

/// Response for the plan-change intent: either a checkout redirect or
/// the directly written subscription.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanChangeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PlanId, TenantId};

    #[test]
    fn webhook_ack_serializes_to_spec_shape() {
        let json = serde_json::to_string(&WebhookAck::received()).unwrap();
        assert_eq!(json, r#"{"received":true}"#);
    }

    #[test]
    fn error_body_serializes_to_spec_shape() {
        let json = serde_json::to_string(&ErrorBody::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }

    #[test]
    fn subscription_response_carries_phase() {
        let sub = Subscription::provisioned(
            TenantId::new(),
            PlanId::new("pro").unwrap(),
            Timestamp::now(),
        )
        .request_cancellation(Timestamp::now());

        let response = SubscriptionResponse::from(sub);
        assert_eq!(response.status, "active");
        assert_eq!(response.phase, SubscriptionPhase::PendingCancel);
        assert!(response.cancel_at_period_end);
    }

    #[test]
    fn plan_change_response_omits_absent_fields() {
        let response = PlanChangeResponse {
            checkout_url: Some("https://pay.example.com/pro".to_string()),
            subscription: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("subscription"));
    }
}
