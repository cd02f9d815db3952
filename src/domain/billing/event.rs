//! Canonical billing events.
//!
//! The provider delivers webhooks in a loosely specified shape; the
//! normalizer maps them into `BillingEvent`, the provider-agnostic
//! representation the rest of the engine operates on.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailAddress, PlanId, Timestamp};

/// Kind of a canonical billing event.
///
/// Modeled as a tagged union over the known provider event kinds plus an
/// explicit `Unrecognized` variant: unknown kinds are carried through so
/// the caller can acknowledge receipt without side effects, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingEventKind {
    /// An order was paid; the tenant's subscription becomes active.
    OrderPaid,

    /// The provider-side subscription was canceled.
    SubscriptionCanceled,

    /// The order was refunded; treated like a cancellation.
    Refund,

    /// Any event kind the engine does not handle. Carries the raw value
    /// for logging.
    Unrecognized(String),
}

impl BillingEventKind {
    /// Parses the explicit event-type field of a webhook payload.
    pub fn from_event_type(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "order_paid" => Self::OrderPaid,
            "subscription_canceled" | "subscription_cancelled" => Self::SubscriptionCanceled,
            "refund" | "order_refunded" => Self::Refund,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Parses the fallback order-status field used by payloads that carry
    /// no explicit event type.
    pub fn from_order_status(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "paid" | "approved" => Self::OrderPaid,
            "canceled" | "cancelled" => Self::SubscriptionCanceled,
            "refunded" => Self::Refund,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns a stable label for logging.
    pub fn as_str(&self) -> &str {
        match self {
            Self::OrderPaid => "order_paid",
            Self::SubscriptionCanceled => "subscription_canceled",
            Self::Refund => "refund",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Returns true for event kinds the reconciler acts on.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Canonical, provider-agnostic representation of a webhook payload.
///
/// All fields other than `kind` are optional: the normalizer never fails
/// hard on unrecognized shapes, and downstream decides what an absent
/// field means (a missing email, for example, makes the tenant
/// unresolvable and the delivery an acknowledged no-op).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingEvent {
    /// What happened.
    pub kind: BillingEventKind,

    /// Customer email used for tenant resolution.
    pub customer_email: Option<EmailAddress>,

    /// Provider order reference, kept as provenance.
    pub order_id: Option<String>,

    /// Plan catalog key the order was for.
    pub plan_id: Option<PlanId>,

    /// Provider-side event timestamp, when the payload carried one.
    /// Drives the staleness guard in the reconciler.
    pub occurred_at: Option<Timestamp>,
}

/// Builder for creating test BillingEvent instances.
#[cfg(test)]
pub struct BillingEventBuilder {
    kind: BillingEventKind,
    customer_email: Option<EmailAddress>,
    order_id: Option<String>,
    plan_id: Option<PlanId>,
    occurred_at: Option<Timestamp>,
}

#[cfg(test)]
impl Default for BillingEventBuilder {
    fn default() -> Self {
        Self {
            kind: BillingEventKind::OrderPaid,
            customer_email: Some(EmailAddress::new("buyer@example.com").unwrap()),
            order_id: Some("ORD-1".to_string()),
            plan_id: Some(PlanId::new("pro").unwrap()),
            occurred_at: None,
        }
    }
}

#[cfg(test)]
impl BillingEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: BillingEventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.customer_email = Some(EmailAddress::new(email).unwrap());
        self
    }

    pub fn no_email(mut self) -> Self {
        self.customer_email = None;
        self
    }

    pub fn order_id(mut self, order_id: &str) -> Self {
        self.order_id = Some(order_id.to_string());
        self
    }

    pub fn plan(mut self, plan: &str) -> Self {
        self.plan_id = Some(PlanId::new(plan).unwrap());
        self
    }

    pub fn no_plan(mut self) -> Self {
        self.plan_id = None;
        self
    }

    pub fn occurred_at(mut self, ts: Timestamp) -> Self {
        self.occurred_at = Some(ts);
        self
    }

    pub fn build(self) -> BillingEvent {
        BillingEvent {
            kind: self.kind,
            customer_email: self.customer_email,
            order_id: self.order_id,
            plan_id: self.plan_id,
            occurred_at: self.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Event Type Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn event_type_order_paid() {
        assert_eq!(
            BillingEventKind::from_event_type("order_paid"),
            BillingEventKind::OrderPaid
        );
    }

    #[test]
    fn event_type_is_case_insensitive() {
        assert_eq!(
            BillingEventKind::from_event_type("ORDER_PAID"),
            BillingEventKind::OrderPaid
        );
    }

    #[test]
    fn event_type_subscription_canceled_both_spellings() {
        assert_eq!(
            BillingEventKind::from_event_type("subscription_canceled"),
            BillingEventKind::SubscriptionCanceled
        );
        assert_eq!(
            BillingEventKind::from_event_type("subscription_cancelled"),
            BillingEventKind::SubscriptionCanceled
        );
    }

    #[test]
    fn event_type_refund() {
        assert_eq!(
            BillingEventKind::from_event_type("refund"),
            BillingEventKind::Refund
        );
        assert_eq!(
            BillingEventKind::from_event_type("order_refunded"),
            BillingEventKind::Refund
        );
    }

    #[test]
    fn event_type_unknown_passes_through() {
        let kind = BillingEventKind::from_event_type("chargeback_opened");
        assert_eq!(
            kind,
            BillingEventKind::Unrecognized("chargeback_opened".to_string())
        );
        assert!(!kind.is_recognized());
    }

    // ══════════════════════════════════════════════════════════════
    // Order Status Fallback Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn order_status_paid_maps_to_order_paid() {
        assert_eq!(
            BillingEventKind::from_order_status("paid"),
            BillingEventKind::OrderPaid
        );
        assert_eq!(
            BillingEventKind::from_order_status("approved"),
            BillingEventKind::OrderPaid
        );
    }

    #[test]
    fn order_status_refunded_maps_to_refund() {
        assert_eq!(
            BillingEventKind::from_order_status("refunded"),
            BillingEventKind::Refund
        );
    }

    #[test]
    fn order_status_canceled_maps_to_subscription_canceled() {
        assert_eq!(
            BillingEventKind::from_order_status("canceled"),
            BillingEventKind::SubscriptionCanceled
        );
    }

    #[test]
    fn order_status_unknown_passes_through() {
        assert_eq!(
            BillingEventKind::from_order_status("in_dispute"),
            BillingEventKind::Unrecognized("in_dispute".to_string())
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Label Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn as_str_returns_stable_labels() {
        assert_eq!(BillingEventKind::OrderPaid.as_str(), "order_paid");
        assert_eq!(
            BillingEventKind::SubscriptionCanceled.as_str(),
            "subscription_canceled"
        );
        assert_eq!(BillingEventKind::Refund.as_str(), "refund");
        assert_eq!(
            BillingEventKind::Unrecognized("weird".to_string()).as_str(),
            "weird"
        );
    }

    #[test]
    fn builder_produces_paid_event_by_default() {
        let event = BillingEventBuilder::new().build();
        assert_eq!(event.kind, BillingEventKind::OrderPaid);
        assert!(event.customer_email.is_some());
        assert_eq!(event.plan_id.as_ref().unwrap().as_str(), "pro");
    }
}
