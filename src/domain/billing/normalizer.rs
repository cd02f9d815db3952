//! Event normalizer - maps raw provider webhooks to canonical events.
//!
//! The provider's payloads are not fully self-describing: the event kind
//! may live in an explicit `webhook_event_type` field or only in an
//! `order_status` field, the customer block appears as `Customer` or
//! `customer`, and timestamps arrive as RFC 3339 strings or Unix seconds.
//! This module probes the known shapes and produces a `BillingEvent`
//! without ever failing hard; whatever cannot be extracted is simply
//! absent from the canonical event.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::foundation::{EmailAddress, PlanId, Timestamp};

use super::event::{BillingEvent, BillingEventKind};

/// Normalizes a parsed webhook body into a canonical `BillingEvent`.
///
/// Pure mapping, no side effects. Unknown kinds come back as
/// `BillingEventKind::Unrecognized`; a payload with no event-type and no
/// order-status field normalizes to `Unrecognized("")`.
pub fn normalize(payload: &Value) -> BillingEvent {
    BillingEvent {
        kind: extract_kind(payload),
        customer_email: extract_email(payload),
        order_id: extract_order_id(payload),
        plan_id: extract_plan_id(payload),
        occurred_at: extract_timestamp(payload),
    }
}

/// Event kind from `webhook_event_type`, falling back to `order_status`.
fn extract_kind(payload: &Value) -> BillingEventKind {
    if let Some(event_type) = string_field(payload, "webhook_event_type") {
        return BillingEventKind::from_event_type(event_type);
    }
    if let Some(status) = string_field(payload, "order_status") {
        return BillingEventKind::from_order_status(status);
    }
    BillingEventKind::Unrecognized(String::new())
}

/// Customer email from either of the two payload shapes the provider
/// emits: `Customer.email` or `customer.email`.
fn extract_email(payload: &Value) -> Option<EmailAddress> {
    let customer = payload.get("Customer").or_else(|| payload.get("customer"))?;
    let raw = customer.get("email")?.as_str()?;
    EmailAddress::new(raw).ok()
}

fn extract_order_id(payload: &Value) -> Option<String> {
    string_field(payload, "order_id")
        .or_else(|| string_field(payload, "orderId"))
        .map(str::to_string)
}

/// Plan key from the product block (`Product.id` / `product.id`) or a
/// top-level `plan_id`.
fn extract_plan_id(payload: &Value) -> Option<PlanId> {
    let raw = payload
        .get("Product")
        .or_else(|| payload.get("product"))
        .and_then(|product| product.get("id"))
        .and_then(Value::as_str)
        .or_else(|| string_field(payload, "plan_id"))?;
    PlanId::new(raw).ok()
}

/// Provider event timestamp from `created_at` or `timestamp`, accepted as
/// RFC 3339 or Unix seconds. Unparseable values normalize to absent.
fn extract_timestamp(payload: &Value) -> Option<Timestamp> {
    let raw = payload
        .get("created_at")
        .or_else(|| payload.get("timestamp"))?;

    if let Some(secs) = raw.as_i64() {
        return Timestamp::from_unix_secs(secs);
    }
    let text = raw.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    text.parse::<i64>().ok().and_then(Timestamp::from_unix_secs)
}

fn string_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}
