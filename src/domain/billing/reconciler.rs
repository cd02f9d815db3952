//! Subscription reconciler - applies canonical events to stored state.
//!
//! The reconciler is a pure decision function: given the stored row (if
//! any) and a canonical event, it either produces the complete new row to
//! upsert or a reason to skip. Persistence and tenant resolution live in
//! the application layer; keeping the decision pure makes every ordering
//! and idempotency property directly testable.
//!
//! ## Ordering guard
//!
//! The provider guarantees neither order nor uniqueness of deliveries. A
//! late-retried event must not clobber newer state, so an event carrying a
//! provider timestamp is rejected as stale unless that timestamp is
//! strictly newer than the stored row's `updated_at`. Events without a
//! provider timestamp apply last-write-wins.

use crate::domain::foundation::{TenantId, Timestamp};

use super::event::{BillingEvent, BillingEventKind};
use super::subscription::Subscription;

/// Why an event produced no write.
///
/// All of these are acknowledged to the provider as received: skipping is
/// the intended outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Event kind the engine does not handle.
    UnrecognizedKind(String),

    /// Event is not newer than the stored row.
    Stale,

    /// Paid order without a plan key and no stored plan to fall back on.
    MissingPlan,

    /// Cancellation for a tenant with no stored subscription and no plan
    /// key in the payload; there is nothing meaningful to write.
    NothingToCancel,
}

impl SkipReason {
    /// Stable label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnrecognizedKind(_) => "unrecognized_kind",
            Self::Stale => "stale_event",
            Self::MissingPlan => "missing_plan",
            Self::NothingToCancel => "nothing_to_cancel",
        }
    }
}

/// Outcome of reconciling one event against stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Upsert this complete row value, keyed by tenant id.
    Upsert(Subscription),

    /// Acknowledge without writing.
    Skip(SkipReason),
}

/// Decides what a canonical event does to the tenant's subscription.
pub fn reconcile(
    tenant_id: TenantId,
    existing: Option<&Subscription>,
    event: &BillingEvent,
    now: Timestamp,
) -> ReconcileAction {
    if let BillingEventKind::Unrecognized(raw) = &event.kind {
        return ReconcileAction::Skip(SkipReason::UnrecognizedKind(raw.clone()));
    }

    if let (Some(stored), Some(occurred_at)) = (existing, event.occurred_at) {
        if !occurred_at.is_after(&stored.updated_at) {
            return ReconcileAction::Skip(SkipReason::Stale);
        }
    }

    match event.kind {
        BillingEventKind::OrderPaid => {
            let plan = event
                .plan_id
                .clone()
                .or_else(|| existing.map(|s| s.plan_id.clone()));
            match plan {
                Some(plan_id) => ReconcileAction::Upsert(Subscription::from_paid_order(
                    tenant_id,
                    plan_id,
                    event.order_id.clone(),
                    event.customer_email.clone(),
                    now,
                )),
                None => ReconcileAction::Skip(SkipReason::MissingPlan),
            }
        }
        BillingEventKind::SubscriptionCanceled | BillingEventKind::Refund => match existing {
            Some(stored) => ReconcileAction::Upsert(stored.clone().apply_provider_cancellation(
                event.order_id.clone(),
                event.customer_email.clone(),
                now,
            )),
            None => match event.plan_id.clone() {
                Some(plan_id) => ReconcileAction::Upsert(Subscription::canceled_from_event(
                    tenant_id,
                    plan_id,
                    event.order_id.clone(),
                    event.customer_email.clone(),
                    now,
                )),
                None => ReconcileAction::Skip(SkipReason::NothingToCancel),
            },
        },
        BillingEventKind::Unrecognized(_) => unreachable!("handled above"),
    }
}
