//! Subscription aggregate.
//!
//! One subscription row exists per tenant, keyed by tenant id. Webhook
//! reconciliation writes it with unconditional-overwrite semantics: every
//! transition produces a complete new row value and the store upserts it,
//! which makes duplicate deliveries idempotent and removes the need for
//! per-tenant locking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailAddress, PlanId, TenantId, Timestamp};

/// Length of a billing period granted by a paid order.
pub const BILLING_PERIOD_DAYS: i64 = 30;

/// Stored subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and entitled.
    Active,

    /// Terminated by the provider (cancellation or refund), or swept
    /// after a pending cancellation's period end.
    Canceled,
}

/// Lifecycle phase derived from status and the pending-cancel flag.
///
/// `PendingCancel` is not a stored status: a tenant who asked to cancel
/// stays `Active` with `cancel_at_period_end` set until a downstream
/// sweep (outside this engine) flips the status after the period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPhase {
    Active,
    PendingCancel,
    Canceled,
}

/// Subscription aggregate - the tenant's billing state.
///
/// # Invariants
///
/// - At most one row per tenant (`tenant_id` is the upsert key).
/// - `cancel_at_period_end` with `Active` status means entitlements hold
///   until `current_period_end` passes; this engine never time-triggers
///   the final transition itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Owning tenant. Immutable identity.
    pub tenant_id: TenantId,

    /// Current plan catalog key. Retained through cancellation.
    pub plan_id: PlanId,

    /// Stored lifecycle status.
    pub status: SubscriptionStatus,

    /// Set when cancellation takes effect at period end.
    pub cancel_at_period_end: bool,

    /// End of the paid period, absent for rows that never saw a paid order.
    pub current_period_end: Option<Timestamp>,

    /// Provider order id of the last webhook-driven change.
    pub external_order_id: Option<String>,

    /// Customer email of the last webhook-driven change.
    pub external_customer_email: Option<EmailAddress>,

    /// When this row was last written.
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Builds the full row value for a paid order.
    ///
    /// This is a complete overwrite of whatever was stored before: a paid
    /// order always yields an active subscription on the ordered plan with
    /// a fresh billing period.
    pub fn from_paid_order(
        tenant_id: TenantId,
        plan_id: PlanId,
        order_id: Option<String>,
        customer_email: Option<EmailAddress>,
        now: Timestamp,
    ) -> Self {
        Self {
            tenant_id,
            plan_id,
            status: SubscriptionStatus::Active,
            cancel_at_period_end: false,
            current_period_end: Some(now.add_days(BILLING_PERIOD_DAYS)),
            external_order_id: order_id,
            external_customer_email: customer_email,
            updated_at: now,
        }
    }

    /// Builds a canceled row for a tenant with no stored subscription.
    ///
    /// Covers a cancellation or refund that arrives before (or without)
    /// the paid order it refers to, when the payload still names the plan.
    pub fn canceled_from_event(
        tenant_id: TenantId,
        plan_id: PlanId,
        order_id: Option<String>,
        customer_email: Option<EmailAddress>,
        now: Timestamp,
    ) -> Self {
        Self {
            tenant_id,
            plan_id,
            status: SubscriptionStatus::Canceled,
            cancel_at_period_end: true,
            current_period_end: None,
            external_order_id: order_id,
            external_customer_email: customer_email,
            updated_at: now,
        }
    }

    /// Applies a provider-side cancellation or refund to an existing row.
    ///
    /// Status becomes `Canceled` immediately; the plan is retained so the
    /// row still records what the tenant had.
    pub fn apply_provider_cancellation(
        mut self,
        order_id: Option<String>,
        customer_email: Option<EmailAddress>,
        now: Timestamp,
    ) -> Self {
        self.status = SubscriptionStatus::Canceled;
        self.cancel_at_period_end = true;
        if order_id.is_some() {
            self.external_order_id = order_id;
        }
        if customer_email.is_some() {
            self.external_customer_email = customer_email;
        }
        self.updated_at = now;
        self
    }

    /// Marks an operator-requested cancellation, effective at period end.
    ///
    /// The status stays `Active`; a downstream sweep transitions it after
    /// `current_period_end` passes.
    pub fn request_cancellation(mut self, now: Timestamp) -> Self {
        self.cancel_at_period_end = true;
        self.updated_at = now;
        self
    }

    /// Applies a plan directly, used by the no-checkout fallback path.
    pub fn with_plan_applied(mut self, plan_id: PlanId, now: Timestamp) -> Self {
        self.plan_id = plan_id;
        self.status = SubscriptionStatus::Active;
        self.cancel_at_period_end = false;
        self.updated_at = now;
        self
    }

    /// Provisions a fresh active row without provider provenance.
    ///
    /// Only used by the plan-change fallback in environments with no
    /// configured external checkout.
    pub fn provisioned(tenant_id: TenantId, plan_id: PlanId, now: Timestamp) -> Self {
        Self {
            tenant_id,
            plan_id,
            status: SubscriptionStatus::Active,
            cancel_at_period_end: false,
            current_period_end: Some(now.add_days(BILLING_PERIOD_DAYS)),
            external_order_id: None,
            external_customer_email: None,
            updated_at: now,
        }
    }

    /// Derives the lifecycle phase from stored fields.
    pub fn phase(&self) -> SubscriptionPhase {
        match (self.status, self.cancel_at_period_end) {
            (SubscriptionStatus::Canceled, _) => SubscriptionPhase::Canceled,
            (SubscriptionStatus::Active, true) => SubscriptionPhase::PendingCancel,
            (SubscriptionStatus::Active, false) => SubscriptionPhase::Active,
        }
    }
}
