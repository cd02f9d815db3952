//! Billing command and query handlers.

mod cancel_subscription;
mod get_subscription;
mod process_webhook;
mod resolve_tenant;
mod update_plan;

pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use process_webhook::{
    AckReason, ProcessWebhookCommand, ProcessWebhookHandler, ProcessWebhookResult,
};
pub use resolve_tenant::{ResolveError, TenantResolver};
pub use update_plan::{UpdatePlanCommand, UpdatePlanHandler, UpdatePlanOutcome};
