//! HTTP adapter for billing endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorBody, PlanChangeResponse, SubscriptionEnvelope, SubscriptionResponse, UpdatePlanRequest,
    WebhookAck,
};
pub use handlers::{BillingApiError, BillingAppState, SIGNATURE_HEADER};
pub use routes::{billing_routes, webhook_routes};
