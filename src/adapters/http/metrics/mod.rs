//! HTTP adapter for metrics endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{FinancialGoalResponse, SalesMetricsResponse};
pub use handlers::{MetricsApiError, MetricsAppState};
pub use routes::metrics_routes;
