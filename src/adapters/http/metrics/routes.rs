//! Axum router configuration for metrics endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_financial_goal, get_sales_metrics, MetricsAppState};

/// Create the metrics API router.
///
/// # Routes
///
/// - `GET /sales` - Sales metrics, recomputed fresh
/// - `GET /goal` - Financial goal progress, recomputed fresh
pub fn metrics_routes() -> Router<MetricsAppState> {
    Router::new()
        .route("/sales", get(get_sales_metrics))
        .route("/goal", get(get_financial_goal))
}
