//! HTTP handlers for metrics endpoints.
//!
//! Pure reads: every request recomputes from the ledger and config, no
//! cached mirror exists anywhere in the engine.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::metrics::{
    GetFinancialGoalHandler, GetFinancialGoalQuery, GetSalesMetricsHandler, GetSalesMetricsQuery,
};
use crate::domain::foundation::DomainError;
use crate::ports::{LedgerReader, SalesConfigReader};

use super::super::billing::ErrorBody;
use super::super::tenant::TenantContext;
use super::dto::{FinancialGoalResponse, SalesMetricsResponse};

/// Shared state for the metrics routes.
#[derive(Clone)]
pub struct MetricsAppState {
    pub ledger: Arc<dyn LedgerReader>,
    pub config_reader: Arc<dyn SalesConfigReader>,
}

impl MetricsAppState {
    pub fn sales_metrics_handler(&self) -> GetSalesMetricsHandler {
        GetSalesMetricsHandler::new(self.ledger.clone(), self.config_reader.clone())
    }

    pub fn financial_goal_handler(&self) -> GetFinancialGoalHandler {
        GetFinancialGoalHandler::new(self.ledger.clone(), self.config_reader.clone())
    }
}

/// HTTP-facing error for the metrics routes.
///
/// Only ledger read failures reach this point; config read failures are
/// degraded to defaults inside the handlers.
pub struct MetricsApiError(DomainError);

impl From<DomainError> for MetricsApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MetricsApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(self.0.to_string())),
        )
            .into_response()
    }
}

/// GET /api/metrics/sales - Current tenant's sales metrics.
pub async fn get_sales_metrics(
    State(state): State<MetricsAppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, MetricsApiError> {
    let handler = state.sales_metrics_handler();
    let metrics = handler
        .handle(GetSalesMetricsQuery {
            tenant_id: tenant.tenant_id,
        })
        .await?;

    Ok(Json(SalesMetricsResponse::from(metrics)))
}

/// GET /api/metrics/goal - Current tenant's financial goal progress.
pub async fn get_financial_goal(
    State(state): State<MetricsAppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, MetricsApiError> {
    let handler = state.financial_goal_handler();
    let goal = handler
        .handle(GetFinancialGoalQuery {
            tenant_id: tenant.tenant_id,
        })
        .await?;

    Ok(Json(FinancialGoalResponse::from(goal)))
}
