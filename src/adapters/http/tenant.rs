//! Tenant context extraction for API requests.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::domain::foundation::TenantId;

/// Tenant context extracted from the request.
///
/// In production this comes from the gateway's auth middleware, which
/// verifies the session and injects the tenant id. For development and
/// testing the `X-Tenant-Id` header is read directly.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: TenantId,
}

/// Rejection type for TenantContext extraction.
pub struct TenantRequired;

impl IntoResponse for TenantRequired {
    fn into_response(self) -> axum::response::Response {
        let body = json!({ "error": "Tenant context is required" });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = TenantRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let tenant_id = parts
                .headers
                .get("X-Tenant-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<TenantId>().ok())
                .ok_or(TenantRequired)?;

            Ok(TenantContext { tenant_id })
        })
    }
}
