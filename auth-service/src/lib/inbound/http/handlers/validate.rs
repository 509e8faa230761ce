use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::authorize;
use crate::inbound::http::middleware::AuthenticatedPrincipal;
use crate::inbound::http::router::AppState;

/// `GET /api/v1/auth/validate`
///
/// Every rejection reason maps to the same 401; the reason is only logged.
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<PrincipalData>, ApiError> {
    let principal = authorize(&state, &headers)?;

    Ok(ApiSuccess::new(StatusCode::OK, (&principal).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalData {
    pub principal: String,
    pub role: String,
    pub expires_at: i64,
}

impl From<&AuthenticatedPrincipal> for PrincipalData {
    fn from(principal: &AuthenticatedPrincipal) -> Self {
        Self {
            principal: principal.principal.clone(),
            role: principal.role.clone(),
            expires_at: principal.expires_at,
        }
    }
}
