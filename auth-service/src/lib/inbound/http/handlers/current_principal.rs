use axum::http::StatusCode;
use axum::Extension;

use super::validate::PrincipalData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

/// `GET /api/v1/auth/me`, mounted behind the bearer middleware.
pub async fn current_principal(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> Result<ApiSuccess<PrincipalData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&principal).into()))
}
