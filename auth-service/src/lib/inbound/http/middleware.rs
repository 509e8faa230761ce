use auth::Claims;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::INVALID_TOKEN;
use crate::inbound::http::router::AppState;

/// Extension type carrying the principal recovered from a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub principal: String,
    pub role: String,
    pub expires_at: i64,
}

impl From<Claims> for AuthenticatedPrincipal {
    fn from(claims: Claims) -> Self {
        Self {
            principal: claims.subject().to_string(),
            role: claims.role().to_string(),
            expires_at: claims.expires_at(),
        }
    }
}

/// Middleware that validates bearer tokens and adds the principal to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let principal = authorize(&state, req.headers()).map_err(IntoResponse::into_response)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Validate the `Authorization` header of a request.
///
/// A missing or non-ASCII header is checked as an empty value, so it is
/// rejected on the same path as a header without the bearer prefix.
pub(crate) fn authorize(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedPrincipal, ApiError> {
    let header_value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    state
        .auth_service
        .check_authorization(header_value)
        .map(AuthenticatedPrincipal::from)
        .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN.to_string()))
}
