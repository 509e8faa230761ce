use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// `POST /api/v1/auth/login`
///
/// Unknown email and wrong password produce the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let token = state
        .auth_service
        .login(LoginCommand::new(email, body.password))
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: token.into_string(),
        },
    ))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
