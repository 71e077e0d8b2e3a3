//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use artfolio_core::UserRole;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::user::{User, UserSummary};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request for registering a new account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

/// Request for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session token plus the public user summary.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Response for token validation.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub user: User,
}

/// Register a new user.
///
/// # Errors
///
/// Returns 409 if the email is taken, 400 for invalid email, weak
/// password, or missing display name.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    if body.display_name.trim().is_empty() {
        return Err(AppError::BadRequest("Display name is required".to_owned()));
    }

    let auth = AuthService::new(state.pool(), state.tokens());
    let (token, user) = auth
        .register(&body.email, &body.password, body.display_name.trim(), body.role)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    let response = AuthResponse {
        token,
        user: UserSummary::from(&user),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password.
///
/// # Errors
///
/// Returns 401 for an unknown email or wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    let (token, user) = auth.login(&body.email, &body.password).await?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(Json(AuthResponse {
        token,
        user: UserSummary::from(&user),
    }))
}

/// Validate a bearer token and return the user it resolves to.
///
/// # Errors
///
/// Returns 401 if the token is missing, invalid, or expired.
pub async fn validate(RequireAuth(user): RequireAuth) -> Result<Json<ValidateResponse>> {
    Ok(Json(ValidateResponse { user }))
}
