//! Authentication extractors.
//!
//! Identity is threaded into handlers as an explicit extractor argument,
//! never by mutating a shared request object.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::user::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor that requires a valid bearer session token.
///
/// Rejects with 401 when the `Authorization` header is missing or the token
/// is invalid or expired; otherwise resolves to the caller's user record.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.display_name)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_owned()))?;

        let user = AuthService::new(state.pool(), state.tokens())
            .user_from_token(&token)
            .await?;

        Ok(Self(user))
    }
}

/// Extractor that optionally resolves the caller's identity.
///
/// Unlike `RequireAuth`, this never rejects: a missing or invalid token
/// yields `None`. Used where anonymous callers are welcome but an
/// authenticated one changes behavior (e.g. attributing an enquiry to a
/// client account).
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match bearer_token(parts) {
            Some(token) => AuthService::new(state.pool(), state.tokens())
                .user_from_token(&token)
                .await
                .ok(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).expect("build request").into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_header(None);
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_bearer_token_empty_value() {
        let parts = parts_with_header(Some("Bearer "));
        assert!(bearer_token(&parts).is_none());
    }
}
