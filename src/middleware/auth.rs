//! Session extraction for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth::{self as auth_service, Claims};
use crate::AppState;

/// Cookie carrying the session token for browser navigation.
pub const SESSION_COOKIE: &str = "access_token";

/// Session token from the `Authorization: Bearer` header, else the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
    })
}

/// Look up and verify claims. Any failure yields `None`.
pub fn lookup_claims(headers: &HeaderMap, jwt_secret: &str) -> Option<Claims> {
    let token = session_token(headers)?;
    match auth_service::validate_token(&token, jwt_secret) {
        Ok(claims) => Some(claims),
        Err(_) => {
            tracing::debug!("Session token rejected");
            None
        }
    }
}

/// Authenticated user extracted from the session token.
///
/// Use as an Axum extractor in handlers that require authentication:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims =
            lookup_claims(&parts.headers, &state.config.jwt_secret).ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser {
            id: claims.user_id()?,
            email: claims.email,
        })
    }
}
