//! Route guard layer for navigable pages.

use axum::{
    extract::{OriginalUri, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::middleware::auth::lookup_claims;
use crate::services::route_guard::{self, GuardDecision};
use crate::AppState;

/// Allow the request through, or answer with a 307 to login or dashboard.
pub async fn guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let authenticated = lookup_claims(request.headers(), &state.config.jwt_secret).is_some();
    let decision = route_guard::decide(&path, authenticated);

    match redirect_for(decision, request.headers(), &state.config) {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(path = %path, decision = ?decision, location = %location, "Route guard redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Fallback for unmatched `/api` paths.
///
/// Defined API handlers answer 401 themselves. An unknown path has no handler,
/// so the guard table decides: anonymous callers are sent to login, and
/// everyone else gets a JSON 404.
pub async fn api_fallback(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let authenticated = lookup_claims(&headers, &state.config.jwt_secret).is_some();
    let decision = route_guard::decide(uri.path(), authenticated);

    match redirect_for(decision, &headers, &state.config) {
        Some(location) => {
            tracing::debug!(path = %uri.path(), decision = ?decision, location = %location, "Route guard redirect");
            Redirect::temporary(&location).into_response()
        }
        None => AppError::NotFound("Not found".to_string()).into_response(),
    }
}

/// Absolute URL for `path` on the origin the request was addressed to.
pub fn absolute_url(headers: &HeaderMap, config: &AppConfig, path: &str) -> String {
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty());

    match host {
        Some(host) => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .filter(|p| *p == "http" || *p == "https")
                .unwrap_or_else(|| config.default_scheme());
            format!("{scheme}://{host}{path}")
        }
        None => match url::Url::parse(&config.public_url).and_then(|base| base.join(path)) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, public_url = %config.public_url, "Invalid PUBLIC_URL");
                path.to_string()
            }
        },
    }
}

/// Redirect target for a guard decision, if any.
pub fn redirect_for(decision: GuardDecision, headers: &HeaderMap, config: &AppConfig) -> Option<String> {
    decision
        .target()
        .map(|target| absolute_url(headers, config, target))
}
