//! Route definitions for the Pulseboard API and pages.

pub mod analytics;
pub mod health;
pub mod metrics;
pub mod pages;
pub mod posts;
pub mod session;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::guard::{api_fallback, guard};
use crate::AppState;

/// Full application router.
///
/// The route guard wraps page routes only. API routes authenticate through
/// the `CurrentUser` extractor and answer 401 JSON instead of redirecting;
/// unmatched API paths go through the guard decision in `api_fallback`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .merge(page_routes(state.clone()))
        .layer(cors_layer(&state.config.frontend_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/analytics/summary", get(analytics::summary))
        .route("/metrics/daily", get(metrics::daily))
        .route("/posts", get(posts::list))
        .route("/posts/{id}", get(posts::get_by_id))
        .fallback(api_fallback)
}

fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::landing))
        .route("/auth/login", get(pages::login))
        .route("/auth/sign-up", get(pages::sign_up))
        .route("/auth/forgot-password", get(pages::forgot_password))
        .route("/auth/update-password", get(pages::update_password))
        .route("/auth/logout", post(session::logout))
        .route("/protected", get(pages::protected))
        .route("/dashboard", get(pages::dashboard))
        .fallback(pages::not_found)
        .layer(from_fn_with_state(state, guard))
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, frontend_url = %frontend_url, "Invalid FRONTEND_URL, CORS disabled");
            layer
        }
    }
}
