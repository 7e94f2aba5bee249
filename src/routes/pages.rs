//! Server-rendered page routes.
//!
//! These sit behind the route guard, so handlers can assume the session state
//! the guard already checked. Handlers that need the user still take
//! [`CurrentUser`].

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use askama::Template;

use crate::errors::AppError;
use crate::middleware::auth::{lookup_claims, CurrentUser};
use crate::models::pagination::PostSort;
use crate::models::view_state::{DashboardQuery, DashboardViewState};
use crate::services::posts::PostFilters;
use crate::services::{metrics as metrics_service, posts as post_service, summary as summary_service};
use crate::views::{
    AuthPage, AuthPageTemplate, DashboardData, DashboardTemplate, LandingTemplate,
    NotFoundTemplate, ProtectedTemplate,
};
use crate::AppState;

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// GET /
pub async fn landing(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let authenticated = lookup_claims(&headers, &state.config.jwt_secret).is_some();
    render(&LandingTemplate {
        title: "Welcome".to_string(),
        authenticated,
    })
}

pub async fn login() -> Result<Html<String>, AppError> {
    render(&AuthPageTemplate::new(AuthPage::Login))
}

pub async fn sign_up() -> Result<Html<String>, AppError> {
    render(&AuthPageTemplate::new(AuthPage::SignUp))
}

pub async fn forgot_password() -> Result<Html<String>, AppError> {
    render(&AuthPageTemplate::new(AuthPage::ForgotPassword))
}

pub async fn update_password() -> Result<Html<String>, AppError> {
    render(&AuthPageTemplate::new(AuthPage::UpdatePassword))
}

/// GET /protected — minimal signed-in confirmation page.
pub async fn protected(current_user: CurrentUser) -> Result<Html<String>, AppError> {
    render(&ProtectedTemplate {
        title: "Signed in".to_string(),
        email: current_user.email.unwrap_or_default(),
    })
}

/// GET /dashboard — summary, posts, dialog, and metrics in one render.
///
/// The four reads run concurrently. Each one fails independently into its own
/// section error state; only a template failure fails the whole response.
pub async fn dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let view = DashboardViewState::from_query(&query);
    let pagination = view.pagination();
    let filters = PostFilters {
        platform: view.platform,
        sort: PostSort::effective(view.sort_field, view.sort_direction),
    };

    let selected = async {
        match view.selected_post {
            Some(id) => Some(post_service::find_by_id(&state.db, current_user.id, id).await),
            None => None,
        }
    };

    let (summary, posts, metrics, selected_post) = tokio::join!(
        summary_service::get_summary(&state.db, current_user.id),
        post_service::list(&state.db, current_user.id, &filters, &pagination),
        metrics_service::daily_series(&state.db, current_user.id, view.range),
        selected,
    );

    let template = DashboardTemplate::build(
        &view,
        current_user.email,
        DashboardData {
            summary,
            posts,
            metrics,
            selected_post,
        },
    );
    render(&template)
}

/// Fallback for unknown page paths.
pub async fn not_found() -> impl IntoResponse {
    match render(&NotFoundTemplate {
        title: "Not found".to_string(),
    }) {
        Ok(page) => (StatusCode::NOT_FOUND, page).into_response(),
        Err(e) => e.into_response(),
    }
}
