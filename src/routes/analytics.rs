//! Analytics routes: the aggregated summary behind the dashboard cards.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::summary::AnalyticsSummary;
use crate::services::summary;
use crate::AppState;

/// GET /api/analytics/summary — engagement totals, top post, and trend.
pub async fn summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let summary = summary::get_summary(&state.db, current_user.id).await?;
    Ok(Json(summary))
}
