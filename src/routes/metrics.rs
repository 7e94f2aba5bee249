//! Metrics routes: daily engagement/reach series.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::daily_metric::DailyMetricPoint;
use crate::models::time_range::TimeRange;
use crate::services::metrics;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DailyMetricsQuery {
    pub range: Option<String>,
}

/// GET /api/metrics/daily?range= — unknown ranges fall back to `month`.
pub async fn daily(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<DailyMetricsQuery>,
) -> Result<Json<Vec<DailyMetricPoint>>, AppError> {
    let range = TimeRange::parse_lenient(query.range.as_deref());
    let points = metrics::daily_series(&state.db, current_user.id, range).await?;
    Ok(Json(points))
}
