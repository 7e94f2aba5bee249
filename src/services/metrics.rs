//! Daily metrics time series for the selected range.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::daily_metric::{DailyMetricPoint, DailyMetricPointRow};
use crate::models::schema::validate_rows;
use crate::models::time_range::TimeRange;

/// The user's metric points inside `range`, oldest first.
pub async fn daily_series(
    pool: &PgPool,
    user_id: Uuid,
    range: TimeRange,
) -> Result<Vec<DailyMetricPoint>, AppError> {
    daily_series_at(pool, user_id, range, Utc::now()).await
}

/// Same as [`daily_series`] with an explicit reference instant.
pub async fn daily_series_at(
    pool: &PgPool,
    user_id: Uuid,
    range: TimeRange,
    now: DateTime<Utc>,
) -> Result<Vec<DailyMetricPoint>, AppError> {
    let rows = match range.start_date(now) {
        Some(start) => {
            sqlx::query_as::<_, DailyMetricPointRow>(
                r#"
                SELECT date, engagement, reach
                FROM daily_metrics
                WHERE user_id = $1 AND date >= $2
                ORDER BY date ASC
                "#,
            )
            .bind(user_id)
            .bind(start)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DailyMetricPointRow>(
                r#"
                SELECT date, engagement, reach
                FROM daily_metrics
                WHERE user_id = $1
                ORDER BY date ASC
                "#,
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };

    tracing::debug!(user_id = %user_id, range = range.as_str(), rows = rows.len(), "Fetched daily metrics");

    validate_rows("metrics", rows)
}

/// Largest value of the selected series, used to scale chart bars.
pub fn series_peak(points: &[DailyMetricPoint]) -> i64 {
    points
        .iter()
        .flat_map(|p| [p.engagement.unwrap_or(0), p.reach.unwrap_or(0)])
        .max()
        .unwrap_or(0)
}

/// Bar width in percent of `peak`, rounded down.
pub fn bar_percent(value: Option<i64>, peak: i64) -> i64 {
    if peak <= 0 {
        return 0;
    }
    (value.unwrap_or(0).max(0) * 100 / peak).min(100)
}
