//! Analytics summary: engagement totals, average rate, top post, and trend.
//!
//! The trend compares the 30 most recent daily metric rows against the 30
//! rows before them, so only the latest 60 rows are ever read.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::daily_metric::{DailyMetric, DailyMetricRow};
use crate::models::post::{Post, PostRow, POST_COLUMNS};
use crate::models::schema::validate_rows;
use crate::models::summary::{AnalyticsSummary, Trend, TrendDirection};

/// Rows per trend period.
pub const TREND_PERIOD_DAYS: usize = 30;

/// Metric rows needed for two consecutive periods.
pub const TREND_WINDOW_DAYS: usize = TREND_PERIOD_DAYS * 2;

/// Fetch the user's posts and recent metrics concurrently, then aggregate.
pub async fn get_summary(pool: &PgPool, user_id: Uuid) -> Result<AnalyticsSummary, AppError> {
    let (post_rows, metric_rows) = tokio::try_join!(
        fetch_post_rows(pool, user_id),
        fetch_recent_metric_rows(pool, user_id),
    )?;

    let posts = validate_rows("posts", post_rows)?;
    let metrics = validate_rows("metrics", metric_rows)?;

    tracing::debug!(
        user_id = %user_id,
        posts = posts.len(),
        metrics = metrics.len(),
        "Computing analytics summary"
    );

    Ok(summarize(&posts, &metrics))
}

/// Every post owned by the user.
async fn fetch_post_rows(pool: &PgPool, user_id: Uuid) -> Result<Vec<PostRow>, AppError> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1");
    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Most recent metric rows, newest first.
async fn fetch_recent_metric_rows(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<DailyMetricRow>, AppError> {
    let rows = sqlx::query_as::<_, DailyMetricRow>(
        r#"
        SELECT user_id, date, engagement, reach
        FROM daily_metrics
        WHERE user_id = $1
        ORDER BY date DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(TREND_WINDOW_DAYS as i64)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Aggregate validated rows. `metrics` must be ordered newest first.
pub fn summarize(posts: &[Post], metrics: &[DailyMetric]) -> AnalyticsSummary {
    AnalyticsSummary {
        total_engagement: total_engagement(posts),
        avg_engagement_rate: avg_engagement_rate(posts),
        top_post: top_post(posts).cloned(),
        trend: trend(metrics),
    }
}

pub fn total_engagement(posts: &[Post]) -> i64 {
    posts.iter().map(Post::interactions).sum()
}

/// Mean engagement rate (missing rates count as zero), rounded to 2 decimals.
pub fn avg_engagement_rate(posts: &[Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    let sum: f64 = posts.iter().map(|p| p.engagement_rate.unwrap_or(0.0)).sum();
    round_to(sum / posts.len() as f64, 2)
}

/// Post with the most interactions; the earliest one wins a tie.
pub fn top_post(posts: &[Post]) -> Option<&Post> {
    posts.iter().fold(None, |best: Option<&Post>, post| match best {
        Some(current) if current.interactions() >= post.interactions() => Some(current),
        _ => Some(post),
    })
}

/// Engagement change of the latest period against the one before it.
pub fn trend(metrics: &[DailyMetric]) -> Trend {
    let period_sum = |rows: &[DailyMetric]| -> i64 {
        rows.iter().map(|m| m.engagement.unwrap_or(0)).sum()
    };

    let window = &metrics[..metrics.len().min(TREND_WINDOW_DAYS)];
    let split = window.len().min(TREND_PERIOD_DAYS);
    let current = period_sum(&window[..split]);
    let previous = period_sum(&window[split..]);

    let percentage = if previous == 0 {
        if current > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) as f64 / previous as f64 * 100.0
    };

    let direction = if percentage >= 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    Trend {
        value: round_to(percentage, 1),
        direction,
    }
}

/// Round half away from zero to `decimals` places; never yields `-0.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use crate::models::post::Platform;

    fn post(id: u128, likes: i64, comments: i64, shares: i64, rate: Option<f64>) -> Post {
        Post {
            id: Uuid::from_u128(id),
            user_id: Uuid::nil(),
            platform: Platform::Instagram,
            media_type: "image".to_string(),
            posted_at: Utc::now(),
            caption: None,
            thumbnail_url: None,
            permalink: None,
            likes: Some(likes),
            comments: Some(comments),
            shares: Some(shares),
            saves: None,
            reach: None,
            impressions: None,
            engagement_rate: rate,
            created_at: None,
        }
    }

    /// `current` rows of `current_value` followed by `previous` rows of `previous_value`, newest first.
    fn metrics(current: usize, current_value: i64, previous: usize, previous_value: i64) -> Vec<DailyMetric> {
        let start = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        (0..current + previous)
            .map(|i| DailyMetric {
                user_id: Uuid::nil(),
                date: start - Duration::days(i as i64),
                engagement: Some(if i < current { current_value } else { previous_value }),
                reach: None,
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_engagement, 0);
        assert_eq!(summary.avg_engagement_rate, 0.0);
        assert!(summary.top_post.is_none());
        assert_eq!(summary.trend.value, 0.0);
        assert_eq!(summary.trend.direction, TrendDirection::Up);
    }

    #[test]
    fn totals_and_average_rate() {
        let posts = vec![post(1, 10, 5, 2, Some(3.5)), post(2, 20, 10, 5, Some(4.0))];
        assert_eq!(total_engagement(&posts), 52);
        assert_eq!(avg_engagement_rate(&posts), 3.75);
    }

    #[test]
    fn missing_counters_and_rates_count_as_zero() {
        let mut sparse = post(1, 0, 0, 0, None);
        sparse.likes = None;
        sparse.comments = None;
        let posts = vec![sparse, post(2, 1, 1, 1, Some(5.0))];
        assert_eq!(total_engagement(&posts), 3);
        assert_eq!(avg_engagement_rate(&posts), 2.5);
    }

    #[test]
    fn average_rate_rounds_to_two_decimals() {
        let posts = vec![
            post(1, 0, 0, 0, Some(1.0)),
            post(2, 0, 0, 0, Some(2.0)),
            post(3, 0, 0, 0, Some(2.0)),
        ];
        assert_eq!(avg_engagement_rate(&posts), 1.67);
    }

    #[test]
    fn top_post_has_most_interactions() {
        let posts = vec![
            post(1, 10, 5, 2, None),
            post(2, 50, 20, 10, None),
            post(3, 30, 15, 5, None),
        ];
        assert_eq!(top_post(&posts).unwrap().id, Uuid::from_u128(2));
    }

    #[test]
    fn top_post_tie_keeps_first() {
        let posts = vec![post(1, 5, 0, 0, None), post(2, 0, 5, 0, None)];
        assert_eq!(top_post(&posts).unwrap().id, Uuid::from_u128(1));
    }

    #[test]
    fn trend_up_when_engagement_doubles() {
        let t = trend(&metrics(30, 100, 30, 50));
        assert_eq!(t.value, 100.0);
        assert_eq!(t.direction, TrendDirection::Up);
    }

    #[test]
    fn trend_down_when_engagement_halves() {
        let t = trend(&metrics(30, 50, 30, 100));
        assert_eq!(t.value, -50.0);
        assert_eq!(t.direction, TrendDirection::Down);
    }

    #[test]
    fn trend_without_previous_period() {
        let t = trend(&metrics(30, 10, 0, 0));
        assert_eq!(t.value, 100.0);
        assert_eq!(t.direction, TrendDirection::Up);

        // 0 against 0 is reported as flat and "up".
        let t = trend(&metrics(30, 0, 30, 0));
        assert_eq!(t.value, 0.0);
        assert_eq!(t.direction, TrendDirection::Up);
    }

    #[test]
    fn trend_rounds_to_one_decimal() {
        // 300 against 900
        let t = trend(&metrics(30, 10, 30, 30));
        assert_eq!(t.value, -66.7);
        assert_eq!(t.direction, TrendDirection::Down);
    }

    #[test]
    fn trend_ignores_rows_beyond_window() {
        let mut rows = metrics(30, 100, 30, 50);
        rows.extend(metrics(0, 0, 30, 1_000_000));
        assert_eq!(trend(&rows).value, 100.0);
    }

    #[test]
    fn tiny_decline_keeps_down_direction() {
        // -0.01% rounds to 0.0 but the period still declined.
        let t = trend(&metrics(30, 99_990, 30, 100_000));
        assert_eq!(t.value, 0.0);
        assert_eq!(t.direction, TrendDirection::Down);
    }

    #[test]
    fn summarize_is_idempotent() {
        let posts = vec![post(1, 10, 5, 2, Some(3.5)), post(2, 20, 10, 5, Some(4.0))];
        let rows = metrics(30, 100, 30, 50);
        assert_eq!(summarize(&posts, &rows), summarize(&posts, &rows));
    }

    #[test]
    fn round_to_normalizes_negative_zero() {
        assert_eq!(round_to(-0.01, 1).to_string(), "0");
        assert_eq!(round_to(3.745, 1), 3.7);
    }
}
