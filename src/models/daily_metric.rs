//! Daily engagement metrics, one row per user per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ValidationIssue;
use crate::models::schema::{issues_from_errors, ValidatedRow};

/// Validated daily metric row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub engagement: Option<i64>,
    pub reach: Option<i64>,
}

/// Projection served by the daily metrics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetricPoint {
    pub date: NaiveDate,
    pub engagement: Option<i64>,
    pub reach: Option<i64>,
}

#[derive(Debug, Clone, Default, FromRow, Validate)]
pub struct DailyMetricRow {
    #[validate(required(message = "user_id is required"))]
    pub user_id: Option<Uuid>,
    #[validate(required(message = "date is required"))]
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub engagement: Option<i64>,
    #[validate(range(min = 0))]
    pub reach: Option<i64>,
}

impl ValidatedRow for DailyMetricRow {
    type Output = DailyMetric;

    fn into_model(self, prefix: &str) -> Result<DailyMetric, Vec<ValidationIssue>> {
        self.validate()
            .map_err(|e| issues_from_errors(prefix, &e))?;
        match (self.user_id, self.date) {
            (Some(user_id), Some(date)) => Ok(DailyMetric {
                user_id,
                date,
                engagement: self.engagement,
                reach: self.reach,
            }),
            _ => Err(vec![ValidationIssue::new(
                prefix.to_string(),
                "incomplete metric row",
            )]),
        }
    }
}

#[derive(Debug, Clone, Default, FromRow, Validate)]
pub struct DailyMetricPointRow {
    #[validate(required(message = "date is required"))]
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub engagement: Option<i64>,
    #[validate(range(min = 0))]
    pub reach: Option<i64>,
}

impl ValidatedRow for DailyMetricPointRow {
    type Output = DailyMetricPoint;

    fn into_model(self, prefix: &str) -> Result<DailyMetricPoint, Vec<ValidationIssue>> {
        self.validate()
            .map_err(|e| issues_from_errors(prefix, &e))?;
        let date = self.date.ok_or_else(|| {
            vec![ValidationIssue::new(format!("{prefix}.date"), "date is required")]
        })?;
        Ok(DailyMetricPoint {
            date,
            engagement: self.engagement,
            reach: self.reach,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_row_requires_date() {
        let row = DailyMetricRow {
            user_id: Some(Uuid::nil()),
            date: None,
            engagement: Some(5),
            reach: None,
        };
        let issues = row.into_model("metrics[7]").unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("metrics[7].date", "date is required")]);
    }

    #[test]
    fn metric_row_allows_null_counters() {
        let row = DailyMetricRow {
            user_id: Some(Uuid::nil()),
            date: NaiveDate::from_ymd_opt(2026, 1, 1),
            engagement: None,
            reach: None,
        };
        let metric = row.into_model("metrics[0]").unwrap();
        assert_eq!(metric.engagement, None);
    }

    #[test]
    fn point_serializes_iso_date() {
        let point = DailyMetricPoint {
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            engagement: Some(120),
            reach: None,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "date": "2026-03-09", "engagement": 120, "reach": null })
        );
    }

    #[test]
    fn point_row_rejects_negative_reach() {
        let row = DailyMetricPointRow {
            date: NaiveDate::from_ymd_opt(2026, 3, 9),
            engagement: Some(1),
            reach: Some(-1),
        };
        let issues = row.into_model("metrics[0]").unwrap_err();
        assert_eq!(issues[0].path, "metrics[0].reach");
    }
}
