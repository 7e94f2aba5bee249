//! Derived analytics summary; computed per request and never stored.

use serde::{Deserialize, Serialize};

use crate::models::post::Post;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Period-over-period engagement change, in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Trend {
    pub value: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_engagement: i64,
    pub avg_engagement_rate: f64,
    pub top_post: Option<Post>,
    pub trend: Trend,
}
