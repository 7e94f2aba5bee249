//! Dashboard view state: page, sort, filters, and open dialog.
//!
//! The whole state lives in the dashboard URL. Every control renders a link
//! to the state it transitions to, so a view can be bookmarked, reloaded, or
//! retried without any server-side session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::pagination::{parse_optional, Pagination, PostSort, PostSortField, SortDirection};
use crate::models::post::Platform;
use crate::models::time_range::TimeRange;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricSelection {
    #[default]
    All,
    Engagement,
    Reach,
}

impl MetricSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Engagement => "engagement",
            Self::Reach => "reach",
        }
    }

    pub fn shows_engagement(&self) -> bool {
        matches!(self, Self::All | Self::Engagement)
    }

    pub fn shows_reach(&self) -> bool {
        matches!(self, Self::All | Self::Reach)
    }
}

impl std::str::FromStr for MetricSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "engagement" => Ok(Self::Engagement),
            "reach" => Ok(Self::Reach),
            other => Err(format!("unknown metric '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Area,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Area => "area",
        }
    }
}

impl std::str::FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "area" => Ok(Self::Area),
            other => Err(format!("unknown chart type '{other}'")),
        }
    }
}

/// Raw dashboard query string; every value is optional and parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    pub platform: Option<String>,
    pub post: Option<String>,
    pub range: Option<String>,
    pub metric: Option<String>,
    pub chart: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewState {
    pub page: i64,
    pub page_size: i64,
    pub sort_field: Option<PostSortField>,
    pub sort_direction: Option<SortDirection>,
    pub platform: Option<Platform>,
    pub selected_post: Option<Uuid>,
    pub range: TimeRange,
    pub metric: MetricSelection,
    pub chart: ChartType,
}

impl Default for DashboardViewState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Pagination::DEFAULT_PAGE_SIZE,
            sort_field: None,
            sort_direction: None,
            platform: None,
            selected_post: None,
            range: TimeRange::default(),
            metric: MetricSelection::default(),
            chart: ChartType::default(),
        }
    }
}

impl DashboardViewState {
    /// Build a state from the query string, dropping values that do not parse.
    pub fn from_query(query: &DashboardQuery) -> Self {
        let defaults = Self::default();
        let pagination = Pagination {
            page: parse_optional(query.page.as_deref()).ok().flatten(),
            page_size: parse_optional(query.page_size.as_deref()).ok().flatten(),
        };
        Self {
            page: pagination.current_page(),
            page_size: pagination.limit(),
            sort_field: parse_optional(query.sort_field.as_deref()).ok().flatten(),
            sort_direction: parse_optional(query.sort_direction.as_deref()).ok().flatten(),
            platform: parse_optional(query.platform.as_deref()).ok().flatten(),
            selected_post: parse_optional(query.post.as_deref()).ok().flatten(),
            range: TimeRange::parse_lenient(query.range.as_deref()),
            metric: parse_optional(query.metric.as_deref())
                .ok()
                .flatten()
                .unwrap_or(defaults.metric),
            chart: parse_optional(query.chart.as_deref())
                .ok()
                .flatten()
                .unwrap_or(defaults.chart),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }

    pub fn sort(&self) -> PostSort {
        PostSort::effective(self.sort_field, self.sort_direction)
    }

    /// Header click cycle: unsorted -> asc -> desc -> unsorted.
    pub fn toggle_sort(&self, field: PostSortField) -> Self {
        let (sort_field, sort_direction) = if self.sort_field != Some(field) {
            (Some(field), Some(SortDirection::Asc))
        } else if self.sort_direction == Some(SortDirection::Asc) {
            (Some(field), Some(SortDirection::Desc))
        } else {
            (None, None)
        };
        Self {
            sort_field,
            sort_direction,
            page: 1,
            ..self.clone()
        }
    }

    /// Direction currently applied to `field`, if it is the explicit sort column.
    pub fn sort_indicator(&self, field: PostSortField) -> Option<SortDirection> {
        if self.sort_field == Some(field) {
            self.sort_direction
        } else {
            None
        }
    }

    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn with_platform(&self, platform: Option<Platform>) -> Self {
        Self {
            platform,
            page: 1,
            ..self.clone()
        }
    }

    pub fn open_post(&self, id: Uuid) -> Self {
        Self {
            selected_post: Some(id),
            ..self.clone()
        }
    }

    pub fn close_post(&self) -> Self {
        Self {
            selected_post: None,
            ..self.clone()
        }
    }

    pub fn with_range(&self, range: TimeRange) -> Self {
        Self {
            range,
            ..self.clone()
        }
    }

    pub fn with_metric(&self, metric: MetricSelection) -> Self {
        Self {
            metric,
            ..self.clone()
        }
    }

    pub fn with_chart(&self, chart: ChartType) -> Self {
        Self {
            chart,
            ..self.clone()
        }
    }

    /// Encode the state as a query string, omitting defaults.
    pub fn to_query(&self) -> String {
        let defaults = Self::default();
        let mut query = url::form_urlencoded::Serializer::new(String::new());

        if self.page != defaults.page {
            query.append_pair("page", &self.page.to_string());
        }
        if self.page_size != defaults.page_size {
            query.append_pair("pageSize", &self.page_size.to_string());
        }
        if let Some(field) = self.sort_field {
            query.append_pair("sortField", field.as_str());
        }
        if let Some(direction) = self.sort_direction {
            query.append_pair("sortDirection", direction.as_str());
        }
        if let Some(platform) = self.platform {
            query.append_pair("platform", platform.as_str());
        }
        if let Some(post) = self.selected_post {
            query.append_pair("post", &post.to_string());
        }
        if self.range != defaults.range {
            query.append_pair("range", self.range.as_str());
        }
        if self.metric != defaults.metric {
            query.append_pair("metric", self.metric.as_str());
        }
        if self.chart != defaults.chart {
            query.append_pair("chart", self.chart.as_str());
        }

        query.finish()
    }

    /// Dashboard link for this state.
    pub fn href(&self) -> String {
        let query = self.to_query();
        if query.is_empty() {
            "/dashboard".to_string()
        } else {
            format!("/dashboard?{query}")
        }
    }
}
