//! Dashboard page: summary cards, posts table, post dialog, and metrics chart.
//!
//! Each section is built from its own read result. A failed read renders that
//! section's error state with a retry link instead of failing the page.

use askama::Template;

use crate::errors::AppError;
use crate::models::daily_metric::DailyMetricPoint;
use crate::models::pagination::{PagedResult, PostSortField, SortDirection};
use crate::models::post::{Platform, Post};
use crate::models::summary::{AnalyticsSummary, TrendDirection};
use crate::models::time_range::TimeRange;
use crate::models::view_state::{ChartType, DashboardViewState, MetricSelection};
use crate::services::metrics::{bar_percent, series_peak};
use crate::views::format;

/// Read results feeding one dashboard render.
#[derive(Debug)]
pub struct DashboardData {
    pub summary: Result<AnalyticsSummary, AppError>,
    pub posts: Result<PagedResult<Post>, AppError>,
    pub metrics: Result<Vec<DailyMetricPoint>, AppError>,
    pub selected_post: Option<Result<Post, AppError>>,
}

#[derive(Debug, Clone)]
pub struct LinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct TopPostView {
    pub caption: String,
    pub platform: String,
    pub interactions: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct SummaryCardsView {
    pub total_engagement: String,
    pub avg_engagement_rate: String,
    pub trend: String,
    pub trend_up: bool,
    pub top_post: Option<TopPostView>,
}

#[derive(Debug, Clone)]
pub struct SortHeaderView {
    pub label: String,
    pub href: String,
    pub indicator: &'static str,
}

#[derive(Debug, Clone)]
pub struct PostRowView {
    pub caption: String,
    pub platform: String,
    pub media_type: String,
    pub posted: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub engagement_rate: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct PaginationView {
    pub summary: String,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostsTableView {
    pub headers: Vec<SortHeaderView>,
    pub rows: Vec<PostRowView>,
    pub pagination: PaginationView,
}

#[derive(Debug, Clone)]
pub struct StatView {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct PostDetailView {
    pub caption: String,
    pub platform: String,
    pub media_type: String,
    pub posted: String,
    pub permalink: Option<String>,
    pub thumbnail_url: Option<String>,
    pub stats: Vec<StatView>,
}

#[derive(Debug, Clone)]
pub struct MetricRowView {
    pub date: String,
    pub engagement: String,
    pub reach: String,
    pub engagement_bar: i64,
    pub reach_bar: i64,
}

#[derive(Debug, Clone)]
pub struct MetricsView {
    pub rows: Vec<MetricRowView>,
    pub show_engagement: bool,
    pub show_reach: bool,
    pub chart_class: &'static str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub email: String,
    pub retry_href: String,
    pub summary: Option<SummaryCardsView>,
    pub summary_error: Option<String>,
    pub platform_links: Vec<LinkView>,
    pub posts: Option<PostsTableView>,
    pub posts_error: Option<String>,
    pub dialog: Option<PostDetailView>,
    pub dialog_error: Option<String>,
    pub close_dialog_href: String,
    pub range_links: Vec<LinkView>,
    pub metric_links: Vec<LinkView>,
    pub chart_links: Vec<LinkView>,
    pub metrics: Option<MetricsView>,
    pub metrics_error: Option<String>,
}

impl DashboardTemplate {
    pub fn build(state: &DashboardViewState, email: Option<String>, data: DashboardData) -> Self {
        let (summary, summary_error) = split(
            data.summary.map(|s| summary_cards(&s, state)),
            "Failed to load summary.",
        );
        let (posts, posts_error) = split(
            data.posts.map(|p| posts_table(&p, state)),
            "Failed to load posts.",
        );
        let (metrics, metrics_error) = split(
            data.metrics.map(|m| metrics_view(&m, state)),
            "Failed to load metrics.",
        );
        let (dialog, dialog_error) = match data.selected_post {
            None => (None, None),
            Some(Err(AppError::NotFound(_))) => (None, Some("Post not found.".to_string())),
            Some(result) => split(result.map(|p| post_detail(&p)), "Failed to load post."),
        };

        Self {
            title: "Dashboard".to_string(),
            email: email.unwrap_or_default(),
            retry_href: state.href(),
            summary,
            summary_error,
            platform_links: platform_links(state),
            posts,
            posts_error,
            dialog,
            dialog_error,
            close_dialog_href: state.close_post().href(),
            range_links: range_links(state),
            metric_links: metric_links(state),
            chart_links: chart_links(state),
            metrics,
            metrics_error,
        }
    }
}

/// Split a section result into its ready view or its error message.
fn split<T>(result: Result<T, AppError>, message: &str) -> (Option<T>, Option<String>) {
    match result {
        Ok(view) => (Some(view), None),
        Err(e) => {
            tracing::error!(error = %e, section = message, "Dashboard section failed");
            (None, Some(message.to_string()))
        }
    }
}

fn summary_cards(summary: &AnalyticsSummary, state: &DashboardViewState) -> SummaryCardsView {
    SummaryCardsView {
        total_engagement: format::count(summary.total_engagement),
        avg_engagement_rate: format::percent(summary.avg_engagement_rate),
        trend: format::trend(summary.trend.value),
        trend_up: summary.trend.direction == TrendDirection::Up,
        top_post: summary.top_post.as_ref().map(|post| TopPostView {
            caption: format::caption_preview(post.caption.as_deref()),
            platform: post.platform.label().to_string(),
            interactions: format::count(post.interactions()),
            href: state.open_post(post.id).href(),
        }),
    }
}

fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "↑",
        Some(SortDirection::Desc) => "↓",
        None => "↕",
    }
}

fn posts_table(page: &PagedResult<Post>, state: &DashboardViewState) -> PostsTableView {
    let headers = PostSortField::ALL
        .into_iter()
        .map(|field| SortHeaderView {
            label: field.label().to_string(),
            href: state.toggle_sort(field).href(),
            indicator: sort_indicator(state.sort_indicator(field)),
        })
        .collect();

    let rows = page
        .items
        .iter()
        .map(|post| PostRowView {
            caption: format::caption_preview(post.caption.as_deref()),
            platform: post.platform.label().to_string(),
            media_type: post.media_type.clone(),
            posted: format::date(&post.posted_at),
            likes: format::optional_count(post.likes),
            comments: format::optional_count(post.comments),
            shares: format::optional_count(post.shares),
            engagement_rate: format::optional_percent(post.engagement_rate),
            href: state.open_post(post.id).href(),
        })
        .collect();

    PostsTableView {
        headers,
        rows,
        pagination: pagination_view(page, state),
    }
}

fn pagination_view(page: &PagedResult<Post>, state: &DashboardViewState) -> PaginationView {
    let summary = if page.total_pages == 0 {
        "No posts".to_string()
    } else {
        format!(
            "Page {} of {} ({} posts)",
            page.page,
            page.total_pages,
            format::count(page.total_count)
        )
    };

    PaginationView {
        summary,
        prev_href: (page.page > 1).then(|| state.with_page(page.page - 1).href()),
        next_href: (page.page < page.total_pages).then(|| state.with_page(page.page + 1).href()),
    }
}

fn post_detail(post: &Post) -> PostDetailView {
    PostDetailView {
        caption: post.caption.clone().unwrap_or_default(),
        platform: post.platform.label().to_string(),
        media_type: post.media_type.clone(),
        posted: format::date(&post.posted_at),
        permalink: post.permalink.clone(),
        thumbnail_url: post.thumbnail_url.clone(),
        stats: vec![
            StatView { label: "Likes", value: format::optional_count(post.likes) },
            StatView { label: "Comments", value: format::optional_count(post.comments) },
            StatView { label: "Shares", value: format::optional_count(post.shares) },
            StatView { label: "Saves", value: format::optional_count(post.saves) },
            StatView { label: "Reach", value: format::optional_count(post.reach) },
            StatView { label: "Impressions", value: format::optional_count(post.impressions) },
            StatView {
                label: "Engagement rate",
                value: format::optional_percent(post.engagement_rate),
            },
        ],
    }
}

fn metrics_view(points: &[DailyMetricPoint], state: &DashboardViewState) -> MetricsView {
    let peak = series_peak(points);
    MetricsView {
        rows: points
            .iter()
            .map(|p| MetricRowView {
                date: format::day(&p.date),
                engagement: format::optional_count(p.engagement),
                reach: format::optional_count(p.reach),
                engagement_bar: bar_percent(p.engagement, peak),
                reach_bar: bar_percent(p.reach, peak),
            })
            .collect(),
        show_engagement: state.metric.shows_engagement(),
        show_reach: state.metric.shows_reach(),
        chart_class: match state.chart {
            ChartType::Line => "chart-line",
            ChartType::Area => "chart-area",
        },
    }
}

fn platform_links(state: &DashboardViewState) -> Vec<LinkView> {
    let mut links = vec![LinkView {
        label: "All platforms".to_string(),
        href: state.with_platform(None).href(),
        active: state.platform.is_none(),
    }];
    links.extend(Platform::ALL.into_iter().map(|platform| LinkView {
        label: platform.label().to_string(),
        href: state.with_platform(Some(platform)).href(),
        active: state.platform == Some(platform),
    }));
    links
}

fn range_links(state: &DashboardViewState) -> Vec<LinkView> {
    TimeRange::ALL
        .into_iter()
        .map(|range| LinkView {
            label: range.label().to_string(),
            href: state.with_range(range).href(),
            active: state.range == range,
        })
        .collect()
}

fn metric_links(state: &DashboardViewState) -> Vec<LinkView> {
    [
        (MetricSelection::All, "All metrics"),
        (MetricSelection::Engagement, "Engagement"),
        (MetricSelection::Reach, "Reach"),
    ]
    .into_iter()
    .map(|(metric, label)| LinkView {
        label: label.to_string(),
        href: state.with_metric(metric).href(),
        active: state.metric == metric,
    })
    .collect()
}

fn chart_links(state: &DashboardViewState) -> Vec<LinkView> {
    [(ChartType::Line, "Line"), (ChartType::Area, "Area")]
        .into_iter()
        .map(|(chart, label)| LinkView {
            label: label.to_string(),
            href: state.with_chart(chart).href(),
            active: state.chart == chart,
        })
        .collect()
}
