//! Pagination and sorting primitives for the posts list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pagination query parameters (1-based pages).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_PAGE_SIZE: i64 = 100;

    /// Default items per page.
    pub const DEFAULT_PAGE_SIZE: i64 = 10;

    /// Highest page whose offset still fits in an `i64` at the largest page size.
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_PAGE_SIZE;

    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.current_page() - 1) * self.limit()
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, Self::MAX_PAGE)
    }

    /// Inclusive `(from, to)` row indices covered by the current page.
    pub fn bounds(&self) -> (i64, i64) {
        let from = self.offset();
        (from, from + self.limit() - 1)
    }
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: i64, pagination: &Pagination) -> Self {
        let page_size = pagination.limit();
        Self {
            items,
            total_count,
            page: pagination.current_page(),
            page_size,
            total_pages: total_pages(total_count, page_size),
        }
    }
}

/// `ceil(total_count / page_size)`; zero rows means zero pages.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 || page_size <= 0 {
        return 0;
    }
    (total_count + page_size - 1) / page_size
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostSortField {
    Likes,
    Comments,
    Shares,
    EngagementRate,
    #[default]
    PostedAt,
}

impl PostSortField {
    pub const ALL: [PostSortField; 5] = [
        PostSortField::Likes,
        PostSortField::Comments,
        PostSortField::Shares,
        PostSortField::EngagementRate,
        PostSortField::PostedAt,
    ];

    /// Column name; the enum is the only way a sort column reaches SQL.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Shares => "shares",
            Self::EngagementRate => "engagement_rate",
            Self::PostedAt => "posted_at",
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.column()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Shares => "Shares",
            Self::EngagementRate => "Engagement",
            Self::PostedAt => "Posted",
        }
    }
}

impl FromStr for PostSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown sort field '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Effective ordering for a posts query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostSort {
    pub field: PostSortField,
    pub direction: SortDirection,
}

impl PostSort {
    /// Missing field or direction falls back to `posted_at` / `desc` independently.
    pub fn effective(field: Option<PostSortField>, direction: Option<SortDirection>) -> Self {
        Self {
            field: field.unwrap_or_default(),
            direction: direction.unwrap_or_default(),
        }
    }

    pub fn order_by(&self) -> String {
        format!("{} {}, id ASC", self.field.column(), self.direction.sql())
    }
}

/// Parse an optional query value where an empty string or `null` means "not set".
pub fn parse_optional<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, T::Err> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
