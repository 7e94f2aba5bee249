//! Posts service: paged, sorted, platform-filtered listing and single lookup.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, ValidationIssue};
use crate::models::pagination::{parse_optional, PagedResult, Pagination, PostSort};
use crate::models::post::{Platform, Post, PostRow, POST_COLUMNS};
use crate::models::schema::{validate_rows, ValidatedRow};

/// Filters for listing posts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PostFilters {
    pub platform: Option<Platform>,
    pub sort: PostSort,
}

/// Raw `GET /api/posts` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    pub platform: Option<String>,
}

impl PostsQuery {
    /// Parse every parameter, reporting all malformed ones at once.
    pub fn parse(&self) -> Result<(Pagination, PostFilters), AppError> {
        let mut issues = Vec::new();

        let page = match parse_optional::<i64>(self.page.as_deref()) {
            Ok(Some(page)) if page > Pagination::MAX_PAGE => {
                issues.push(ValidationIssue::new(
                    "page",
                    format!("must be at most {}", Pagination::MAX_PAGE),
                ));
                None
            }
            Ok(page) => page,
            Err(_) => {
                issues.push(ValidationIssue::new("page", "must be an integer"));
                None
            }
        };
        let page_size = parse_optional::<i64>(self.page_size.as_deref()).unwrap_or_else(|_| {
            issues.push(ValidationIssue::new("pageSize", "must be an integer"));
            None
        });
        let sort_field = parse_optional(self.sort_field.as_deref()).unwrap_or_else(|msg| {
            issues.push(ValidationIssue::new("sortField", msg));
            None
        });
        let sort_direction = parse_optional(self.sort_direction.as_deref()).unwrap_or_else(|msg| {
            issues.push(ValidationIssue::new("sortDirection", msg));
            None
        });
        let platform = parse_optional(self.platform.as_deref()).unwrap_or_else(|msg| {
            issues.push(ValidationIssue::new("platform", msg));
            None
        });

        if !issues.is_empty() {
            return Err(AppError::InvalidRequest(issues));
        }

        Ok((
            Pagination { page, page_size },
            PostFilters {
                platform,
                sort: PostSort::effective(sort_field, sort_direction),
            },
        ))
    }
}

/// List the user's posts with optional platform filter, sorting, and pagination.
pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    filters: &PostFilters,
    pagination: &Pagination,
) -> Result<PagedResult<Post>, AppError> {
    let where_clause = if filters.platform.is_some() {
        "WHERE user_id = $1 AND platform = $2"
    } else {
        "WHERE user_id = $1"
    };

    let count_sql = format!("SELECT COUNT(*) FROM posts {where_clause}");
    let data_sql = format!(
        "SELECT {POST_COLUMNS} FROM posts {where_clause} ORDER BY {} LIMIT {} OFFSET {}",
        filters.sort.order_by(),
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(user_id);
    let mut data_query = sqlx::query_as::<_, PostRow>(&data_sql).bind(user_id);

    if let Some(platform) = filters.platform {
        count_query = count_query.bind(platform.as_str());
        data_query = data_query.bind(platform.as_str());
    }

    let (total, rows) = tokio::try_join!(count_query.fetch_one(pool), data_query.fetch_all(pool))?;
    let posts = validate_rows("posts", rows)?;

    Ok(PagedResult::new(posts, total, pagination))
}

/// Find one of the user's posts by id.
pub async fn find_by_id(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Post, AppError> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND user_id = $2");
    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    row.into_model("post").map_err(AppError::DataValidation)
}
