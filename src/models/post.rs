//! Post model: one published item on a social platform, owned by a user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ValidationIssue;
use crate::models::schema::{issues_from_errors, ValidatedRow};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Instagram, Platform::Tiktok];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Tiktok => "TikTok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::Tiktok),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Validated post as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    pub media_type: String,
    pub posted_at: DateTime<Utc>,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
    pub saves: Option<i64>,
    pub reach: Option<i64>,
    pub impressions: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Likes + comments + shares, with missing counters counted as zero.
    pub fn interactions(&self) -> i64 {
        self.likes.unwrap_or(0) + self.comments.unwrap_or(0) + self.shares.unwrap_or(0)
    }
}

/// Column list matching [`PostRow`]; numeric columns are cast to the row's Rust types.
pub const POST_COLUMNS: &str = "id, user_id, platform, media_type, posted_at, caption, \
     thumbnail_url, permalink, likes, comments, shares, saves, reach, impressions, \
     engagement_rate::float8 AS engagement_rate, created_at";

/// Post row as read from the store, before validation.
#[derive(Debug, Clone, Default, FromRow, Validate)]
pub struct PostRow {
    #[validate(required(message = "id is required"))]
    pub id: Option<Uuid>,
    #[validate(required(message = "user_id is required"))]
    pub user_id: Option<Uuid>,
    #[validate(required(message = "platform is required"))]
    pub platform: Option<String>,
    #[validate(required(message = "media_type is required"))]
    pub media_type: Option<String>,
    #[validate(required(message = "posted_at is required"))]
    pub posted_at: Option<DateTime<Utc>>,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    #[validate(range(min = 0))]
    pub likes: Option<i64>,
    #[validate(range(min = 0))]
    pub comments: Option<i64>,
    #[validate(range(min = 0))]
    pub shares: Option<i64>,
    #[validate(range(min = 0))]
    pub saves: Option<i64>,
    #[validate(range(min = 0))]
    pub reach: Option<i64>,
    #[validate(range(min = 0))]
    pub impressions: Option<i64>,
    #[validate(range(min = 0.0))]
    pub engagement_rate: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ValidatedRow for PostRow {
    type Output = Post;

    fn into_model(self, prefix: &str) -> Result<Post, Vec<ValidationIssue>> {
        let mut issues = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => issues_from_errors(prefix, &e),
        };

        let platform = match self.platform.as_deref().map(Platform::from_str) {
            Some(Ok(platform)) => Some(platform),
            Some(Err(msg)) => {
                issues.push(ValidationIssue::new(format!("{prefix}.platform"), msg));
                None
            }
            None => None,
        };

        match (self.id, self.user_id, platform, self.media_type, self.posted_at) {
            (Some(id), Some(user_id), Some(platform), Some(media_type), Some(posted_at))
                if issues.is_empty() =>
            {
                Ok(Post {
                    id,
                    user_id,
                    platform,
                    media_type,
                    posted_at,
                    caption: self.caption,
                    thumbnail_url: self.thumbnail_url,
                    permalink: self.permalink,
                    likes: self.likes,
                    comments: self.comments,
                    shares: self.shares,
                    saves: self.saves,
                    reach: self.reach,
                    impressions: self.impressions,
                    engagement_rate: self.engagement_rate,
                    created_at: self.created_at,
                })
            }
            _ => {
                issues.sort_by(|a, b| a.path.cmp(&b.path));
                Err(issues)
            }
        }
    }
}
