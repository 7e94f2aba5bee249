//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` and `JWT_SECRET` environment variables (reads .env).
//! Prints a bearer token for the seeded user; set it as the `access_token`
//! cookie to browse the dashboard.

use anyhow::Context;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const DEV_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);
const DEV_USER_EMAIL: &str = "dev@pulseboard.local";
const TOKEN_TTL_SECS: i64 = 7 * 24 * 3600;
const POST_COUNT: i64 = 36;
const METRIC_DAYS: i64 = 90;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    pulseboard::db::run_migrations(&pool).await?;

    println!("=== Pulseboard Seed Script ===");

    seed_posts(&pool).await?;
    seed_daily_metrics(&pool).await?;

    let token = pulseboard::services::auth::issue_token(
        DEV_USER_ID,
        Some(DEV_USER_EMAIL),
        &jwt_secret,
        TOKEN_TTL_SECS,
    )?;

    println!("\n=== Seed complete! ===");
    println!("User: {DEV_USER_EMAIL} ({DEV_USER_ID})");
    println!("Token: {token}");

    Ok(())
}

async fn seed_posts(pool: &PgPool) -> anyhow::Result<()> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE user_id = $1)")
            .bind(DEV_USER_ID)
            .fetch_one(pool)
            .await?;
    if exists {
        println!("[skip] Posts already seeded");
        return Ok(());
    }

    let now = Utc::now();
    for i in 0..POST_COUNT {
        let (platform, media_type) = if i % 3 == 0 {
            ("tiktok", "video")
        } else if i % 3 == 1 {
            ("instagram", "image")
        } else {
            ("instagram", "carousel")
        };
        let likes = 120 + (i * 37) % 900;
        let comments = 4 + (i * 13) % 80;
        let shares = 2 + (i * 7) % 45;
        let reach = 1_500 + (i * 211) % 9_000;
        // Every seventh post is missing its share count.
        let shares = (i % 7 != 0).then_some(shares);
        let rate = ((likes + comments + shares.unwrap_or(0)) as f64 / reach as f64) * 100.0;

        sqlx::query(
            "INSERT INTO posts (user_id, platform, media_type, posted_at, caption, permalink,
                                likes, comments, shares, saves, reach, impressions, engagement_rate)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, ROUND($13::numeric, 2))",
        )
        .bind(DEV_USER_ID)
        .bind(platform)
        .bind(media_type)
        .bind(now - Duration::hours(i * 61))
        .bind(format!("Sample {media_type} post #{} from the spring campaign", i + 1))
        .bind(format!("https://example.com/{platform}/p/{}", i + 1))
        .bind(likes)
        .bind(comments)
        .bind(shares)
        .bind(likes / 6)
        .bind(reach)
        .bind(reach * 3 / 2)
        .bind(rate)
        .execute(pool)
        .await?;
    }

    println!("[done] Inserted {POST_COUNT} posts");
    Ok(())
}

async fn seed_daily_metrics(pool: &PgPool) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    for day in 0..METRIC_DAYS {
        // Slow upward drift with a weekly wobble, so the trend card is positive.
        let base = 1_000 - day * 3;
        let engagement = base + (day % 7) * 25;
        let reach = engagement * 8 + (day % 5) * 120;

        sqlx::query(
            "INSERT INTO daily_metrics (user_id, date, engagement, reach)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, date) DO UPDATE
             SET engagement = EXCLUDED.engagement, reach = EXCLUDED.reach",
        )
        .bind(DEV_USER_ID)
        .bind(today - Duration::days(day))
        .bind(engagement)
        .bind(reach)
        .execute(pool)
        .await?;
    }

    println!("[done] Upserted {METRIC_DAYS} days of metrics");
    Ok(())
}
