use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::StoreError;

/// A validated meme waiting in (or done with) the publication queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QueueEntry {
    pub post_id: String,
    pub created_at: DateTime<Utc>,
    pub meme_text: String,
    pub author: String,
    pub subreddit: String,
    pub reddit_post_url: String,
    pub image_url: String,
    pub tweeted: bool,
}

/// Insert shape: the store assigns `created_at` and `tweeted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQueueEntry {
    pub post_id: String,
    pub meme_text: String,
    pub author: String,
    pub subreddit: String,
    pub reddit_post_url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

impl QueueEntry {
    /// Insert a new entry. Uses ON CONFLICT DO NOTHING so a known `post_id`
    /// leaves the existing row untouched and reports `Duplicate`.
    pub async fn insert(
        entry: &NewQueueEntry,
        pool: &PgPool,
    ) -> Result<InsertOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (post_id, meme_text, author, subreddit, reddit_post_url, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (post_id) DO NOTHING
            "#,
        )
        .bind(&entry.post_id)
        .bind(&entry.meme_text)
        .bind(&entry.author)
        .bind(&entry.subreddit)
        .bind(&entry.reddit_post_url)
        .bind(&entry.image_url)
        .execute(pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            InsertOutcome::Duplicate
        } else {
            InsertOutcome::Inserted
        })
    }

    /// Oldest unpublished entry
    pub async fn find_oldest_unpublished(pool: &PgPool) -> Result<Option<Self>, StoreError> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT post_id, created_at, meme_text, author, subreddit,
                   reddit_post_url, image_url, tweeted
            FROM posts
            WHERE tweeted = false
            ORDER BY created_at ASC, post_id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Compare-and-set `tweeted` false -> true
    pub async fn mark_published(post_id: &str, pool: &PgPool) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE posts SET tweeted = true WHERE post_id = $1 AND tweeted = false",
        )
        .bind(post_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn find_by_post_id(
        post_id: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, StoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM posts WHERE post_id = $1")
            .bind(post_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count_unpublished(pool: &PgPool) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE tweeted = false")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
