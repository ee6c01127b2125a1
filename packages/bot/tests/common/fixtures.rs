//! Test fixtures for creating queue entries and candidates.

use anyhow::Result;
use bot_core::domains::intake::Candidate;
use bot_core::domains::queue::NewQueueEntry;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// A candidate that passes the default filter
pub fn meme_candidate(id: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: format!("Meme {}", id),
        author: "joe".to_string(),
        community: "ProgrammerHumor".to_string(),
        permalink: format!("/r/ProgrammerHumor/comments/{}", id),
        is_self: false,
        url: format!("https://i.redd.it/{}.jpg", id),
        category: Some("Meme".to_string()),
    }
}

/// A normalized entry, as intake would store it
pub fn new_entry(post_id: &str) -> NewQueueEntry {
    NewQueueEntry {
        post_id: post_id.to_string(),
        meme_text: format!("Meme {}", post_id),
        author: "u/joe".to_string(),
        subreddit: "r/ProgrammerHumor".to_string(),
        reddit_post_url: format!("www.reddit.com/r/ProgrammerHumor/comments/{}", post_id),
        image_url: format!("https://i.redd.it/{}.jpg", post_id),
    }
}

/// Overwrite `created_at` so ordering tests don't depend on insert timing
pub async fn set_created_at(pool: &PgPool, post_id: &str, created_at: DateTime<Utc>) -> Result<()> {
    sqlx::query("UPDATE posts SET created_at = $2 WHERE post_id = $1")
        .bind(post_id)
        .bind(created_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn count_rows(pool: &PgPool) -> Result<i64> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?)
}
