// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Filtering, normalization and rendering live in the domain activities that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseContentSource, BasePublisher)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::StoreError;
use crate::domains::intake::Candidate;
use crate::domains::queue::{InsertOutcome, NewQueueEntry, QueueEntry};

// =============================================================================
// Content Source Trait (Infrastructure - where memes come from)
// =============================================================================

#[async_trait]
pub trait BaseContentSource: Send + Sync {
    /// Top posts of `community` for the last day, in the source's ranking order.
    async fn top_posts(&self, community: &str, limit: u32) -> Result<Vec<Candidate>>;
}

// =============================================================================
// Publisher Trait (Infrastructure - where memes go)
// =============================================================================

/// A post to create. `in_reply_to` threads it under an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    pub text: String,
    pub media_ids: Vec<String>,
    pub in_reply_to: Option<String>,
}

#[async_trait]
pub trait BasePublisher: Send + Sync {
    /// Upload media and return the reference to attach to a post.
    async fn upload_media(&self, media: &MediaAttachment) -> Result<String>;

    /// Create a post and return its identifier.
    async fn create_post(&self, draft: &PostDraft) -> Result<String>;
}

// =============================================================================
// Media Fetcher Trait (Infrastructure)
// =============================================================================

/// Downloaded media, ready to hand to a publisher unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

#[async_trait]
pub trait BaseMediaFetcher: Send + Sync {
    /// Download `url`. Fails when unreachable, non-2xx, empty, or not an image.
    async fn fetch(&self, url: &str) -> Result<MediaAttachment>;
}

// =============================================================================
// Queue Store Trait (Infrastructure - the posts table)
// =============================================================================

/// Access layer over the queue table. Every method is a single statement.
#[async_trait]
pub trait BaseQueueStore: Send + Sync {
    /// Insert keyed by `post_id`; an existing key yields `InsertOutcome::Duplicate`.
    async fn insert(&self, entry: &NewQueueEntry) -> Result<InsertOutcome, StoreError>;

    /// Oldest entry (by `created_at`) that has not been published yet.
    async fn fetch_oldest_unpublished(&self) -> Result<Option<QueueEntry>, StoreError>;

    /// Flip `tweeted` to true. Returns false when the entry was already
    /// published (or does not exist), so overlapping runs can detect the race.
    async fn mark_published(&self, post_id: &str) -> Result<bool, StoreError>;
}
