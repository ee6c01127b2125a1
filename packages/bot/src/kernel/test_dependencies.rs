// TestDependencies - mock implementations for testing
//
// Provides in-memory collaborators that can be injected into IntakeDeps and
// PublicationDeps for pipeline tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use super::{
    BaseContentSource, BaseMediaFetcher, BasePublisher, BaseQueueStore, IntakeDeps,
    MediaAttachment, PostDraft, PublicationDeps,
};
use crate::common::{PublishStage, StoreError};
use crate::domains::intake::Candidate;
use crate::domains::queue::{InsertOutcome, NewQueueEntry, QueueEntry};

// =============================================================================
// Mock Content Source
// =============================================================================

pub struct MockContentSource {
    posts: Vec<Candidate>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Posts returned by `top_posts`, in ranking order
    pub fn with_posts(mut self, posts: Vec<Candidate>) -> Self {
        self.posts = posts;
        self
    }

    /// Make every call fail as if the source were unreachable
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// (community, limit) of every call
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockContentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseContentSource for MockContentSource {
    async fn top_posts(&self, community: &str, limit: u32) -> Result<Vec<Candidate>> {
        self.calls
            .lock()
            .unwrap()
            .push((community.to_string(), limit));

        if let Some(message) = &self.failure {
            return Err(anyhow!("{}", message));
        }

        Ok(self.posts.iter().take(limit as usize).cloned().collect())
    }
}

// =============================================================================
// Mock Media Fetcher
// =============================================================================

pub struct MockMediaFetcher {
    failure: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockMediaFetcher {
    pub fn new() -> Self {
        Self {
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// URLs that were fetched
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockMediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMediaFetcher for MockMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<MediaAttachment> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(message) = &self.failure {
            return Err(anyhow!("{}", message));
        }

        let file_name = url.rsplit('/').next().unwrap_or("media").to_string();
        Ok(MediaAttachment {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            mime_type: "image/jpeg".to_string(),
            file_name,
        })
    }
}

// =============================================================================
// Mock Publisher
// =============================================================================

/// Records every publish call in order. Uploads return `media-N`, posts `post-N`.
pub struct MockPublisher {
    fail_at: Option<PublishStage>,
    uploads: Arc<Mutex<Vec<MediaAttachment>>>,
    posts: Arc<Mutex<Vec<PostDraft>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            fail_at: None,
            uploads: Arc::new(Mutex::new(Vec::new())),
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail the call for `stage`. A failed call is still recorded.
    pub fn failing_at(mut self, stage: PublishStage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    pub fn uploads(&self) -> Vec<MediaAttachment> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<PostDraft> {
        self.posts.lock().unwrap().clone()
    }

    /// Total number of publish calls (uploads plus posts)
    pub fn call_count(&self) -> usize {
        self.uploads.lock().unwrap().len() + self.posts.lock().unwrap().len()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePublisher for MockPublisher {
    async fn upload_media(&self, media: &MediaAttachment) -> Result<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(media.clone());

        if self.fail_at == Some(PublishStage::MediaUpload) {
            return Err(anyhow!("upload rejected"));
        }
        Ok(format!("media-{}", uploads.len()))
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<String> {
        let mut posts = self.posts.lock().unwrap();
        posts.push(draft.clone());

        let stage = if draft.in_reply_to.is_some() {
            PublishStage::Reply
        } else {
            PublishStage::PrimaryPost
        };
        if self.fail_at == Some(stage) {
            return Err(anyhow!("{} rejected", stage));
        }
        Ok(format!("post-{}", posts.len()))
    }
}

// =============================================================================
// In-memory Queue Store
// =============================================================================

/// Queue store with the same ordering and duplicate semantics as the
/// Postgres table.
pub struct MemoryQueueStore {
    entries: Arc<Mutex<Vec<QueueEntry>>>,
    mutations: Arc<Mutex<usize>>,
    insert_failure_after: Option<usize>,
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            mutations: Arc::new(Mutex::new(0)),
            insert_failure_after: None,
        }
    }

    /// Accept `count` successful inserts, then fail every further insert
    /// with a non-duplicate database error.
    pub fn failing_inserts_after(mut self, count: usize) -> Self {
        self.insert_failure_after = Some(count);
        self
    }

    /// Seed an entry with an explicit creation time. Not counted as a mutation.
    pub fn insert_at(&self, entry: NewQueueEntry, created_at: DateTime<Utc>, tweeted: bool) {
        self.entries.lock().unwrap().push(QueueEntry {
            post_id: entry.post_id,
            created_at,
            meme_text: entry.meme_text,
            author: entry.author,
            subreddit: entry.subreddit,
            reddit_post_url: entry.reddit_post_url,
            image_url: entry.image_url,
            tweeted,
        });
    }

    pub fn entries(&self) -> Vec<QueueEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn get(&self, post_id: &str) -> Option<QueueEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.post_id == post_id)
            .cloned()
    }

    /// Number of rows written or updated through the store trait
    pub fn mutation_count(&self) -> usize {
        *self.mutations.lock().unwrap()
    }
}

impl Default for MemoryQueueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseQueueStore for MemoryQueueStore {
    async fn insert(&self, entry: &NewQueueEntry) -> Result<InsertOutcome, StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let mut mutations = self.mutations.lock().unwrap();
        if let Some(limit) = self.insert_failure_after {
            if *mutations >= limit {
                return Err(StoreError::Database(sqlx::Error::Protocol(
                    "simulated write failure".into(),
                )));
            }
        }

        if entries.iter().any(|e| e.post_id == entry.post_id) {
            return Ok(InsertOutcome::Duplicate);
        }

        entries.push(QueueEntry {
            post_id: entry.post_id.clone(),
            created_at: Utc::now(),
            meme_text: entry.meme_text.clone(),
            author: entry.author.clone(),
            subreddit: entry.subreddit.clone(),
            reddit_post_url: entry.reddit_post_url.clone(),
            image_url: entry.image_url.clone(),
            tweeted: false,
        });
        *mutations += 1;
        Ok(InsertOutcome::Inserted)
    }

    async fn fetch_oldest_unpublished(&self) -> Result<Option<QueueEntry>, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| !e.tweeted)
            .min_by(|a, b| (a.created_at, &a.post_id).cmp(&(b.created_at, &b.post_id)))
            .cloned())
    }

    async fn mark_published(&self, post_id: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|e| e.post_id == post_id && !e.tweeted) {
            Some(entry) => {
                entry.tweeted = true;
                *self.mutations.lock().unwrap() += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Shared handles to every mock, plus builders for the pipeline deps.
pub struct TestDependencies {
    pub content_source: Arc<MockContentSource>,
    pub media: Arc<MockMediaFetcher>,
    pub publisher: Arc<MockPublisher>,
    pub queue: Arc<MemoryQueueStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            content_source: Arc::new(MockContentSource::new()),
            media: Arc::new(MockMediaFetcher::new()),
            publisher: Arc::new(MockPublisher::new()),
            queue: Arc::new(MemoryQueueStore::new()),
        }
    }

    pub fn with_content_source(mut self, source: MockContentSource) -> Self {
        self.content_source = Arc::new(source);
        self
    }

    pub fn with_media(mut self, media: MockMediaFetcher) -> Self {
        self.media = Arc::new(media);
        self
    }

    pub fn with_publisher(mut self, publisher: MockPublisher) -> Self {
        self.publisher = Arc::new(publisher);
        self
    }

    pub fn with_queue(mut self, queue: MemoryQueueStore) -> Self {
        self.queue = Arc::new(queue);
        self
    }

    pub fn intake_deps(&self) -> IntakeDeps {
        IntakeDeps::new(self.queue.clone(), self.content_source.clone())
    }

    pub fn publication_deps(&self) -> PublicationDeps {
        PublicationDeps::new(self.queue.clone(), self.media.clone(), self.publisher.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
