use async_trait::async_trait;
use sqlx::PgPool;

use super::BaseQueueStore;
use crate::common::StoreError;
use crate::domains::queue::{InsertOutcome, NewQueueEntry, QueueEntry};

/// Queue store over the Postgres `posts` table
#[derive(Clone)]
pub struct PostgresQueueStore {
    pool: PgPool,
}

impl PostgresQueueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseQueueStore for PostgresQueueStore {
    async fn insert(&self, entry: &NewQueueEntry) -> Result<InsertOutcome, StoreError> {
        QueueEntry::insert(entry, &self.pool).await
    }

    async fn fetch_oldest_unpublished(&self) -> Result<Option<QueueEntry>, StoreError> {
        QueueEntry::find_oldest_unpublished(&self.pool).await
    }

    async fn mark_published(&self, post_id: &str) -> Result<bool, StoreError> {
        QueueEntry::mark_published(post_id, &self.pool).await
    }
}
