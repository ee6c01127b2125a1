use thiserror::Error;

/// Queue store failures. Duplicate keys are not errors: see `InsertOutcome`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Queue store unreachable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether the failure is about reaching the store rather than a rejected statement.
    pub fn is_connection_error(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Database(e) => matches!(
                e,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
        }
    }
}

/// Errors that end an intake or publication invocation.
///
/// Validation rejections and duplicate keys never surface here; they are
/// handled inside the pipeline that produced them.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Content source or queue store could not be reached
    #[error("Connection error ({target}): {source}")]
    Connection {
        target: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Non-connection persistence failure
    #[error("Queue store error: {0}")]
    Store(#[source] StoreError),

    /// Media could not be retrieved or was not an image; entry stays queued
    #[error("Media fetch failed for {url}: {source}")]
    MediaFetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Publish collaborator rejected a call; entry stays queued
    #[error("Publish failed ({stage}): {source}")]
    Publish {
        stage: PublishStage,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    pub fn content_source(source: anyhow::Error) -> Self {
        PipelineError::Connection {
            target: "content source",
            source,
        }
    }
}

impl From<StoreError> for PipelineError {
    fn from(err: StoreError) -> Self {
        if err.is_connection_error() {
            PipelineError::Connection {
                target: "queue store",
                source: err.into(),
            }
        } else {
            PipelineError::Store(err)
        }
    }
}

/// Which publish call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    MediaUpload,
    PrimaryPost,
    Reply,
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PublishStage::MediaUpload => "media upload",
            PublishStage::PrimaryPost => "primary post",
            PublishStage::Reply => "reply",
        };
        f.write_str(label)
    }
}
