//! One publication invocation: dequeue, render, publish, acknowledge.

use tracing::{info, warn};

use crate::common::{PipelineError, PublishStage};
use crate::domains::publication::activities::{primary_text, reply_text};
use crate::kernel::{PostDraft, PublicationDeps};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationOutcome {
    /// No unpublished entry; nothing was called or changed
    QueueEmpty,
    Published {
        post_id: String,
        primary_post_id: String,
        reply_post_id: String,
    },
}

/// Publish the oldest unpublished entry as a media post plus a threaded
/// attribution reply, then mark it published.
///
/// Any media or publish failure returns before the entry is marked, so it
/// is picked up again by the next run.
pub async fn publish_next(deps: &PublicationDeps) -> Result<PublicationOutcome, PipelineError> {
    let Some(entry) = deps.queue.fetch_oldest_unpublished().await? else {
        info!("Queue empty, nothing to publish");
        return Ok(PublicationOutcome::QueueEmpty);
    };

    info!(post_id = %entry.post_id, image_url = %entry.image_url, "Publishing meme");

    let text = primary_text(&entry);

    let media = deps
        .media
        .fetch(&entry.image_url)
        .await
        .map_err(|source| PipelineError::MediaFetch {
            url: entry.image_url.clone(),
            source,
        })?;

    let media_id = deps
        .publisher
        .upload_media(&media)
        .await
        .map_err(|source| PipelineError::Publish {
            stage: PublishStage::MediaUpload,
            source,
        })?;

    let primary_post_id = deps
        .publisher
        .create_post(&PostDraft {
            text,
            media_ids: vec![media_id],
            in_reply_to: None,
        })
        .await
        .map_err(|source| PipelineError::Publish {
            stage: PublishStage::PrimaryPost,
            source,
        })?;

    let reply_post_id = deps
        .publisher
        .create_post(&PostDraft {
            text: reply_text(&entry),
            media_ids: Vec::new(),
            in_reply_to: Some(primary_post_id.clone()),
        })
        .await
        .map_err(|source| PipelineError::Publish {
            stage: PublishStage::Reply,
            source,
        })?;

    if !deps.queue.mark_published(&entry.post_id).await? {
        warn!(post_id = %entry.post_id, "Entry was already marked published by another run");
    }

    info!(
        post_id = %entry.post_id,
        primary_post_id = %primary_post_id,
        reply_post_id = %reply_post_id,
        "Published meme"
    );

    Ok(PublicationOutcome::Published {
        post_id: entry.post_id,
        primary_post_id,
        reply_post_id,
    })
}
