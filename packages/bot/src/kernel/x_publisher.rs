use anyhow::{Context, Result};
use async_trait::async_trait;
use x_client::{CreatePostRequest, XClient};

use super::{BasePublisher, MediaAttachment, PostDraft};

/// Publishes through the X API v2
pub struct XPublisher {
    client: XClient,
}

impl XPublisher {
    pub fn new(client: XClient) -> Self {
        Self { client }
    }
}

/// Request body for a draft. Replies are threaded explicitly.
pub fn create_post_request(draft: &PostDraft) -> CreatePostRequest {
    let request =
        CreatePostRequest::new(draft.text.clone()).with_media_ids(draft.media_ids.clone());

    match &draft.in_reply_to {
        Some(post_id) => request.in_reply_to(post_id.clone()),
        None => request,
    }
}

#[async_trait]
impl BasePublisher for XPublisher {
    async fn upload_media(&self, media: &MediaAttachment) -> Result<String> {
        self.client
            .upload_media(media.bytes.clone(), &media.mime_type, &media.file_name)
            .await
            .with_context(|| format!("Failed to upload {}", media.file_name))
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<String> {
        let created = self
            .client
            .create_post(&create_post_request(draft))
            .await
            .context("Failed to create post")?;

        Ok(created.id)
    }
}
