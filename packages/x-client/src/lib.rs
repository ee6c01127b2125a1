//! Pure X (Twitter) API v2 client.
//!
//! Covers the two calls a posting bot needs: uploading an image and creating a
//! post (optionally with media and/or as a reply). Authentication uses an
//! already-issued OAuth 2.0 user-context access token with the `tweet.write`
//! and `media.write` scopes; obtaining that token is out of scope.
//!
//! # Example
//!
//! ```rust,ignore
//! use x_client::{CreatePostRequest, XClient, XOptions};
//!
//! let client = XClient::new(XOptions::new("user-access-token"));
//!
//! let media_id = client.upload_media(bytes, "image/png", "meme.png").await?;
//! let post = client
//!     .create_post(&CreatePostRequest::new("hello").with_media_ids(vec![media_id]))
//!     .await?;
//! client
//!     .create_post(&CreatePostRequest::new("source link").in_reply_to(&post.id))
//!     .await?;
//! ```

pub mod error;
pub mod models;

pub use error::{Result, XError};
pub use models::{CreatePostRequest, CreatedPost, UploadedMedia};

use models::DataEnvelope;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.x.com/2";

#[derive(Debug, Clone)]
pub struct XOptions {
    pub access_token: String,
    pub base_url: String,
}

impl XOptions {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct XClient {
    client: reqwest::Client,
    options: XOptions,
}

impl XClient {
    pub fn new(options: XOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            options,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.options.base_url
    }

    /// Upload an image for use in a post. Returns the media id.
    pub async fn upload_media(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        file_name: &str,
    ) -> Result<String> {
        if bytes.is_empty() {
            return Err(XError::Config("refusing to upload empty media".into()));
        }

        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new()
            .text("media_category", "tweet_image")
            .text("media_type", mime_type.to_string())
            .part("media", part);

        tracing::debug!(file_name, mime_type, size, "Uploading media to X");

        let resp = self
            .client
            .post(format!("{}/media/upload", self.options.base_url))
            .bearer_auth(&self.options.access_token)
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadedMedia = Self::read_data(resp).await?;
        tracing::info!(media_id = %uploaded.id, size, "Media uploaded");

        Ok(uploaded.id)
    }

    /// Create a post. Returns the created post, whose `id` can be used for
    /// replies.
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<CreatedPost> {
        if request.text.trim().is_empty() && request.media.is_none() {
            return Err(XError::Config("post needs text or media".into()));
        }

        let resp = self
            .client
            .post(format!("{}/tweets", self.options.base_url))
            .bearer_auth(&self.options.access_token)
            .json(request)
            .send()
            .await?;

        let created: CreatedPost = Self::read_data(resp).await?;
        tracing::info!(
            post_id = %created.id,
            in_reply_to = ?request.reply.as_ref().map(|r| r.in_reply_to_tweet_id.as_str()),
            "Post created"
        );

        Ok(created)
    }

    async fn read_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %body, "X API error");
            return Err(XError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        parse_data(&body)
    }
}

/// Unwrap the `data` member of a v2 success body.
pub fn parse_data<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str::<DataEnvelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| XError::Parse(format!("{}: {}", e, body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_builder() {
        let options = XOptions::new("token").with_base_url("http://x.test/2");

        assert_eq!(options.access_token, "token");
        assert_eq!(options.base_url, "http://x.test/2");
        assert_eq!(XOptions::new("t").base_url, "https://api.x.com/2");
    }

    #[test]
    fn plain_post_serializes_text_only() {
        let body = serde_json::to_value(CreatePostRequest::new("hello")).unwrap();
        assert_eq!(body, json!({ "text": "hello" }));
    }

    #[test]
    fn media_post_serializes_media_ids() {
        let request = CreatePostRequest::new("A & B").with_media_ids(vec!["1001".into()]);
        let body = serde_json::to_value(request).unwrap();

        assert_eq!(
            body,
            json!({ "text": "A & B", "media": { "media_ids": ["1001"] } })
        );
    }

    #[test]
    fn empty_media_list_is_omitted() {
        let request = CreatePostRequest::new("hi").with_media_ids(vec![]);
        assert!(request.media.is_none());
    }

    #[test]
    fn reply_serializes_in_reply_to() {
        let request = CreatePostRequest::new("source").in_reply_to("42");
        let body = serde_json::to_value(request).unwrap();

        assert_eq!(
            body,
            json!({ "text": "source", "reply": { "in_reply_to_tweet_id": "42" } })
        );
    }

    #[test]
    fn parses_created_post() {
        let created: CreatedPost =
            parse_data(r#"{"data": {"id": "1790", "text": "hello"}}"#).unwrap();
        assert_eq!(created.id, "1790");
        assert_eq!(created.text, "hello");
    }

    #[test]
    fn parses_uploaded_media() {
        let uploaded: UploadedMedia = parse_data(
            r#"{"data": {"id": "555", "media_key": "3_555", "size": 1024, "expires_after_secs": 86400}}"#,
        )
        .unwrap();
        assert_eq!(uploaded.id, "555");
        assert_eq!(uploaded.media_key.as_deref(), Some("3_555"));
    }

    #[test]
    fn error_body_is_parse_error() {
        let err = parse_data::<CreatedPost>(r#"{"errors": [{"message": "nope"}]}"#).unwrap_err();
        assert!(matches!(err, XError::Parse(_)));
    }

    #[tokio::test]
    async fn empty_post_is_rejected_before_request() {
        let client = XClient::new(XOptions::new("t").with_base_url("http://127.0.0.1:1"));
        let err = client
            .create_post(&CreatePostRequest::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, XError::Config(_)));
    }

    #[tokio::test]
    async fn empty_media_is_rejected_before_request() {
        let client = XClient::new(XOptions::new("t").with_base_url("http://127.0.0.1:1"));
        let err = client
            .upload_media(Vec::new(), "image/png", "a.png")
            .await
            .unwrap_err();
        assert!(matches!(err, XError::Config(_)));
    }
}
