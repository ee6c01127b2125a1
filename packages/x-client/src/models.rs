use serde::{Deserialize, Serialize};

/// Body of `POST /2/tweets`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreatePostRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<PostMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<PostReply>,
}

impl CreatePostRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Attach previously uploaded media. An empty list leaves the post text-only.
    pub fn with_media_ids(mut self, media_ids: Vec<String>) -> Self {
        self.media = if media_ids.is_empty() {
            None
        } else {
            Some(PostMedia { media_ids })
        };
        self
    }

    /// Thread this post under an existing one.
    pub fn in_reply_to(mut self, post_id: impl Into<String>) -> Self {
        self.reply = Some(PostReply {
            in_reply_to_tweet_id: post_id.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostMedia {
    pub media_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostReply {
    pub in_reply_to_tweet_id: String,
}

/// `data` object of a successful create-post response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    pub text: String,
}

/// `data` object of a successful media upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedMedia {
    pub id: String,
    pub media_key: Option<String>,
    pub size: Option<u64>,
    pub expires_after_secs: Option<u64>,
}

/// Every v2 success body wraps its payload in `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
