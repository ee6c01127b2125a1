//! HTTP media retrieval for the publication pipeline.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{BaseMediaFetcher, MediaAttachment};

const FALLBACK_FILE_NAME: &str = "media";

/// Downloads media over plain HTTP(S)
pub struct HttpMediaFetcher {
    client: reqwest::Client,
}

impl HttpMediaFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

/// Last non-empty path segment of `url`, used as the upload file name.
pub fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

/// Image MIME type from the response header, falling back to the file
/// extension when the server sends none or a generic binary type.
/// `None` means the media is not an image.
pub fn resolve_image_mime_type(content_type: Option<&str>, file_name: &str) -> Option<String> {
    let declared = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty() && value != "application/octet-stream");

    match declared {
        Some(mime) if mime.starts_with("image/") => Some(mime),
        Some(_) => None,
        None => mime_guess::from_path(file_name)
            .first()
            .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
            .map(|mime| mime.essence_str().to_string()),
    }
}

#[async_trait]
impl BaseMediaFetcher for HttpMediaFetcher {
    async fn fetch(&self, url: &str) -> Result<MediaAttachment> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid media URL: {}", url))?;
        let file_name = file_name_from_url(&parsed);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .context("Media request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Media request returned {}", status);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let Some(mime_type) = resolve_image_mime_type(content_type.as_deref(), &file_name) else {
            bail!(
                "Media is not an image (content type: {})",
                content_type.as_deref().unwrap_or("unknown")
            );
        };

        let bytes = response
            .bytes()
            .await
            .context("Failed to read media body")?;
        if bytes.is_empty() {
            bail!("Media body is empty");
        }

        debug!(url, mime_type = %mime_type, size = bytes.len(), "Fetched media");

        Ok(MediaAttachment {
            bytes: bytes.to_vec(),
            mime_type,
            file_name,
        })
    }
}
