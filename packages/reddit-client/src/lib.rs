//! Pure Reddit listing API client.
//!
//! A minimal client for reading subreddit listings. Works in two modes:
//!
//! - **anonymous**: reads the public `https://www.reddit.com/r/<sub>/top.json`
//!   listing. No credentials, lower rate limits.
//! - **authenticated**: exchanges a long-lived refresh token for an access
//!   token, then reads `https://oauth.reddit.com/r/<sub>/top`.
//!
//! # Example
//!
//! ```rust,ignore
//! use reddit_client::{RedditClient, RedditCredentials, TimeWindow};
//!
//! let client = RedditClient::new("my-bot/0.1").with_credentials(RedditCredentials {
//!     client_id: "id".into(),
//!     client_secret: "secret".into(),
//!     refresh_token: "token".into(),
//! });
//!
//! let posts = client.top_posts("ProgrammerHumor", TimeWindow::Day, 15).await?;
//! for post in &posts {
//!     println!("{} by u/{}", post.title, post.author);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::{RedditCredentials, RedditPost, TimeWindow};

use reqwest::header;
use types::{AccessTokenResponse, ListingData, Thing};

const PUBLIC_BASE_URL: &str = "https://www.reddit.com";
const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";

/// Reddit caps listing pages at 100 items.
pub const MAX_LISTING_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct RedditClient {
    client: reqwest::Client,
    user_agent: String,
    credentials: Option<RedditCredentials>,
    public_base_url: String,
    oauth_base_url: String,
}

impl RedditClient {
    /// Create an anonymous client. Reddit rejects requests without a
    /// descriptive User-Agent, so one is always required.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: user_agent.into(),
            credentials: None,
            public_base_url: PUBLIC_BASE_URL.to_string(),
            oauth_base_url: OAUTH_BASE_URL.to_string(),
        }
    }

    /// Switch to authenticated listing reads.
    pub fn with_credentials(mut self, credentials: RedditCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override both base URLs (proxies, tests).
    pub fn with_base_urls(
        mut self,
        public_base_url: impl Into<String>,
        oauth_base_url: impl Into<String>,
    ) -> Self {
        self.public_base_url = public_base_url.into();
        self.oauth_base_url = oauth_base_url.into();
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Fetch the top posts of a subreddit for the given window.
    ///
    /// Posts are returned in Reddit's ranking order. Non-link things in the
    /// listing are skipped.
    pub async fn top_posts(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<RedditPost>> {
        let limit = limit.min(MAX_LISTING_LIMIT);
        tracing::debug!(
            subreddit,
            window = %window,
            limit,
            authenticated = self.is_authenticated(),
            "Fetching top posts"
        );

        let limit_param = limit.to_string();
        let request = match &self.credentials {
            Some(credentials) => {
                let token = self.access_token(credentials).await?;
                self.client
                    .get(self.top_url(subreddit, true))
                    .bearer_auth(token)
            }
            None => self.client.get(self.top_url(subreddit, false)),
        };

        let resp = request
            .header(header::USER_AGENT, &self.user_agent)
            .query(&[("t", window.as_str()), ("limit", limit_param.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let posts = parse_listing(&body)?;
        tracing::info!(subreddit, count = posts.len(), "Fetched top posts");

        Ok(posts)
    }

    /// Exchange the refresh token for a short-lived access token.
    async fn access_token(&self, credentials: &RedditCredentials) -> Result<String> {
        let url = format!("{}/api/v1/access_token", self.public_base_url);
        let resp = self
            .client
            .post(&url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(header::USER_AGENT, &self.user_agent)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RedditError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: AccessTokenResponse = resp.json().await?;
        match (token.access_token, token.error) {
            (Some(access_token), _) => {
                tracing::debug!(
                    scope = ?token.scope,
                    expires_in = ?token.expires_in,
                    "Obtained Reddit access token"
                );
                Ok(access_token)
            }
            (None, Some(error)) => Err(RedditError::Auth(error)),
            (None, None) => Err(RedditError::Auth("no access_token in response".into())),
        }
    }

    fn top_url(&self, subreddit: &str, authenticated: bool) -> String {
        if authenticated {
            format!("{}/r/{}/top", self.oauth_base_url, subreddit)
        } else {
            format!("{}/r/{}/top.json", self.public_base_url, subreddit)
        }
    }
}

/// Parse a `Listing` body into link posts, keeping only `t3` children.
pub fn parse_listing(body: &str) -> Result<Vec<RedditPost>> {
    let listing: Thing<ListingData<serde_json::Value>> =
        serde_json::from_str(body).map_err(|e| RedditError::Parse(e.to_string()))?;

    if listing.kind != "Listing" {
        return Err(RedditError::Parse(format!(
            "expected Listing, got {}",
            listing.kind
        )));
    }

    listing
        .data
        .children
        .into_iter()
        .filter(|child| child.kind == "t3")
        .map(|child| {
            serde_json::from_value::<RedditPost>(child.data)
                .map_err(|e| RedditError::Parse(e.to_string()))
        })
        .collect()
}
