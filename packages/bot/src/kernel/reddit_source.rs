//! Reddit-backed content source.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reddit_client::{RedditClient, RedditPost, TimeWindow};

use super::BaseContentSource;
use crate::domains::intake::Candidate;

/// Reads a subreddit's top listing of the last day
pub struct RedditContentSource {
    client: RedditClient,
}

impl RedditContentSource {
    pub fn new(client: RedditClient) -> Self {
        Self { client }
    }
}

impl From<RedditPost> for Candidate {
    fn from(post: RedditPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            community: post.subreddit,
            permalink: post.permalink,
            is_self: post.is_self,
            url: post.url,
            category: post.link_flair_text,
        }
    }
}

#[async_trait]
impl BaseContentSource for RedditContentSource {
    async fn top_posts(&self, community: &str, limit: u32) -> Result<Vec<Candidate>> {
        let posts = self
            .client
            .top_posts(community, TimeWindow::Day, limit)
            .await
            .with_context(|| format!("Failed to fetch top posts of r/{}", community))?;

        Ok(posts.into_iter().map(Candidate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reddit_post_maps_to_candidate() {
        let post = RedditPost {
            id: "abc".into(),
            title: "A &amp; B".into(),
            author: "joe".into(),
            subreddit: "ProgrammerHumor".into(),
            permalink: "/r/ProgrammerHumor/abc".into(),
            is_self: false,
            url: "http://x/y.jpg".into(),
            link_flair_text: Some("Meme".into()),
            over_18: false,
            score: 42,
        };

        let candidate = Candidate::from(post);
        assert_eq!(candidate.id, "abc");
        assert_eq!(candidate.community, "ProgrammerHumor");
        assert_eq!(candidate.category.as_deref(), Some("Meme"));
        assert_eq!(candidate.title, "A &amp; B");
    }

    #[tokio::test]
    async fn test_unreachable_source_is_an_error() {
        let client = RedditClient::new("meme-bot tests")
            .with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let source = RedditContentSource::new(client);

        let err = source.top_posts("ProgrammerHumor", 5).await.unwrap_err();
        assert!(err.to_string().contains("r/ProgrammerHumor"));
    }
}
