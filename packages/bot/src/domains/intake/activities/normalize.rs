//! Candidate -> queue entry normalization.

use crate::common::utils::decode_html_entities;
use crate::domains::intake::Candidate;
use crate::domains::queue::NewQueueEntry;

/// Host prefixed to relative permalinks. Stored without a scheme.
pub const PERMALINK_BASE: &str = "www.reddit.com";

pub const AUTHOR_MARKER: &str = "u/";
pub const COMMUNITY_MARKER: &str = "r/";

/// Canonical queue record for a valid candidate.
pub fn normalize(candidate: &Candidate) -> NewQueueEntry {
    NewQueueEntry {
        post_id: candidate.id.clone(),
        meme_text: decode_html_entities(&candidate.title),
        author: format!("{}{}", AUTHOR_MARKER, candidate.author),
        subreddit: format!("{}{}", COMMUNITY_MARKER, candidate.community),
        reddit_post_url: format!("{}{}", PERMALINK_BASE, candidate.permalink),
        image_url: candidate.url.clone(),
    }
}
