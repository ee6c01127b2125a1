use serde::{Deserialize, Serialize};

/// A post fetched from the content source, not yet validated or stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Source-assigned identifier, becomes the queue key
    pub id: String,
    /// Title as delivered by the source (HTML-escaped)
    pub title: String,
    pub author: String,
    pub community: String,
    /// Relative permalink, e.g. `/r/ProgrammerHumor/comments/abc/...`
    pub permalink: String,
    pub is_self: bool,
    /// Direct media URL for link posts
    pub url: String,
    /// Category label (link flair); absent on unflaired posts
    pub category: Option<String>,
}
