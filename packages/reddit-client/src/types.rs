use std::fmt;

use serde::Deserialize;

/// Time window for "top" listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth credentials for a script/installed app with a long-lived refresh token.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// A single link post (`t3` thing) from a listing.
///
/// Titles arrive HTML-escaped (`&amp;`, `&lt;` ...) because the client never
/// requests `raw_json=1`.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub subreddit: String,
    /// Relative permalink, e.g. `/r/ProgrammerHumor/comments/abc/title/`
    pub permalink: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub url: String,
    pub link_flair_text: Option<String>,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub score: i64,
}

/// Generic `{ kind, data }` envelope Reddit wraps every object in.
#[derive(Debug, Clone, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

/// Body of a `Listing` thing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Response of the refresh-token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
    pub error: Option<String>,
}
