use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use reddit_client::RedditCredentials;
use sqlx::postgres::PgConnectOptions;

use crate::domains::intake::{CandidateFilter, IntakeSettings};

pub const DEFAULT_SUBREDDIT: &str = "ProgrammerHumor";
pub const DEFAULT_FETCH_LIMIT: u32 = 15;
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".png", ".jpeg"];
pub const DEFAULT_MEME_FLAIR: &str = "Meme";
pub const DEFAULT_USER_AGENT: &str = "scraping posts for @CodingMemesBot twitter bot";
pub const DEFAULT_FETCH_SCHEDULE: &str = "0 0 * * * *";
pub const DEFAULT_PUBLISH_SCHEDULE: &str = "0 30 */2 * * *";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PgConnectOptions,
    pub db_max_connections: u32,
    pub subreddit: String,
    pub fetch_limit: u32,
    pub image_extensions: Vec<String>,
    pub meme_flair: String,
    pub reddit_user_agent: String,
    pub reddit_credentials: Option<RedditCredentials>,
    pub x_access_token: Option<String>,
    pub fetch_schedule: String,
    pub publish_schedule: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url)
                .context("DATABASE_URL is not a valid Postgres URL")?,
            None => {
                let port = get("DB_PORT")
                    .unwrap_or_else(|| "5432".to_string())
                    .parse::<u16>()
                    .context("DB_PORT must be a valid port number")?;
                PgConnectOptions::new()
                    .host(&get("DB_HOST").context("DATABASE_URL or DB_HOST must be set")?)
                    .port(port)
                    .username(&get("DB_USER").context("DB_USER must be set")?)
                    .password(&get("DB_PASSWORD").context("DB_PASSWORD must be set")?)
                    .database(&get("DB_NAME").context("DB_NAME must be set")?)
            }
        };

        let reddit_credentials = match (
            get("REDDIT_CLIENT_ID"),
            get("REDDIT_CLIENT_SECRET"),
            get("REDDIT_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(RedditCredentials {
                client_id,
                client_secret,
                refresh_token,
            }),
            (None, None, None) => None,
            _ => anyhow::bail!(
                "REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET and REDDIT_REFRESH_TOKEN must be set together"
            ),
        };

        let image_extensions = match get("IMAGE_EXTENSIONS") {
            Some(raw) => parse_extensions(&raw),
            None => DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };
        if image_extensions.is_empty() {
            anyhow::bail!("IMAGE_EXTENSIONS must list at least one extension");
        }

        Ok(Self {
            database,
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "1".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            subreddit: get("SUBREDDIT").unwrap_or_else(|| DEFAULT_SUBREDDIT.to_string()),
            fetch_limit: get("FETCH_LIMIT")
                .map(|v| v.parse())
                .transpose()
                .context("FETCH_LIMIT must be a valid number")?
                .unwrap_or(DEFAULT_FETCH_LIMIT),
            image_extensions,
            meme_flair: get("MEME_FLAIR").unwrap_or_else(|| DEFAULT_MEME_FLAIR.to_string()),
            reddit_user_agent: get("REDDIT_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            reddit_credentials,
            x_access_token: get("X_ACCESS_TOKEN"),
            fetch_schedule: get("FETCH_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_FETCH_SCHEDULE.to_string()),
            publish_schedule: get("PUBLISH_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_PUBLISH_SCHEDULE.to_string()),
        })
    }

    pub fn intake_settings(&self) -> IntakeSettings {
        IntakeSettings {
            subreddit: self.subreddit.clone(),
            limit: self.fetch_limit,
            filter: CandidateFilter::new(self.image_extensions.clone(), self.meme_flair.clone()),
        }
    }

    /// The publisher token, required only by commands that post.
    pub fn require_x_access_token(&self) -> Result<&str> {
        self.x_access_token
            .as_deref()
            .context("X_ACCESS_TOKEN must be set to publish")
    }
}

/// Split a comma-separated extension list, adding the leading dot when missing.
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
        .collect()
}
