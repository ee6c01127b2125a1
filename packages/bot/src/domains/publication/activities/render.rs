use crate::common::utils::truncate_chars;
use crate::domains::queue::QueueEntry;

/// Character limit of a single post on the publish target
pub const MAX_POST_CHARS: usize = 280;

/// Body of the primary post: the meme text, shortened to fit one post.
pub fn primary_text(entry: &QueueEntry) -> String {
    truncate_chars(&entry.meme_text, MAX_POST_CHARS)
}

/// Body of the attribution reply threaded under the primary post.
pub fn reply_text(entry: &QueueEntry) -> String {
    format!(
        "Posted by {} in {}\n\n{}",
        entry.author, entry.subreddit, entry.reddit_post_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(meme_text: &str) -> QueueEntry {
        QueueEntry {
            post_id: "abc".into(),
            created_at: Utc::now(),
            meme_text: meme_text.into(),
            author: "u/joe".into(),
            subreddit: "r/ProgrammerHumor".into(),
            reddit_post_url: "www.reddit.com/r/ProgrammerHumor/abc".into(),
            image_url: "http://x/y.jpg".into(),
            tweeted: false,
        }
    }

    #[test]
    fn test_reply_text_format() {
        assert_eq!(
            reply_text(&entry("A & B")),
            "Posted by u/joe in r/ProgrammerHumor\n\nwww.reddit.com/r/ProgrammerHumor/abc"
        );
    }

    #[test]
    fn test_primary_text_is_meme_text() {
        assert_eq!(primary_text(&entry("A & B")), "A & B");
    }

    #[test]
    fn test_primary_text_truncated_to_post_limit() {
        let long = "é".repeat(300);
        let text = primary_text(&entry(&long));

        assert_eq!(text.chars().count(), MAX_POST_CHARS);
        assert!(text.ends_with('…'));
    }
}
