pub mod publish_next;
pub mod render;

pub use publish_next::{publish_next, PublicationOutcome};
pub use render::{primary_text, reply_text, MAX_POST_CHARS};
