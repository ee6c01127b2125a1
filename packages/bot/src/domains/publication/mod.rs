//! Publication domain - posts the oldest queued meme with an attribution reply

pub mod activities;

pub use activities::{publish_next, PublicationOutcome};
