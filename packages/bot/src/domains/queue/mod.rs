//! Queue domain - the posts table shared by intake and publication

pub mod models;

pub use models::{InsertOutcome, NewQueueEntry, QueueEntry};
