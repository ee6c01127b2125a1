pub mod queue_entry;

pub use queue_entry::{InsertOutcome, NewQueueEntry, QueueEntry};
