// Common types and utilities shared across the bot

pub mod errors;
pub mod utils;

pub use errors::{PipelineError, PublishStage, StoreError};
