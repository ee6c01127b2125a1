//! Intake domain activities

pub mod fetch_posts;
pub mod normalize;
pub mod validate;

pub use fetch_posts::{fetch_posts, IntakeReport, IntakeSettings};
pub use normalize::normalize;
pub use validate::{CandidateFilter, Rejection};
