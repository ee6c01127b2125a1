//! Intake domain - pulls top posts from the content source into the queue

pub mod activities;
pub mod models;

pub use activities::{
    fetch_posts, normalize, CandidateFilter, IntakeReport, IntakeSettings, Rejection,
};
pub use models::Candidate;
