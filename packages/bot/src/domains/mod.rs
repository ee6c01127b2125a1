// Business domains
pub mod intake;
pub mod publication;
pub mod queue;
