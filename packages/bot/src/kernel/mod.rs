//! Kernel module - infrastructure adapters and per-invocation dependencies.

pub mod deps;
pub mod media_fetcher;
pub mod queue_store;
pub mod reddit_source;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;
pub mod x_publisher;

pub use deps::{
    connect_pool, run_intake, run_migrations, run_publication, IntakeDeps, PublicationDeps,
};
pub use media_fetcher::HttpMediaFetcher;
pub use queue_store::PostgresQueueStore;
pub use reddit_source::RedditContentSource;
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use x_publisher::XPublisher;
