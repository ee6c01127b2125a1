// CodingMemesBot - core library
//
// Two pipelines share one Postgres queue table:
// - intake pulls top memes from Reddit into the queue (domains/intake)
// - publication posts the oldest queued meme to X (domains/publication)
//
// External services sit behind the Base* traits in kernel/traits.rs.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
