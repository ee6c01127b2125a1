//! One intake invocation: fetch, validate, normalize, dedup-insert.

use tracing::{debug, info};

use crate::common::PipelineError;
use crate::domains::intake::activities::{normalize, CandidateFilter};
use crate::domains::queue::InsertOutcome;
use crate::kernel::IntakeDeps;

/// What an intake run should fetch and accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSettings {
    pub subreddit: String,
    pub limit: u32,
    pub filter: CandidateFilter,
}

/// Per-run counters. `fetched == rejected + inserted + duplicates` for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeReport {
    pub fetched: usize,
    pub rejected: usize,
    pub inserted: usize,
    pub duplicates: usize,
}

/// Fetch the top posts of the configured community and queue every valid,
/// previously unseen one, in source order.
///
/// Rejected candidates and duplicate keys are skipped. A content source
/// failure or any other store failure aborts the run; rows inserted before
/// the failure stay committed.
pub async fn fetch_posts(
    settings: &IntakeSettings,
    deps: &IntakeDeps,
) -> Result<IntakeReport, PipelineError> {
    let candidates = deps
        .content_source
        .top_posts(&settings.subreddit, settings.limit)
        .await
        .map_err(PipelineError::content_source)?;

    info!(
        subreddit = %settings.subreddit,
        count = candidates.len(),
        "Fetched candidate posts"
    );

    let mut report = IntakeReport {
        fetched: candidates.len(),
        ..Default::default()
    };

    for candidate in &candidates {
        if let Err(reason) = settings.filter.check(candidate) {
            debug!(post_id = %candidate.id, ?reason, "Skipping candidate");
            report.rejected += 1;
            continue;
        }

        let entry = normalize(candidate);
        match deps.queue.insert(&entry).await? {
            InsertOutcome::Inserted => {
                info!(post_id = %entry.post_id, "Queued meme");
                report.inserted += 1;
            }
            InsertOutcome::Duplicate => {
                debug!(post_id = %entry.post_id, "Meme already queued");
                report.duplicates += 1;
            }
        }
    }

    info!(
        fetched = report.fetched,
        rejected = report.rejected,
        inserted = report.inserted,
        duplicates = report.duplicates,
        "Intake complete"
    );

    Ok(report)
}
