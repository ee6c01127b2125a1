//! Intake pipeline tests against in-memory collaborators.

mod common;

use bot_core::common::PipelineError;
use bot_core::domains::intake::{fetch_posts, Candidate, CandidateFilter, IntakeSettings};
use bot_core::kernel::test_dependencies::{MemoryQueueStore, MockContentSource};
use bot_core::kernel::TestDependencies;
use common::meme_candidate;

fn settings() -> IntakeSettings {
    IntakeSettings {
        subreddit: "ProgrammerHumor".to_string(),
        limit: 15,
        filter: CandidateFilter::default(),
    }
}

#[tokio::test]
async fn valid_candidate_is_normalized_and_queued() {
    let candidate = Candidate {
        id: "abc".to_string(),
        title: "A &amp; B".to_string(),
        author: "joe".to_string(),
        community: "ProgrammerHumor".to_string(),
        permalink: "/r/ProgrammerHumor/abc".to_string(),
        is_self: false,
        url: "http://x/y.jpg".to_string(),
        category: Some("Meme".to_string()),
    };
    let deps = TestDependencies::new()
        .with_content_source(MockContentSource::new().with_posts(vec![candidate]));

    let report = fetch_posts(&settings(), &deps.intake_deps()).await.unwrap();

    assert_eq!(report.inserted, 1);
    let entry = deps.queue.get("abc").unwrap();
    assert_eq!(entry.meme_text, "A & B");
    assert_eq!(entry.author, "u/joe");
    assert_eq!(entry.subreddit, "r/ProgrammerHumor");
    assert_eq!(entry.reddit_post_url, "www.reddit.com/r/ProgrammerHumor/abc");
    assert_eq!(entry.image_url, "http://x/y.jpg");
    assert!(!entry.tweeted);
}

#[tokio::test]
async fn invalid_candidates_are_dropped_silently() {
    let self_post = Candidate {
        is_self: true,
        ..meme_candidate("self")
    };
    let video = Candidate {
        url: "https://v.redd.it/video".to_string(),
        ..meme_candidate("video")
    };
    let off_topic = Candidate {
        category: Some("Discussion".to_string()),
        ..meme_candidate("talk")
    };
    let unflaired = Candidate {
        category: None,
        ..meme_candidate("bare")
    };

    let deps = TestDependencies::new().with_content_source(MockContentSource::new().with_posts(
        vec![self_post, video, meme_candidate("good"), off_topic, unflaired],
    ));

    let report = fetch_posts(&settings(), &deps.intake_deps()).await.unwrap();

    assert_eq!(report.fetched, 5);
    assert_eq!(report.rejected, 4);
    assert_eq!(report.inserted, 1);
    let ids: Vec<String> = deps.queue.entries().into_iter().map(|e| e.post_id).collect();
    assert_eq!(ids, vec!["good".to_string()]);
}

#[tokio::test]
async fn duplicates_are_skipped_and_intake_continues() {
    let deps = TestDependencies::new().with_content_source(MockContentSource::new().with_posts(
        vec![
            meme_candidate("a"),
            meme_candidate("a"),
            meme_candidate("b"),
        ],
    ));

    let report = fetch_posts(&settings(), &deps.intake_deps()).await.unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(deps.queue.entries().len(), 2);
}

#[tokio::test]
async fn rerun_over_same_listing_inserts_nothing() {
    let deps = TestDependencies::new().with_content_source(
        MockContentSource::new().with_posts(vec![meme_candidate("a"), meme_candidate("b")]),
    );

    fetch_posts(&settings(), &deps.intake_deps()).await.unwrap();
    let report = fetch_posts(&settings(), &deps.intake_deps()).await.unwrap();

    assert_eq!(report.inserted, 0);
    assert_eq!(report.duplicates, 2);
    assert_eq!(deps.queue.entries().len(), 2);
}

#[tokio::test]
async fn source_is_asked_for_configured_community_and_limit() {
    let deps = TestDependencies::new();
    let settings = IntakeSettings {
        subreddit: "rustjerk".to_string(),
        limit: 3,
        filter: CandidateFilter::default(),
    };

    fetch_posts(&settings, &deps.intake_deps()).await.unwrap();

    assert_eq!(deps.content_source.calls(), vec![("rustjerk".to_string(), 3)]);
}

#[tokio::test]
async fn unreachable_source_is_a_connection_error() {
    let deps = TestDependencies::new()
        .with_content_source(MockContentSource::new().with_failure("connection refused"));

    let err = fetch_posts(&settings(), &deps.intake_deps())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Connection {
            target: "content source",
            ..
        }
    ));
    assert!(deps.queue.entries().is_empty());
}

#[tokio::test]
async fn store_failure_aborts_remaining_batch() {
    let deps = TestDependencies::new()
        .with_content_source(MockContentSource::new().with_posts(vec![
            meme_candidate("a"),
            meme_candidate("b"),
            meme_candidate("c"),
        ]))
        .with_queue(MemoryQueueStore::new().failing_inserts_after(1));

    let err = fetch_posts(&settings(), &deps.intake_deps())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Store(_)));
    // rows inserted before the failure stay committed
    let ids: Vec<String> = deps.queue.entries().into_iter().map(|e| e.post_id).collect();
    assert_eq!(ids, vec!["a".to_string()]);
}
