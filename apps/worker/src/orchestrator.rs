//! Run-level orchestration
//!
//! Fans one rotation task out per user over a bounded worker pool. Each
//! task owns its credential and its own authenticated provider client;
//! failures are isolated at the task boundary, logged with the user's
//! key, counted, and discarded — the run itself always completes.

use futures_util::stream::{self, StreamExt};
use rotify_metrics_client::MetricsClient;
use rotify_spotify_client::SpotifyClient;
use tracing::{debug, info, Instrument};

use crate::config::Config;
use crate::jobs::rotation::{self, RotationOutcome};
use crate::token_store::UserCredential;

/// Tally of one orchestrator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Users handed to the pool
    pub dispatched: usize,
    /// Users whose queue was rotated
    pub rotated: usize,
    /// Users with nothing queued
    pub skipped: usize,
    /// Users whose pass failed
    pub failed: usize,
}

impl RunSummary {
    /// Every dispatched user reached an outcome
    pub fn accounted_for(&self) -> bool {
        self.dispatched == self.rotated + self.skipped + self.failed
    }
}

/// Rotate every user's queue, bounded-concurrently
///
/// Infallible by design: per-user errors never escape the pool. The
/// concurrency bound comes from `WORKER_MAX_CONCURRENT_USERS`.
pub async fn run_all(
    spotify: &SpotifyClient,
    metrics: Option<&MetricsClient>,
    config: &Config,
    credentials: Vec<UserCredential>,
) -> RunSummary {
    let mut summary = RunSummary {
        dispatched: credentials.len(),
        ..RunSummary::default()
    };
    let concurrency = config.max_concurrent_users.max(1);

    let outcomes: Vec<_> = stream::iter(credentials.into_iter().map(|credential| {
        let span = tracing::info_span!("user_rotation", user = %credential.key);
        async move {
            let outcome = rotation::execute(spotify, metrics, config, &credential).await;
            (credential.key, outcome)
        }
        .instrument(span)
    }))
    .buffer_unordered(concurrency)
    .collect()
    .await;

    for (user, outcome) in outcomes {
        match outcome {
            Ok(RotationOutcome::Rotated { moved, batches }) => {
                summary.rotated += 1;
                info!(user = %user, moved, batches, "User rotation completed");
            }
            Ok(RotationOutcome::Skipped) => {
                summary.skipped += 1;
                debug!(user = %user, "User had nothing queued");
            }
            Err(e) => {
                summary.failed += 1;
                e.log(&user);
            }
        }
    }

    summary
}
