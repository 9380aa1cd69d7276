//! Per-user playlist rotation job
//!
//! Moves every eligible track from the user's queue playlist
//! ("Tomorrow") into the destination playlist ("Today"): the first batch
//! replaces the destination's prior contents, later batches append, and
//! each batch is removed from the queue immediately after it lands. All
//! batches respect the provider's 100-item mutation limit and run
//! strictly in source order.

use rotify_metrics_client::MetricsClient;
use rotify_spotify_client::{
    Playlist, PlaylistItem, SpotifyClient, UserClient, MAX_ITEMS_PER_CALL,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{RotationError, RotationResult};
use crate::token_store::UserCredential;

/// Metric recording how many eligible tracks were queued before rotation
pub const TRACKS_QUEUED_METRIC: &str = "tracks_queued";

/// Description given to the queue playlist when it has to be created
pub const SOURCE_PLAYLIST_DESCRIPTION: &str =
    "Tracks queued for promotion on the next rotation.";

/// Description given to the destination playlist when it has to be created
pub const DEST_PLAYLIST_DESCRIPTION: &str = "Tracks promoted by the most recent rotation.";

/// Outcome of one rotation pass for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The queue had no eligible tracks; no call was made, no metric emitted
    Skipped,
    /// Tracks were moved
    Rotated { moved: usize, batches: usize },
}

/// Run a full rotation pass for one user
///
/// Refreshes the access token, resolves both playlists (creating them if
/// absent), fetches and filters the queued tracks, then delegates to
/// [`rotate`]. Every failure is returned as a value for the orchestrator
/// to match on.
pub async fn execute(
    spotify: &SpotifyClient,
    metrics: Option<&MetricsClient>,
    config: &Config,
    credential: &UserCredential,
) -> RotationResult<RotationOutcome> {
    let user = spotify.authenticate(&credential.refresh_token).await?;

    let profile = user
        .current_user()
        .await?
        .ok_or_else(|| RotationError::InvalidUser {
            user: credential.key.clone(),
        })?;

    // Both playlists are resolved (and created when missing) before any
    // item pagination or mutation touches either of them.
    let library = user.list_all_playlists().await?;
    let source = resolve_playlist(
        &user,
        &library,
        &profile.id,
        &config.source_playlist,
        SOURCE_PLAYLIST_DESCRIPTION,
    )
    .await?;
    let dest = resolve_playlist(
        &user,
        &library,
        &profile.id,
        &config.dest_playlist,
        DEST_PLAYLIST_DESCRIPTION,
    )
    .await?;

    let items = user.list_all_playlist_items(&source.id).await?;
    let uris = eligible_uris(&items);
    debug!(
        queued = items.len(),
        eligible = uris.len(),
        "Fetched queue playlist"
    );

    rotate(&user, metrics, &credential.key, &source, &dest, &uris).await
}

/// Find a playlist by exact name in the user's library, creating it when
/// absent
///
/// Duplicate names resolve to the first match in provider-returned
/// order; that order is not guaranteed stable across calls, so the
/// ambiguity is surfaced in the log.
async fn resolve_playlist(
    user: &UserClient,
    library: &[Playlist],
    owner_id: &str,
    name: &str,
    description: &str,
) -> RotationResult<Playlist> {
    let matches = library.iter().filter(|p| p.name == name).count();
    if matches > 1 {
        warn!(
            name = %name,
            count = matches,
            "Multiple playlists share the rotation name, using the first"
        );
    }

    if let Some(playlist) = library.iter().find(|p| p.name == name) {
        return Ok(playlist.clone());
    }

    info!(name = %name, "Playlist not found, creating it");
    let created = user.create_playlist(owner_id, name, description).await?;
    Ok(created)
}

/// Keep the uris of items that carry a catalog track id, in source order
fn eligible_uris(items: &[PlaylistItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter(|track| track.id.is_some())
        .map(|track| track.uri.clone())
        .collect()
}

/// Move the given uris from `source` into `dest` in provider-sized batches
///
/// The first batch replaces `dest`'s prior contents; every later batch
/// appends. Each batch is removed from `source` immediately after it is
/// written, with the same uris, so the add/remove pair is the unit of
/// forward progress. A failed call aborts the remaining batches without
/// rolling back completed ones; the tracks still in `source` are picked
/// up by the next pass.
pub async fn rotate(
    user: &UserClient,
    metrics: Option<&MetricsClient>,
    user_key: &str,
    source: &Playlist,
    dest: &Playlist,
    uris: &[String],
) -> RotationResult<RotationOutcome> {
    if uris.is_empty() {
        debug!("Queue playlist is empty, nothing to rotate");
        return Ok(RotationOutcome::Skipped);
    }

    if let Some(metrics) = metrics {
        metrics
            .publish(
                TRACKS_QUEUED_METRIC,
                uris.len() as f64,
                &[("user", user_key)],
            )
            .await?;
    }

    let mut chunks = uris.chunks(MAX_ITEMS_PER_CALL);
    let mut batches = 0;

    if let Some(first) = chunks.next() {
        user.replace_items(&dest.id, first).await?;
        user.remove_items(&source.id, first).await?;
        batches += 1;
    }

    for chunk in chunks {
        user.add_items(&dest.id, chunk).await?;
        user.remove_items(&source.id, chunk).await?;
        batches += 1;
    }

    info!(moved = uris.len(), batches, "Rotation pass completed");
    Ok(RotationOutcome::Rotated {
        moved: uris.len(),
        batches,
    })
}
