//! Archive playlist management
//!
//! Recovery snapshots accumulate; this module lists them and deletes them in
//! bulk once the user no longer needs the safety net. Deletion is
//! best-effort and sequential: one failing playlist never aborts the loop.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use provider_spotify::{ArchivePlaylist, SpotifyApi};

use crate::error::Result;

/// One archive playlist that could not be deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveFailure {
    pub id: String,
    pub message: String,
}

/// Result of a bulk archive deletion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePurgeReport {
    pub removed: usize,
    pub failures: Vec<ArchiveFailure>,
}

/// List the user's archive playlists
#[instrument(skip(api, token))]
pub async fn list_archives(api: &dyn SpotifyApi, token: &str) -> Result<Vec<ArchivePlaylist>> {
    let user = api.current_user(token).await?;
    let archives = api.archive_playlists(token, &user.id).await?;
    info!(count = archives.len(), "Listed archive playlists");
    Ok(archives)
}

/// Delete the given archive playlists, collecting per-playlist failures
#[instrument(skip(api, token, playlist_ids), fields(count = playlist_ids.len()))]
pub async fn purge_archives(
    api: &dyn SpotifyApi,
    token: &str,
    playlist_ids: &[String],
) -> ArchivePurgeReport {
    let mut report = ArchivePurgeReport::default();

    for id in playlist_ids.iter().filter(|id| !id.is_empty()) {
        match api.unfollow_playlist(token, id).await {
            Ok(()) => report.removed += 1,
            Err(error) => {
                warn!(playlist_id = %id, error = %error, "Failed to delete archive playlist");
                report.failures.push(ArchiveFailure {
                    id: id.clone(),
                    message: "Failed to delete playlist.".to_string(),
                });
            }
        }
    }

    info!(
        removed = report.removed,
        failures = report.failures.len(),
        "Purged archive playlists"
    );
    report
}
