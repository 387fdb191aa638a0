//! Library aggregation
//!
//! Builds the two views collaborators scan from: lightweight metadata (scope
//! names and totals, for pickers and progress denominators) and the full
//! summary (every track of every scope). Per-scope fetches run through the
//! bounded worker pool so large playlist collections cannot fan out past the
//! remote rate ceilings.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use provider_spotify::{map_concurrently, SpotifyApi, SpotifyError, Track, User};

use crate::config::CleanupConfig;
use crate::error::Result;

/// One owned playlist with its declared total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistMeta {
    pub id: String,
    pub name: String,
    pub track_total: u64,
}

/// Scope metadata for the whole library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryMeta {
    pub user: User,
    pub playlists: Vec<PlaylistMeta>,
    pub liked_total: u64,
}

/// One owned playlist with its full contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistWithTracks {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Full library contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySummary {
    pub user: User,
    pub liked_tracks: Vec<Track>,
    pub playlists: Vec<PlaylistWithTracks>,
}

/// Load scope metadata: owned playlists with totals, plus the liked total
#[instrument(skip(api, token, config))]
pub async fn load_library_meta(
    api: &dyn SpotifyApi,
    token: &str,
    config: &CleanupConfig,
) -> Result<LibraryMeta> {
    let user = api.current_user(token).await?;
    let playlists = api.owned_playlists(token, &user.id).await?;

    let playlists = map_concurrently(playlists, config.totals_concurrency, |playlist, _| {
        async move {
            let track_total = api.playlist_track_total(token, &playlist.id).await?;
            Ok::<_, SpotifyError>(PlaylistMeta {
                id: playlist.id,
                name: playlist.name,
                track_total,
            })
        }
    })
    .await?;

    let liked_total = api.liked_total(token).await?;

    info!(
        playlists = playlists.len(),
        liked_total, "Loaded library metadata"
    );
    Ok(LibraryMeta {
        user,
        playlists,
        liked_total,
    })
}

/// Load the full library: liked tracks plus every owned playlist's contents
#[instrument(skip(api, token, config))]
pub async fn load_library_summary(
    api: &dyn SpotifyApi,
    token: &str,
    config: &CleanupConfig,
) -> Result<LibrarySummary> {
    let user = api.current_user(token).await?;
    let playlists = api.owned_playlists(token, &user.id).await?;

    let playlists = map_concurrently(playlists, config.contents_concurrency, |playlist, _| {
        async move {
            let tracks = api.playlist_tracks(token, &playlist.id).await?;
            Ok::<_, SpotifyError>(PlaylistWithTracks {
                id: playlist.id,
                name: playlist.name,
                tracks,
            })
        }
    })
    .await?;

    let liked_tracks = api.liked_tracks(token).await?;

    info!(
        playlists = playlists.len(),
        liked = liked_tracks.len(),
        "Loaded library summary"
    );
    Ok(LibrarySummary {
        user,
        liked_tracks,
        playlists,
    })
}

/// Progress of a library scan, counted in scopes and tracks
///
/// Track counts become available once metadata is loaded; until then the
/// scope counts drive the percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    pub completed_sources: usize,
    pub total_sources: usize,
    pub completed_tracks: usize,
    pub total_tracks: usize,
}

impl ScanProgress {
    /// Clamped 0-100 percentage
    pub fn percent(&self) -> u8 {
        let (completed, total) = if self.total_tracks > 0 {
            (self.completed_tracks, self.total_tracks)
        } else {
            (self.completed_sources, self.total_sources)
        };
        if total == 0 {
            return 0;
        }
        let percent = (completed as f64 / total as f64 * 100.0).round();
        percent.min(100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_prefers_track_counts() {
        let progress = ScanProgress {
            completed_sources: 1,
            total_sources: 2,
            completed_tracks: 30,
            total_tracks: 120,
        };
        assert_eq!(progress.percent(), 25);
    }

    #[test]
    fn test_percent_falls_back_to_sources() {
        let progress = ScanProgress {
            completed_sources: 1,
            total_sources: 4,
            completed_tracks: 0,
            total_tracks: 0,
        };
        assert_eq!(progress.percent(), 25);
    }

    #[test]
    fn test_percent_clamps_and_handles_empty() {
        assert_eq!(ScanProgress::default().percent(), 0);

        let over = ScanProgress {
            completed_tracks: 10,
            total_tracks: 5,
            ..Default::default()
        };
        assert_eq!(over.percent(), 100);
    }
}
