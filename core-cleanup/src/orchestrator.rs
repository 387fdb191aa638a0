//! Safe mutation orchestrator
//!
//! Walks one cleanup run through snapshot → verify → mutate. The core
//! invariant: no destructive call is issued unless the recovery copy is
//! confirmed complete. Remote totals reads are not immediately consistent
//! after writes, so verification polls with a bounded budget; exhausting it
//! fails the whole run before any removal happens.
//!
//! Once the snapshot is verified, each scope's removal is attempted
//! independently: one scope failing becomes a [`FailureRecord`] and never
//! blocks the remaining scopes.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_duplicates::{RemovalPlan, ScanSource};
use provider_spotify::{Playlist, PositionedRemoval, SpotifyApi, ARCHIVE_DESCRIPTION, ARCHIVE_PREFIX};
use serde::{Deserialize, Serialize};

use crate::config::CleanupConfig;
use crate::error::{CleanupError, Result};
use crate::phase::{advance, CleanupPhase};
use crate::report::{CleanupReport, DuplicateCleanupReport, FailureRecord, FailureScope};

/// Removal set for one playlist scope of an artist cleanup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRemoval {
    pub playlist_id: String,
    pub uris: Vec<String>,
}

/// Artist cleanup plan: what to remove from which scopes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupPlan {
    /// Track ids to remove from the liked collection
    pub liked_track_ids: Vec<String>,
    /// Per-playlist uri sets
    pub playlist_removals: Vec<PlaylistRemoval>,
    /// Union of every affected uri, for the recovery snapshot
    pub removed_track_uris: Vec<String>,
}

/// Duplicate cleanup plan: a removal plan bound to its source scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCleanupPlan {
    pub source: ScanSource,
    pub plan: RemovalPlan,
}

/// Orchestrates verify-then-mutate cleanup runs
pub struct CleanupOrchestrator {
    api: Arc<dyn SpotifyApi>,
    config: CleanupConfig,
}

impl CleanupOrchestrator {
    /// Create an orchestrator with the default configuration
    pub fn new(api: Arc<dyn SpotifyApi>) -> Self {
        Self::with_config(api, CleanupConfig::default())
    }

    pub fn with_config(api: Arc<dyn SpotifyApi>, config: CleanupConfig) -> Self {
        Self { api, config }
    }

    /// Execute an artist cleanup run
    ///
    /// Snapshots the union removal set, verifies the copy, then removes per
    /// scope. Returns the aggregate report; scope failures are inside it,
    /// not in the `Err` channel.
    #[instrument(
        skip(self, token, plan),
        fields(playlists = plan.playlist_removals.len(), liked = plan.liked_track_ids.len())
    )]
    pub async fn execute_cleanup(&self, token: &str, plan: &CleanupPlan) -> Result<CleanupReport> {
        let mut phase = CleanupPhase::Idle;
        let snapshot_uris = unique_uris(&plan.removed_track_uris);

        let archive_playlist = if snapshot_uris.is_empty() {
            None
        } else {
            let name = archive_name(&date_label());
            Some(
                self.create_verified_archive(token, &snapshot_uris, &name, &mut phase)
                    .await?,
            )
        };

        advance(&mut phase, CleanupPhase::Mutating);

        let mut failures: Vec<FailureRecord> = Vec::new();
        let mut playlists_updated = 0;
        let mut removed_from_liked = 0;

        for removal in &plan.playlist_removals {
            if removal.uris.is_empty() {
                continue;
            }
            match self
                .api
                .remove_playlist_tracks(token, &removal.playlist_id, &removal.uris)
                .await
            {
                Ok(()) => playlists_updated += 1,
                Err(error) => {
                    warn!(
                        playlist_id = %removal.playlist_id,
                        error = %error,
                        "Failed to remove tracks from playlist"
                    );
                    failures.push(FailureRecord {
                        scope: FailureScope::Playlist,
                        id: Some(removal.playlist_id.clone()),
                        message: "Failed to remove some tracks from a playlist.".to_string(),
                    });
                }
            }
        }

        if !plan.liked_track_ids.is_empty() {
            match self
                .api
                .remove_saved_tracks(token, &plan.liked_track_ids)
                .await
            {
                Ok(()) => removed_from_liked = plan.liked_track_ids.len(),
                Err(error) => {
                    warn!(error = %error, "Failed to remove liked songs");
                    failures.push(FailureRecord {
                        scope: FailureScope::Liked,
                        id: None,
                        message: "Failed to remove some tracks from Liked Songs.".to_string(),
                    });
                }
            }
        }

        advance(&mut phase, CleanupPhase::Done);
        info!(
            removed_from_liked,
            playlists_updated,
            failures = failures.len(),
            "Cleanup run finished"
        );

        Ok(CleanupReport {
            removed_from_liked,
            playlists_updated,
            removed_tracks: snapshot_uris.len(),
            archive_playlist,
            failures,
        })
    }

    /// Execute a duplicate cleanup run against one scope
    #[instrument(skip(self, token, plan))]
    pub async fn execute_duplicate_cleanup(
        &self,
        token: &str,
        plan: &DuplicateCleanupPlan,
    ) -> Result<DuplicateCleanupReport> {
        let mut phase = CleanupPhase::Idle;
        let snapshot_uris = unique_uris(&plan.plan.removed_track_uris);

        let archive_playlist = if snapshot_uris.is_empty() {
            None
        } else {
            let name = duplicate_archive_name(plan.source.name(), &date_label());
            Some(
                self.create_verified_archive(token, &snapshot_uris, &name, &mut phase)
                    .await?,
            )
        };

        advance(&mut phase, CleanupPhase::Mutating);

        let mut failures: Vec<FailureRecord> = Vec::new();
        let mut removed_from_liked = 0;
        let mut removed_from_playlist = 0;

        match &plan.source {
            ScanSource::Playlist { id, .. } => {
                let positional: Vec<PositionedRemoval> = plan
                    .plan
                    .playlist_track_positions
                    .iter()
                    .filter(|removal| !removal.positions.is_empty())
                    .cloned()
                    .collect();

                if !positional.is_empty() {
                    match self
                        .api
                        .remove_playlist_occurrences(token, id, &positional)
                        .await
                    {
                        Ok(()) => {
                            removed_from_playlist += positional
                                .iter()
                                .map(|removal| removal.positions.len())
                                .sum::<usize>();
                        }
                        Err(error) => {
                            warn!(
                                playlist_id = %id,
                                error = %error,
                                "Failed to remove duplicate positions from playlist"
                            );
                            failures.push(FailureRecord {
                                scope: FailureScope::Playlist,
                                id: Some(id.clone()),
                                message: "Failed to remove some duplicate positions.".to_string(),
                            });
                        }
                    }
                }

                if !plan.plan.playlist_track_uris.is_empty() {
                    match self
                        .api
                        .remove_playlist_tracks(token, id, &plan.plan.playlist_track_uris)
                        .await
                    {
                        Ok(()) => removed_from_playlist += plan.plan.playlist_track_uris.len(),
                        Err(error) => {
                            warn!(
                                playlist_id = %id,
                                error = %error,
                                "Failed to remove duplicate tracks from playlist"
                            );
                            failures.push(FailureRecord {
                                scope: FailureScope::Playlist,
                                id: Some(id.clone()),
                                message: "Failed to remove some duplicate tracks.".to_string(),
                            });
                        }
                    }
                }
            }
            ScanSource::Liked => {
                if !plan.plan.liked_track_ids.is_empty() {
                    match self
                        .api
                        .remove_saved_tracks(token, &plan.plan.liked_track_ids)
                        .await
                    {
                        Ok(()) => removed_from_liked = plan.plan.liked_track_ids.len(),
                        Err(error) => {
                            warn!(error = %error, "Failed to remove duplicates from Liked Songs");
                            failures.push(FailureRecord {
                                scope: FailureScope::Liked,
                                id: None,
                                message: "Failed to remove some duplicates from Liked Songs."
                                    .to_string(),
                            });
                        }
                    }
                }
            }
        }

        advance(&mut phase, CleanupPhase::Done);
        info!(
            removed_from_liked,
            removed_from_playlist,
            failures = failures.len(),
            "Duplicate cleanup run finished"
        );

        Ok(DuplicateCleanupReport {
            removed_from_liked,
            removed_from_playlist,
            removed_tracks: snapshot_uris.len(),
            archive_playlist,
            failures,
        })
    }

    /// Create the archive playlist, copy the removal set into it, and poll
    /// its total until it matches
    ///
    /// Any error here is pipeline-fatal; the caller has not mutated anything
    /// yet.
    async fn create_verified_archive(
        &self,
        token: &str,
        uris: &[String],
        name: &str,
        phase: &mut CleanupPhase,
    ) -> Result<Playlist> {
        advance(phase, CleanupPhase::Snapshotting);

        let user = self.api.current_user(token).await?;
        let archive = self
            .api
            .create_playlist(token, &user.id, name, ARCHIVE_DESCRIPTION)
            .await?;
        self.api
            .add_tracks_to_playlist(token, &archive.id, uris)
            .await?;

        advance(phase, CleanupPhase::Verifying);

        let expected = uris.len();
        let mut observed = 0u64;

        for attempt in 0..self.config.verify_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.config.verify_delay).await;
            }
            observed = self.api.playlist_track_total(token, &archive.id).await?;
            if observed as usize == expected {
                info!(archive_id = %archive.id, expected, "Archive verified");
                return Ok(archive);
            }
            warn!(
                attempt,
                observed, expected, "Archive total does not match yet"
            );
        }

        advance(phase, CleanupPhase::Failed);
        Err(CleanupError::Verification { expected, observed })
    }
}

/// Deduplicate uris preserving first-seen order
fn unique_uris(uris: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    uris.iter()
        .filter(|uri| seen.insert(uri.as_str()))
        .cloned()
        .collect()
}

fn date_label() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Archive playlist name for an artist cleanup run
fn archive_name(date: &str) -> String {
    format!("{} — {}", ARCHIVE_PREFIX, date)
}

/// Archive playlist name for a duplicate cleanup run
fn duplicate_archive_name(source_name: Option<&str>, date: &str) -> String {
    match source_name {
        Some(source) => format!("{} — Duplicates — {} — {}", ARCHIVE_PREFIX, source, date),
        None => format!("{} — Duplicates — {}", ARCHIVE_PREFIX, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_uris_preserves_first_seen_order() {
        let uris = vec![
            "spotify:track:b".to_string(),
            "spotify:track:a".to_string(),
            "spotify:track:b".to_string(),
        ];

        assert_eq!(
            unique_uris(&uris),
            vec!["spotify:track:b", "spotify:track:a"]
        );
    }

    #[test]
    fn test_archive_names_carry_the_prefix() {
        let name = archive_name("2024-06-01");
        assert_eq!(name, "Removed by Spotify Cleanup Tool — 2024-06-01");
        assert!(name.starts_with(ARCHIVE_PREFIX));
    }

    #[test]
    fn test_duplicate_archive_name_includes_source() {
        assert_eq!(
            duplicate_archive_name(Some("Road Trip"), "2024-06-01"),
            "Removed by Spotify Cleanup Tool — Duplicates — Road Trip — 2024-06-01"
        );
        assert_eq!(
            duplicate_archive_name(None, "2024-06-01"),
            "Removed by Spotify Cleanup Tool — Duplicates — 2024-06-01"
        );
    }
}
