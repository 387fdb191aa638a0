//! Run result types
//!
//! Scope failures are reported individually, never merged: each record is
//! independently addressable for display and retry.

use provider_spotify::Playlist;
use serde::{Deserialize, Serialize};

/// Which kind of scope a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureScope {
    Liked,
    Playlist,
}

/// One failed removal sub-operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub scope: FailureScope,
    /// Scope identity, absent for the singleton liked collection
    pub id: Option<String>,
    pub message: String,
}

/// Aggregate result of an artist cleanup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Tracks removed from the liked collection
    pub removed_from_liked: usize,
    /// Playlists whose removal call succeeded
    pub playlists_updated: usize,
    /// Distinct tracks in the removal set
    pub removed_tracks: usize,
    /// The verified recovery snapshot, `None` when nothing was removed
    pub archive_playlist: Option<Playlist>,
    /// Per-scope failures; empty on full success
    pub failures: Vec<FailureRecord>,
}

impl CleanupReport {
    pub fn is_full_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Aggregate result of a duplicate cleanup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCleanupReport {
    pub removed_from_liked: usize,
    pub removed_from_playlist: usize,
    /// Distinct tracks in the removal set
    pub removed_tracks: usize,
    pub archive_playlist: Option<Playlist>,
    pub failures: Vec<FailureRecord>,
}

impl DuplicateCleanupReport {
    pub fn is_full_success(&self) -> bool {
        self.failures.is_empty()
    }
}
