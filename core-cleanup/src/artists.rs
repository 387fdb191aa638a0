//! Artist cleanup planning
//!
//! Pure planning over a loaded [`LibrarySummary`]: merge scopes into
//! per-track source lists, rank artists, select candidate tracks, preview
//! per-scope impact, and build the final [`CleanupPlan`].

use std::collections::{HashMap, HashSet};

use provider_spotify::Track;
use serde::{Deserialize, Serialize};

use crate::library::LibrarySummary;
use crate::orchestrator::{CleanupPlan, PlaylistRemoval};

/// Selection key for the liked collection in per-scope toggles and impact
/// listings
pub const LIKED_SOURCE_KEY: &str = "liked";

/// Where a track was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TrackSource {
    Liked,
    Playlist { id: String, name: String },
}

impl TrackSource {
    fn matches(&self, other: &TrackSource) -> bool {
        match (self, other) {
            (TrackSource::Liked, TrackSource::Liked) => true,
            (TrackSource::Playlist { id: a, .. }, TrackSource::Playlist { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// A track with every scope it appears in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackWithSources {
    pub track: Track,
    pub sources: Vec<TrackSource>,
}

/// Merge the library into one entry per track id, with deduplicated sources
pub fn tracks_with_sources(summary: &LibrarySummary) -> Vec<TrackWithSources> {
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, TrackWithSources> = HashMap::new();

    let mut add_track = |track: &Track, source: TrackSource| {
        if let Some(existing) = by_id.get_mut(&track.id) {
            if !existing.sources.iter().any(|s| s.matches(&source)) {
                existing.sources.push(source);
            }
            return;
        }
        order.push(track.id.clone());
        by_id.insert(
            track.id.clone(),
            TrackWithSources {
                track: track.clone(),
                sources: vec![source],
            },
        );
    };

    for track in &summary.liked_tracks {
        add_track(track, TrackSource::Liked);
    }
    for playlist in &summary.playlists {
        for track in &playlist.tracks {
            add_track(
                track,
                TrackSource::Playlist {
                    id: playlist.id.clone(),
                    name: playlist.name.clone(),
                },
            );
        }
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect()
}

/// Per-artist occurrence statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistStats {
    pub id: String,
    pub name: String,
    /// Distinct tracks crediting this artist anywhere
    pub track_ids: HashSet<String>,
    /// Distinct tracks where this artist is the primary credit
    pub primary_track_ids: HashSet<String>,
}

/// Collect per-artist statistics over the merged library
pub fn artist_stats(tracks: &[TrackWithSources]) -> HashMap<String, ArtistStats> {
    let mut stats: HashMap<String, ArtistStats> = HashMap::new();

    for entry in tracks {
        let primary_id = entry.track.primary_artist().map(|artist| artist.id.clone());
        for artist in &entry.track.artists {
            let record = stats
                .entry(artist.id.clone())
                .or_insert_with(|| ArtistStats {
                    id: artist.id.clone(),
                    name: artist.name.clone(),
                    track_ids: HashSet::new(),
                    primary_track_ids: HashSet::new(),
                });
            record.track_ids.insert(entry.track.id.clone());
            if primary_id.as_deref() == Some(artist.id.as_str()) {
                record.primary_track_ids.insert(entry.track.id.clone());
            }
        }
    }

    stats
}

/// Sort order for artist listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtistSort {
    CountDesc,
    CountAsc,
    NameAsc,
    NameDesc,
}

/// One artist in a ranked listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub count: usize,
}

fn compare(sort: ArtistSort, a: &ArtistSummary, b: &ArtistSummary) -> std::cmp::Ordering {
    let primary = match sort {
        ArtistSort::NameAsc => a.name.cmp(&b.name),
        ArtistSort::NameDesc => b.name.cmp(&a.name),
        ArtistSort::CountAsc => a.count.cmp(&b.count),
        ArtistSort::CountDesc => b.count.cmp(&a.count),
    };
    primary.then_with(|| a.name.cmp(&b.name))
}

/// Ranked artist listing
///
/// With `include_featured_only` unset, artists that never hold the primary
/// credit are hidden (removing their tracks would mostly hit other artists'
/// songs).
pub fn artist_list(
    stats: &HashMap<String, ArtistStats>,
    sort: ArtistSort,
    include_featured_only: bool,
) -> Vec<ArtistSummary> {
    let mut artists: Vec<ArtistSummary> = stats
        .values()
        .filter(|artist| include_featured_only || !artist.primary_track_ids.is_empty())
        .map(|artist| ArtistSummary {
            id: artist.id.clone(),
            name: artist.name.clone(),
            count: artist.track_ids.len(),
        })
        .collect();
    artists.sort_by(|a, b| compare(sort, a, b));
    artists
}

/// Artists that only ever appear as featured credits
pub fn featured_only_artists(
    stats: &HashMap<String, ArtistStats>,
    sort: ArtistSort,
) -> Vec<ArtistSummary> {
    let mut artists: Vec<ArtistSummary> = stats
        .values()
        .filter(|artist| artist.primary_track_ids.is_empty())
        .map(|artist| ArtistSummary {
            id: artist.id.clone(),
            name: artist.name.clone(),
            count: artist.track_ids.len(),
        })
        .collect();
    artists.sort_by(|a, b| compare(sort, a, b));
    artists
}

/// Tracks credited to any selected artist, preselected for removal
pub fn track_candidates(
    tracks: &[TrackWithSources],
    selected_artist_ids: &[String],
) -> (Vec<TrackWithSources>, HashMap<String, bool>) {
    let selected: HashSet<&str> = selected_artist_ids.iter().map(String::as_str).collect();

    let candidates: Vec<TrackWithSources> = tracks
        .iter()
        .filter(|entry| {
            entry
                .track
                .artists
                .iter()
                .any(|artist| selected.contains(artist.id.as_str()))
        })
        .cloned()
        .collect();

    let selection = candidates
        .iter()
        .map(|entry| (entry.track.id.clone(), true))
        .collect();

    (candidates, selection)
}

/// Per-scope track counts of a pending selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistImpact {
    /// Scope key: a playlist id, or [`LIKED_SOURCE_KEY`]
    pub id: String,
    pub label: String,
    pub track_count: usize,
}

/// Count how many selected tracks each scope would lose
pub fn playlist_impact(selected: &[TrackWithSources]) -> Vec<PlaylistImpact> {
    let mut order: Vec<String> = Vec::new();
    let mut impact: HashMap<String, PlaylistImpact> = HashMap::new();

    for entry in selected {
        for source in &entry.sources {
            let (key, label) = match source {
                TrackSource::Liked => (LIKED_SOURCE_KEY.to_string(), "Liked Songs".to_string()),
                TrackSource::Playlist { id, name } => (id.clone(), name.clone()),
            };
            let record = impact.entry(key.clone()).or_insert_with(|| {
                order.push(key.clone());
                PlaylistImpact {
                    id: key,
                    label,
                    track_count: 0,
                }
            });
            record.track_count += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|key| impact.remove(&key))
        .collect()
}

/// Build the cleanup plan from selected tracks and per-scope toggles
///
/// `selected_sources` maps scope keys (playlist id or [`LIKED_SOURCE_KEY`])
/// to whether that scope participates. A track deselected everywhere stays
/// out of the snapshot union.
pub fn build_cleanup_plan(
    selected: &[TrackWithSources],
    selected_sources: &HashMap<String, bool>,
) -> CleanupPlan {
    let liked_enabled = selected_sources
        .get(LIKED_SOURCE_KEY)
        .copied()
        .unwrap_or(false);

    let mut liked_ids: Vec<String> = Vec::new();
    let mut seen_liked: HashSet<String> = HashSet::new();

    let mut playlist_order: Vec<String> = Vec::new();
    let mut playlist_uris: HashMap<String, Vec<String>> = HashMap::new();

    let mut removed_uris: Vec<String> = Vec::new();
    let mut seen_removed: HashSet<String> = HashSet::new();

    for entry in selected {
        let mut removed_somewhere = false;

        for source in &entry.sources {
            match source {
                TrackSource::Liked => {
                    if liked_enabled && seen_liked.insert(entry.track.id.clone()) {
                        liked_ids.push(entry.track.id.clone());
                    }
                    if liked_enabled {
                        removed_somewhere = true;
                    }
                }
                TrackSource::Playlist { id, .. } => {
                    if !selected_sources.get(id).copied().unwrap_or(false) {
                        continue;
                    }
                    let uris = playlist_uris.entry(id.clone()).or_insert_with(|| {
                        playlist_order.push(id.clone());
                        Vec::new()
                    });
                    uris.push(entry.track.uri.clone());
                    removed_somewhere = true;
                }
            }
        }

        if removed_somewhere && seen_removed.insert(entry.track.uri.clone()) {
            removed_uris.push(entry.track.uri.clone());
        }
    }

    let playlist_removals = playlist_order
        .into_iter()
        .filter_map(|id| {
            playlist_uris.remove(&id).map(|uris| PlaylistRemoval {
                playlist_id: id,
                uris,
            })
        })
        .collect();

    CleanupPlan {
        liked_track_ids: liked_ids,
        playlist_removals,
        removed_track_uris: removed_uris,
    }
}
