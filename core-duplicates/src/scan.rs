//! Duplicate grouping
//!
//! Two entry points, one per source shape: positional scopes (playlists) get
//! exact-id grouping first and fuzzy grouping over the remainder; the liked
//! collection has no positions and gets fuzzy grouping only.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use provider_spotify::{PlaylistEntry, Track};

use crate::normalize::match_key;
use crate::types::{DuplicateGroup, DuplicateItem, DuplicateScan, GroupKind, ScanSummary};

/// Scan a positional scope for exact and potential duplicate groups
///
/// Exact groups (same id, ≥2 occurrences) are sorted by position; the lowest
/// position defaults to keep, the rest to remove. Ids that formed an exact
/// group are excluded from fuzzy matching. Groups come back in discovery
/// order.
pub fn build_groups_from_playlist(entries: &[PlaylistEntry]) -> DuplicateScan {
    let mut scan = DuplicateScan::default();

    // Occurrences per id, insertion-ordered
    let mut id_order: Vec<&str> = Vec::new();
    let mut occurrences: HashMap<&str, Vec<DuplicateItem>> = HashMap::new();

    for entry in entries {
        let id = entry.track.id.as_str();
        let items = occurrences.entry(id).or_insert_with(|| {
            id_order.push(id);
            Vec::new()
        });
        items.push(DuplicateItem {
            key: format!("exact:{}:{}", id, entry.position),
            track: entry.track.clone(),
            position: Some(entry.position),
        });
    }

    let mut duplicated_ids: HashSet<&str> = HashSet::new();

    for &id in &id_order {
        let Some(items) = occurrences.get(id) else {
            continue;
        };
        if items.len() < 2 {
            continue;
        }
        duplicated_ids.insert(id);

        let mut sorted = items.clone();
        sorted.sort_by_key(|item| item.position.unwrap_or(0));

        for (index, item) in sorted.iter().enumerate() {
            scan.defaults.insert(item.key.clone(), index > 0);
        }

        let Some(first) = sorted.first() else {
            continue;
        };
        let subtitle = first
            .track
            .artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        scan.groups.push(DuplicateGroup {
            id: format!("exact:{}", id),
            kind: GroupKind::Exact,
            title: first.track.name.clone(),
            subtitle: Some(subtitle),
            items: sorted,
        });
    }

    // Fuzzy matching over the remainder, one occurrence per id
    let mut seen: HashSet<&str> = HashSet::new();
    let unique: Vec<&Track> = entries
        .iter()
        .filter(|entry| !duplicated_ids.contains(entry.track.id.as_str()))
        .filter(|entry| seen.insert(entry.track.id.as_str()))
        .map(|entry| &entry.track)
        .collect();

    append_potential_groups(unique, &mut scan);

    debug!(
        groups = scan.groups.len(),
        entries = entries.len(),
        "Scanned positional scope for duplicates"
    );
    scan
}

/// Scan the liked collection (no positions) for potential duplicate groups
pub fn build_groups_from_liked(tracks: &[Track]) -> DuplicateScan {
    let mut scan = DuplicateScan::default();
    append_potential_groups(tracks.iter().collect(), &mut scan);

    debug!(
        groups = scan.groups.len(),
        tracks = tracks.len(),
        "Scanned liked collection for duplicates"
    );
    scan
}

/// Group tracks by fuzzy match key; every member defaults to keep
fn append_potential_groups(tracks: Vec<&Track>, scan: &mut DuplicateScan) {
    let mut key_order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, Vec<DuplicateItem>> = HashMap::new();

    for track in tracks {
        let key = match_key(track);
        let items = by_key.entry(key.clone()).or_insert_with(|| {
            key_order.push(key);
            Vec::new()
        });
        items.push(DuplicateItem {
            key: format!("potential:{}", track.id),
            track: track.clone(),
            position: None,
        });
    }

    for key in key_order {
        let Some(items) = by_key.remove(&key) else {
            continue;
        };
        if items.len() < 2 {
            continue;
        }

        for item in &items {
            scan.defaults.insert(item.key.clone(), false);
        }

        let Some(sample) = items.first() else {
            continue;
        };
        let subtitle = sample
            .track
            .primary_artist()
            .map(|artist| artist.name.clone());

        scan.groups.push(DuplicateGroup {
            id: format!("potential:{}", key),
            kind: GroupKind::Potential,
            title: sample.track.name.clone(),
            subtitle,
            items,
        });
    }
}

/// Flatten a keyed selection back to the selected items, in group order
pub fn selected_items(
    groups: &[DuplicateGroup],
    selection: &HashMap<String, bool>,
) -> Vec<DuplicateItem> {
    groups
        .iter()
        .flat_map(|group| group.items.iter())
        .filter(|item| selection.get(&item.key).copied().unwrap_or(false))
        .cloned()
        .collect()
}

/// Group and item counts of a scan
pub fn scan_summary(groups: &[DuplicateGroup]) -> ScanSummary {
    ScanSummary {
        groups: groups.len(),
        items: groups.iter().map(|group| group.items.len()).sum(),
    }
}

/// Clamped 0-100 scan progress
pub fn scan_percent(loaded: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (loaded as f64 / total as f64 * 100.0).round();
    percent.min(100.0) as u8
}
