//! Removal plan construction
//!
//! Turns a confirmed selection of duplicate items into the write-side plan:
//! ids for the liked scope, uris for whole-entry playlist removal, explicit
//! uri + position pairs where same-id occurrences must be disambiguated, and
//! the union of affected uris for snapshotting.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use provider_spotify::PositionedRemoval;

use crate::types::DuplicateItem;

/// The scope a duplicate scan ran against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScanSource {
    Liked,
    Playlist { id: String, name: String },
}

impl ScanSource {
    /// Display name of the scope, if it has one
    pub fn name(&self) -> Option<&str> {
        match self {
            ScanSource::Liked => None,
            ScanSource::Playlist { name, .. } => Some(name.as_str()),
        }
    }
}

/// Write-side removal plan for one duplicate cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalPlan {
    /// Track ids to remove from the liked collection
    pub liked_track_ids: Vec<String>,
    /// Uris removed wholesale from the playlist (every occurrence)
    pub playlist_track_uris: Vec<String>,
    /// Uris removed at specific positions only
    pub playlist_track_positions: Vec<PositionedRemoval>,
    /// Union of every affected uri, for the recovery snapshot
    pub removed_track_uris: Vec<String>,
}

impl RemovalPlan {
    /// True when nothing would be removed anywhere
    pub fn is_empty(&self) -> bool {
        self.removed_track_uris.is_empty()
    }
}

/// Build the removal plan for a selection against one scope
///
/// Positional members route into the uri → positions map (sorted,
/// deduplicated); a uri with positional entries is demoted from the
/// whole-entry set so the two forms never overlap.
pub fn build_removal_plan(selected: &[DuplicateItem], source: &ScanSource) -> RemovalPlan {
    let mut liked_ids: Vec<String> = Vec::new();
    let mut seen_liked: HashSet<String> = HashSet::new();

    let mut whole_uris: Vec<String> = Vec::new();
    let mut seen_whole: HashSet<String> = HashSet::new();

    let mut position_order: Vec<String> = Vec::new();
    let mut positions: HashMap<String, BTreeSet<usize>> = HashMap::new();

    let mut removed_uris: Vec<String> = Vec::new();
    let mut seen_removed: HashSet<String> = HashSet::new();

    for item in selected {
        if seen_removed.insert(item.track.uri.clone()) {
            removed_uris.push(item.track.uri.clone());
        }

        match source {
            ScanSource::Liked => {
                if seen_liked.insert(item.track.id.clone()) {
                    liked_ids.push(item.track.id.clone());
                }
            }
            ScanSource::Playlist { .. } => match item.position {
                Some(position) => {
                    let entry = positions.entry(item.track.uri.clone()).or_insert_with(|| {
                        position_order.push(item.track.uri.clone());
                        BTreeSet::new()
                    });
                    entry.insert(position);
                }
                None => {
                    if seen_whole.insert(item.track.uri.clone()) {
                        whole_uris.push(item.track.uri.clone());
                    }
                }
            },
        }
    }

    // A uri with explicit positions must not also be removed wholesale
    whole_uris.retain(|uri| !positions.contains_key(uri));

    let playlist_track_positions = position_order
        .into_iter()
        .filter_map(|uri| {
            positions.remove(&uri).map(|set| PositionedRemoval {
                positions: set.into_iter().collect(),
                uri,
            })
        })
        .collect();

    RemovalPlan {
        liked_track_ids: liked_ids,
        playlist_track_uris: whole_uris,
        playlist_track_positions,
        removed_track_uris: removed_uris,
    }
}
