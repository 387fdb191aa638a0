//! Duplicate scan value types

use provider_spotify::Track;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a group's members relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Identical track id within one positional scope
    Exact,
    /// Identical normalized title + primary-artist key, different ids
    Potential,
}

/// One occurrence of a track inside a scan
///
/// `key` is synthetic and unique within a single scan; selection state is
/// keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateItem {
    pub key: String,
    pub track: Track,
    /// Entry position, only meaningful for positional scopes
    pub position: Option<usize>,
}

/// A non-empty ordered group of related occurrences (always ≥2 members)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub id: String,
    pub kind: GroupKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<DuplicateItem>,
}

/// Result of one duplicate scan
///
/// `defaults` maps item keys to the default removal selection: `true` marks
/// an item preselected for removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateScan {
    pub groups: Vec<DuplicateGroup>,
    pub defaults: HashMap<String, bool>,
}

/// Group and item counts of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub groups: usize,
    pub items: usize,
}
