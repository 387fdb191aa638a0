//! # Duplicate Detection Engine
//!
//! Groups library items into exact duplicates (identical track id within one
//! positional scope) and potential duplicates (identical normalized
//! title + primary-artist key), each with a deterministic default
//! keep/remove partition.
//!
//! Exact identity collisions are unambiguous and safe to preselect for
//! removal; fuzzy title/artist collisions (a remaster vs. the original, say)
//! are common false positives and always default to keep.

pub mod normalize;
pub mod plan;
pub mod scan;
pub mod types;

pub use normalize::{match_key, normalize};
pub use plan::{build_removal_plan, RemovalPlan, ScanSource};
pub use scan::{
    build_groups_from_liked, build_groups_from_playlist, scan_percent, scan_summary,
    selected_items,
};
pub use types::{DuplicateGroup, DuplicateItem, DuplicateScan, GroupKind, ScanSummary};
