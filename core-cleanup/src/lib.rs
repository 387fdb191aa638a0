//! # Cleanup Core
//!
//! Safe mutation orchestration for Spotify library cleanup.
//!
//! ## Overview
//!
//! Nothing destructive happens without a verified recovery copy first. A run
//! walks `Snapshotting → Verifying → Mutating`: the removal set is copied
//! into a freshly created archive playlist, the archive's reported total is
//! polled until it matches, and only then are per-scope removals issued.
//! Scope failures are collected into the report without aborting sibling
//! scopes; a failed verification aborts the run before any removal.
//!
//! Also here: library aggregation ([`library`]), artist cleanup planning
//! ([`artists`]), and archive management ([`archives`]).
//!
//! ## Usage
//!
//! ```ignore
//! use core_cleanup::{CleanupOrchestrator, DuplicateCleanupPlan};
//! use core_duplicates::{build_groups_from_playlist, build_removal_plan, selected_items, ScanSource};
//!
//! let scan = build_groups_from_playlist(&entries);
//! let selected = selected_items(&scan.groups, &scan.defaults);
//! let plan = DuplicateCleanupPlan {
//!     source: source.clone(),
//!     plan: build_removal_plan(&selected, &source),
//! };
//!
//! let orchestrator = CleanupOrchestrator::new(api);
//! let report = orchestrator.execute_duplicate_cleanup(&token, &plan).await?;
//! ```

pub mod archives;
pub mod artists;
pub mod config;
pub mod error;
pub mod library;
pub mod orchestrator;
pub mod phase;
pub mod report;

pub use archives::{list_archives, purge_archives, ArchiveFailure, ArchivePurgeReport};
pub use artists::{
    artist_list, artist_stats, build_cleanup_plan, featured_only_artists, playlist_impact,
    track_candidates, tracks_with_sources, ArtistSort, ArtistStats, ArtistSummary, PlaylistImpact,
    TrackSource, TrackWithSources, LIKED_SOURCE_KEY,
};
pub use config::CleanupConfig;
pub use error::{CleanupError, Result};
pub use library::{
    load_library_meta, load_library_summary, LibraryMeta, LibrarySummary, PlaylistMeta,
    PlaylistWithTracks, ScanProgress,
};
pub use orchestrator::{CleanupOrchestrator, CleanupPlan, DuplicateCleanupPlan, PlaylistRemoval};
pub use phase::CleanupPhase;
pub use report::{CleanupReport, DuplicateCleanupReport, FailureRecord, FailureScope};
