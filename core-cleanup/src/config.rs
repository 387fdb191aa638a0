//! Cleanup configuration

use std::time::Duration;

/// Knobs for one cleanup run
///
/// Defaults match observed remote behavior: totals fetches tolerate a wider
/// pool than full-content fetches, and freshly written playlist totals can
/// lag by a second or two.
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// Worker pool size for per-playlist totals fetches
    pub totals_concurrency: usize,

    /// Worker pool size for full playlist-content fetches
    pub contents_concurrency: usize,

    /// Number of archive verification polls before giving up
    pub verify_attempts: u32,

    /// Pause between verification polls
    pub verify_delay: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            totals_concurrency: 4,
            contents_concurrency: 3,
            verify_attempts: 3,
            verify_delay: Duration::from_secs(1),
        }
    }
}
