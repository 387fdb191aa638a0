//! # Spotify Provider
//!
//! The remote client core: a resilient Spotify Web API connector.
//!
//! ## Overview
//!
//! This crate provides:
//! - Paginated listing of liked tracks, playlists, and playlist contents
//! - Bounded retry with exponential backoff, honoring `Retry-After`
//! - Protocol-sized batching for every write operation
//! - Order-preserving bounded concurrency ([`map_concurrently`])
//! - The [`SpotifyApi`] trait seam consumed by the orchestration layers
//!
//! Access tokens are explicit parameters on every operation; obtaining and
//! refreshing them is the host application's concern.

pub mod api;
pub mod concurrency;
pub mod connector;
pub mod error;
pub mod models;
pub mod retry;
pub mod types;

pub use api::SpotifyApi;
pub use concurrency::map_concurrently;
pub use connector::{SpotifyConnector, ARCHIVE_DESCRIPTION, ARCHIVE_PREFIX};
pub use error::{Result, SpotifyError};
pub use models::{
    AlbumRef, ArchivePlaylist, Artist, ArtistProfile, Playlist, PlaylistEntry, PositionedRemoval,
    Track, User,
};
pub use retry::RetrySchedule;
