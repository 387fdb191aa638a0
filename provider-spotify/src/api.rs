//! Spotify API operation surface
//!
//! The trait consumed by the orchestration and aggregation layers. Keeping
//! the seam here lets those layers run against `mockall` doubles while the
//! production path goes through [`SpotifyConnector`](crate::SpotifyConnector).
//!
//! Every operation takes the access token explicitly; token refresh and
//! expiry are the caller's concern.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ArchivePlaylist, ArtistProfile, Playlist, PlaylistEntry, PositionedRemoval, Track, User,
};

/// Authenticated Spotify Web API operations
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Profile of the token's user
    async fn current_user(&self, token: &str) -> Result<User>;

    /// All playlists owned by `user_id`, excluding archive playlists
    async fn owned_playlists(&self, token: &str, user_id: &str) -> Result<Vec<Playlist>>;

    /// Archive playlists owned by `user_id`, with declared totals
    async fn archive_playlists(&self, token: &str, user_id: &str) -> Result<Vec<ArchivePlaylist>>;

    /// Every liked track, fully paginated
    async fn liked_tracks(&self, token: &str) -> Result<Vec<Track>>;

    /// Declared size of the liked collection
    async fn liked_total(&self, token: &str) -> Result<u64>;

    /// Every playable track of a playlist, fully paginated
    async fn playlist_tracks(&self, token: &str, playlist_id: &str) -> Result<Vec<Track>>;

    /// Every playlist entry with its absolute position
    ///
    /// Positions count all wire entries, including unavailable tracks that
    /// are dropped from the result, so they stay valid for positional writes.
    async fn playlist_entries(&self, token: &str, playlist_id: &str)
        -> Result<Vec<PlaylistEntry>>;

    /// Declared track total of a playlist
    async fn playlist_track_total(&self, token: &str, playlist_id: &str) -> Result<u64>;

    /// Batched artist lookups (chunked to the protocol maximum)
    async fn artist_profiles(&self, token: &str, ids: &[String]) -> Result<Vec<ArtistProfile>>;

    /// Create a private playlist owned by `user_id`
    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Playlist>;

    /// Append uris to a playlist, chunked; aborts on the first failed chunk
    async fn add_tracks_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()>;

    /// Remove ids from the liked collection, chunked
    async fn remove_saved_tracks(&self, token: &str, track_ids: &[String]) -> Result<()>;

    /// Remove every occurrence of the given uris from a playlist, chunked
    async fn remove_playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()>;

    /// Remove specific entry positions from a playlist, chunked
    async fn remove_playlist_occurrences(
        &self,
        token: &str,
        playlist_id: &str,
        removals: &[PositionedRemoval],
    ) -> Result<()>;

    /// Stop following (effectively delete) an owned playlist
    async fn unfollow_playlist(&self, token: &str, playlist_id: &str) -> Result<()>;
}
