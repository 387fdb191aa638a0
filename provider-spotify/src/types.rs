//! Spotify Web API response types
//!
//! Data structures for deserializing Spotify Web API responses. Wire values
//! are validated here and converted to domain models at the connector
//! boundary; malformed bodies become parse failures, never partial objects.

use serde::Deserialize;

/// Generic paging object returned by list endpoints
///
/// See: https://developer.spotify.com/documentation/web-api/reference/get-users-saved-tracks
#[derive(Debug, Deserialize)]
pub struct PageObject<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Absolute URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,

    /// Declared total size of the collection
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> PageObject<T> {
    /// An empty terminal page (204 responses)
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next: None,
            total: None,
        }
    }
}

/// Image resource with optional dimensions
#[derive(Debug, Clone, Deserialize)]
pub struct ImageObject {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Artist credit as embedded in a track
#[derive(Debug, Deserialize)]
pub struct ArtistObject {
    /// Null for some local-file credits
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Album as embedded in a track
#[derive(Debug, Default, Deserialize)]
pub struct AlbumObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

/// Full track object
///
/// `id` is null for local files; those entries are dropped during conversion.
#[derive(Debug, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub id: Option<String>,
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub album: Option<AlbumObject>,
}

/// Saved-track wrapper from the liked-songs endpoint
#[derive(Debug, Deserialize)]
pub struct SavedTrackObject {
    pub track: TrackObject,
}

/// Playlist entry wrapper from the playlist-tracks endpoint
#[derive(Debug, Deserialize)]
pub struct PlaylistItemObject {
    /// Null for entries whose track is no longer available
    #[serde(default)]
    pub track: Option<TrackObject>,
    #[serde(default)]
    pub is_local: bool,
}

/// Playlist owner reference
#[derive(Debug, Deserialize)]
pub struct PlaylistOwnerObject {
    pub id: String,
}

/// Declared track totals of a playlist
#[derive(Debug, Deserialize)]
pub struct TrackTotalsObject {
    pub total: u64,
}

/// Playlist as returned by the listing endpoint
#[derive(Debug, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwnerObject,
    #[serde(default)]
    pub tracks: Option<TrackTotalsObject>,
}

/// Fielded playlist read used for totals polling (`fields=tracks.total`)
#[derive(Debug, Deserialize)]
pub struct PlaylistDetailsObject {
    pub tracks: TrackTotalsObject,
}

/// Current-user profile
#[derive(Debug, Deserialize)]
pub struct UserObject {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Full artist object from the batch artists endpoint
#[derive(Debug, Deserialize)]
pub struct FullArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

/// Batch artists response wrapper
#[derive(Debug, Deserialize)]
pub struct ArtistListObject {
    pub artists: Vec<FullArtistObject>,
}

/// Create-playlist response
#[derive(Debug, Deserialize)]
pub struct CreatedPlaylistObject {
    pub id: String,
    pub name: String,
}
