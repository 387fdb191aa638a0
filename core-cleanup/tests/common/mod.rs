//! Shared test double for the Spotify API surface
#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use provider_spotify::{
    AlbumRef, ArchivePlaylist, Artist, ArtistProfile, Playlist, PlaylistEntry, PositionedRemoval,
    SpotifyApi, SpotifyError, Track, User,
};

mock! {
    pub SpotifyApi {}

    #[async_trait]
    impl SpotifyApi for SpotifyApi {
        async fn current_user(&self, token: &str) -> provider_spotify::Result<User>;
        async fn owned_playlists(&self, token: &str, user_id: &str) -> provider_spotify::Result<Vec<Playlist>>;
        async fn archive_playlists(&self, token: &str, user_id: &str) -> provider_spotify::Result<Vec<ArchivePlaylist>>;
        async fn liked_tracks(&self, token: &str) -> provider_spotify::Result<Vec<Track>>;
        async fn liked_total(&self, token: &str) -> provider_spotify::Result<u64>;
        async fn playlist_tracks(&self, token: &str, playlist_id: &str) -> provider_spotify::Result<Vec<Track>>;
        async fn playlist_entries(&self, token: &str, playlist_id: &str) -> provider_spotify::Result<Vec<PlaylistEntry>>;
        async fn playlist_track_total(&self, token: &str, playlist_id: &str) -> provider_spotify::Result<u64>;
        async fn artist_profiles(&self, token: &str, ids: &[String]) -> provider_spotify::Result<Vec<ArtistProfile>>;
        async fn create_playlist(&self, token: &str, user_id: &str, name: &str, description: &str) -> provider_spotify::Result<Playlist>;
        async fn add_tracks_to_playlist(&self, token: &str, playlist_id: &str, uris: &[String]) -> provider_spotify::Result<()>;
        async fn remove_saved_tracks(&self, token: &str, track_ids: &[String]) -> provider_spotify::Result<()>;
        async fn remove_playlist_tracks(&self, token: &str, playlist_id: &str, uris: &[String]) -> provider_spotify::Result<()>;
        async fn remove_playlist_occurrences(&self, token: &str, playlist_id: &str, removals: &[PositionedRemoval]) -> provider_spotify::Result<()>;
        async fn unfollow_playlist(&self, token: &str, playlist_id: &str) -> provider_spotify::Result<()>;
    }
}

pub fn test_user() -> User {
    User {
        id: "me".to_string(),
        display_name: Some("Tester".to_string()),
    }
}

pub fn test_playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn test_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        name: format!("Song {}", id),
        artists: vec![Artist {
            id: "a1".to_string(),
            name: "Artist".to_string(),
        }],
        album: AlbumRef {
            name: "Album".to_string(),
            image_url: None,
        },
    }
}

pub fn api_error() -> SpotifyError {
    SpotifyError::Api {
        status: 500,
        message: "Server error".to_string(),
    }
}
