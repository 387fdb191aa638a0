//! Spotify Web API connector
//!
//! Implements the [`SpotifyApi`] trait over an abstract [`HttpClient`].
//!
//! # Features
//!
//! - Paginated listing with strictly sequential page follow-up
//! - Bounded retry on rate limits (`Retry-After` aware) and server errors
//! - Protocol-sized write batching (50 ids / 100 uris per request)
//! - Wire schema validation before any domain value is constructed
//! - Explicit per-call access tokens

use async_trait::async_trait;
use bridge_http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SpotifyError};
use crate::models::{
    AlbumRef, ArchivePlaylist, Artist, ArtistProfile, Playlist, PlaylistEntry, PositionedRemoval,
    Track, User,
};
use crate::retry::{parse_retry_after, RetrySchedule};
use crate::types::{
    ArtistListObject, CreatedPlaylistObject, FullArtistObject, ImageObject, PageObject,
    PlaylistDetailsObject, PlaylistItemObject, PlaylistObject, SavedTrackObject, TrackObject,
    UserObject,
};
use crate::api::SpotifyApi;

/// Spotify Web API base URL
const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// Name prefix identifying archive playlists created by cleanup runs.
/// Playlists carrying it are excluded from cleanup targets.
pub const ARCHIVE_PREFIX: &str = "Removed by Spotify Cleanup Tool";

/// Description attached to archive playlists
pub const ARCHIVE_DESCRIPTION: &str = "Backup playlist created by Spotify Cleanup Tool.";

/// Maximum ids per liked-tracks write (protocol limit)
const SAVED_TRACKS_CHUNK: usize = 50;

/// Maximum uris per playlist write (protocol limit)
const PLAYLIST_TRACKS_CHUNK: usize = 100;

/// Maximum ids per batch artist lookup (protocol limit)
const ARTIST_LOOKUP_CHUNK: usize = 50;

/// Page size for the liked-tracks listing
const LIKED_PAGE_LIMIT: u32 = 50;

/// Page size for the playlist-tracks listing
const PLAYLIST_PAGE_LIMIT: u32 = 100;

/// Page size for the playlist listing
const PLAYLIST_LIST_LIMIT: u32 = 50;

/// Timeout for individual API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Spotify Web API connector
///
/// # Example
///
/// ```ignore
/// use provider_spotify::{SpotifyApi, SpotifyConnector};
/// use bridge_http::ReqwestHttpClient;
/// use std::sync::Arc;
///
/// let connector = SpotifyConnector::new(Arc::new(ReqwestHttpClient::new()));
/// let user = connector.current_user(&token).await?;
/// let playlists = connector.owned_playlists(&token, &user.id).await?;
/// ```
pub struct SpotifyConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Retry schedule for transient errors
    retry: RetrySchedule,
}

impl SpotifyConnector {
    /// Create a connector with the default retry schedule
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_retry(http_client, RetrySchedule::default())
    }

    /// Create a connector with a custom retry schedule
    pub fn with_retry(http_client: Arc<dyn HttpClient>, retry: RetrySchedule) -> Self {
        Self { http_client, retry }
    }

    /// Execute one API request with the bounded retry state machine
    ///
    /// 429 consults `Retry-After` and backs off; 5xx backs off on the
    /// exponential schedule alone; any other non-2xx fails immediately with
    /// the response body as context. 204 is a success with an empty body.
    #[instrument(skip(self, token, body), fields(url = %url))]
    async fn send(
        &self,
        token: &str,
        method: HttpMethod,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse> {
        let mut attempt = 0u32;

        loop {
            let mut request = HttpRequest::new(method, url)
                .bearer_token(token)
                .timeout(REQUEST_TIMEOUT);
            if let Some(payload) = body {
                request = request.json(payload)?;
            }

            let response = self.http_client.execute(request).await?;

            if response.status == 429 {
                if self.retry.is_exhausted(attempt) {
                    return Err(SpotifyError::Api {
                        status: 429,
                        message: error_message(&response, "Rate limit exceeded."),
                    });
                }
                let hint = response.header("Retry-After").and_then(parse_retry_after);
                let delay = self.retry.rate_limit_delay(attempt, hint);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying after delay"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if response.is_server_error() && !self.retry.is_exhausted(attempt) {
                let delay = self.retry.backoff_delay(attempt);
                warn!(
                    status = response.status,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Server error, retrying after delay"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !response.is_success() {
                return Err(SpotifyError::Api {
                    status: response.status,
                    message: error_message(&response, "Request failed."),
                });
            }

            debug!(status = response.status, "API request succeeded");
            return Ok(response);
        }
    }

    /// GET and deserialize a JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(&self, token: &str, url: &str) -> Result<T> {
        let response = self.send(token, HttpMethod::Get, url, None).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| SpotifyError::Parse(format!("{} ({})", e, url)))
    }

    /// Fetch a single page of a list endpoint
    pub async fn fetch_page<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
    ) -> Result<PageObject<T>> {
        let response = self.send(token, HttpMethod::Get, url, None).await?;
        if response.status == 204 || response.body.is_empty() {
            return Ok(PageObject::empty());
        }
        serde_json::from_slice(&response.body)
            .map_err(|e| SpotifyError::Parse(format!("{} ({})", e, url)))
    }

    /// Follow the `next` chain until exhausted, accumulating all items
    ///
    /// Pages are requested strictly sequentially; a failed page propagates
    /// and aborts the rest of the chain.
    pub async fn fetch_all_pages<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next_url = Some(url.to_string());

        while let Some(url) = next_url {
            let page = self.fetch_page::<T>(token, &url).await?;
            items.extend(page.items);
            next_url = page.next;
        }

        Ok(items)
    }

    /// Convert a wire track to a domain track, dropping id-less local files
    fn convert_track(track: TrackObject) -> Option<Track> {
        let id = track.id?;
        let album = track.album.unwrap_or_default();

        Some(Track {
            id,
            uri: track.uri,
            name: track.name,
            artists: track
                .artists
                .into_iter()
                .map(|artist| Artist {
                    id: artist.id.unwrap_or_default(),
                    name: artist.name,
                })
                .collect(),
            album: AlbumRef {
                name: album.name,
                image_url: smallest_image(&album.images),
            },
        })
    }

    fn convert_artist(artist: FullArtistObject) -> ArtistProfile {
        ArtistProfile {
            id: artist.id,
            name: artist.name,
            image_url: smallest_image(&artist.images),
        }
    }
}

/// Pick the smallest image by height, keeping the earliest when heights are
/// missing
fn smallest_image(images: &[ImageObject]) -> Option<String> {
    let mut smallest: Option<&ImageObject> = None;
    for image in images {
        match smallest {
            None => smallest = Some(image),
            Some(current) => {
                if let (Some(height), Some(current_height)) = (image.height, current.height) {
                    if height < current_height {
                        smallest = Some(image);
                    }
                }
            }
        }
    }
    smallest.map(|image| image.url.clone())
}

/// Response body as diagnostic context, falling back when empty
fn error_message(response: &HttpResponse, fallback: &str) -> String {
    let body = response.text();
    if body.trim().is_empty() {
        fallback.to_string()
    } else {
        body
    }
}

#[async_trait]
impl SpotifyApi for SpotifyConnector {
    #[instrument(skip(self, token))]
    async fn current_user(&self, token: &str) -> Result<User> {
        let user: UserObject = self
            .get_json(token, &format!("{}/me", SPOTIFY_API_BASE))
            .await?;
        Ok(User {
            id: user.id,
            display_name: user.display_name,
        })
    }

    #[instrument(skip(self, token))]
    async fn owned_playlists(&self, token: &str, user_id: &str) -> Result<Vec<Playlist>> {
        let url = format!(
            "{}/me/playlists?limit={}",
            SPOTIFY_API_BASE, PLAYLIST_LIST_LIMIT
        );
        let playlists: Vec<PlaylistObject> = self.fetch_all_pages(token, &url).await?;

        let owned: Vec<Playlist> = playlists
            .into_iter()
            .filter(|playlist| {
                playlist.owner.id == user_id && !playlist.name.starts_with(ARCHIVE_PREFIX)
            })
            .map(|playlist| Playlist {
                id: playlist.id,
                name: playlist.name,
            })
            .collect();

        info!(count = owned.len(), "Listed owned playlists");
        Ok(owned)
    }

    #[instrument(skip(self, token))]
    async fn archive_playlists(&self, token: &str, user_id: &str) -> Result<Vec<ArchivePlaylist>> {
        let url = format!(
            "{}/me/playlists?limit={}",
            SPOTIFY_API_BASE, PLAYLIST_LIST_LIMIT
        );
        let playlists: Vec<PlaylistObject> = self.fetch_all_pages(token, &url).await?;

        Ok(playlists
            .into_iter()
            .filter(|playlist| {
                playlist.owner.id == user_id && playlist.name.starts_with(ARCHIVE_PREFIX)
            })
            .map(|playlist| ArchivePlaylist {
                id: playlist.id,
                name: playlist.name,
                track_total: playlist.tracks.map(|tracks| tracks.total).unwrap_or(0),
            })
            .collect())
    }

    #[instrument(skip(self, token))]
    async fn liked_tracks(&self, token: &str) -> Result<Vec<Track>> {
        let url = format!("{}/me/tracks?limit={}", SPOTIFY_API_BASE, LIKED_PAGE_LIMIT);
        let items: Vec<SavedTrackObject> = self.fetch_all_pages(token, &url).await?;

        let tracks: Vec<Track> = items
            .into_iter()
            .filter_map(|item| Self::convert_track(item.track))
            .collect();

        info!(count = tracks.len(), "Fetched liked tracks");
        Ok(tracks)
    }

    #[instrument(skip(self, token))]
    async fn liked_total(&self, token: &str) -> Result<u64> {
        let url = format!("{}/me/tracks?limit=1", SPOTIFY_API_BASE);
        let page: PageObject<SavedTrackObject> = self.fetch_page(token, &url).await?;
        Ok(page.total.unwrap_or(0))
    }

    #[instrument(skip(self, token))]
    async fn playlist_tracks(&self, token: &str, playlist_id: &str) -> Result<Vec<Track>> {
        let url = format!(
            "{}/playlists/{}/tracks?limit={}",
            SPOTIFY_API_BASE, playlist_id, PLAYLIST_PAGE_LIMIT
        );
        let items: Vec<PlaylistItemObject> = self.fetch_all_pages(token, &url).await?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.track.and_then(Self::convert_track))
            .collect())
    }

    #[instrument(skip(self, token))]
    async fn playlist_entries(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistEntry>> {
        let url = format!(
            "{}/playlists/{}/tracks?limit={}",
            SPOTIFY_API_BASE, playlist_id, PLAYLIST_PAGE_LIMIT
        );
        let items: Vec<PlaylistItemObject> = self.fetch_all_pages(token, &url).await?;

        // Positions must stay aligned with the remote ordering, so dropped
        // entries (unavailable tracks) still consume their index.
        Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(position, item)| {
                item.track
                    .and_then(Self::convert_track)
                    .map(|track| PlaylistEntry { track, position })
            })
            .collect())
    }

    #[instrument(skip(self, token))]
    async fn playlist_track_total(&self, token: &str, playlist_id: &str) -> Result<u64> {
        let url = format!(
            "{}/playlists/{}?fields=tracks.total",
            SPOTIFY_API_BASE, playlist_id
        );
        let details: PlaylistDetailsObject = self.get_json(token, &url).await?;
        Ok(details.tracks.total)
    }

    #[instrument(skip(self, token, ids))]
    async fn artist_profiles(&self, token: &str, ids: &[String]) -> Result<Vec<ArtistProfile>> {
        let mut profiles = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(ARTIST_LOOKUP_CHUNK) {
            let url = format!(
                "{}/artists?ids={}",
                SPOTIFY_API_BASE,
                urlencoding::encode(&chunk.join(","))
            );
            let batch: ArtistListObject = self.get_json(token, &url).await?;
            profiles.extend(batch.artists.into_iter().map(Self::convert_artist));
        }

        Ok(profiles)
    }

    #[instrument(skip(self, token))]
    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<Playlist> {
        let url = format!("{}/users/{}/playlists", SPOTIFY_API_BASE, user_id);
        let body = serde_json::json!({
            "name": name,
            "public": false,
            "description": description,
        });

        let response = self.send(token, HttpMethod::Post, &url, Some(&body)).await?;
        let created: CreatedPlaylistObject = serde_json::from_slice(&response.body)
            .map_err(|e| SpotifyError::Parse(format!("{} ({})", e, url)))?;

        info!(playlist_id = %created.id, "Created playlist");
        Ok(Playlist {
            id: created.id,
            name: created.name,
        })
    }

    #[instrument(skip(self, token, uris), fields(count = uris.len()))]
    async fn add_tracks_to_playlist(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()> {
        let url = format!("{}/playlists/{}/tracks", SPOTIFY_API_BASE, playlist_id);

        for chunk in uris.chunks(PLAYLIST_TRACKS_CHUNK) {
            let body = serde_json::json!({ "uris": chunk });
            self.send(token, HttpMethod::Post, &url, Some(&body)).await?;
        }

        Ok(())
    }

    #[instrument(skip(self, token, track_ids), fields(count = track_ids.len()))]
    async fn remove_saved_tracks(&self, token: &str, track_ids: &[String]) -> Result<()> {
        for chunk in track_ids.chunks(SAVED_TRACKS_CHUNK) {
            let url = format!(
                "{}/me/tracks?ids={}",
                SPOTIFY_API_BASE,
                urlencoding::encode(&chunk.join(","))
            );
            self.send(token, HttpMethod::Delete, &url, None).await?;
        }

        Ok(())
    }

    #[instrument(skip(self, token, uris), fields(count = uris.len()))]
    async fn remove_playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()> {
        let url = format!("{}/playlists/{}/tracks", SPOTIFY_API_BASE, playlist_id);

        for chunk in uris.chunks(PLAYLIST_TRACKS_CHUNK) {
            let tracks: Vec<serde_json::Value> = chunk
                .iter()
                .map(|uri| serde_json::json!({ "uri": uri }))
                .collect();
            let body = serde_json::json!({ "tracks": tracks });
            self.send(token, HttpMethod::Delete, &url, Some(&body))
                .await?;
        }

        Ok(())
    }

    #[instrument(skip(self, token, removals), fields(count = removals.len()))]
    async fn remove_playlist_occurrences(
        &self,
        token: &str,
        playlist_id: &str,
        removals: &[PositionedRemoval],
    ) -> Result<()> {
        let url = format!("{}/playlists/{}/tracks", SPOTIFY_API_BASE, playlist_id);

        for chunk in removals.chunks(PLAYLIST_TRACKS_CHUNK) {
            let body = serde_json::json!({ "tracks": chunk });
            self.send(token, HttpMethod::Delete, &url, Some(&body))
                .await?;
        }

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn unfollow_playlist(&self, token: &str, playlist_id: &str) -> Result<()> {
        let url = format!(
            "{}/playlists/{}/followers",
            SPOTIFY_API_BASE, playlist_id
        );
        self.send(token, HttpMethod::Delete, &url, None).await?;
        Ok(())
    }
}
