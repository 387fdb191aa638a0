//! Domain models for the cleanup core
//!
//! Values constructed from validated wire responses. Everything here is owned
//! data; nothing borrows from the transport layer.

use serde::{Deserialize, Serialize};

/// An artist credit on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// Album display data carried on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    pub image_url: Option<String>,
}

/// A track in the user's library
///
/// `id` is the stable identity shared by every occurrence of the track;
/// `uri` is the addressable handle used by write operations. Two entries in a
/// playlist can share an `id` while being distinct entries (different
/// positions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: AlbumRef,
}

impl Track {
    /// First-listed artist credit, if any
    pub fn primary_artist(&self) -> Option<&Artist> {
        self.artists.first()
    }
}

/// An owned playlist (cleanup scope)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

/// An archive playlist created by a previous cleanup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePlaylist {
    pub id: String,
    pub name: String,
    pub track_total: u64,
}

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

/// A playlist entry: one occurrence of a track at a concrete position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub track: Track,
    pub position: usize,
}

/// Artist lookup result used by selection surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// A position-disambiguated removal: one uri, the exact entry positions to
/// delete. Serializes to the wire shape the batch-delete endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionedRemoval {
    pub uri: String,
    pub positions: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_artist() {
        let track = Track {
            id: "t1".to_string(),
            uri: "spotify:track:t1".to_string(),
            name: "Song".to_string(),
            artists: vec![
                Artist {
                    id: "a1".to_string(),
                    name: "Lead".to_string(),
                },
                Artist {
                    id: "a2".to_string(),
                    name: "Feature".to_string(),
                },
            ],
            album: AlbumRef {
                name: "Album".to_string(),
                image_url: None,
            },
        };

        assert_eq!(track.primary_artist().map(|a| a.name.as_str()), Some("Lead"));
    }

    #[test]
    fn test_positioned_removal_wire_shape() {
        let removal = PositionedRemoval {
            uri: "spotify:track:t1".to_string(),
            positions: vec![3, 7],
        };

        let json = serde_json::to_value(&removal).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "uri": "spotify:track:t1", "positions": [3, 7] })
        );
    }
}
