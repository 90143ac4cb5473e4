//! Catalog data model: artists, albums, tracks, playlists, users.
//!
//! These structs mirror the JSON objects the Deezer API returns. List
//! endpoints wrap their payload in `{"data": [...]}`, which is handled by
//! [`Page`]; a playlist additionally nests its tracks one level deeper.

use serde::{Deserialize, Deserializer};

/// An artist as returned by the catalog.
///
/// Identity is the `id`: two values with the same id describe the same
/// artist, and de-duplication throughout the crate keys on it. The display
/// name is carried for output only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
}

/// An album reference carried by a track.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Album {
    pub id: u64,
    pub title: String,
}

/// A single track, immutable once parsed from catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: Artist,
    pub album: Album,
}

/// A playlist with its tracks in source order.
///
/// Playlist order is the source of truth; nothing in this crate re-sorts
/// the track list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "nested_tracks")]
    pub tracks: Vec<Track>,
}

/// A catalog user profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// A playlist entry from the profile listing. Only the id matters; the
/// full playlist (with tracks) is fetched separately.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSummary {
    pub id: u64,
    pub title: String,
}

/// Wrapper for the `{"data": [...]}` envelope on list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Playlists nest their track list as `"tracks": {"data": [...]}`.
fn nested_tracks<'de, D>(deserializer: D) -> Result<Vec<Track>, D::Error>
where
    D: Deserializer<'de>,
{
    let page = Page::<Track>::deserialize(deserializer)?;
    Ok(page.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_track_payload() {
        let json = r#"{
            "id": 3135556,
            "title": "Harder, Better, Faster, Stronger",
            "duration": 225,
            "rank": 956167,
            "artist": {"id": 27, "name": "Daft Punk", "nb_fan": 4213044},
            "album": {"id": 302127, "title": "Discovery", "cover": "x"}
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, 3135556);
        assert_eq!(track.artist.id, 27);
        assert_eq!(track.artist.name, "Daft Punk");
        assert_eq!(track.album.title, "Discovery");
    }

    #[test]
    fn parses_playlist_with_nested_tracks() {
        let json = r#"{
            "id": 908622995,
            "title": "Bain moussant",
            "public": true,
            "tracks": {"data": [
                {"id": 1, "title": "One",
                 "artist": {"id": 10, "name": "A"},
                 "album": {"id": 20, "title": "B"}},
                {"id": 2, "title": "Two",
                 "artist": {"id": 10, "name": "A"},
                 "album": {"id": 20, "title": "B"}}
            ]}
        }"#;

        let playlist: Playlist = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.title, "Bain moussant");
        assert_eq!(playlist.tracks.len(), 2);
        // Source order preserved.
        assert_eq!(playlist.tracks[0].id, 1);
        assert_eq!(playlist.tracks[1].id, 2);
    }

    #[test]
    fn playlist_without_tracks_field_is_empty() {
        let json = r#"{"id": 1, "title": "empty"}"#;
        let playlist: Playlist = serde_json::from_str(json).unwrap();
        assert!(playlist.tracks.is_empty());
    }

    #[test]
    fn parses_paged_artist_list() {
        let json = r#"{"data": [{"id": 5, "name": "X"}, {"id": 9, "name": "Y"}], "total": 2}"#;
        let page: Page<Artist> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, 5);
    }
}
