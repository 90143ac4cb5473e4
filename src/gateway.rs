//! Catalog access: the [`CatalogGateway`] trait the recommendation core
//! consumes, and [`DeezerGateway`], its blocking HTTP implementation.
//!
//! All calls are synchronous and block until a response or timeout; the
//! recommendation run is strictly sequential by design so the pacing
//! delays between requests are honored. Failures surface through the
//! crate error taxonomy and abort the caller's run.
//!
//! Deezer has a quirk worth knowing about: failed lookups often come back
//! as HTTP 200 with an `{"error": {...}}` object in the body, so every
//! response body is checked before being decoded into a model type.

use crate::access::{Access, Operation};
use crate::error::{Error, Result};
use crate::model::{Artist, Page, Playlist, PlaylistSummary, Track, User};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::thread;
use std::time::Duration;

/// Deezer's "no data" error code, returned for ids that do not exist.
const NO_DATA_ERROR_CODE: i64 = 800;

/// Delay between consecutive playlist fetches when resolving a listener's
/// profile, to stay under the upstream rate limit.
const PLAYLIST_FETCH_PACE: Duration = Duration::from_millis(100);

/// The catalog operations the recommendation core depends on.
///
/// All four are required to run the core end to end. Implementations are
/// synchronous: return the records or fail with a crate [`Error`].
pub trait CatalogGateway {
    /// An artist's most popular tracks, most popular first, at most
    /// `limit` of them.
    fn fetch_top_tracks(&self, artist_id: u64, limit: usize) -> Result<Vec<Track>>;

    /// Artists related to `artist_id`, in upstream order.
    fn fetch_related_artists(&self, artist_id: u64) -> Result<Vec<Artist>>;

    /// A playlist with its full track list.
    fn fetch_playlist(&self, playlist_id: u64) -> Result<Playlist>;

    /// All public playlists of a listener, each with its full track list.
    fn fetch_listener_playlists(&self, listener_id: u64) -> Result<Vec<Playlist>>;
}

/// What to search for with [`DeezerGateway::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    All,
    Artist,
    Album,
    Track,
    Playlist,
    User,
}

impl SearchKind {
    fn path_segment(self) -> &'static str {
        match self {
            SearchKind::All => "",
            SearchKind::Artist => "/artist",
            SearchKind::Album => "/album",
            SearchKind::Track => "/track",
            SearchKind::Playlist => "/playlist",
            SearchKind::User => "/user",
        }
    }
}

/// One search result. Deezer returns differently shaped objects per kind,
/// so only the common fields are kept.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<Artist>,
}

impl SearchHit {
    /// Human-readable label: track/album title or artist/user name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// Blocking client for the Deezer JSON API.
#[derive(Debug)]
pub struct DeezerGateway {
    http: reqwest::blocking::Client,
    base: String,
    token: Option<String>,
    access: Access,
    playlist_pace: Duration,
}

impl DeezerGateway {
    /// Build a gateway with the given token and access level.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TokenRequired`] when `access` is above basic
    /// and no token is supplied, and with [`Error::Upstream`] if the HTTP
    /// client cannot be constructed.
    pub fn new(token: Option<String>, access: Access) -> Result<Self> {
        if access.requires_token() && token.is_none() {
            return Err(Error::TokenRequired(access));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Upstream(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base: "https://api.deezer.com".to_string(),
            token,
            access,
            playlist_pace: PLAYLIST_FETCH_PACE,
        })
    }

    /// Point the gateway at a different API root. Used by tests.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Override the delay between playlist fetches.
    #[must_use]
    pub fn with_playlist_pace(mut self, pace: Duration) -> Self {
        self.playlist_pace = pace;
        self
    }

    fn require(&self, operation: Operation, name: &'static str) -> Result<()> {
        if self.access.allows(operation) {
            Ok(())
        } else {
            Err(Error::PermissionDenied {
                access: self.access,
                operation: name,
            })
        }
    }

    fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or(Error::TokenRequired(self.access))
    }

    /// GET `path`, check both the HTTP status and the embedded error
    /// object, and decode the body.
    fn get<T: DeserializeOwned>(&self, path: &str, kind: &'static str, id: u64) -> Result<T> {
        let url = format!("{}{path}", self.base);
        debug!("GET {url}");

        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "GET {path} returned {}",
                response.status()
            )));
        }

        let body: Value = response.json()?;
        check_api_error(&body, kind, id)?;
        Ok(serde_json::from_value(body)?)
    }

    /// Single artist lookup.
    pub fn fetch_artist(&self, artist_id: u64) -> Result<Artist> {
        self.require(Operation::ReadCatalog, "look up an artist")?;
        self.get(&format!("/artist/{artist_id}"), "artist", artist_id)
    }

    /// Single track lookup.
    pub fn fetch_track(&self, track_id: u64) -> Result<Track> {
        self.require(Operation::ReadCatalog, "look up a track")?;
        self.get(&format!("/track/{track_id}"), "track", track_id)
    }

    /// Single album lookup.
    pub fn fetch_album(&self, album_id: u64) -> Result<crate::model::Album> {
        self.require(Operation::ReadCatalog, "look up an album")?;
        self.get(&format!("/album/{album_id}"), "album", album_id)
    }

    /// Public profile lookup.
    pub fn fetch_user(&self, user_id: u64) -> Result<User> {
        self.require(Operation::ReadCatalog, "look up a user")?;
        self.get(&format!("/user/{user_id}"), "user", user_id)
    }

    /// The authenticated user's own profile.
    pub fn fetch_me(&self) -> Result<User> {
        self.require(Operation::ReadProfile, "read your own profile")?;
        let token = self.token()?;
        self.get(&format!("/user/me?access_token={token}"), "user", 0)
    }

    /// Free-text catalog search, optionally narrowed to one object kind.
    pub fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<SearchHit>> {
        self.require(Operation::ReadCatalog, "search the catalog")?;
        let segment = kind.path_segment();
        let page: Page<SearchHit> =
            self.get(&format!("/search{segment}?q={query}"), "search", 0)?;
        Ok(page.data)
    }

    /// Create an empty playlist in the authenticated user's library and
    /// return it.
    pub fn create_playlist(&self, title: &str) -> Result<Playlist> {
        self.require(Operation::ManageLibrary, "create a playlist")?;
        let me = self.fetch_me()?;
        let token = self.token()?;

        let url = format!(
            "{}/user/{}/playlists?access_token={token}&title={title}",
            self.base, me.id
        );
        let body: Value = self.http.post(&url).send()?.json()?;
        check_api_error(&body, "playlist", 0)?;

        let playlist_id = body
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Upstream(format!("playlist '{title}' was not created")))?;
        info!("created playlist {playlist_id} ('{title}')");
        self.fetch_playlist(playlist_id)
    }

    /// Append a track to a playlist in the authenticated user's library.
    pub fn add_track(&self, playlist_id: u64, track_id: u64) -> Result<()> {
        self.require(Operation::ManageLibrary, "add a track to a playlist")?;
        let token = self.token()?;

        let url = format!(
            "{}/playlist/{playlist_id}/tracks?access_token={token}&songs={track_id}",
            self.base
        );
        let response = self.http.post(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "adding track {track_id} to playlist {playlist_id} returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Delete a playlist from the authenticated user's library.
    pub fn delete_playlist(&self, playlist_id: u64) -> Result<()> {
        self.require(Operation::DeleteLibrary, "delete a playlist")?;
        let token = self.token()?;

        let url = format!("{}/playlist/{playlist_id}?access_token={token}", self.base);
        let response = self.http.delete(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::ResourceNotFound {
                kind: "playlist",
                id: playlist_id,
            });
        }
        info!("deleted playlist {playlist_id}");
        Ok(())
    }

    /// Remove a track from a playlist in the authenticated user's library.
    pub fn delete_track(&self, playlist_id: u64, track_id: u64) -> Result<()> {
        self.require(Operation::DeleteLibrary, "remove a track from a playlist")?;
        let token = self.token()?;

        let url = format!(
            "{}/playlist/{playlist_id}/tracks?access_token={token}&songs={track_id}",
            self.base
        );
        let response = self.http.delete(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::ResourceNotFound {
                kind: "track",
                id: track_id,
            });
        }
        Ok(())
    }
}

impl CatalogGateway for DeezerGateway {
    fn fetch_top_tracks(&self, artist_id: u64, limit: usize) -> Result<Vec<Track>> {
        self.require(Operation::ReadCatalog, "fetch an artist's top tracks")?;
        let page: Page<Track> = self.get(
            &format!("/artist/{artist_id}/top?limit={limit}"),
            "artist",
            artist_id,
        )?;
        Ok(page.data)
    }

    fn fetch_related_artists(&self, artist_id: u64) -> Result<Vec<Artist>> {
        self.require(Operation::ReadCatalog, "fetch related artists")?;
        let page: Page<Artist> = self.get(
            &format!("/artist/{artist_id}/related"),
            "artist",
            artist_id,
        )?;
        Ok(page.data)
    }

    fn fetch_playlist(&self, playlist_id: u64) -> Result<Playlist> {
        self.require(Operation::ReadCatalog, "fetch a playlist")?;
        self.get(&format!("/playlist/{playlist_id}"), "playlist", playlist_id)
    }

    fn fetch_listener_playlists(&self, listener_id: u64) -> Result<Vec<Playlist>> {
        self.require(Operation::ReadCatalog, "fetch a listener's playlists")?;
        let page: Page<PlaylistSummary> = self.get(
            &format!("/user/{listener_id}/playlists"),
            "user",
            listener_id,
        )?;

        info!(
            "resolving {} playlists for listener {listener_id}",
            page.data.len()
        );
        let mut playlists = Vec::with_capacity(page.data.len());
        for (i, summary) in page.data.iter().enumerate() {
            if i > 0 && !self.playlist_pace.is_zero() {
                thread::sleep(self.playlist_pace);
            }
            debug!("fetching playlist {} ('{}')", summary.id, summary.title);
            playlists.push(self.fetch_playlist(summary.id)?);
        }
        Ok(playlists)
    }
}

/// Map Deezer's embedded error object, if any, onto the error taxonomy.
fn check_api_error(body: &Value, kind: &'static str, id: u64) -> Result<()> {
    let Some(error) = body.get("error") else {
        return Ok(());
    };

    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code == NO_DATA_ERROR_CODE {
        return Err(Error::ResourceNotFound { kind, id });
    }

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown upstream error");
    Err(Error::Upstream(format!("{kind} request failed: {message}")))
}
