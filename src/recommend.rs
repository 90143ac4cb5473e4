//! Recommendation generation: seed-artist discovery, related-artist
//! expansion, per-artist catalog collection, and round-robin interleaving.
//!
//! The pipeline runs in four strictly sequential stages over a
//! [`CatalogGateway`]:
//!
//! 1. The listener's playlists seed an [`OwnershipIndex`] of tracks they
//!    already have.
//! 2. **Expansion** walks those playlists in order, appending each track's
//!    artist and that artist's related artists, then de-duplicates keeping
//!    first occurrence.
//! 3. **Collection** fetches each discovered artist's top tracks (at most
//!    `count_tracks` artists are queried), dropping anything the listener
//!    owns.
//! 4. **Interleaving** assembles the final list round-robin across the
//!    per-artist lists so the result is diversified rather than clustered
//!    by artist.
//!
//! Every run builds its own index and track map and drops them when the
//! result is returned; no state survives between runs.

use crate::error::{Error, Result};
use crate::gateway::CatalogGateway;
use crate::model::{Artist, Playlist, Track};
use crate::ownership::OwnershipIndex;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::thread;
use std::time::Duration;

/// Tuning knobs for one recommendation run.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Exact length of the final recommendation list. Also bounds how far
    /// artist expansion runs and how many artists are queried for top
    /// tracks.
    pub count_tracks: usize,
    /// Per-artist top-track fetch limit.
    pub top_limit: usize,
    /// Delay between consecutive top-track fetches, honoring the upstream
    /// rate limit. Zeroed in tests.
    pub pace: Duration,
    /// Accept a shorter list when the catalog cannot supply
    /// `count_tracks` tracks, instead of failing with
    /// [`Error::InsufficientCatalog`].
    pub allow_short: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            count_tracks: 15,
            top_limit: 10,
            pace: Duration::from_millis(10),
            allow_short: false,
        }
    }
}

/// Ordered per-artist candidate lists, one entry per discovered artist in
/// discovery order. Keys are unique because expansion de-duplicates by
/// artist id before collection runs.
#[derive(Debug, Default)]
pub struct ArtistTrackMap {
    entries: Vec<(Artist, Vec<Track>)>,
}

impl ArtistTrackMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an artist's candidate list. Once stored, a list is final.
    pub fn insert(&mut self, artist: Artist, tracks: Vec<Track>) {
        self.entries.push((artist, tracks));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Artist, Vec<Track>)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total candidate tracks across all artists.
    #[must_use]
    pub fn total_tracks(&self) -> usize {
        self.entries.iter().map(|(_, tracks)| tracks.len()).sum()
    }
}

/// One-shot recommendation runner borrowing a gateway.
pub struct Recommender<'a> {
    gateway: &'a dyn CatalogGateway,
    config: RecommendConfig,
}

impl<'a> Recommender<'a> {
    #[must_use]
    pub fn new(gateway: &'a dyn CatalogGateway, config: RecommendConfig) -> Self {
        Self { gateway, config }
    }

    /// Run the whole pipeline for `listener_id` and return the
    /// recommendation list.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure, and fails with
    /// [`Error::InsufficientCatalog`] when the catalog cannot supply
    /// enough unowned tracks (unless `allow_short` is set).
    pub fn generate(&self, listener_id: u64) -> Result<Vec<Track>> {
        let playlists = self.gateway.fetch_listener_playlists(listener_id)?;
        info!(
            "generating {} recommendations from {} playlists",
            self.config.count_tracks,
            playlists.len()
        );

        let owned = OwnershipIndex::from_playlists(&playlists);
        let artists = self.expand_artists(&playlists)?;
        info!("expanded to {} candidate artists", artists.len());

        let map = self.collect_tracks(&artists, &owned)?;
        debug!(
            "collected {} candidate tracks across {} artists",
            map.total_tracks(),
            map.len()
        );

        if self.config.allow_short {
            let tracks = interleave_available(&map, self.config.count_tracks);
            if tracks.len() < self.config.count_tracks {
                warn!(
                    "catalog exhausted: returning {} of {} requested tracks",
                    tracks.len(),
                    self.config.count_tracks
                );
            }
            Ok(tracks)
        } else {
            interleave(&map, self.config.count_tracks)
        }
    }

    /// Discover candidate artists from the listener's playlists.
    ///
    /// Walks each playlist in order; per track, appends the track's artist
    /// followed by its related artists in returned order. The accumulation
    /// bound is checked after each related fetch, and tripping it stops
    /// only the current playlist's traversal, so the bound is approximate
    /// and sensitive to playlist order. The final sequence is
    /// de-duplicated keeping first occurrence.
    pub fn expand_artists(&self, playlists: &[Playlist]) -> Result<Vec<Artist>> {
        let mut artists = Vec::new();
        for playlist in playlists {
            for track in &playlist.tracks {
                artists.push(track.artist.clone());
                let related = self.gateway.fetch_related_artists(track.artist.id)?;
                artists.extend(related);
                // Bounds the breadth of this playlist's traversal only;
                // the next playlist still contributes.
                if artists.len() > self.config.count_tracks {
                    break;
                }
            }
        }
        Ok(dedup_artists(artists))
    }

    /// Fetch and filter each artist's top tracks.
    ///
    /// At most `min(artists.len(), count_tracks)` artists are queried,
    /// each exactly once, with a pacing delay between calls. Tracks the
    /// listener already owns under that artist are dropped.
    pub fn collect_tracks(
        &self,
        artists: &[Artist],
        owned: &OwnershipIndex,
    ) -> Result<ArtistTrackMap> {
        let count_artist = artists.len().min(self.config.count_tracks);
        let mut map = ArtistTrackMap::new();

        for (i, artist) in artists[..count_artist].iter().enumerate() {
            if i > 0 && !self.config.pace.is_zero() {
                thread::sleep(self.config.pace);
            }
            let tracks = self
                .gateway
                .fetch_top_tracks(artist.id, self.config.top_limit)?;
            let fresh: Vec<Track> = tracks
                .into_iter()
                .filter(|track| !owned.contains(artist.id, track.id))
                .collect();
            debug!("{}: {} candidate tracks", artist.name, fresh.len());
            map.insert(artist.clone(), fresh);
        }
        Ok(map)
    }
}

/// De-duplicate a sequence of artists by id, keeping the first occurrence
/// and preserving order. Idempotent: applying it twice changes nothing.
#[must_use]
pub fn dedup_artists(artists: Vec<Artist>) -> Vec<Artist> {
    let mut seen = HashSet::with_capacity(artists.len());
    artists
        .into_iter()
        .filter(|artist| seen.insert(artist.id))
        .collect()
}

/// Round-robin interleave across the map's per-artist lists until exactly
/// `count_tracks` tracks are collected.
///
/// Round 0 takes the first track from every artist in map order, round 1
/// the second, and so on, stopping the moment the target is reached.
///
/// # Errors
///
/// Fails with [`Error::InsufficientCatalog`] when the lists cannot supply
/// `count_tracks` tracks in total. Use [`interleave_available`] to accept
/// a shorter result instead.
pub fn interleave(map: &ArtistTrackMap, count_tracks: usize) -> Result<Vec<Track>> {
    let result = interleave_available(map, count_tracks);
    if result.len() < count_tracks {
        return Err(Error::InsufficientCatalog {
            available: result.len(),
            requested: count_tracks,
        });
    }
    Ok(result)
}

/// Like [`interleave`], but returns whatever is available (possibly fewer
/// than `count_tracks` tracks) when the lists run out.
#[must_use]
pub fn interleave_available(map: &ArtistTrackMap, count_tracks: usize) -> Vec<Track> {
    let mut result = Vec::with_capacity(count_tracks);
    let mut index = 0;

    while result.len() < count_tracks {
        let before = result.len();
        for (_, tracks) in map.iter() {
            if let Some(track) = tracks.get(index) {
                result.push(track.clone());
                if result.len() == count_tracks {
                    return result;
                }
            }
        }
        // A full pass that adds nothing means every list is exhausted;
        // without this check the loop would never terminate.
        if result.len() == before {
            break;
        }
        index += 1;
    }
    result
}
