//! Index of tracks the listener already owns.
//!
//! Built once per recommendation run from the listener's playlists and
//! consulted by the track collector so that nothing the listener already
//! has is recommended back to them. The index is owned by the run and
//! dropped with it; keeping it at process scope would leak one listener's
//! library into another listener's run.

use crate::model::Playlist;
use std::collections::{HashMap, HashSet};

/// Mapping from artist id to the set of track ids already present in some
/// listener playlist. Append-only for the duration of a run.
#[derive(Debug, Default)]
pub struct OwnershipIndex {
    owned: HashMap<u64, HashSet<u64>>,
}

impl OwnershipIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every track of every playlist. Re-inserting an already known
    /// (artist, track) pair is a no-op, so rebuilding from the same
    /// playlists is idempotent.
    #[must_use]
    pub fn from_playlists(playlists: &[Playlist]) -> Self {
        let mut index = Self::new();
        index.extend_from_playlists(playlists);
        index
    }

    /// Record all tracks of `playlists` into the index.
    pub fn extend_from_playlists(&mut self, playlists: &[Playlist]) {
        for playlist in playlists {
            for track in &playlist.tracks {
                self.record(track.artist.id, track.id);
            }
        }
    }

    /// Record a single (artist, track) ownership pair.
    pub fn record(&mut self, artist_id: u64, track_id: u64) {
        self.owned.entry(artist_id).or_default().insert(track_id);
    }

    /// Whether `track_id` is already owned under `artist_id`.
    #[must_use]
    pub fn contains(&self, artist_id: u64, track_id: u64) -> bool {
        self.owned
            .get(&artist_id)
            .is_some_and(|tracks| tracks.contains(&track_id))
    }

    /// Number of artists with at least one owned track.
    #[must_use]
    pub fn artist_count(&self) -> usize {
        self.owned.len()
    }
}
