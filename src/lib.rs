//! Personalized track recommendations from a music catalog.
//!
//! Core modules:
//! - [`recommend`] - Artist expansion, track collection, interleaving
//! - [`ownership`] - Index of tracks the listener already owns
//! - [`gateway`] - Catalog access (trait + blocking Deezer client)
//! - [`model`] - Catalog data model
//!
//! ### Supporting Modules
//!
//! - [`access`] - Capability-gated permission levels
//! - [`error`] - Error taxonomy and crate Result alias
//! - [`config`] - Token persistence in the platform config directory
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use encore::access::Access;
//! use encore::gateway::DeezerGateway;
//! use encore::recommend::{RecommendConfig, Recommender};
//!
//! let gateway = DeezerGateway::new(None, Access::Basic)?;
//! let config = RecommendConfig {
//!     count_tracks: 15,
//!     ..RecommendConfig::default()
//! };
//!
//! let recommender = Recommender::new(&gateway, config);
//! let tracks = recommender.generate(2149084062)?;
//! for track in &tracks {
//!     println!("{} - {}", track.artist.name, track.title);
//! }
//! # Ok::<(), encore::Error>(())
//! ```
//!
//! ## How recommendations are built
//!
//! 1. The listener's playlists are fetched once and indexed into an
//!    [`ownership::OwnershipIndex`] so nothing they already own comes
//!    back as a recommendation.
//! 2. Walking the playlists in order, every track contributes its artist
//!    plus that artist's related artists, until the accumulation bound is
//!    reached; the sequence is then de-duplicated keeping first
//!    occurrence.
//! 3. Up to `count_tracks` of the discovered artists are queried for
//!    their top tracks (one paced call each), filtered against the index.
//! 4. The per-artist lists are interleaved round-robin into a list of
//!    exactly `count_tracks` tracks, so consecutive recommendations come
//!    from different artists.
//!
//! Each run owns its index and track map; nothing leaks between runs or
//! between listeners.
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Gateway failures abort the
//! whole run on first error; there is no retry or partial-result path.
//! When the catalog cannot supply enough tracks the interleaver fails
//! with [`Error::InsufficientCatalog`] unless the run is configured to
//! accept a short result.

pub mod access;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod ownership;
pub mod recommend;

pub use error::{Error, Result};
