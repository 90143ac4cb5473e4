//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Encore using Clap
//! derive macros. It provides a type-safe way to parse command-line
//! arguments and route them to appropriate functionality.
//!
//! ## Commands
//!
//! - `recommend`: Generate personalized track recommendations
//! - `playlist` / `artist` / `track` / `album` / `user`: Catalog lookups
//! - `top` / `related`: Artist top tracks and related artists
//! - `search`: Free-text catalog search
//! - `auth`: Save an access token for authenticated commands
//! - `delete-playlist` / `delete-track`: Library deletes (delete access)
//!
//! ## Examples
//!
//! ```bash
//! encore recommend 2149084062 --count 15
//! encore top 27 --limit 5
//! encore search "daft punk" --kind artist
//! ```

use clap::{Parser, Subcommand, ValueEnum};

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Object kinds accepted by the search command.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum SearchKind {
    Artist,
    Album,
    Track,
    Playlist,
    User,
}

impl From<SearchKind> for crate::gateway::SearchKind {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Artist => Self::Artist,
            SearchKind::Album => Self::Album,
            SearchKind::Track => Self::Track,
            SearchKind::Playlist => Self::Playlist,
            SearchKind::User => Self::User,
        }
    }
}

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. All functionality is accessed through
/// subcommands; the token flag is global because most authenticated
/// commands share it.
#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore: personalized track recommendations from your Deezer playlists")]
#[command(version)]
pub struct Args {
    /// Deezer access token for authenticated commands
    ///
    /// Falls back to the DEEZER_ACCESS_TOKEN environment variable, then
    /// to the token saved by `encore auth`.
    #[arg(long, global = true, env = "DEEZER_ACCESS_TOKEN")]
    pub token: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to a major piece of functionality. Command
/// arguments are embedded directly in the enum variants for type safety
/// and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Generate personalized track recommendations
    ///
    /// Expands the taste graph of the given listener's public playlists
    /// via related artists, fetches each discovered artist's top tracks,
    /// filters out tracks the listener already owns, and interleaves the
    /// rest into a diversified list of exactly COUNT tracks.
    ///
    /// Without USER_ID the authenticated user's own profile is used,
    /// which requires a token.
    Recommend {
        /// Listener whose playlists seed the recommendations
        user_id: Option<u64>,

        /// Exact number of tracks to recommend
        #[arg(short, long, default_value = "15")]
        count: usize,

        /// Accept a shorter list when the catalog cannot supply COUNT
        /// tracks, instead of failing
        #[arg(long)]
        lenient: bool,

        /// Save the recommendations as a new playlist with this title
        /// (requires a token)
        #[arg(long, value_name = "TITLE")]
        save: Option<String>,
    },

    /// Show a playlist and its tracks
    Playlist {
        /// Playlist id
        id: u64,
    },

    /// Show an artist's most popular tracks
    Top {
        /// Artist id
        artist_id: u64,

        /// Maximum number of tracks to fetch
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show artists related to an artist
    Related {
        /// Artist id
        artist_id: u64,
    },

    /// Look up an artist by id
    Artist {
        /// Artist id
        id: u64,
    },

    /// Look up a track by id
    Track {
        /// Track id
        id: u64,
    },

    /// Look up an album by id
    Album {
        /// Album id
        id: u64,
    },

    /// Look up a user profile by id
    User {
        /// User id
        id: u64,
    },

    /// Search the catalog
    ///
    /// Without --kind the mixed search endpoint is used and results may
    /// span tracks, artists, albums, playlists and users.
    Search {
        /// Free-text query
        query: String,

        /// Restrict results to one object kind
        #[arg(long, value_enum)]
        kind: Option<SearchKind>,
    },

    /// Save a Deezer access token for later runs
    ///
    /// The token is stored in the platform config directory and picked up
    /// automatically by commands that need authentication. Obtain one
    /// from your Deezer application's OAuth flow.
    Auth {
        /// The access token to save
        token: String,
    },

    /// Delete a playlist from your library (requires delete access)
    DeletePlaylist {
        /// Playlist id
        id: u64,
    },

    /// Remove a track from one of your playlists (requires delete access)
    DeleteTrack {
        /// Playlist id
        playlist_id: u64,

        /// Track id
        track_id: u64,
    },

    /// Generate shell completions
    ///
    /// Usage: encore completion bash > ~/.local/share/bash-completion/completions/encore
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn recommend_defaults() {
        let args = Args::try_parse_from(["encore", "recommend", "42"]).unwrap();
        match args.command {
            Command::Recommend {
                user_id,
                count,
                lenient,
                save,
            } => {
                assert_eq!(user_id, Some(42));
                assert_eq!(count, 15);
                assert!(!lenient);
                assert!(save.is_none());
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn global_token_flag_parses_anywhere() {
        let args =
            Args::try_parse_from(["encore", "recommend", "--token", "abc"]).unwrap();
        assert_eq!(args.token.as_deref(), Some("abc"));
    }

    #[test]
    fn search_kind_is_optional() {
        let args =
            Args::try_parse_from(["encore", "search", "eminem", "--kind", "artist"]).unwrap();
        match args.command {
            Command::Search { query, kind } => {
                assert_eq!(query, "eminem");
                assert_eq!(kind, Some(SearchKind::Artist));
            }
            _ => panic!("expected search"),
        }
    }
}
