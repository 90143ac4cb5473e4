//! # Encore - Personalized Track Recommendations
//!
//! Encore builds a diversified track recommendation list from a Deezer
//! listener's public playlists: it expands the artists they already
//! listen to through related-artist links, pulls each discovered artist's
//! top tracks, drops everything the listener already owns, and
//! interleaves the rest into an exact-length list.
//!
//! ## Usage
//!
//! ```bash
//! # Recommend 15 tracks from a listener's public playlists
//! encore recommend 2149084062
//!
//! # Recommend and save as a new playlist (token required)
//! encore recommend --count 20 --save "Encore Mix"
//!
//! # Catalog lookups
//! encore artist 27
//! encore top 27 --limit 5
//! encore search "daft punk" --kind artist
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use encore::access::Access;
use encore::cli::{Args, Command};
use encore::completion;
use encore::config;
use encore::gateway::{CatalogGateway, DeezerGateway, SearchKind};
use encore::model::Track;
use encore::recommend::{RecommendConfig, Recommender};
use log::info;

/// Resolve the access token: the global flag and environment variable are
/// handled by clap; the config file saved by `encore auth` is the last
/// resort.
fn resolve_token(flag: Option<String>) -> Option<String> {
    flag.or_else(config::saved_token)
}

fn print_tracks(tracks: &[Track]) {
    for (i, track) in tracks.iter().enumerate() {
        println!("{:>3}. {} - {}", i + 1, track.artist.name, track.title);
    }
}

/// Main entry point.
///
/// Initializes logging, parses command-line arguments, and routes
/// commands to the appropriate module functions. Logging is controlled
/// via `RUST_LOG`:
/// - `RUST_LOG=debug encore recommend 42` - Enable debug logging
/// - `RUST_LOG=encore::gateway=debug` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let token = resolve_token(args.token);

    match args.command {
        Command::Recommend {
            user_id,
            count,
            lenient,
            save,
        } => {
            // Resolving our own profile or saving a playlist needs the
            // manage scope; recommending for an explicit listener id only
            // reads the public catalog.
            let access = if user_id.is_none() || save.is_some() {
                Access::Manage
            } else {
                Access::Basic
            };
            let gateway = DeezerGateway::new(token, access)?;

            let listener = match user_id {
                Some(id) => id,
                None => {
                    let me = gateway.fetch_me()?;
                    info!("recommending for authenticated user {} ({})", me.name, me.id);
                    me.id
                }
            };

            let recommend_config = RecommendConfig {
                count_tracks: count,
                allow_short: lenient,
                ..RecommendConfig::default()
            };
            let recommender = Recommender::new(&gateway, recommend_config);
            let tracks = recommender.generate(listener)?;
            print_tracks(&tracks);

            if let Some(title) = save {
                let playlist = gateway.create_playlist(&title)?;
                for track in &tracks {
                    gateway.add_track(playlist.id, track.id)?;
                }
                println!(
                    "Saved {} tracks to playlist '{}' ({})",
                    tracks.len(),
                    playlist.title,
                    playlist.id
                );
            }
        }
        Command::Playlist { id } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let playlist = gateway.fetch_playlist(id)?;
            println!("{} ({} tracks)", playlist.title, playlist.tracks.len());
            print_tracks(&playlist.tracks);
        }
        Command::Top { artist_id, limit } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let tracks = gateway.fetch_top_tracks(artist_id, limit)?;
            print_tracks(&tracks);
        }
        Command::Related { artist_id } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            for artist in gateway.fetch_related_artists(artist_id)? {
                println!("{:>12}  {}", artist.id, artist.name);
            }
        }
        Command::Artist { id } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let artist = gateway.fetch_artist(id)?;
            println!("{:>12}  {}", artist.id, artist.name);
        }
        Command::Track { id } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let track = gateway.fetch_track(id)?;
            println!(
                "{} - {} [{}]",
                track.artist.name, track.title, track.album.title
            );
        }
        Command::Album { id } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let album = gateway.fetch_album(id)?;
            println!("{:>12}  {}", album.id, album.title);
        }
        Command::User { id } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let user = gateway.fetch_user(id)?;
            println!("{:>12}  {}", user.id, user.name);
        }
        Command::Search { query, kind } => {
            let gateway = DeezerGateway::new(token, Access::Basic)?;
            let kind = kind.map_or(SearchKind::All, Into::into);
            for hit in gateway.search(&query, kind)? {
                println!("{:>12}  {}", hit.id, hit.label());
            }
        }
        Command::Auth { token } => {
            config::save_token(&token)?;
            println!("Token saved to {}", config::config_path()?.display());
        }
        Command::DeletePlaylist { id } => {
            let gateway = DeezerGateway::new(token, Access::Delete)?;
            gateway.delete_playlist(id)?;
            println!("Deleted playlist {id}");
        }
        Command::DeleteTrack {
            playlist_id,
            track_id,
        } => {
            let gateway = DeezerGateway::new(token, Access::Delete)?;
            gateway.delete_track(playlist_id, track_id)?;
            println!("Removed track {track_id} from playlist {playlist_id}");
        }
        Command::Completion { shell } => {
            let mut cmd = Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(&shell),
                &mut cmd,
            );
        }
    }

    Ok(())
}
