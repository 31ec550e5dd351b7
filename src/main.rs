mod config;
mod lyrics;
mod pipeline;
mod spotify;
mod storage;
mod testing;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hotvectors",
    version,
    about = "Save sectioned Genius lyrics for Spotify tracks and playlists as JSON"
)]
struct Cli {
    /// Override config file path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON files here instead of the configured output directory.
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Log debug details (HTTP pages, token refreshes).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Save lyrics for a single track.
    Song {
        /// Spotify track link or URI.
        url: String,
    },
    /// Save lyrics for every track of a playlist.
    Playlist {
        /// Spotify playlist link or URI.
        url: String,
    },
    /// Detect whether the link is a track or a playlist and process it.
    Fetch {
        url: String,
    },
    /// Print the Genius URL for an artist and title (offline).
    Url {
        artist: String,
        title: String,
    },
    /// Parse a lyrics text file (stdin if omitted) and print its sections as JSON (offline).
    Sections {
        file: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| cfg.output.dir.clone());

    match cli.command {
        Command::Song { url } => {
            let (tracks, lyrics) = make_clients(&cfg)?;
            match pipeline::process_song(&tracks, &lyrics, &url, &output_dir).await? {
                pipeline::SongOutcome::Saved(path) => println!("Saved {}", path.display()),
                pipeline::SongOutcome::LyricsMissing => println!("No lyrics saved."),
            }
        }
        Command::Playlist { url } => {
            let (tracks, lyrics) = make_clients(&cfg)?;
            let summary = pipeline::process_playlist(&tracks, &lyrics, &url, &output_dir).await?;
            summary.print();
        }
        Command::Fetch { url } => {
            let (tracks, lyrics) = make_clients(&cfg)?;
            match pipeline::process_any(&tracks, &lyrics, &url, &output_dir).await? {
                pipeline::RunReport::Song(pipeline::SongOutcome::Saved(path)) => {
                    println!("Saved {}", path.display())
                }
                pipeline::RunReport::Song(pipeline::SongOutcome::LyricsMissing) => {
                    println!("No lyrics saved.")
                }
                pipeline::RunReport::Playlist(summary) => summary.print(),
            }
        }
        Command::Url { artist, title } => {
            println!(
                "{}",
                lyrics::slug::genius_url_with_base(&cfg.genius.base_url, &artist, &title)
            );
        }
        Command::Sections { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin()).context("read stdin")?,
            };
            let sections = lyrics::parse_lyrics_sections(&text);
            let raw = storage::to_pretty_json(&sections)?;
            println!("{}", String::from_utf8(raw)?);
        }
    }

    Ok(())
}

/// Credentials are checked before any request goes out.
fn make_clients(
    cfg: &config::Config,
) -> anyhow::Result<(spotify::SpotifyClient, lyrics::GeniusClient)> {
    let credentials = spotify::Credentials::from_env()?;
    let tracks = spotify::SpotifyClient::new(
        credentials,
        &cfg.spotify.api_base,
        &cfg.spotify.token_url,
        cfg.spotify.timeout(),
    )?;
    let lyrics = lyrics::GeniusClient::new(
        &cfg.genius.base_url,
        &cfg.genius.user_agent,
        cfg.genius.timeout(),
    )?;
    Ok((tracks, lyrics))
}
