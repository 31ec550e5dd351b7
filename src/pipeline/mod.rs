//! Track and playlist processing
//!
//! Everything runs strictly in order: one metadata lookup, then one lyrics
//! lookup and one file write per track.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::lyrics::{GeniusClient, LyricsLookup};
use crate::spotify::{ResourceKind, SpotifyClient, TrackMetadata, detect_kind, parse_resource_id};
use crate::storage::save_to_directory;

/// Where track metadata comes from.
pub trait TrackSource {
    async fn track(&self, track_id: &str) -> anyhow::Result<TrackMetadata>;
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> anyhow::Result<Vec<Option<TrackMetadata>>>;
}

/// Where lyrics text comes from.
pub trait LyricsSource {
    async fn lookup(&self, artist: &str, title: &str) -> anyhow::Result<LyricsLookup>;
}

impl TrackSource for SpotifyClient {
    async fn track(&self, track_id: &str) -> anyhow::Result<TrackMetadata> {
        SpotifyClient::track(self, track_id).await
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> anyhow::Result<Vec<Option<TrackMetadata>>> {
        SpotifyClient::playlist_tracks(self, playlist_id).await
    }
}

impl LyricsSource for GeniusClient {
    async fn lookup(&self, artist: &str, title: &str) -> anyhow::Result<LyricsLookup> {
        self.lyrics(artist, title).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongOutcome {
    Saved(PathBuf),
    LyricsMissing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub total: usize,
    pub saved: usize,
    pub missing_tracks: usize,
    pub lyrics_missing: usize,
    pub failed: usize,
}

impl PlaylistSummary {
    pub fn print(&self) {
        println!(
            "Done: {} tracks ({} saved, {} without lyrics, {} missing, {} failed).",
            self.total, self.saved, self.lyrics_missing, self.missing_tracks, self.failed
        );
    }
}

/// What `process_any` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Song(SongOutcome),
    Playlist(PlaylistSummary),
}

pub async fn process_song<T, L>(
    tracks: &T,
    lyrics: &L,
    input: &str,
    output_dir: &Path,
) -> anyhow::Result<SongOutcome>
where
    T: TrackSource,
    L: LyricsSource,
{
    let track_id = parse_resource_id(input)?;
    let metadata = tracks
        .track(&track_id)
        .await
        .with_context(|| format!("load track {track_id}"))?;
    info!("Processing: {} by {}", metadata.title, metadata.artist);

    let lookup = lyrics.lookup(&metadata.artist, &metadata.title).await?;
    let Some(text) = found_text(lookup) else {
        warn!("Lyrics not found.");
        return Ok(SongOutcome::LyricsMissing);
    };

    let path = save_to_directory(&metadata, Some(text.as_str()), output_dir)?;
    info!("Saved: {}", path.display());
    Ok(SongOutcome::Saved(path))
}

/// Best effort over every playlist item. Only metadata and write failures stop the run.
pub async fn process_playlist<T, L>(
    tracks: &T,
    lyrics: &L,
    input: &str,
    output_dir: &Path,
) -> anyhow::Result<PlaylistSummary>
where
    T: TrackSource,
    L: LyricsSource,
{
    let playlist_id = parse_resource_id(input)?;
    let items = tracks
        .playlist_tracks(&playlist_id)
        .await
        .with_context(|| format!("load playlist {playlist_id}"))?;
    info!("Processing playlist with {} tracks...", items.len());

    let mut summary = PlaylistSummary {
        total: items.len(),
        ..Default::default()
    };

    for (idx, item) in items.iter().enumerate() {
        let n = idx + 1;
        let Some(metadata) = item else {
            warn!("[{n}] Skipping missing track.");
            summary.missing_tracks += 1;
            continue;
        };
        info!("[{n}] {} by {}", metadata.title, metadata.artist);

        let lookup = match lyrics.lookup(&metadata.artist, &metadata.title).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!("[{n}] Lyrics request failed for {}: {e:#}", metadata.title);
                summary.failed += 1;
                continue;
            }
        };

        let Some(text) = found_text(lookup) else {
            warn!("[{n}] Lyrics not found for: {}", metadata.title);
            summary.lyrics_missing += 1;
            continue;
        };

        let path = save_to_directory(metadata, Some(text.as_str()), output_dir)?;
        info!("Saved: {}", path.display());
        summary.saved += 1;
    }

    Ok(summary)
}

/// Dispatch on the kind of link.
pub async fn process_any<T, L>(
    tracks: &T,
    lyrics: &L,
    input: &str,
    output_dir: &Path,
) -> anyhow::Result<RunReport>
where
    T: TrackSource,
    L: LyricsSource,
{
    match detect_kind(input) {
        Some(ResourceKind::Track) => Ok(RunReport::Song(
            process_song(tracks, lyrics, input, output_dir).await?,
        )),
        Some(ResourceKind::Playlist) => Ok(RunReport::Playlist(
            process_playlist(tracks, lyrics, input, output_dir).await?,
        )),
        None => anyhow::bail!("not a spotify track or playlist link: {input}"),
    }
}

fn found_text(lookup: LyricsLookup) -> Option<String> {
    match lookup {
        LyricsLookup::Found(text) => Some(text),
        LyricsLookup::PageNotFound(status) => {
            warn!("Genius page not found ({status})");
            None
        }
        LyricsLookup::NoContainers => {
            warn!("No lyrics containers found.");
            None
        }
        LyricsLookup::Empty => {
            warn!("Lyrics containers were empty.");
            None
        }
    }
}
