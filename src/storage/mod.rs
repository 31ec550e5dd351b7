use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::lyrics::{LyricsSection, parse_lyrics_sections};
use crate::spotify::TrackMetadata;

pub const DEFAULT_OUTPUT_DIR: &str = "hotvectors_lyrics";

const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// One persisted lyrics file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub lyrics: Vec<LyricsSection>,
}

impl SongRecord {
    pub fn new(metadata: &TrackMetadata, lyrics: Vec<LyricsSection>) -> Self {
        Self {
            title: metadata.title.clone(),
            artist: metadata.artist.clone(),
            album: metadata.album.clone(),
            lyrics,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<Vec<u8>> {
        to_pretty_json(self).context("serialize song record")
    }
}

/// Four-space indented JSON with non-ASCII text left as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Drop characters that are invalid in filenames on common platforms.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c))
        .collect()
}

pub fn record_filename(metadata: &TrackMetadata) -> String {
    sanitize_filename(&format!("{} - {}.json", metadata.artist, metadata.title))
}

/// Parse `lyrics_text` into sections and write the record, replacing any previous file.
pub fn save_to_directory(
    metadata: &TrackMetadata,
    lyrics_text: Option<&str>,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create dir {}", output_dir.display()))?;

    let sections = parse_lyrics_sections(lyrics_text.unwrap_or_default());
    let record = SongRecord::new(metadata, sections);

    let path = output_dir.join(record_filename(metadata));
    let raw = record.to_json()?;
    fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn metadata(artist: &str, title: &str) -> TrackMetadata {
        TrackMetadata {
            title: title.to_string(),
            artist: artist.to_string(),
            album: "Album".to_string(),
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("AC/DC: Back?"), "ACDC Back");
        assert_eq!(sanitize_filename(r#"a\b*c"d<e>f|g"#), "abcdefg");
        assert_eq!(sanitize_filename("Plain Name"), "Plain Name");
    }

    #[test]
    fn test_record_filename() {
        assert_eq!(
            record_filename(&metadata("AC/DC", "Back In Black?")),
            "ACDC - Back In Black.json"
        );
    }

    #[test]
    fn test_save_writes_indented_utf8_json() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("lyrics");
        let meta = TrackMetadata {
            title: "Halo".to_string(),
            artist: "Beyoncé".to_string(),
            album: "I Am... Sasha Fierce".to_string(),
        };

        let path = save_to_directory(&meta, Some("[Chorus]\nHalo, halo\n"), &out).unwrap();
        assert_eq!(path, out.join("Beyoncé - Halo.json"));

        let content = fs::read_to_string(&path).unwrap();
        let expected = r#"{
    "title": "Halo",
    "artist": "Beyoncé",
    "album": "I Am... Sasha Fierce",
    "lyrics": [
        {
            "section": "Chorus",
            "lyrics": [
                "Halo, halo"
            ]
        }
    ]
}"#;
        assert_eq!(content, expected);
    }

    #[test]
    fn test_save_without_lyrics_writes_empty_list() {
        let dir = tempdir().unwrap();
        let path = save_to_directory(&metadata("A", "B"), None, dir.path()).unwrap();

        let record: SongRecord =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert!(record.lyrics.is_empty());
        assert_eq!(record.title, "B");
    }

    #[test]
    fn test_save_twice_is_byte_identical() {
        let dir = tempdir().unwrap();
        let meta = metadata("Adele", "Hello");
        let text = "[Verse 1]\nHello, it's me\n[Chorus]\nHello from the other side";

        let first = save_to_directory(&meta, Some(text), dir.path()).unwrap();
        let first_bytes = fs::read(&first).unwrap();
        let second = save_to_directory(&meta, Some(text), dir.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, fs::read(&second).unwrap());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let meta = metadata("Adele", "Hello");

        save_to_directory(&meta, Some("old line"), dir.path()).unwrap();
        let path = save_to_directory(&meta, Some("new line"), dir.path()).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("new line"));
        assert!(!content.contains("old line"));
    }

    #[test]
    fn test_pretty_json_for_bare_sections() {
        let sections = parse_lyrics_sections("[Intro]\nHey");
        let raw = String::from_utf8(to_pretty_json(&sections).unwrap()).unwrap();
        let expected = r#"[
    {
        "section": "Intro",
        "lyrics": [
            "Hey"
        ]
    }
]"#;
        assert_eq!(raw, expected);
    }
}
