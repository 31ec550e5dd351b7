//! Section parser
//!
//! Splits plain lyrics into labeled sections using bracketed marker lines:
//! [Verse 1]
//! First line
//! [Chorus]
//! Hook line
//!
//! Lines before the first marker belong to an implicit "Intro" section.

use serde::{Deserialize, Serialize};

const INITIAL_LABEL: &str = "Intro";

/// A labeled run of lyric lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsSection {
    /// Marker text, e.g. "Chorus" or "Verse 1: Artist"
    pub section: String,
    /// Trimmed, non-empty lines in order
    pub lyrics: Vec<String>,
}

impl LyricsSection {
    fn new(label: impl Into<String>) -> Self {
        Self {
            section: label.into(),
            lyrics: Vec::new(),
        }
    }
}

/// Parse raw lyrics text into ordered sections.
///
/// Sections that never receive a line are dropped, including the implicit
/// "Intro" and any marker immediately followed by another marker.
pub fn parse_lyrics_sections(text: &str) -> Vec<LyricsSection> {
    let mut sections = Vec::new();
    let mut current = LyricsSection::new(INITIAL_LABEL);

    for line in split_lines(text) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(label) = parse_marker(line) {
            let finished = std::mem::replace(&mut current, LyricsSection::new(label));
            if !finished.lyrics.is_empty() {
                sections.push(finished);
            }
            continue;
        }

        current.lyrics.push(line.to_string());
    }

    if !current.lyrics.is_empty() {
        sections.push(current);
    }

    sections
}

/// Label of a leading `[...]` marker. Text after the closing bracket is ignored.
fn parse_marker(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    Some(&rest[..end])
}

/// Split on every Unicode line boundary, not only `\n`.
///
/// Scraped page text can carry `\r`, form feeds or U+2028; a `\r\n` pair
/// yields an extra empty line, which the parser skips anyway.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| {
        matches!(
            c,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        )
    })
}
