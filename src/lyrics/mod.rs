//! Lyrics module for fetching and segmenting lyrics
//!
//! This module provides:
//! - URL slug derivation for Genius pages
//! - Genius page scraper
//! - Section parser for bracket-marked lyrics

pub mod genius;
pub mod sections;
pub mod slug;

pub use genius::{GeniusClient, LyricsLookup};
pub use sections::{LyricsSection, parse_lyrics_sections};
