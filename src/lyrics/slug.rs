//! Genius URL slugs

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_GENIUS_BASE: &str = "https://genius.com";

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("static slug pattern"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static slug pattern"));

/// Turn free-form text into a lowercase, hyphen-separated path segment.
///
/// Letters outside ASCII survive (`\w` is Unicode-aware); malformed input
/// silently yields a short or empty slug.
pub fn slugify(text: &str) -> String {
    let text: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .collect();
    let text = text.replace('&', "and");
    let text = NON_WORD.replace_all(&text, "");
    let text = text.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&text, "-").into_owned()
}

/// Lyrics page on genius.com for an artist/title pair.
pub fn format_for_genius_url(artist: &str, title: &str) -> String {
    genius_url_with_base(DEFAULT_GENIUS_BASE, artist, title)
}

/// Same as [`format_for_genius_url`] against another host, e.g. a local mirror.
pub fn genius_url_with_base(base: &str, artist: &str, title: &str) -> String {
    format!(
        "{}/{}-{}-lyrics",
        base.trim_end_matches('/'),
        slugify(artist),
        slugify(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_ampersand_and_accents() {
        assert_eq!(slugify("Beyoncé & Jay-Z"), "beyoncé-and-jay-z");
    }

    #[test]
    fn test_slugify_apostrophes() {
        assert_eq!(slugify("Guns N' Roses"), "guns-n-roses");
        assert_eq!(slugify("Don’t Stop Me Now"), "dont-stop-me-now");
        assert_eq!(slugify("Rock `n Roll"), "rock-n-roll");
    }

    #[test]
    fn test_slugify_punctuation_and_whitespace() {
        assert_eq!(slugify("AC/DC"), "acdc");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("R&B Song's"), "randb-songs");
        assert_eq!(slugify("Song (feat. Someone)"), "song-feat-someone");
    }

    #[test]
    fn test_slugify_degenerate_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_format_for_genius_url() {
        assert_eq!(
            format_for_genius_url("Adele", "Hello"),
            "https://genius.com/adele-hello-lyrics"
        );
    }

    #[test]
    fn test_genius_url_with_base_trims_slash() {
        assert_eq!(
            genius_url_with_base("http://localhost:8080/", "Daft Punk", "One More Time"),
            "http://localhost:8080/daft-punk-one-more-time-lyrics"
        );
    }
}
