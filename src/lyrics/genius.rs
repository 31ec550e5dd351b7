//! Genius lyrics scraper
//!
//! Genius has no public lyrics endpoint, so the page is fetched directly and
//! the text is pulled out of the `Lyrics__Container*` divs.

use anyhow::Context;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

use super::slug::{DEFAULT_GENIUS_BASE, format_for_genius_url, genius_url_with_base};

const CONTAINER_SELECTOR: &str = "div[class^='Lyrics__Container']";

/// Result of one lyrics lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsLookup {
    /// Lyrics text with containers joined by newlines
    Found(String),
    /// The page answered with something other than 200
    PageNotFound(u16),
    /// The page loaded but had no lyrics container
    NoContainers,
    /// Containers were present but held only whitespace
    Empty,
}

/// Genius page client
#[derive(Debug, Clone)]
pub struct GeniusClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeniusClient {
    pub const DEFAULT_USER_AGENT: &'static str = "Mozilla/5.0";

    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("build genius http client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Page URL this client would fetch for an artist/title pair
    pub fn page_url(&self, artist: &str, title: &str) -> String {
        if self.base_url.trim_end_matches('/') == DEFAULT_GENIUS_BASE {
            format_for_genius_url(artist, title)
        } else {
            genius_url_with_base(&self.base_url, artist, title)
        }
    }

    /// Fetch and extract lyrics. Only transport failures are errors.
    pub async fn lyrics(&self, artist: &str, title: &str) -> anyhow::Result<LyricsLookup> {
        let url = self.page_url(artist, title);
        info!("Fetching lyrics: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("send genius request {url}"))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Ok(LyricsLookup::PageNotFound(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .with_context(|| format!("read genius page {url}"))?;
        debug!("Fetched {} bytes from {url}", html.len());

        Ok(lookup_from_html(&html))
    }
}

fn lookup_from_html(html: &str) -> LyricsLookup {
    match extract_lyrics_text(html) {
        None => LyricsLookup::NoContainers,
        Some(text) if text.is_empty() => LyricsLookup::Empty,
        Some(text) => LyricsLookup::Found(text),
    }
}

/// Pull lyrics text out of a Genius page.
///
/// Returns `None` when no container matches. Each text node becomes its own
/// line, so `<br>` breaks and annotation links both end up line-separated.
pub fn extract_lyrics_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = container_selector();

    let containers: Vec<String> = document
        .select(&selector)
        .map(|div| div.text().collect::<Vec<_>>().join("\n"))
        .collect();

    if containers.is_empty() {
        return None;
    }

    Some(containers.join("\n").trim().to_string())
}

fn container_selector() -> Selector {
    // Constant selector; a parse failure is a programming error caught by tests.
    Selector::parse(CONTAINER_SELECTOR).expect("valid lyrics container selector")
}
