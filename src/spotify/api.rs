use crate::spotify::auth::{AccessToken, Credentials};
use crate::spotify::models::{PlaylistPage, Track, TrackMetadata, TokenResponse};
use anyhow::Context;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

const PLAYLIST_PAGE_LIMIT: u32 = 100;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    credentials: Credentials,
    api_base: String,
    token_url: String,
    token: Mutex<Option<AccessToken>>,
}

/// Read-only Spotify Web API client using the client-credentials flow.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    inner: Arc<Inner>,
}

impl SpotifyClient {
    pub fn new(
        credentials: Credentials,
        api_base: &str,
        token_url: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("build spotify http client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                credentials,
                api_base: api_base.trim_end_matches('/').to_string(),
                token_url: token_url.to_string(),
                token: Mutex::new(None),
            }),
        })
    }

    pub async fn track(&self, track_id: &str) -> anyhow::Result<TrackMetadata> {
        let url = format!(
            "{}/tracks/{}",
            self.inner.api_base,
            urlencoding::encode(track_id)
        );
        let track: Track = self.get_json(&url).await.context("fetch spotify track")?;
        track
            .metadata()
            .with_context(|| format!("spotify track {track_id} has no artists"))
    }

    /// Every item of a playlist, in order. `None` marks an item without a usable track.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> anyhow::Result<Vec<Option<TrackMetadata>>> {
        let mut next = Some(format!(
            "{}/playlists/{}/tracks?limit={}",
            self.inner.api_base,
            urlencoding::encode(playlist_id),
            PLAYLIST_PAGE_LIMIT
        ));
        let mut out = Vec::new();
        let mut visited = HashSet::new();

        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                warn!("Playlist page {url} repeats; stopping pagination");
                break;
            }
            let page: PlaylistPage = self
                .get_json(&url)
                .await
                .context("fetch spotify playlist page")?;
            debug!(
                "Playlist page: {} items (total {:?})",
                page.items.len(),
                page.total
            );

            out.extend(
                page.items
                    .iter()
                    .map(|item| item.track.as_ref().and_then(Track::metadata)),
            );
            next = page.next;
        }

        Ok(out)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let token = self.access_token().await?;
        let v = self
            .inner
            .http
            .get(url)
            .bearer_auth(&token.value)
            .send()
            .await
            .with_context(|| format!("send request {url}"))?
            .error_for_status()
            .with_context(|| format!("http status for {url}"))?
            .json()
            .await
            .with_context(|| format!("parse json from {url}"))?;
        Ok(v)
    }

    async fn access_token(&self) -> anyhow::Result<AccessToken> {
        let mut guard = self.inner.token.lock().await;
        if let Some(token) = guard.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.clone());
        }

        let token = self.request_token().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    async fn request_token(&self) -> anyhow::Result<AccessToken> {
        debug!("Requesting spotify access token");
        let creds = &self.inner.credentials;
        let resp: TokenResponse = self
            .inner
            .http
            .post(&self.inner.token_url)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .context("send spotify token request")?
            .error_for_status()
            .context("spotify token http status")?
            .json()
            .await
            .context("parse spotify token json")?;

        Ok(AccessToken::new(
            resp.access_token,
            resp.expires_in,
            Instant::now(),
        ))
    }
}
