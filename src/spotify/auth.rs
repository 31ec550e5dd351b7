use std::time::{Duration, Instant};
use tracing::warn;

pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

/// Refresh this long before Spotify says the token expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const DEFAULT_LIFETIME_SECS: u64 = 3600;
const MAX_LIFETIME_SECS: u64 = 24 * 3600;

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read client credentials, loading `.env` from the working directory first.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenv::dotenv()
            && let Some(msg) = dotenv_warning(&e)
        {
            warn!("{msg}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        match (non_empty(CLIENT_ID_VAR), non_empty(CLIENT_SECRET_VAR)) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
            }),
            _ => anyhow::bail!(
                "Spotify credentials not found in environment or .env file \
                 ({CLIENT_ID_VAR}, {CLIENT_SECRET_VAR})"
            ),
        }
    }
}

/// A missing .env is fine; real environment variables still apply.
fn dotenv_warning(err: &dotenv::Error) -> Option<String> {
    if err.not_found() {
        None
    } else {
        Some(format!("Ignoring malformed .env file: {err}"))
    }
}

/// A bearer token from the client-credentials grant.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    refresh_at: Instant,
}

impl AccessToken {
    pub fn new(value: String, expires_in: Option<u64>, now: Instant) -> Self {
        let secs = expires_in
            .unwrap_or(DEFAULT_LIFETIME_SECS)
            .min(MAX_LIFETIME_SECS);
        let lifetime = Duration::from_secs(secs);
        Self {
            value,
            refresh_at: now + lifetime.saturating_sub(EXPIRY_MARGIN),
        }
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_at
    }
}
