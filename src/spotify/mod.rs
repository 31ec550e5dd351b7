//! Spotify Web API access and resource-link handling

pub mod api;
pub mod auth;
pub mod models;

pub use api::SpotifyClient;
pub use auth::Credentials;
pub use models::TrackMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Track,
    Playlist,
}

/// Resource ID from a share link (`https://open.spotify.com/track/<id>?si=...`)
/// or a URI (`spotify:track:<id>`).
pub fn parse_resource_id(input: &str) -> anyhow::Result<String> {
    let trimmed = input.trim();
    let without_query = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    let separator = if without_query.starts_with("spotify:") {
        ':'
    } else {
        '/'
    };
    let id = without_query.rsplit(separator).next().unwrap_or_default();

    if id.is_empty() {
        anyhow::bail!("no spotify id in {input:?}");
    }
    Ok(id.to_string())
}

/// Whether a link points at a track or a playlist.
pub fn detect_kind(input: &str) -> Option<ResourceKind> {
    let path = input.trim().split(['?', '#']).next().unwrap_or_default();

    if path.starts_with("spotify:track:") || path.contains("/track/") {
        Some(ResourceKind::Track)
    } else if path.starts_with("spotify:playlist:") || path.contains("/playlist/") {
        Some(ResourceKind::Playlist)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_from_share_links() {
        assert_eq!(
            parse_resource_id("https://open.spotify.com/track/3n3Ppam7vgaVa1iaRUc9Lp").unwrap(),
            "3n3Ppam7vgaVa1iaRUc9Lp"
        );
        assert_eq!(
            parse_resource_id(
                "https://open.spotify.com/playlist/3p9QX64O6z2mpMy2G6eJbQ?si=IWOVltyvQE6jtRoPbQ84Nw"
            )
            .unwrap(),
            "3p9QX64O6z2mpMy2G6eJbQ"
        );
        assert_eq!(
            parse_resource_id("https://open.spotify.com/intl-de/track/abc123/").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_parse_id_from_uri_and_bare_id() {
        assert_eq!(parse_resource_id("spotify:track:abc123").unwrap(), "abc123");
        assert_eq!(parse_resource_id("  abc123 ").unwrap(), "abc123");
    }

    #[test]
    fn test_parse_id_rejects_empty() {
        assert!(parse_resource_id("").is_err());
        assert!(parse_resource_id("   ").is_err());
        assert!(parse_resource_id("?si=x").is_err());
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            detect_kind("https://open.spotify.com/track/abc?si=1"),
            Some(ResourceKind::Track)
        );
        assert_eq!(
            detect_kind("https://open.spotify.com/playlist/abc"),
            Some(ResourceKind::Playlist)
        );
        assert_eq!(detect_kind("spotify:playlist:abc"), Some(ResourceKind::Playlist));
        assert_eq!(detect_kind("spotify:track:abc"), Some(ResourceKind::Track));
        assert_eq!(detect_kind("https://open.spotify.com/album/abc"), None);
    }
}
