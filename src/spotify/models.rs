use serde::{Deserialize, Serialize};

/// The three fields a lyrics file records about a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl Track {
    /// Primary artist only; `None` for items without any artist (episodes, broken local files).
    pub fn metadata(&self) -> Option<TrackMetadata> {
        let artist = self.artists.first()?;
        Some(TrackMetadata {
            title: self.name.clone(),
            artist: artist.name.clone(),
            album: self
                .album
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_metadata_uses_first_artist() {
        let track: Track = serde_json::from_str(
            r#"{
                "id": "3n3Ppam7vgaVa1iaRUc9Lp",
                "name": "Mr. Brightside",
                "artists": [{"name": "The Killers"}, {"name": "Someone Else"}],
                "album": {"name": "Hot Fuss", "release_date": "2004"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            track.metadata(),
            Some(TrackMetadata {
                title: "Mr. Brightside".to_string(),
                artist: "The Killers".to_string(),
                album: "Hot Fuss".to_string(),
            })
        );
    }

    #[test]
    fn test_track_without_artists_has_no_metadata() {
        let track: Track =
            serde_json::from_str(r#"{"name": "Episode 12", "type": "episode"}"#).unwrap();
        assert_eq!(track.metadata(), None);
    }

    #[test]
    fn test_playlist_page_with_null_track() {
        let page: PlaylistPage = serde_json::from_str(
            r#"{
                "items": [
                    {"track": null},
                    {"track": {
                        "name": "Hello",
                        "artists": [{"name": "Adele"}],
                        "album": {"name": "25"}
                    }}
                ],
                "next": "https://api.spotify.com/v1/playlists/x/tracks?offset=100&limit=100",
                "total": 150
            }"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].track.is_none());
        assert_eq!(page.items[1].track.as_ref().unwrap().name, "Hello");
        assert!(page.next.is_some());
        assert_eq!(page.total, Some(150));
    }
}
