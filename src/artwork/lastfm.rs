//! Last.fm artwork source backed by `ureq`.

use std::time::Duration;

use log::warn;
use serde_json::Value;

use crate::artwork::{ArtworkResult, ArtworkSource, LOGO_ASSET_KEY};
use crate::player::MediaPlayer;
use crate::text::{clean_search_key, pad_display_text};
use crate::track::TrackInfo;

const LASTFM_API_URL: &str = "http://ws.audioscrobbler.com/2.0/";
const IMAGE_SIZE_PRIORITY: [&str; 4] = ["extralarge", "large", "medium", "small"];

/// Album title plus image URL extracted from one lookup tier.
#[derive(Debug, Clone, PartialEq)]
struct AlbumArt {
    title: String,
    image_url: Option<String>,
}

impl AlbumArt {
    fn is_complete(&self) -> bool {
        !self.title.is_empty() && self.image_url.is_some()
    }
}

/// Resolves artwork through the Last.fm web API: the track's album first,
/// then the artist's top album, then the configured fallback image.
pub struct LastfmArtwork {
    http_client: ureq::Agent,
    api_key: String,
    fallback_image_url: String,
}

impl LastfmArtwork {
    pub fn new(api_key: &str, fallback_image_url: &str) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(5))
            .timeout_write(Duration::from_secs(5))
            .build();
        Self {
            http_client,
            api_key: api_key.to_string(),
            fallback_image_url: fallback_image_url.to_string(),
        }
    }

    fn api_url(&self, method: &str, params: &[(&str, &str)]) -> String {
        let mut query_parts = vec![
            format!("method={method}"),
            format!("api_key={}", urlencoding::encode(&self.api_key)),
            "format=json".to_string(),
        ];
        query_parts.extend(
            params
                .iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value))),
        );
        format!("{LASTFM_API_URL}?{}", query_parts.join("&"))
    }

    fn request_json(&self, method: &str, params: &[(&str, &str)]) -> Result<Value, String> {
        let url = self.api_url(method, params);
        let response = self
            .http_client
            .get(&url)
            .call()
            .map_err(|err| format!("Last.fm request failed ({method}): {err}"))?;
        response
            .into_json()
            .map_err(|err| format!("Last.fm response parse failed ({method}): {err}"))
    }

    fn album_from_track(&self, artist: &str, track: &str) -> Option<AlbumArt> {
        match self.request_json("track.getInfo", &[("artist", artist), ("track", track)]) {
            Ok(payload) => parse_track_album(&payload),
            Err(err) => {
                warn!("track album lookup failed: {err}");
                None
            }
        }
    }

    fn top_album_for_artist(&self, artist: &str) -> Option<AlbumArt> {
        match self.request_json("artist.getTopAlbums", &[("artist", artist), ("limit", "1")]) {
            Ok(payload) => parse_top_album(&payload),
            Err(err) => {
                warn!("artist top-album lookup failed: {err}");
                None
            }
        }
    }
}

impl ArtworkSource for LastfmArtwork {
    fn resolve(&self, _player: &dyn MediaPlayer, track: &TrackInfo) -> ArtworkResult {
        let artist_key = clean_search_key(&track.artist);
        let track_key = clean_search_key(&track.title);
        let track_album = self.album_from_track(&artist_key, &track_key);
        // A track tier missing either the album title or the image loses to
        // the artist's top album.
        let album = match track_album {
            Some(album) if album.is_complete() => Some(album),
            _ => self.top_album_for_artist(&artist_key),
        };
        compose_result(&track.artist, album, &self.fallback_image_url)
    }
}

fn parse_track_album(payload: &Value) -> Option<AlbumArt> {
    let album = payload.get("track")?.get("album")?;
    Some(AlbumArt {
        title: album
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        image_url: largest_image(album.get("image")),
    })
}

fn parse_top_album(payload: &Value) -> Option<AlbumArt> {
    let albums = payload.get("topalbums")?.get("album")?;
    let album = match albums {
        Value::Array(items) => items.first()?,
        item @ Value::Object(_) => item,
        _ => return None,
    };
    Some(AlbumArt {
        title: album
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        image_url: largest_image(album.get("image")),
    })
}

/// Picks from a `{size, #text}` image set by decreasing size, falling back
/// to the first entry with a non-empty URL.
fn largest_image(images: Option<&Value>) -> Option<String> {
    let items = match images {
        Some(Value::Array(items)) => items,
        _ => return None,
    };
    for size in IMAGE_SIZE_PRIORITY {
        for image in items {
            if image.get("size").and_then(Value::as_str) != Some(size) {
                continue;
            }
            if let Some(url) = image.get("#text").and_then(Value::as_str) {
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
        }
    }
    items.iter().find_map(|image| {
        image
            .get("#text")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(ToOwned::to_owned)
    })
}

fn compose_result(
    original_artist: &str,
    album: Option<AlbumArt>,
    fallback_image_url: &str,
) -> ArtworkResult {
    let (title, image_url) = match album {
        Some(album) => (album.title, album.image_url),
        None => (String::new(), None),
    };
    let display_text = if title.is_empty() {
        original_artist.to_string()
    } else {
        title
    };
    let asset_key = match image_url.filter(|url| !url.is_empty()) {
        Some(url) => url,
        None if !fallback_image_url.is_empty() => fallback_image_url.to_string(),
        None => LOGO_ASSET_KEY.to_string(),
    };
    ArtworkResult {
        asset_key,
        display_text: pad_display_text(&display_text, "Album"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{compose_result, largest_image, parse_top_album, parse_track_album, AlbumArt};

    #[test]
    fn test_image_picked_by_size_priority() {
        let images = json!([
            {"size": "large", "#text": "http://img/a.png"},
            {"size": "extralarge", "#text": "http://img/b.png"},
        ]);
        assert_eq!(
            largest_image(Some(&images)),
            Some("http://img/b.png".to_string())
        );
    }

    #[test]
    fn test_empty_urls_skipped_within_priority() {
        let images = json!([
            {"size": "extralarge", "#text": ""},
            {"size": "medium", "#text": "http://img/m.png"},
        ]);
        assert_eq!(
            largest_image(Some(&images)),
            Some("http://img/m.png".to_string())
        );
    }

    #[test]
    fn test_unknown_sizes_fall_back_to_first_nonempty() {
        let images = json!([
            {"size": "mega", "#text": ""},
            {"size": "mega", "#text": "http://img/x.png"},
        ]);
        assert_eq!(
            largest_image(Some(&images)),
            Some("http://img/x.png".to_string())
        );
    }

    #[test]
    fn test_no_images_yields_none() {
        assert_eq!(largest_image(None), None);
        assert_eq!(largest_image(Some(&json!([]))), None);
    }

    #[test]
    fn test_track_payload_with_album() {
        let payload = json!({
            "track": {
                "album": {
                    "title": "The Album",
                    "image": [{"size": "large", "#text": "http://img/l.png"}],
                }
            }
        });
        let album = parse_track_album(&payload).unwrap();
        assert_eq!(album.title, "The Album");
        assert_eq!(album.image_url, Some("http://img/l.png".to_string()));
        assert!(album.is_complete());
    }

    #[test]
    fn test_track_payload_without_album() {
        assert_eq!(parse_track_album(&json!({"track": {}})), None);
        assert_eq!(parse_track_album(&json!({"error": 6})), None);
    }

    #[test]
    fn test_top_album_payload_array_and_object_shapes() {
        let as_array = json!({
            "topalbums": {
                "album": [{"name": "Best Hits", "image": [{"size": "small", "#text": "http://img/s.png"}]}]
            }
        });
        let as_object = json!({
            "topalbums": {
                "album": {"name": "Best Hits", "image": []}
            }
        });
        assert_eq!(
            parse_top_album(&as_array).unwrap().title,
            "Best Hits".to_string()
        );
        assert_eq!(
            parse_top_album(&as_object).unwrap().title,
            "Best Hits".to_string()
        );
    }

    #[test]
    fn test_artist_tier_fills_in_missing_track_album() {
        // Track lookup found nothing; the artist's top album carries only a
        // small image and still wins.
        let payload = json!({
            "topalbums": {
                "album": [{"name": "Best Hits", "image": [{"size": "small", "#text": "http://img/s.png"}]}]
            }
        });
        let album = parse_top_album(&payload);
        let result = compose_result("Artist", album, "");
        assert_eq!(result.display_text, "Best Hits");
        assert_eq!(result.asset_key, "http://img/s.png");
    }

    #[test]
    fn test_compose_uses_artist_when_nothing_found() {
        let result = compose_result("Artist", None, "");
        assert_eq!(result.display_text, "Artist");
        assert_eq!(result.asset_key, "logo");
    }

    #[test]
    fn test_compose_prefers_configured_fallback_url() {
        let result = compose_result("Artist", None, "http://img/fallback.png");
        assert_eq!(result.asset_key, "http://img/fallback.png");
    }

    #[test]
    fn test_compose_pads_short_display_text() {
        let album = AlbumArt {
            title: "X".to_string(),
            image_url: Some("http://img/x.png".to_string()),
        };
        let result = compose_result("Artist", Some(album), "");
        assert_eq!(result.display_text, "Album: X");
    }
}
