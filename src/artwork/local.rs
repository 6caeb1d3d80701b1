//! Registered-asset artwork source backed by the local album tables.

use std::path::PathBuf;

use log::warn;

use crate::artwork::{ArtworkResult, ArtworkSource};
use crate::assets::AlbumAssetTables;
use crate::config::Settings;
use crate::player::MediaPlayer;
use crate::text::pad_display_text;
use crate::track::TrackInfo;

/// What the default asset's hover text shows when an album has no
/// registered asset key.
#[derive(Debug, Clone, PartialEq)]
enum DefaultTextMode {
    VersionBanner,
    AlbumName,
    Literal(String),
}

impl DefaultTextMode {
    fn from_config(value: &str) -> Self {
        match value {
            "winamp version" => Self::VersionBanner,
            "album name" => Self::AlbumName,
            other => Self::Literal(other.to_string()),
        }
    }
}

/// Maps the playing track's album folder name to a registered presence
/// asset key.
pub struct LocalArtwork {
    tables: AlbumAssetTables,
    default_asset_key: String,
    default_text_mode: DefaultTextMode,
    version_banner: String,
}

impl LocalArtwork {
    pub fn new(settings: &Settings, tables: AlbumAssetTables, version_banner: &str) -> Self {
        Self {
            tables,
            default_asset_key: settings.default_large_asset_key.clone(),
            default_text_mode: DefaultTextMode::from_config(&settings.default_large_asset_text),
            version_banner: version_banner.to_string(),
        }
    }

    fn lookup(&self, album_name: &str, artist: &str) -> ArtworkResult {
        // Ambiguous album names are stored artist-qualified in the table.
        let album_key = if self.tables.exceptions.contains(album_name) {
            format!("{artist} - {album_name}")
        } else {
            album_name.to_string()
        };
        let (asset_key, display_text) = match self.tables.asset_keys.get(&album_key) {
            Some(asset_key) => (asset_key.clone(), album_name.to_string()),
            None => {
                let text = match &self.default_text_mode {
                    DefaultTextMode::VersionBanner => self.version_banner.clone(),
                    DefaultTextMode::AlbumName => album_name.to_string(),
                    DefaultTextMode::Literal(text) => text.clone(),
                };
                (self.default_asset_key.clone(), text)
            }
        };
        ArtworkResult {
            asset_key,
            display_text: pad_display_text(&display_text, "Album"),
        }
    }
}

/// Base name of the directory holding the playlist entry at `index`.
fn album_directory_name(paths: &[PathBuf], index: usize) -> Option<String> {
    paths
        .get(index)?
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
}

impl ArtworkSource for LocalArtwork {
    fn resolve(&self, player: &dyn MediaPlayer, track: &TrackInfo) -> ArtworkResult {
        let album_name = match player.playlist_paths() {
            Ok(paths) => {
                let name = album_directory_name(&paths, track.playlist_index);
                if name.is_none() {
                    warn!(
                        "playlist has no entry at index {}; using default assets",
                        track.playlist_index
                    );
                }
                name
            }
            Err(err) => {
                warn!("playlist lookup failed: {err}; using default assets");
                None
            }
        };
        self.lookup(album_name.as_deref().unwrap_or(""), &track.artist)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{album_directory_name, LocalArtwork};
    use crate::assets::AlbumAssetTables;
    use crate::config::Settings;

    fn tables() -> AlbumAssetTables {
        let mut tables = AlbumAssetTables::default();
        tables.exceptions.insert("Greatest Hits".to_string());
        tables
            .asset_keys
            .insert("Abbey Road".to_string(), "abbey_road".to_string());
        tables.asset_keys.insert(
            "Queen - Greatest Hits".to_string(),
            "queen_gh".to_string(),
        );
        tables
    }

    fn source(default_text: &str) -> LocalArtwork {
        let settings = Settings {
            default_large_asset_text: default_text.to_string(),
            ..Settings::default()
        };
        LocalArtwork::new(&settings, tables(), "Winamp v5.66")
    }

    #[test]
    fn test_lookup_hit_uses_mapped_key_and_album_text() {
        let result = source("winamp version").lookup("Abbey Road", "The Beatles");
        assert_eq!(result.asset_key, "abbey_road");
        assert_eq!(result.display_text, "Abbey Road");
    }

    #[test]
    fn test_ambiguous_album_is_artist_qualified() {
        let result = source("winamp version").lookup("Greatest Hits", "Queen");
        assert_eq!(result.asset_key, "queen_gh");
        assert_eq!(result.display_text, "Greatest Hits");
    }

    #[test]
    fn test_miss_with_version_banner_text() {
        let result = source("winamp version").lookup("Unknown Album", "Artist");
        assert_eq!(result.asset_key, "logo");
        assert_eq!(result.display_text, "Winamp v5.66");
    }

    #[test]
    fn test_miss_with_album_name_text() {
        let result = source("album name").lookup("Unknown Album", "Artist");
        assert_eq!(result.display_text, "Unknown Album");
    }

    #[test]
    fn test_miss_with_literal_text() {
        let result = source("Now playing").lookup("Unknown Album", "Artist");
        assert_eq!(result.display_text, "Now playing");
    }

    #[test]
    fn test_short_album_text_is_padded() {
        let result = source("album name").lookup("X", "Artist");
        assert_eq!(result.display_text, "Album: X");
    }

    #[test]
    fn test_album_directory_name_from_playlist() {
        let paths = vec![
            PathBuf::from("/music/Abbey Road/01 Come Together.flac"),
            PathBuf::from("/music/Help!/02 The Night Before.flac"),
        ];
        assert_eq!(
            album_directory_name(&paths, 1),
            Some("Help!".to_string())
        );
        assert_eq!(album_directory_name(&paths, 5), None);
    }
}
