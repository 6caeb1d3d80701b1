//! Artwork source abstractions and concrete implementations.

pub mod lastfm;
pub mod local;

use log::{info, warn};

use crate::assets::AlbumAssetTables;
use crate::config::Settings;
use crate::player::MediaPlayer;
use crate::text::pad_display_text;
use crate::track::TrackInfo;

/// Asset key the presence client resolves to the bundled logo image.
pub const LOGO_ASSET_KEY: &str = "logo";

/// Resolved artwork reference and its hover text.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkResult {
    /// Registered presence asset key, or a direct image URL.
    pub asset_key: String,
    pub display_text: String,
}

/// Interface implemented by concrete artwork sources. Resolution never
/// fails; every source degrades internally to a usable default pair.
pub trait ArtworkSource {
    fn resolve(&self, player: &dyn MediaPlayer, track: &TrackInfo) -> ArtworkResult;
}

/// Fixed artwork used when neither direct URLs nor custom assets are active.
pub struct StaticArtwork {
    asset_key: String,
    display_text: String,
}

impl StaticArtwork {
    pub fn new(asset_key: &str, display_text: &str) -> Self {
        Self {
            asset_key: asset_key.to_string(),
            display_text: pad_display_text(display_text, "Album"),
        }
    }
}

impl ArtworkSource for StaticArtwork {
    fn resolve(&self, _player: &dyn MediaPlayer, _track: &TrackInfo) -> ArtworkResult {
        ArtworkResult {
            asset_key: self.asset_key.clone(),
            display_text: self.display_text.clone(),
        }
    }
}

/// Builds the artwork source selected by configuration. The choice is made
/// once here; nothing branches on the mode per track afterwards.
pub fn artwork_source_from_settings(
    settings: &Settings,
    tables: AlbumAssetTables,
    version_banner: &str,
) -> Box<dyn ArtworkSource> {
    if settings.use_direct_urls {
        info!("Using direct URLs for album art from the Last.fm API.");
        return Box::new(lastfm::LastfmArtwork::new(
            &settings.lastfm_api_key,
            &settings.fallback_image_url,
        ));
    }
    if settings.custom_assets {
        if tables.is_empty() {
            warn!("custom_assets is enabled but no album asset keys are loaded. Using the default logo asset.");
        } else {
            info!("Using registered presence assets for album art.");
            return Box::new(local::LocalArtwork::new(settings, tables, version_banner));
        }
    } else {
        info!("Using the default logo asset for album art.");
    }
    Box::new(StaticArtwork::new(LOGO_ASSET_KEY, version_banner))
}
