//! Persistent daemon configuration model and loading.

use std::path::Path;

use log::{info, warn};

/// Discord application id substituted when the config keeps the `"default"`
/// marker value.
const BUILTIN_CLIENT_ID: &str = "507484022675603456";
/// Placeholder shipped in the default settings file until the user pastes a
/// real Last.fm API key.
const API_KEY_PLACEHOLDER: &str = "YOUR_LASTFM_API_KEY_HERE";

pub const SETTINGS_FILE_NAME: &str = "ampresence.toml";

/// Root configuration loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Fetch album art URLs from Last.fm instead of registered assets.
    #[serde(default)]
    pub use_direct_urls: bool,
    #[serde(default = "default_lastfm_api_key")]
    pub lastfm_api_key: String,
    #[serde(default = "default_large_asset_key")]
    pub default_large_asset_key: String,
    /// `"winamp version"`, `"album name"`, or a literal hover text.
    #[serde(default = "default_large_asset_text")]
    pub default_large_asset_text: String,
    #[serde(default = "default_small_asset_key")]
    pub small_asset_key: String,
    #[serde(default = "default_small_asset_text")]
    pub small_asset_text: String,
    /// Map album folder names to registered presence assets.
    #[serde(default)]
    pub custom_assets: bool,
    /// Image URL used when no album art is found online.
    #[serde(default)]
    pub fallback_image_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            use_direct_urls: true,
            lastfm_api_key: default_lastfm_api_key(),
            default_large_asset_key: default_large_asset_key(),
            default_large_asset_text: default_large_asset_text(),
            small_asset_key: default_small_asset_key(),
            small_asset_text: default_small_asset_text(),
            custom_assets: false,
            fallback_image_url: String::new(),
        }
    }
}

impl Settings {
    pub fn has_usable_api_key(&self) -> bool {
        !self.lastfm_api_key.trim().is_empty() && self.lastfm_api_key != API_KEY_PLACEHOLDER
    }
}

fn default_client_id() -> String {
    "default".to_string()
}

fn default_lastfm_api_key() -> String {
    API_KEY_PLACEHOLDER.to_string()
}

fn default_large_asset_key() -> String {
    "logo".to_string()
}

fn default_large_asset_text() -> String {
    "winamp version".to_string()
}

fn default_small_asset_key() -> String {
    "playbutton".to_string()
}

fn default_small_asset_text() -> String {
    "Playing".to_string()
}

/// Applies the fixups raw file contents may need before use.
pub fn sanitize_settings(mut settings: Settings) -> Settings {
    if settings.client_id == "default" || settings.client_id.trim().is_empty() {
        settings.client_id = BUILTIN_CLIENT_ID.to_string();
    }
    if settings.use_direct_urls && !settings.has_usable_api_key() {
        warn!(
            "use_direct_urls is enabled but no usable Last.fm API key is configured. \
             Get a free key from https://www.last.fm/api/account/create. \
             Falling back to custom asset mode."
        );
        settings.use_direct_urls = false;
    }
    settings
}

/// Loads settings from `path`, writing a default file first when none exists.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        info!(
            "Settings file not found. Creating default settings. path={}",
            path.display()
        );
        match toml::to_string(&Settings::default()) {
            Ok(serialized) => {
                if let Err(err) = std::fs::write(path, serialized) {
                    warn!(
                        "Failed to persist default settings to {}: {}",
                        path.display(),
                        err
                    );
                }
            }
            Err(err) => warn!("Failed to serialize default settings: {}", err),
        }
    }

    let content = std::fs::read_to_string(path).unwrap_or_default();
    let settings = toml::from_str::<Settings>(&content).unwrap_or_else(|err| {
        warn!(
            "Failed to parse {}: {}. Using default settings.",
            path.display(),
            err
        );
        Settings::default()
    });
    sanitize_settings(settings)
}

#[cfg(test)]
mod tests {
    use super::{load_settings, sanitize_settings, Settings, BUILTIN_CLIENT_ID, SETTINGS_FILE_NAME};

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let settings = load_settings(&path);
        assert!(path.exists());
        assert_eq!(settings.client_id, BUILTIN_CLIENT_ID);
        assert_eq!(settings.small_asset_key, "playbutton");
        // The shipped default enables direct URLs with a placeholder key,
        // which sanitizing downgrades.
        assert!(!settings.use_direct_urls);
    }

    #[test]
    fn test_partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "client_id = \"12345\"\ncustom_assets = true\n").unwrap();
        let settings = load_settings(&path);
        assert_eq!(settings.client_id, "12345");
        assert!(settings.custom_assets);
        assert!(!settings.use_direct_urls);
        assert_eq!(settings.default_large_asset_key, "logo");
        assert_eq!(settings.default_large_asset_text, "winamp version");
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "client_id = [not toml").unwrap();
        let settings = load_settings(&path);
        assert_eq!(settings.client_id, BUILTIN_CLIENT_ID);
    }

    #[test]
    fn test_direct_urls_downgraded_without_key() {
        let settings = sanitize_settings(Settings {
            use_direct_urls: true,
            lastfm_api_key: String::new(),
            ..Settings::default()
        });
        assert!(!settings.use_direct_urls);
    }

    #[test]
    fn test_direct_urls_kept_with_real_key() {
        let settings = sanitize_settings(Settings {
            use_direct_urls: true,
            lastfm_api_key: "0123456789abcdef".to_string(),
            ..Settings::default()
        });
        assert!(settings.use_direct_urls);
    }
}
