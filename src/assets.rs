//! Local album asset tables used by the custom-asset artwork mode.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::warn;

pub const EXCEPTIONS_FILE_NAME: &str = "ampresence_album_exceptions.txt";
pub const ASSET_KEYS_FILE_NAME: &str = "ampresence_album_covers.json";

/// Album-name lookup tables for the local artwork source.
#[derive(Debug, Clone, Default)]
pub struct AlbumAssetTables {
    /// Album names that need artist qualification because the bare name is
    /// shared by more than one album.
    pub exceptions: HashSet<String>,
    /// Album key to registered presence asset key.
    pub asset_keys: HashMap<String, String>,
}

impl AlbumAssetTables {
    pub fn is_empty(&self) -> bool {
        self.asset_keys.is_empty()
    }
}

/// Loads both tables from `dir`. Missing or unreadable files degrade to
/// empty tables.
pub fn load_album_asset_tables(dir: &Path) -> AlbumAssetTables {
    let exceptions_path = dir.join(EXCEPTIONS_FILE_NAME);
    let exceptions = match std::fs::read_to_string(&exceptions_path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => {
            warn!(
                "Could not read {}. Default assets will be used for duplicate album names.",
                exceptions_path.display()
            );
            HashSet::new()
        }
    };

    let asset_keys_path = dir.join(ASSET_KEYS_FILE_NAME);
    let asset_keys = match std::fs::read_to_string(&asset_keys_path) {
        Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(map) => map,
            Err(err) => {
                warn!(
                    "Could not parse {}: {}. Default assets will be used.",
                    asset_keys_path.display(),
                    err
                );
                HashMap::new()
            }
        },
        Err(_) => {
            warn!(
                "Could not read {}. Default assets will be used.",
                asset_keys_path.display()
            );
            HashMap::new()
        }
    };

    AlbumAssetTables {
        exceptions,
        asset_keys,
    }
}
