mod artwork;
mod assets;
mod config;
mod player;
mod presence;
mod presence_manager;
mod text;
mod track;
#[cfg(windows)]
mod winamp;

use log::{error, info};

use crate::artwork::artwork_source_from_settings;
use crate::assets::{load_album_asset_tables, AlbumAssetTables};
use crate::config::{load_settings, SETTINGS_FILE_NAME};
use crate::player::MediaPlayer;
use crate::presence::{DiscordPresence, PresenceClient};
use crate::presence_manager::PresenceManager;

#[cfg(windows)]
fn connect_player() -> Result<Box<dyn MediaPlayer>, String> {
    Ok(Box::new(winamp::WinampPlayer::connect()?))
}

#[cfg(not(windows))]
fn connect_player() -> Result<Box<dyn MediaPlayer>, String> {
    Err("the Winamp window-message interface is only available on Windows".to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    let config_dir =
        dirs::config_dir().ok_or("could not determine the user configuration directory")?;
    let settings = load_settings(&config_dir.join(SETTINGS_FILE_NAME));

    let player = connect_player()?;
    let version_banner = format!("Winamp v{}", player.version());

    let mut presence: Box<dyn PresenceClient> = Box::new(DiscordPresence::new(&settings.client_id)?);
    presence.connect()?;

    let tables = if settings.custom_assets && !settings.use_direct_urls {
        load_album_asset_tables(&config_dir)
    } else {
        AlbumAssetTables::default()
    };
    let artwork = artwork_source_from_settings(&settings, tables, &version_banner);

    info!("Winamp status is now being mirrored to Discord. Press CTRL+C to exit.");
    let mut manager = PresenceManager::new(player, presence, artwork, &settings);
    if let Err(err) = manager.run() {
        error!("presence sync stopped: {err}");
        return Err(err.into());
    }
    Ok(())
}
