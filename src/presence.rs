//! Presence-display collaborator boundary and the Discord transport.

use discord_rich_presence::activity::{Activity, Assets, Timestamps};
use discord_rich_presence::{DiscordIpc, DiscordIpcClient};
use log::debug;

/// One status push to the presence display.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceUpdate {
    pub details: String,
    pub state: String,
    /// Unix timestamp the elapsed-time counter starts from.
    pub start_epoch_secs: i64,
    pub large_asset_key: String,
    pub large_asset_text: String,
    pub small_asset_key: String,
    pub small_asset_text: String,
}

/// Interface implemented by concrete presence transports.
pub trait PresenceClient {
    fn connect(&mut self) -> Result<(), String>;
    fn update(&mut self, update: &PresenceUpdate) -> Result<(), String>;
    fn clear(&mut self) -> Result<(), String>;
}

/// Discord Rich Presence transport over the local IPC socket.
pub struct DiscordPresence {
    client: DiscordIpcClient,
}

impl DiscordPresence {
    pub fn new(client_id: &str) -> Result<Self, String> {
        let client = DiscordIpcClient::new(client_id)
            .map_err(|err| format!("failed to create the Discord IPC client: {err}"))?;
        Ok(Self { client })
    }

    fn set_activity(&mut self, update: &PresenceUpdate) -> Result<(), String> {
        let mut assets = Assets::new()
            .large_image(&update.large_asset_key)
            .large_text(&update.large_asset_text);
        if !update.small_asset_key.is_empty() {
            assets = assets
                .small_image(&update.small_asset_key)
                .small_text(&update.small_asset_text);
        }
        let activity = Activity::new()
            .details(&update.details)
            .state(&update.state)
            .timestamps(Timestamps::new().start(update.start_epoch_secs))
            .assets(assets);
        self.client
            .set_activity(activity)
            .map_err(|err| format!("failed to set the Discord activity: {err}"))
    }
}

impl PresenceClient for DiscordPresence {
    fn connect(&mut self) -> Result<(), String> {
        self.client
            .connect()
            .map_err(|err| format!("failed to connect to the Discord IPC socket: {err}"))
    }

    /// A dropped socket surfaces as a failed write; reconnect once and retry
    /// before giving up.
    fn update(&mut self, update: &PresenceUpdate) -> Result<(), String> {
        if let Err(err) = self.set_activity(update) {
            debug!("presence update failed ({err}), reconnecting");
            self.connect()?;
            return self.set_activity(update);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), String> {
        self.client
            .clear_activity()
            .map_err(|err| format!("failed to clear the Discord activity: {err}"))
    }
}
