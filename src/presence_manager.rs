//! Presence sync driver: the poll loop, the playback state machine, and the
//! per-track update pushes.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, warn};

use crate::artwork::ArtworkSource;
use crate::config::Settings;
use crate::player::{MediaPlayer, PlayingStatus};
use crate::presence::{PresenceClient, PresenceUpdate};
use crate::text::pad_display_text;
use crate::track::parse_now_playing;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Presence-side session state carried across poll ticks. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
struct SessionState {
    /// Raw now-playing title seen on the previous tick; updates are pushed
    /// only when this changes.
    previous_track: String,
    /// True while the presence display is known to be empty, so repeated
    /// paused/stopped ticks do not re-clear it.
    cleared: bool,
}

/// Drives the player -> artwork -> presence pipeline.
pub struct PresenceManager {
    player: Box<dyn MediaPlayer>,
    presence: Box<dyn PresenceClient>,
    artwork: Box<dyn ArtworkSource>,
    small_asset_key: String,
    small_asset_text: String,
    state: SessionState,
}

impl PresenceManager {
    pub fn new(
        player: Box<dyn MediaPlayer>,
        presence: Box<dyn PresenceClient>,
        artwork: Box<dyn ArtworkSource>,
        settings: &Settings,
    ) -> Self {
        Self {
            player,
            presence,
            artwork,
            small_asset_key: settings.small_asset_key.clone(),
            small_asset_text: settings.small_asset_text.clone(),
            state: SessionState::default(),
        }
    }

    /// Polls the player once per second until a collaborator fails. Each
    /// tick runs to completion before the next starts.
    pub fn run(&mut self) -> Result<(), String> {
        loop {
            self.tick()?;
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// One state-machine step. Player and presence errors bubble up;
    /// everything in the artwork path degrades internally.
    fn tick(&mut self) -> Result<(), String> {
        match self.player.playing_status()? {
            PlayingStatus::Paused | PlayingStatus::Stopped if !self.state.cleared => {
                debug!("playback inactive, clearing presence");
                self.presence.clear()?;
                self.state.previous_track.clear();
                self.state.cleared = true;
            }
            PlayingStatus::Playing => self.push_update()?,
            _ => {}
        }
        Ok(())
    }

    fn push_update(&mut self) -> Result<(), String> {
        let raw_title = self.player.now_playing_title()?;
        if raw_title == self.state.previous_track {
            return Ok(());
        }
        // Remember the raw title before parsing so a malformed one is not
        // re-reported every tick.
        self.state.previous_track = raw_title.clone();

        let playlist_index = self.player.playlist_position()?;
        let position_millis = self.player.position_millis()?;
        let track = match parse_now_playing(&raw_title, playlist_index, position_millis) {
            Ok(track) => track,
            Err(err) => {
                warn!("skipping presence update: {err}");
                return Ok(());
            }
        };
        debug!(
            "track changed: {} - {} (index {})",
            track.artist, track.title, track.playlist_index
        );

        let artwork = self.artwork.resolve(self.player.as_ref(), &track);
        let update = PresenceUpdate {
            details: pad_display_text(&track.title, "Track"),
            state: format!("by {}", track.artist),
            start_epoch_secs: start_timestamp(now_epoch_secs(), track.position_seconds),
            large_asset_key: artwork.asset_key,
            large_asset_text: artwork.display_text,
            small_asset_key: self.small_asset_key.clone(),
            small_asset_text: self.small_asset_text.clone(),
        };
        self.presence.update(&update)?;
        self.state.cleared = false;
        Ok(())
    }
}

fn now_epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs_f64())
        .unwrap_or(0.0)
}

/// Reported "listening since" moment: now minus elapsed playback.
fn start_timestamp(now_secs: f64, position_seconds: f64) -> i64 {
    (now_secs - position_seconds) as i64
}
