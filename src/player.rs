//! Media-player collaborator boundary.

use std::path::PathBuf;

/// Coarse playback state reported by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayingStatus {
    Playing,
    Paused,
    Stopped,
}

/// Interface implemented by concrete player adapters.
pub trait MediaPlayer {
    /// Current coarse playback state.
    fn playing_status(&self) -> Result<PlayingStatus, String>;
    /// Raw now-playing title in the form `"{n}. {artist} - {title} - {player}"`.
    fn now_playing_title(&self) -> Result<String, String>;
    /// Elapsed playback position in milliseconds.
    fn position_millis(&self) -> Result<u64, String>;
    /// Zero-based index of the active playlist entry.
    fn playlist_position(&self) -> Result<usize, String>;
    /// Full path list of the current playlist.
    fn playlist_paths(&self) -> Result<Vec<PathBuf>, String>;
    /// Player version string, e.g. `"5.66"`.
    fn version(&self) -> String;
}
