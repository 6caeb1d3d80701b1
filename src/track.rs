//! Now-playing title parsing.

use thiserror::Error;

/// Positions at or above this many seconds are a stale-position glitch the
/// player reports right after a new track starts.
const POSITION_GLITCH_FLOOR_SECS: f64 = 100_000.0;

const SEGMENT_DELIMITER: &str = " - ";

/// Structured now-playing fields derived from the player's window title.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub artist: String,
    pub title: String,
    /// Zero-based index of the entry in the player's playlist.
    pub playlist_index: usize,
    /// Elapsed playback in seconds, glitch values zeroed.
    pub position_seconds: f64,
}

/// The now-playing title did not follow the expected
/// `"{n}. {artist} - {title} - {player}"` shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackParseError {
    #[error("unexpected now-playing title format: {0:?}")]
    Malformed(String),
}

/// Parses `"{n}. {artist} - {title} - {player}"`. The trailing player-name
/// segment is dropped and the middle segments are rejoined, so titles that
/// themselves contain `" - "` round-trip intact.
pub fn parse_now_playing(
    raw: &str,
    playlist_index: usize,
    position_millis: u64,
) -> Result<TrackInfo, TrackParseError> {
    let segments: Vec<&str> = raw.split(SEGMENT_DELIMITER).collect();
    if segments.len() < 2 {
        return Err(TrackParseError::Malformed(raw.to_string()));
    }
    let body = &segments[..segments.len() - 1];
    let index_prefix = format!("{}. ", playlist_index + 1);
    let artist = body[0]
        .strip_prefix(&index_prefix)
        .unwrap_or(body[0])
        .trim()
        .to_string();
    let title = body[1..].join(SEGMENT_DELIMITER);
    Ok(TrackInfo {
        artist,
        title,
        playlist_index,
        position_seconds: normalize_position_seconds(position_millis),
    })
}

/// Converts a raw millisecond position to seconds, zeroing glitch values.
pub fn normalize_position_seconds(position_millis: u64) -> f64 {
    let seconds = position_millis as f64 / 1000.0;
    if seconds >= POSITION_GLITCH_FLOOR_SECS {
        0.0
    } else {
        seconds
    }
}
