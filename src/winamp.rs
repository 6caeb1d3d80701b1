//! Winamp adapter over the classic `WM_USER` window-message IPC.

use std::path::PathBuf;

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    FindWindowW, GetWindowTextW, SendMessageW, WM_USER,
};

use crate::player::{MediaPlayer, PlayingStatus};

const WINAMP_WINDOW_CLASS: &str = "Winamp v1.x";

const IPC_GETVERSION: isize = 0;
const IPC_ISPLAYING: isize = 104;
const IPC_GETOUTPUTTIME: isize = 105;
const IPC_WRITEPLAYLIST: isize = 120;
const IPC_GETLISTPOS: isize = 125;

/// Where Winamp writes the playlist on `IPC_WRITEPLAYLIST`, under %APPDATA%.
const PLAYLIST_RELATIVE_PATH: &str = "Winamp\\Winamp.m3u8";

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Handle to the running Winamp main window.
pub struct WinampPlayer {
    window: HWND,
}

impl WinampPlayer {
    /// Finds the running Winamp main window.
    pub fn connect() -> Result<Self, String> {
        let class_name = to_wide(WINAMP_WINDOW_CLASS);
        let window = unsafe { FindWindowW(class_name.as_ptr(), std::ptr::null()) };
        if window.is_null() {
            return Err("no running Winamp window found".to_string());
        }
        Ok(Self { window })
    }

    fn ipc(&self, message: isize, data: usize) -> isize {
        unsafe { SendMessageW(self.window, WM_USER, data, message) }
    }
}

impl MediaPlayer for WinampPlayer {
    fn playing_status(&self) -> Result<PlayingStatus, String> {
        Ok(match self.ipc(IPC_ISPLAYING, 0) {
            1 => PlayingStatus::Playing,
            3 => PlayingStatus::Paused,
            _ => PlayingStatus::Stopped,
        })
    }

    fn now_playing_title(&self) -> Result<String, String> {
        let mut buffer = [0u16; 512];
        let length =
            unsafe { GetWindowTextW(self.window, buffer.as_mut_ptr(), buffer.len() as i32) };
        if length <= 0 {
            return Err("failed to read the Winamp window title".to_string());
        }
        Ok(String::from_utf16_lossy(&buffer[..length as usize]))
    }

    fn position_millis(&self) -> Result<u64, String> {
        // Returns -1 while stopped.
        let millis = self.ipc(IPC_GETOUTPUTTIME, 0);
        Ok(millis.max(0) as u64)
    }

    fn playlist_position(&self) -> Result<usize, String> {
        let index = self.ipc(IPC_GETLISTPOS, 0);
        if index < 0 {
            return Err("Winamp reported no active playlist entry".to_string());
        }
        Ok(index as usize)
    }

    fn playlist_paths(&self) -> Result<Vec<PathBuf>, String> {
        self.ipc(IPC_WRITEPLAYLIST, 0);
        let appdata =
            std::env::var("APPDATA").map_err(|err| format!("APPDATA is not set: {err}"))?;
        let playlist_path = PathBuf::from(appdata).join(PLAYLIST_RELATIVE_PATH);
        let content = std::fs::read_to_string(&playlist_path)
            .map_err(|err| format!("failed to read {}: {err}", playlist_path.display()))?;
        Ok(parse_m3u(&content))
    }

    fn version(&self) -> String {
        // Packed as 0x50yy for version 5.yy.
        let packed = self.ipc(IPC_GETVERSION, 0);
        format!("{:x}.{:02x}", (packed >> 12) & 0xf, packed & 0xff)
    }
}

/// Extracts entry paths from an m3u/m3u8 playlist dump.
fn parse_m3u(content: &str) -> Vec<PathBuf> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}
