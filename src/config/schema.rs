use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/fermata/config.toml` or `~/.config/fermata/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `FERMATA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The fixed playlist. Must contain at least one entry; this is
    /// checked at startup, not here, because an empty playlist is fatal
    /// rather than something to silently fall back from.
    pub playlist: Vec<TrackEntry>,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playlist: Vec::new(),
            audio: AudioSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// One playlist entry as written in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub source: PathBuf,
    #[serde(default)]
    pub cover: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How long a play request may wait for the source to become ready
    /// before the pending intent is cancelled (milliseconds).
    /// Set to 0 to wait indefinitely.
    pub ready_timeout_ms: u64,
    /// Volume at startup, as an integer percentage.
    pub start_volume: i64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            ready_timeout_ms: 10_000,
            start_volume: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when seeking with the arrow keys.
    pub seek_seconds: u64,
    /// Volume percentage points added/removed per volume key press.
    pub volume_step: i64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Milliseconds between UI frames; drives both input polling and the
    /// progress sampling cadence.
    pub tick_ms: u64,
    /// Number of equalizer bars rendered next to the track metadata.
    pub equalizer_bars: usize,
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            equalizer_bars: 5,
            header_text: " ~ fermata ~ ".to_string(),
        }
    }
}
