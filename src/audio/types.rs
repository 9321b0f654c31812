//! Audio-related small types and handles.
//!
//! This module defines the command enum sent to the audio thread and the
//! shared playback info the thread publishes back. Every publication is
//! tagged with the session token it was produced under so the runtime
//! can discard anything from a superseded track.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Make the track at `index` the current source for `session`.
    /// Stops any previous sink and probes the new source's duration.
    Load { session: u64, index: usize },
    /// Start (or resume) playback for `session`. Decoding the source, if
    /// it has not happened yet, is the readiness work this command waits
    /// on before sound starts.
    Resume { session: u64 },
    /// Pause playback immediately.
    Pause,
    /// Move the playback position of `session` to `to`. `seek_epoch` is
    /// echoed back on every later publication so the runtime can tell
    /// pre-seek positions from post-seek ones.
    Seek {
        session: u64,
        seek_epoch: u64,
        to: Duration,
    },
    /// Apply a gain factor in `[0.0, 1.0]`.
    SetVolume(f32),
    /// Stop playback and shut the audio thread down.
    Quit,
}

/// Runtime playback information shared with the UI event loop.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Session token of the track this snapshot describes.
    pub session: u64,
    /// Seek generation the position was produced under.
    pub seek_epoch: u64,
    /// Whether sound is actually coming out right now.
    pub playing: bool,
    /// Current playback position within the source.
    pub position: Duration,
    /// Probed total duration, when metadata made it available.
    pub duration: Option<Duration>,
    /// Last load/decode failure for this session, if any.
    pub error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
