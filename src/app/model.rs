//! Application model types: `App`, `PlaybackState` and `Progress`.
//!
//! All playback/progress/volume state lives in one place and is only
//! mutated through the transition methods below. The audio thread talks
//! back through session-tagged publications (see `audio::PlaybackInfo`);
//! anything tagged with a superseded session is discarded here, so a
//! stale continuation can never write into a new track's state.

use std::time::Duration;

use crate::playlist::{PlaylistCursor, Track};

/// The playback state of the widget.
///
/// `Loading` is transient: it is entered while waiting for the audio
/// backend to become ready and always resolves to `Playing` or `Paused`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Loading,
    Playing,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Paused
    }
}

/// What the runtime should tell the audio thread after a toggle request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Start (or resume) playback once the backend is ready.
    Resume,
    /// Pause immediately.
    Pause,
}

/// Playback position and total duration of the current track.
///
/// `duration` stays `None` until the backend has probed the source's
/// metadata; the UI renders unknown durations as `0:00` / empty gauge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl Progress {
    fn reset(&mut self) {
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn clamp_position(&mut self) {
        if let Some(total) = self.duration {
            self.position = self.position.min(total);
        }
    }
}

/// The main application model.
pub struct App {
    pub playlist: PlaylistCursor,
    pub playback: PlaybackState,
    pub progress: Progress,
    /// Last absorbed backend failure, shown in the status line.
    pub last_error: Option<String>,

    volume: u8,
    session: u64,
    seek_epoch: u64,
}

impl App {
    /// Create a new `App` over `playlist`, starting paused at position 0.
    pub fn new(playlist: PlaylistCursor, start_volume: i64) -> Self {
        Self {
            playlist,
            playback: PlaybackState::default(),
            progress: Progress::default(),
            last_error: None,
            volume: clamp_volume(start_volume),
            session: 0,
            seek_epoch: 0,
        }
    }

    /// The generation token identifying the current track session.
    ///
    /// Bumped on every track change; backend publications carrying an
    /// older value are ignored.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Generation token for seeks within the current session.
    ///
    /// Bumped on every user seek; position samples produced before the
    /// backend processed the seek carry the old value and are dropped,
    /// so the scrubber never snaps back to a pre-seek position.
    pub fn seek_epoch(&self) -> u64 {
        self.seek_epoch
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.current()
    }

    /// Handle a play/pause toggle request.
    ///
    /// Paused enters `Loading` and asks for a resume; the transition to
    /// `Playing` completes later, when the backend reports it actually
    /// started (see [`App::backend_playing`]). Pausing takes effect
    /// immediately with no intermediate `Loading` state. Toggling while
    /// already loading is ignored, matching the disabled toggle button.
    pub fn request_toggle(&mut self) -> Option<ToggleAction> {
        match self.playback {
            PlaybackState::Paused => {
                self.playback = PlaybackState::Loading;
                self.last_error = None;
                Some(ToggleAction::Resume)
            }
            PlaybackState::Playing => {
                self.playback = PlaybackState::Paused;
                Some(ToggleAction::Pause)
            }
            PlaybackState::Loading => None,
        }
    }

    /// The backend reports playback running for `session`.
    ///
    /// Completes `Loading -> Playing`. Stale sessions are dropped.
    pub fn backend_playing(&mut self, session: u64) {
        if session != self.session {
            return;
        }
        if self.playback == PlaybackState::Loading {
            self.playback = PlaybackState::Playing;
        }
    }

    /// The backend reports playback stopped for `session` while we still
    /// believe we are playing (track ran out, or an external stop).
    pub fn backend_stopped(&mut self, session: u64) {
        if session != self.session {
            return;
        }
        if self.playback == PlaybackState::Playing {
            self.playback = PlaybackState::Paused;
        }
    }

    /// The backend failed to make `session`'s source playable.
    ///
    /// Absorbed, never fatal: drop back to `Paused` and keep the message
    /// for the status line.
    pub fn backend_failed(&mut self, session: u64, message: &str) {
        if session != self.session {
            return;
        }
        // A failure ends both a readiness wait and live playback (a seek
        // can fail after the source vanished mid-play).
        self.playback = PlaybackState::Paused;
        self.last_error = Some(message.to_string());
    }

    /// Give up on a readiness wait that exceeded the configured timeout.
    ///
    /// Returns true when a pending play intent was actually cancelled, so
    /// the runtime knows to send a pause to the backend.
    pub fn loading_timed_out(&mut self) -> bool {
        if self.playback != PlaybackState::Loading {
            return false;
        }
        self.playback = PlaybackState::Paused;
        self.last_error = Some("took too long to become ready".to_string());
        true
    }

    /// Move to the next track. Returns the new session token the runtime
    /// must attach to the load command.
    pub fn next_track(&mut self) -> u64 {
        self.playlist.next();
        self.reset_for_track_change()
    }

    /// Move to the previous track. Returns the new session token.
    pub fn prev_track(&mut self) -> u64 {
        self.playlist.previous();
        self.reset_for_track_change()
    }

    // Session must be bumped before the load command goes out: any
    // continuation still in flight for the old track then fails the
    // token check instead of writing into the new track's state.
    fn reset_for_track_change(&mut self) -> u64 {
        self.session += 1;
        self.seek_epoch = 0;
        self.playback = PlaybackState::Paused;
        self.progress.reset();
        self.last_error = None;
        self.session
    }

    /// Publish a sampled backend position.
    ///
    /// Only accepted while `Playing` and only when both generation
    /// tokens match; the sampling loop for a superseded track or a
    /// not-yet-processed seek detects its own obsolescence here and its
    /// writes go nowhere.
    pub fn sample_position(&mut self, session: u64, seek_epoch: u64, position: Duration) {
        if session != self.session
            || seek_epoch != self.seek_epoch
            || self.playback != PlaybackState::Playing
        {
            return;
        }
        self.progress.position = position;
        self.progress.clamp_position();
    }

    /// Publish a probed duration. Overwrites any earlier value; probing
    /// can happen more than once per source.
    pub fn duration_known(&mut self, session: u64, duration: Duration) {
        if session != self.session {
            return;
        }
        self.progress.duration = Some(duration);
        self.progress.clamp_position();
    }

    /// Seek to an absolute position, clamped to `[0, duration]`.
    ///
    /// The new position is visible immediately, independent of play
    /// state; the returned value is what the runtime forwards to the
    /// backend.
    pub fn seek_to(&mut self, target: Duration) -> Duration {
        let clamped = match self.progress.duration {
            Some(total) => target.min(total),
            None => target,
        };
        self.seek_epoch += 1;
        self.progress.position = clamped;
        clamped
    }

    /// Seek relative to the current position by `delta_secs` seconds.
    pub fn seek_by(&mut self, delta_secs: i64) -> Duration {
        let current = self.progress.position.as_secs() as i64;
        let target = (current + delta_secs).max(0) as u64;
        self.seek_to(Duration::from_secs(target))
    }

    /// Current volume as an integer percentage in `[0, 100]`.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Set the volume, clamping rather than erroring on out-of-range
    /// values. Returns the applied percentage.
    pub fn set_volume(&mut self, value: i64) -> u8 {
        self.volume = clamp_volume(value);
        self.volume
    }

    /// Adjust the volume by a signed step.
    pub fn adjust_volume(&mut self, delta: i64) -> u8 {
        self.set_volume(self.volume as i64 + delta)
    }

    /// The gain factor the audio backend expects for the current volume.
    pub fn volume_gain(&self) -> f32 {
        self.volume as f32 / 100.0
    }
}

fn clamp_volume(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}
