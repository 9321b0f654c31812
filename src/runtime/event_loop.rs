use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState, ToggleAction};
use crate::audio::{AudioCmd, AudioPlayer, PlaybackHandle};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Animation counter for the equalizer/spinner; advances only while
    /// playing so the animation freezes on pause.
    pub anim_frame: u64,
    /// When the current `Loading` wait started, for the readiness timeout.
    pub loading_since: Option<Instant>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            anim_frame: 0,
            loading_since: None,
        }
    }
}

/// Main terminal event loop: samples backend truth into the app model,
/// enforces the readiness timeout, draws, and dispatches key intents.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let playback = audio_player.playback_handle();

    loop {
        sync_from_backend(app, &playback);

        // Readiness timeout: a Loading wait that drags on past the
        // configured bound cancels the pending play intent.
        if app.playback == PlaybackState::Loading {
            let since = *state.loading_since.get_or_insert_with(Instant::now);
            let timeout_ms = settings.audio.ready_timeout_ms;
            if timeout_ms > 0
                && since.elapsed() >= Duration::from_millis(timeout_ms)
                && app.loading_timed_out()
            {
                let _ = audio_player.send(AudioCmd::Pause);
                state.loading_since = None;
            }
        } else {
            state.loading_since = None;
        }

        if app.playback == PlaybackState::Playing {
            state.anim_frame = state.anim_frame.wrapping_add(1);
        }

        terminal.draw(|f| ui::draw(f, app, state.anim_frame, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(settings.ui.tick_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Publish the audio thread's latest snapshot into the app model.
///
/// Every field of the snapshot carries the session it was produced
/// under; the `App` transitions drop anything stale, so there is no
/// ordering hazard between a track change here and a publication still
/// in flight from the thread.
fn sync_from_backend(app: &mut App, playback: &PlaybackHandle) {
    let snapshot = match playback.lock() {
        Ok(mut info) => {
            let snapshot = info.clone();
            // Consume the error with the snapshot. It lingers in the
            // shared state until the thread's next publication, and a
            // retry must not be cancelled by the previous attempt's
            // leftover.
            info.error = None;
            snapshot
        }
        Err(_) => return,
    };

    if let Some(total) = snapshot.duration {
        app.duration_known(snapshot.session, total);
    }

    if let Some(err) = snapshot.error.as_deref() {
        app.backend_failed(snapshot.session, err);
    } else if snapshot.playing {
        app.backend_playing(snapshot.session);
        app.sample_position(snapshot.session, snapshot.seek_epoch, snapshot.position);
    } else {
        app.backend_stopped(snapshot.session);
    }
}

/// Handle one key press. Returns true when the loop should exit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            return true;
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => match app.request_toggle() {
            Some(ToggleAction::Resume) => {
                state.loading_since = Some(Instant::now());
                let _ = audio_player.send(AudioCmd::Resume {
                    session: app.session(),
                });
            }
            Some(ToggleAction::Pause) => {
                let _ = audio_player.send(AudioCmd::Pause);
            }
            // Already loading: the toggle is inert until the wait resolves.
            None => {}
        },
        KeyCode::Char('l') => {
            let session = app.next_track();
            state.loading_since = None;
            let _ = audio_player.send(AudioCmd::Load {
                session,
                index: app.playlist.index(),
            });
        }
        KeyCode::Char('h') => {
            let session = app.prev_track();
            state.loading_since = None;
            let _ = audio_player.send(AudioCmd::Load {
                session,
                index: app.playlist.index(),
            });
        }
        KeyCode::Char('L') | KeyCode::Right => {
            let to = app.seek_by(settings.controls.seek_seconds as i64);
            let _ = audio_player.send(AudioCmd::Seek {
                session: app.session(),
                seek_epoch: app.seek_epoch(),
                to,
            });
        }
        KeyCode::Char('H') | KeyCode::Left => {
            let to = app.seek_by(-(settings.controls.seek_seconds as i64));
            let _ = audio_player.send(AudioCmd::Seek {
                session: app.session(),
                seek_epoch: app.seek_epoch(),
                to,
            });
        }
        KeyCode::Char('+') | KeyCode::Up => {
            app.adjust_volume(settings.controls.volume_step);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume_gain()));
        }
        KeyCode::Char('-') | KeyCode::Down => {
            app.adjust_volume(-settings.controls.volume_step);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume_gain()));
        }
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use crate::audio::PlaybackInfo;
    use crate::playlist::{PlaylistCursor, Track};

    fn app_with_one_track() -> App {
        let tracks = vec![Track {
            title: "Track 0".to_string(),
            artist: "Artist".to_string(),
            source: PathBuf::from("track-0.mp3"),
            cover: None,
        }];
        App::new(PlaylistCursor::new(tracks).unwrap(), 60)
    }

    #[test]
    fn leftover_failure_does_not_cancel_a_retry() {
        let mut app = app_with_one_track();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        // First attempt fails; the thread leaves the error in the shared
        // state until its next publication.
        app.request_toggle();
        {
            let mut info = playback.lock().unwrap();
            info.session = app.session();
            info.error = Some("failed to open track-0.mp3".to_string());
        }
        sync_from_backend(&mut app, &playback);
        assert_eq!(app.playback, PlaybackState::Paused);
        assert!(app.last_error.is_some());
        assert!(playback.lock().unwrap().error.is_none());

        // Retry: syncing against the unchanged snapshot must not knock
        // the pending intent back to Paused.
        app.request_toggle();
        sync_from_backend(&mut app, &playback);
        assert_eq!(app.playback, PlaybackState::Loading);

        // The backend comes good and the retry lands.
        {
            let mut info = playback.lock().unwrap();
            info.playing = true;
            info.position = Duration::from_secs(1);
        }
        sync_from_backend(&mut app, &playback);
        assert_eq!(app.playback, PlaybackState::Playing);
    }
}
