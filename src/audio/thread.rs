use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::playlist::Track;

use super::probe::probe_duration;
use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut session: u64 = 0;
        let mut seek_epoch: u64 = 0;
        let mut index: usize = 0;
        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut volume: f32 = 1.0;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        // Where the next sink should start when no sink exists yet
        // (seek while paused, or replay after the track ran out).
        let mut pending_offset = Duration::ZERO;

        let mut duration: Option<Duration> = None;

        let publish = |session: u64,
                       seek_epoch: u64,
                       playing: bool,
                       position: Duration,
                       duration: Option<Duration>,
                       error: Option<String>| {
            if let Ok(mut info) = playback_info.lock() {
                info.session = session;
                info.seek_epoch = seek_epoch;
                info.playing = playing;
                info.position = position;
                info.duration = duration;
                info.error = error;
            }
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(50)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { session: s, index: i } => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        session = s;
                        seek_epoch = 0;
                        index = i.min(tracks.len().saturating_sub(1));
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        pending_offset = Duration::ZERO;
                        duration = probe_duration(&tracks[index].source);
                        publish(session, seek_epoch, false, Duration::ZERO, duration, None);
                    }

                    AudioCmd::Resume { session: s } => {
                        if s != session {
                            continue;
                        }

                        if sink.is_none() {
                            // Decode now; this is the readiness threshold the
                            // controller's Loading state is waiting on.
                            match create_sink_at(&stream, &tracks[index].source, pending_offset) {
                                Ok(new_sink) => {
                                    new_sink.set_volume(volume);
                                    accumulated = pending_offset;
                                    pending_offset = Duration::ZERO;
                                    sink = Some(new_sink);
                                }
                                Err(msg) => {
                                    publish(session, seek_epoch, false, accumulated, duration, Some(msg));
                                    continue;
                                }
                            }
                        }

                        if let Some(ref s) = sink {
                            s.play();
                        }
                        paused = false;
                        started_at = Some(Instant::now());
                        publish(session, seek_epoch, true, accumulated, duration, None);
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            s.pause();
                        }
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        paused = true;
                        publish(session, seek_epoch, false, accumulated, duration, None);
                    }

                    AudioCmd::Seek { session: s, seek_epoch: e, to } => {
                        if s != session {
                            continue;
                        }
                        seek_epoch = e;

                        if sink.is_some() {
                            // Scrubbing: rebuild the sink and skip into the file.
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            match create_sink_at(&stream, &tracks[index].source, to) {
                                Ok(new_sink) => {
                                    new_sink.set_volume(volume);
                                    if paused {
                                        started_at = None;
                                    } else {
                                        new_sink.play();
                                        started_at = Some(Instant::now());
                                    }
                                    accumulated = to;
                                    sink = Some(new_sink);
                                    publish(session, seek_epoch, !paused, to, duration, None);
                                }
                                Err(msg) => {
                                    paused = true;
                                    started_at = None;
                                    accumulated = to;
                                    publish(session, seek_epoch, false, to, duration, Some(msg));
                                }
                            }
                        } else {
                            // No sink yet: remember the offset for the next resume.
                            pending_offset = to;
                            accumulated = to;
                            publish(session, seek_epoch, false, to, duration, None);
                        }
                    }

                    AudioCmd::SetVolume(gain) => {
                        volume = gain.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        // Update shared state so the UI doesn't keep showing Playing.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic refresh of the published position while playing,
                    // and end-of-source detection.
                    if !paused && sink.is_some() {
                        let ended = sink.as_ref().is_some_and(Sink::empty);
                        if ended {
                            // Source ran out: report a stop; the next resume
                            // starts over from the beginning.
                            sink = None;
                            paused = true;
                            started_at = None;
                            accumulated = duration.unwrap_or(accumulated);
                            pending_offset = Duration::ZERO;
                            publish(session, seek_epoch, false, accumulated, duration, None);
                        } else {
                            let mut position = accumulated
                                + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                            if let Some(total) = duration {
                                position = position.min(total);
                            }
                            publish(session, seek_epoch, true, position, duration, None);
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
