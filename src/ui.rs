//! UI rendering for the now-playing widget.
//!
//! This module renders the whole widget with `ratatui`: header, album-art
//! panel, track metadata with the equalizer animation, scrubber, time row,
//! volume bar and controls footer. It only reads from `App`; intents are
//! handled by the runtime event loop.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState, Progress};
use crate::config::{ControlsSettings, UiSettings};

// Amplitude pattern the playing equalizer cycles through, per bar.
const EQ_PATTERN: [usize; 8] = [2, 5, 7, 8, 6, 4, 3, 1];
const EQ_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

// Quarter-turn frames for the "spinning record" marker.
const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Format seconds of playback as `m:ss`: minutes unpadded, seconds
/// zero-padded to two digits.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Fractional progress in `[0.0, 1.0]`; 0 while the duration is unknown.
pub fn progress_fraction(progress: &Progress) -> f64 {
    match progress.duration {
        Some(total) if !total.is_zero() => {
            (progress.position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// One line of equalizer glyphs for the given state and animation frame.
fn equalizer_line(state: PlaybackState, frame: u64, bars: usize) -> String {
    let mut line = String::new();
    for i in 0..bars {
        let level = match state {
            PlaybackState::Playing => EQ_PATTERN[((frame / 2) as usize + i * 3) % EQ_PATTERN.len()],
            PlaybackState::Loading => 4,
            PlaybackState::Paused => 1,
        };
        if i > 0 {
            line.push(' ');
        }
        line.push(EQ_GLYPHS[level - 1]);
    }
    line
}

fn spinner_char(state: PlaybackState, frame: u64) -> char {
    match state {
        PlaybackState::Playing => SPINNER[((frame / 4) % 4) as usize],
        PlaybackState::Loading => '◌',
        PlaybackState::Paused => '●',
    }
}

fn state_label(app: &App) -> String {
    let base = match app.playback {
        PlaybackState::Playing => "Playing",
        PlaybackState::Loading => "Loading…",
        PlaybackState::Paused => "Paused",
    };
    match &app.last_error {
        Some(err) => format!("{base} • {err}"),
        None => base.to_string(),
    }
}

/// Render the controls help text.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next track".to_string(),
        format!("[←/→] scrub -/+{}s", controls.seek_seconds),
        format!("[↑/↓] volume ±{}", controls.volume_step),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Render the entire widget into `frame` from `app` state.
///
/// `anim_frame` is the runtime's animation counter; it only advances
/// while playing, so the equalizer and spinner freeze on pause.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    anim_frame: u64,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" fermata ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now-playing panel: album art marker on the left, metadata and
    // equalizer on the right.
    {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(chunks[1]);

        let track = app.current_track();
        let cover_name = track
            .cover
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or("no cover");
        let art_style = match app.playback {
            PlaybackState::Loading => Style::default().add_modifier(Modifier::DIM),
            _ => Style::default(),
        };
        let art = Paragraph::new(format!(
            "\n   {}\n\n   {}",
            spinner_char(app.playback, anim_frame),
            cover_name
        ))
        .style(art_style)
        .block(Block::default().borders(Borders::ALL).title(" cover "));
        frame.render_widget(art, halves[0]);

        let eq_style = match app.playback {
            PlaybackState::Playing => Style::default().fg(Color::Magenta),
            PlaybackState::Loading => Style::default().add_modifier(Modifier::DIM),
            PlaybackState::Paused => Style::default(),
        };
        let meta = Paragraph::new(format!(
            "{}\n{}\n\n{}",
            track.title,
            track.artist,
            equalizer_line(app.playback, anim_frame, ui_settings.equalizer_bars),
        ))
        .style(eq_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(format!(
                    " track {}/{} • {} ",
                    app.playlist.index() + 1,
                    app.playlist.len(),
                    state_label(app)
                )),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(meta, halves[1]);
    }

    // Scrubber
    {
        let color = match app.playback {
            PlaybackState::Playing => Color::Magenta,
            PlaybackState::Loading => Color::DarkGray,
            PlaybackState::Paused => Color::Gray,
        };
        let scrubber = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" progress "))
            .gauge_style(Style::default().fg(color))
            .ratio(progress_fraction(&app.progress))
            .label(format_time(app.progress.position));
        frame.render_widget(scrubber, chunks[2]);
    }

    // Time row: elapsed on the left, total on the right. Unknown
    // durations read as 0:00.
    {
        let total = app.progress.duration.unwrap_or(Duration::ZERO);
        let time_row = Paragraph::new(format!(
            " {}{}{} ",
            format_time(app.progress.position),
            " ".repeat(
                (chunks[3].width as usize)
                    .saturating_sub(format_time(app.progress.position).len() + format_time(total).len() + 2)
            ),
            format_time(total),
        ));
        frame.render_widget(time_row, chunks[3]);
    }

    // Volume
    {
        let volume = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" volume "))
            .gauge_style(Style::default().fg(Color::Blue))
            .percent(app.volume() as u16)
            .label(format!("{}%", app.volume()));
        frame.render_widget(volume, chunks[4]);
    }

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds_not_minutes() {
        assert_eq!(format_time(Duration::from_secs(65)), "1:05");
        assert_eq!(format_time(Duration::from_secs(5)), "0:05");
        assert_eq!(format_time(Duration::ZERO), "0:00");
        assert_eq!(format_time(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn progress_fraction_is_zero_while_duration_unknown() {
        let p = Progress {
            position: Duration::from_secs(30),
            duration: None,
        };
        assert_eq!(progress_fraction(&p), 0.0);

        let p = Progress {
            position: Duration::from_secs(30),
            duration: Some(Duration::ZERO),
        };
        assert_eq!(progress_fraction(&p), 0.0);
    }

    #[test]
    fn progress_fraction_is_position_over_duration() {
        let p = Progress {
            position: Duration::from_secs(50),
            duration: Some(Duration::from_secs(200)),
        };
        assert!((progress_fraction(&p) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn equalizer_freezes_low_when_paused_and_mid_when_loading() {
        let paused = equalizer_line(PlaybackState::Paused, 0, 5);
        assert_eq!(paused, "▁ ▁ ▁ ▁ ▁");

        let loading = equalizer_line(PlaybackState::Loading, 0, 3);
        assert_eq!(loading, "▄ ▄ ▄");
    }

    #[test]
    fn equalizer_animates_across_frames_while_playing() {
        let a = equalizer_line(PlaybackState::Playing, 0, 5);
        let b = equalizer_line(PlaybackState::Playing, 8, 5);
        assert_ne!(a, b);
    }
}
