use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::playlist::PlaylistCursor;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    // An empty playlist is the one startup error we don't paper over:
    // every cursor operation relies on at least one track existing.
    let tracks = startup::build_tracks(&settings);
    let playlist = PlaylistCursor::new(tracks).map_err(|msg| {
        format!("{msg}; add [[playlist]] entries to the config file")
    })?;

    let audio_player = AudioPlayer::new(playlist.tracks().to_vec());
    let mut app = App::new(playlist, settings.audio.start_volume);
    startup::prime_backend(&app, &audio_player);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new();
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &audio_player, &mut state);

    audio_player.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
