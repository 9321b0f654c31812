use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::playlist::Track;

/// Map configured playlist entries to `Track` values.
pub fn build_tracks(settings: &config::Settings) -> Vec<Track> {
    settings
        .playlist
        .iter()
        .map(|entry| Track {
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            source: entry.source.clone(),
            cover: entry.cover.clone(),
        })
        .collect()
}

/// Push the initial volume and the first track into the audio thread so
/// its duration gets probed before the first toggle.
pub fn prime_backend(app: &App, audio_player: &AudioPlayer) {
    let _ = audio_player.send(AudioCmd::SetVolume(app.volume_gain()));
    let _ = audio_player.send(AudioCmd::Load {
        session: app.session(),
        index: app.playlist.index(),
    });
}
