use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("fermata: invalid config, using defaults: {msg}");
                config::Settings {
                    // Keep the playlist: a bad tick rate should not turn
                    // a configured playlist into an empty one.
                    playlist: s.playlist,
                    ..config::Settings::default()
                }
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("fermata: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
