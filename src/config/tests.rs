use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_fermata_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("FERMATA_CONFIG_PATH", "/tmp/fermata-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/fermata-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("fermata")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("fermata")
            .join("config.toml")
    );
}

#[test]
fn defaults_are_sane_and_valid() {
    let s = Settings::default();
    assert!(s.playlist.is_empty());
    assert_eq!(s.audio.ready_timeout_ms, 10_000);
    assert_eq!(s.audio.start_volume, 60);
    assert_eq!(s.controls.seek_seconds, 5);
    assert_eq!(s.controls.volume_step, 5);
    assert_eq!(s.ui.tick_ms, 50);
    assert_eq!(s.ui.equalizer_bars, 5);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_playlist_and_sections_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[[playlist]]
title = "Night Changes"
artist = "One Direction"
source = "music/music1.mp3"
cover = "covers/cover1.png"

[[playlist]]
title = "Somebody To Love"
source = "music/music5.mp3"

[audio]
ready_timeout_ms = 0
start_volume = 40

[controls]
seek_seconds = 9
volume_step = 2

[ui]
tick_ms = 33
equalizer_bars = 7
header_text = "hello"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("FERMATA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("FERMATA__AUDIO__START_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.playlist.len(), 2);
    assert_eq!(s.playlist[0].title, "Night Changes");
    assert_eq!(s.playlist[0].artist, "One Direction");
    assert_eq!(
        s.playlist[0].cover.as_deref(),
        Some(std::path::Path::new("covers/cover1.png"))
    );
    // artist and cover are optional per entry
    assert_eq!(s.playlist[1].artist, "");
    assert_eq!(s.playlist[1].cover, None);

    assert_eq!(s.audio.ready_timeout_ms, 0);
    assert_eq!(s.audio.start_volume, 40);
    assert_eq!(s.controls.seek_seconds, 9);
    assert_eq!(s.controls.volume_step, 2);
    assert_eq!(s.ui.tick_ms, 33);
    assert_eq!(s.ui.equalizer_bars, 7);
    assert_eq!(s.ui.header_text, "hello");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
start_volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("FERMATA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("FERMATA__AUDIO__START_VOLUME", "15");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.start_volume, 15);
}

#[test]
fn validate_rejects_zero_tick_and_bars() {
    let mut s = Settings::default();
    s.ui.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.equalizer_bars = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.seek_seconds = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_oversized_seek_step() {
    let mut s = Settings::default();
    s.controls.seek_seconds = 3600;
    assert!(s.validate().is_ok());

    // Anything larger would not survive the signed seek-delta conversion.
    s.controls.seek_seconds = u64::MAX;
    assert!(s.validate().is_err());
}
