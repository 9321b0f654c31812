//! Audio backend: one thread owning the rodio output, driven by commands
//! and publishing session-tagged playback state.

mod player;
mod probe;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;
