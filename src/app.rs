//! Application module: the playback state machine shared by the runtime
//! and the UI.
//!
//! The `App` model lives in `app::model` and owns the playlist cursor,
//! playback state, progress and volume, plus the transition functions
//! that keep their invariants intact.

mod model;

pub use model::*;
