//! Playlist module: the fixed track list and its cursor.
//!
//! The track set is built once at startup and never changes afterwards;
//! all the cursor does is move through it with wraparound.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
