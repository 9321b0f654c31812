//! Track and cursor types for the fixed playlist.

use std::path::PathBuf;

/// One playable item: metadata plus references to its audio source and
/// cover image.
#[derive(Clone, Debug)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: PathBuf,
    pub cover: Option<PathBuf>,
}

/// An ordered, non-empty list of tracks with a current index.
///
/// `next`/`previous` are total: they wrap around at either end. Emptiness
/// is rejected at construction, so the index is always valid.
pub struct PlaylistCursor {
    tracks: Vec<Track>,
    index: usize,
}

impl PlaylistCursor {
    /// Build a cursor over `tracks`, starting at the first one.
    ///
    /// Fails when `tracks` is empty; every other operation relies on
    /// having at least one entry.
    pub fn new(tracks: Vec<Track>) -> Result<Self, String> {
        if tracks.is_empty() {
            return Err("playlist must contain at least one track".to_string());
        }
        Ok(Self { tracks, index: 0 })
    }

    /// Advance to the next track, wrapping to the first after the last.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.tracks.len();
    }

    /// Step back to the previous track, wrapping to the last from the first.
    pub fn previous(&mut self) {
        self.index = if self.index == 0 {
            self.tracks.len() - 1
        } else {
            self.index - 1
        };
    }

    /// The track the cursor currently points at.
    pub fn current(&self) -> &Track {
        &self.tracks[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks in playlist order. The audio thread takes its own copy
    /// of this at startup.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
