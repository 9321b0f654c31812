//! Duration probing via `lofty`.
//!
//! rodio decoders often cannot report a total duration up front, so the
//! audio thread probes the file's metadata when a source is loaded. A
//! probe can run more than once per source; callers overwrite rather
//! than accumulate.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;

/// Read the total duration from the file's metadata, or `None` when the
/// file is missing or not a recognizable audio format.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
