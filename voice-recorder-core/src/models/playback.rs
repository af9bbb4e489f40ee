use serde::Serialize;

/// Snapshot of playback-side state for the UI.
///
/// At most one playback is in flight system-wide; while `is_playing` is
/// true, recording controls are disabled by contract with the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub duration_secs: f64,
    pub has_artifact: bool,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            is_playing: false,
            duration_secs: 0.0,
            has_artifact: false,
        }
    }
}
