use crate::models::audio::RawRecording;
use crate::models::error::RecordError;
use crate::models::state::RecorderState;

/// Event delegate for recorder session notifications.
///
/// Methods are called from whichever thread drives the session, with the
/// session's internal lock released. Implementations should marshal to the
/// UI thread if needed.
pub trait RecorderDelegate: Send + Sync {
    /// Called on every state transition.
    fn on_state_changed(&self, state: &RecorderState);

    /// Called once per stop, with the assembled raw recording.
    fn on_recording_ready(&self, recording: &RawRecording);

    /// Called when a capture start fails.
    fn on_error(&self, error: &RecordError);
}
