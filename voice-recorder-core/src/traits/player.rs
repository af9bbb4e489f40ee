use crate::models::audio::DecodedAudio;
use crate::models::error::RecordError;

/// Invoked exactly once when a playback reaches the end of its buffer.
/// May fire on a platform audio thread.
pub type FinishedCallback = Box<dyn FnOnce() + Send + 'static>;

/// Interface for platform audio output.
///
/// Playback always runs from the start of the buffer to natural completion;
/// there is no seek, pause, or stop-midway operation.
pub trait AudioPlayer: Send {
    fn play(&mut self, audio: &DecodedAudio, on_finished: FinishedCallback)
        -> Result<(), RecordError>;
}
