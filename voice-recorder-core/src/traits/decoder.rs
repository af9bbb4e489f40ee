use crate::models::audio::{DecodedAudio, RawRecording};
use crate::models::error::RecordError;

/// Decodes a raw captured blob into PCM planes.
///
/// Fails with `RecordError::DecodeFailed` on malformed or empty input;
/// decoding never partially succeeds.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, recording: &RawRecording) -> Result<DecodedAudio, RecordError>;
}
