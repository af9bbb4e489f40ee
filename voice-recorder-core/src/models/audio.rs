use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::RecordError;

/// Content type for headerless interleaved 16-bit little-endian PCM chunks.
pub const PCM16_CONTENT_TYPE: &str = "audio/pcm;format=s16le";

/// Content type for RIFF/WAVE containers.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// Wire format of a raw capture stream: sample rate in Hz and interleaved
/// channel count. Consumed by decoders of headerless formats; opaque to the
/// recorder itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

/// An immutable captured blob: the concatenation of every data chunk the
/// capture device emitted during one session.
///
/// The byte layout is whatever the device's `content_type` declares. The
/// recorder never inspects it; only a matching `AudioDecoder` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecording {
    pub id: Uuid,
    pub content_type: String,
    pub spec: AudioSpec,
    pub bytes: Vec<u8>,
}

impl RawRecording {
    pub fn new(content_type: String, spec: AudioSpec, bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_type,
            spec,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decoded PCM audio: one `f32` plane per channel, all planes equal length.
///
/// Samples are nominally in `[-1.0, 1.0]`; out-of-range values are allowed
/// here and clamped by the WAV encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    sample_rate: u32,
    planes: Vec<Vec<f32>>,
}

impl DecodedAudio {
    /// Validates the invariants: positive sample rate, at least one channel,
    /// equal-length planes.
    pub fn new(sample_rate: u32, planes: Vec<Vec<f32>>) -> Result<Self, RecordError> {
        if sample_rate == 0 {
            return Err(RecordError::InvalidAudio("sample rate must be positive".into()));
        }
        if planes.is_empty() {
            return Err(RecordError::InvalidAudio("at least one channel required".into()));
        }
        let frames = planes[0].len();
        if planes.iter().any(|p| p.len() != frames) {
            return Err(RecordError::InvalidAudio(
                "channel planes must have equal length".into(),
            ));
        }
        Ok(Self { sample_rate, planes })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.planes.len() as u16
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.planes[0].len()
    }

    pub fn plane(&self, channel: usize) -> &[f32] {
        &self.planes[channel]
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Channel-major interleaved copy: all channels for frame 0, then all
    /// channels for frame 1, and so on.
    pub fn interleaved(&self) -> Vec<f32> {
        let channels = self.planes.len();
        let frames = self.frame_count();
        let mut out = Vec::with_capacity(frames * channels);
        for frame in 0..frames {
            for plane in &self.planes {
                out.push(plane[frame]);
            }
        }
        out
    }
}

/// An encoded WAV byte sequence derived deterministically from one
/// `DecodedAudio`. Has no lifecycle of its own beyond its source buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct WavArtifact {
    bytes: Vec<u8>,
    duration_secs: f64,
}

impl WavArtifact {
    pub fn new(bytes: Vec<u8>, duration_secs: f64) -> Self {
        Self { bytes, duration_secs }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_audio_rejects_zero_sample_rate() {
        let result = DecodedAudio::new(0, vec![vec![0.0]]);
        assert!(matches!(result, Err(RecordError::InvalidAudio(_))));
    }

    #[test]
    fn decoded_audio_rejects_no_channels() {
        let result = DecodedAudio::new(44100, Vec::new());
        assert!(matches!(result, Err(RecordError::InvalidAudio(_))));
    }

    #[test]
    fn decoded_audio_rejects_unequal_planes() {
        let result = DecodedAudio::new(44100, vec![vec![0.0, 0.1], vec![0.0]]);
        assert!(matches!(result, Err(RecordError::InvalidAudio(_))));
    }

    #[test]
    fn duration_is_frames_over_rate() {
        let audio = DecodedAudio::new(8000, vec![vec![0.0; 4000]]).unwrap();
        assert!((audio.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn interleaved_is_channel_major() {
        let audio =
            DecodedAudio::new(44100, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(audio.interleaved(), vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn raw_recordings_get_unique_ids() {
        let spec = AudioSpec { sample_rate: 48000, channels: 1 };
        let a = RawRecording::new(PCM16_CONTENT_TYPE.into(), spec, vec![0, 0]);
        let b = RawRecording::new(PCM16_CONTENT_TYPE.into(), spec, vec![0, 0]);
        assert_ne!(a.id, b.id);
    }
}
