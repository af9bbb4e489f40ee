use std::io::Cursor;

use voice_recorder_core::traits::decoder::AudioDecoder;
use voice_recorder_core::{
    AudioSpec, DecodedAudio, RawRecording, RecordError, PCM16_CONTENT_TYPE, WAV_CONTENT_TYPE,
};

/// Decodes captured blobs by content type.
///
/// Handles the headerless PCM16 chunk streams the cpal capture emits
/// (frame layout from the blob's `AudioSpec`) and RIFF/WAVE containers via
/// `hound`. Malformed or empty input fails with `DecodeFailed`; nothing is
/// partially decoded.
pub struct BlobDecoder;

impl AudioDecoder for BlobDecoder {
    fn decode(&self, recording: &RawRecording) -> Result<DecodedAudio, RecordError> {
        if recording.is_empty() {
            return Err(RecordError::DecodeFailed("empty recording".into()));
        }
        match recording.content_type.as_str() {
            PCM16_CONTENT_TYPE => decode_pcm16(recording.spec, &recording.bytes),
            WAV_CONTENT_TYPE | "audio/x-wav" => decode_wav(&recording.bytes),
            other => Err(RecordError::DecodeFailed(format!(
                "unsupported content type: {other}"
            ))),
        }
    }
}

fn decode_pcm16(spec: AudioSpec, bytes: &[u8]) -> Result<DecodedAudio, RecordError> {
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(RecordError::DecodeFailed("stream declares zero channels".into()));
    }
    if bytes.len() % (2 * channels) != 0 {
        return Err(RecordError::DecodeFailed(format!(
            "stream truncated mid-frame: {} bytes across {channels} channel(s)",
            bytes.len()
        )));
    }

    let frames = bytes.len() / (2 * channels);
    let mut planes = vec![Vec::with_capacity(frames); channels];
    for (i, pair) in bytes.chunks_exact(2).enumerate() {
        let sample = i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0;
        planes[i % channels].push(sample);
    }
    DecodedAudio::new(spec.sample_rate, planes)
}

fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio, RecordError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| RecordError::DecodeFailed(e.to_string()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(RecordError::DecodeFailed("wav declares zero channels".into()));
    }

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<Result<_, _>>()
            .map_err(|e| RecordError::DecodeFailed(e.to_string()))?,
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| RecordError::DecodeFailed(e.to_string()))?,
        (format, bits) => {
            return Err(RecordError::DecodeFailed(format!(
                "unsupported wav encoding: {bits}-bit {format:?}"
            )));
        }
    };

    let channels = spec.channels as usize;
    if interleaved.len() % channels != 0 {
        return Err(RecordError::DecodeFailed("wav data truncated mid-frame".into()));
    }
    let mut planes = vec![Vec::with_capacity(interleaved.len() / channels); channels];
    for (i, sample) in interleaved.into_iter().enumerate() {
        planes[i % channels].push(sample);
    }
    DecodedAudio::new(spec.sample_rate, planes)
}
