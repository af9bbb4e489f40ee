//! Canonical RIFF/WAVE PCM16 encoding.
//!
//! Pure byte-layout code: a `DecodedAudio` maps to exactly
//! `44 + frames * channels * 2` bytes, deterministically. Encoding is total;
//! no error path exists for a valid `DecodedAudio`.

use crate::models::audio::DecodedAudio;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Bytes per encoded sample (16-bit PCM).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Generate a 44-byte WAV RIFF header for 16-bit PCM.
///
/// All integers little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * 2
/// [32-33]  block_align = channels * 2
/// [34-35]  16 (bits per sample)
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn wav_header(sample_rate: u32, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let block_align = channels * BYTES_PER_SAMPLE as u16;
    let byte_rate = sample_rate * block_align as u32;
    let chunk_size = 36 + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&16u16.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Quantize one float sample to signed 16-bit PCM.
///
/// Clamps to `[-1.0, 1.0]`, then scales negative values by 32768 and
/// non-negative values by 32767, truncating toward zero. The asymmetry and
/// the truncation are load-bearing: canonical output is byte-for-byte
/// reproducible, so -1.0 maps to -32768 and 1.0 to 32767.
pub fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Quantize a slice of float samples to little-endian PCM16 bytes.
///
/// Output length = `samples.len() * 2`.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for &sample in samples {
        data.extend_from_slice(&quantize_sample(sample).to_le_bytes());
    }
    data
}

/// Encode decoded audio as a complete WAV byte sequence.
///
/// Frames are interleaved channel-major: all channels for frame 0, then all
/// channels for frame 1, and so on. Pure and idempotent — encoding the same
/// buffer twice yields identical bytes.
pub fn encode_wav(audio: &DecodedAudio) -> Vec<u8> {
    let channels = audio.channel_count() as usize;
    let frames = audio.frame_count();
    let data_size = (frames * channels * BYTES_PER_SAMPLE) as u32;

    let mut out = Vec::with_capacity(WAV_HEADER_SIZE + data_size as usize);
    out.extend_from_slice(&wav_header(audio.sample_rate(), channels as u16, data_size));
    for frame in 0..frames {
        for channel in 0..channels {
            let sample = audio.plane(channel)[frame];
            out.extend_from_slice(&quantize_sample(sample).to_le_bytes());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(sample_rate: u32, samples: Vec<f32>) -> DecodedAudio {
        DecodedAudio::new(sample_rate, vec![samples]).unwrap()
    }

    #[test]
    fn header_magic_and_fixed_fields() {
        let header = wav_header(48000, 2, 0);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[12..16], b"fmt ");
        assert_eq!(&header[36..40], b"data");
        // fmt chunk size = 16, format code = 1 (PCM), bits per sample = 16
        assert_eq!(u32::from_le_bytes([header[16], header[17], header[18], header[19]]), 16);
        assert_eq!(u16::from_le_bytes([header[20], header[21]]), 1);
        assert_eq!(u16::from_le_bytes([header[34], header[35]]), 16);
    }

    #[test]
    fn header_derived_fields() {
        let header = wav_header(44100, 2, 9600);
        assert_eq!(u16::from_le_bytes([header[22], header[23]]), 2);
        assert_eq!(
            u32::from_le_bytes([header[24], header[25], header[26], header[27]]),
            44100
        );
        // byte rate = 44100 * 2 * 2
        assert_eq!(
            u32::from_le_bytes([header[28], header[29], header[30], header[31]]),
            176400
        );
        // block align = 2 * 2
        assert_eq!(u16::from_le_bytes([header[32], header[33]]), 4);
        assert_eq!(
            u32::from_le_bytes([header[40], header[41], header[42], header[43]]),
            9600
        );
        assert_eq!(
            u32::from_le_bytes([header[4], header[5], header[6], header[7]]),
            36 + 9600
        );
    }

    #[test]
    fn quantize_extremes_are_asymmetric() {
        assert_eq!(quantize_sample(-1.0), -32768);
        assert_eq!(quantize_sample(1.0), 32767);
        assert_eq!(quantize_sample(0.0), 0);
    }

    #[test]
    fn quantize_uses_negative_scale() {
        // -0.5 * 32768 = -16384 exactly; the symmetric scale would give -16383
        assert_eq!(quantize_sample(-0.5), -16384);
    }

    #[test]
    fn quantize_truncates_toward_zero() {
        // 0.5 * 32767 = 16383.5
        assert_eq!(quantize_sample(0.5), 16383);
        // -0.3 * 32768 = -9830.4
        assert_eq!(quantize_sample(-0.3), -9830);
    }

    #[test]
    fn quantize_clamps_out_of_range() {
        assert_eq!(quantize_sample(2.0), 32767);
        assert_eq!(quantize_sample(-3.0), -32768);
    }

    #[test]
    fn encode_length_is_header_plus_frames() {
        let audio = DecodedAudio::new(44100, vec![vec![0.0; 100], vec![0.0; 100]]).unwrap();
        let bytes = encode_wav(&audio);
        assert_eq!(bytes.len(), WAV_HEADER_SIZE + 100 * 2 * 2);
    }

    #[test]
    fn encode_golden_mono_two_samples() {
        // mono, 44100 Hz, samples [0.0, 1.0]
        let bytes = encode_wav(&mono(44100, vec![0.0, 1.0]));
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[44..46], &[0x00, 0x00]);
        assert_eq!(&bytes[46..48], &[0xFF, 0x7F]);
        // data size = 2 samples * 2 bytes
        assert_eq!(u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]), 4);
    }

    #[test]
    fn encode_negative_full_scale() {
        let bytes = encode_wav(&mono(44100, vec![-1.0]));
        // -32768 little-endian
        assert_eq!(&bytes[44..46], &[0x00, 0x80]);
    }

    #[test]
    fn encode_interleaves_channel_major() {
        let audio =
            DecodedAudio::new(8000, vec![vec![0.25, 0.75], vec![-0.25, -0.75]]).unwrap();
        let bytes = encode_wav(&audio);
        let sample = |i: usize| {
            i16::from_le_bytes([bytes[WAV_HEADER_SIZE + i * 2], bytes[WAV_HEADER_SIZE + i * 2 + 1]])
        };
        // frame 0: ch0 then ch1, frame 1: ch0 then ch1
        assert_eq!(sample(0), quantize_sample(0.25));
        assert_eq!(sample(1), quantize_sample(-0.25));
        assert_eq!(sample(2), quantize_sample(0.75));
        assert_eq!(sample(3), quantize_sample(-0.75));
    }

    #[test]
    fn encode_is_idempotent() {
        let audio = mono(22050, vec![0.1, -0.2, 0.3, -0.999, 0.999]);
        assert_eq!(encode_wav(&audio), encode_wav(&audio));
    }

    #[test]
    fn encode_empty_audio_is_header_only() {
        let bytes = encode_wav(&mono(44100, Vec::new()));
        assert_eq!(bytes.len(), WAV_HEADER_SIZE);
        assert_eq!(u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]), 0);
    }

    #[test]
    fn encode_pcm16_length() {
        assert_eq!(encode_pcm16(&[0.0, 0.5, -0.5]).len(), 6);
    }
}
