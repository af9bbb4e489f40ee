use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};

use voice_recorder_core::traits::player::{AudioPlayer, FinishedCallback};
use voice_recorder_core::{DecodedAudio, RecordError};

/// cpal streams are `!Send`; the holder is only created and dropped from the
/// thread that owns the player.
struct StreamHolder(Stream);
unsafe impl Send for StreamHolder {}

/// Feeds one decoded buffer into the output callback, stepping through the
/// source at the rate ratio and duplicating the last source channel into
/// any extra output channels.
struct Renderer {
    samples: Vec<f32>,
    src_channels: usize,
    frames: usize,
    step: f64,
    position: f64,
    out_channels: usize,
    on_finished: Option<FinishedCallback>,
}

impl Renderer {
    /// Emit `len` output slot samples. Past the end of the buffer emits
    /// silence and fires the completion callback exactly once.
    fn fill(&mut self, len: usize, mut emit: impl FnMut(f32)) {
        for _ in 0..len / self.out_channels {
            let index = self.position as usize;
            if index >= self.frames {
                for _ in 0..self.out_channels {
                    emit(0.0);
                }
                if let Some(callback) = self.on_finished.take() {
                    callback();
                }
            } else {
                for channel in 0..self.out_channels {
                    let src_channel = channel.min(self.src_channels - 1);
                    emit(self.samples[index * self.src_channels + src_channel]);
                }
                self.position += self.step;
            }
        }
    }
}

/// Playback through the default cpal output device.
///
/// Each play opens a fresh output stream and runs the buffer start to
/// finish; there is no stop-midway operation. The previous stream (already
/// completed) is dropped when a new playback begins.
pub struct CpalPlayer {
    stream: Option<StreamHolder>,
}

impl CpalPlayer {
    pub fn new() -> Self {
        Self { stream: None }
    }
}

impl Default for CpalPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for CpalPlayer {
    fn play(
        &mut self,
        audio: &DecodedAudio,
        on_finished: FinishedCallback,
    ) -> Result<(), RecordError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| RecordError::PlaybackFailed("no output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| RecordError::PlaybackFailed(format!("no output config: {e}")))?;

        let out_rate = config.sample_rate();
        let out_channels = config.channels() as usize;
        let sample_format = config.sample_format();

        let mut renderer = Renderer {
            samples: audio.interleaved(),
            src_channels: audio.channel_count() as usize,
            frames: audio.frame_count(),
            step: audio.sample_rate() as f64 / out_rate as f64,
            position: 0.0,
            out_channels,
            on_finished: Some(on_finished),
        };

        let err_callback = |err: cpal::StreamError| {
            log::error!("playback stream error: {err}");
        };

        let stream = match sample_format {
            SampleFormat::F32 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        let mut i = 0;
                        renderer.fill(data.len(), |sample| {
                            data[i] = sample;
                            i += 1;
                        });
                    },
                    err_callback,
                    None,
                )
                .map_err(|e| RecordError::PlaybackFailed(e.to_string()))?,
            SampleFormat::I16 => device
                .build_output_stream(
                    &config.into(),
                    move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                        let mut i = 0;
                        renderer.fill(data.len(), |sample| {
                            data[i] = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                            i += 1;
                        });
                    },
                    err_callback,
                    None,
                )
                .map_err(|e| RecordError::PlaybackFailed(e.to_string()))?,
            other => {
                return Err(RecordError::PlaybackFailed(format!(
                    "unsupported output sample format: {other:?}"
                )));
            }
        };

        stream
            .play()
            .map_err(|e| RecordError::PlaybackFailed(e.to_string()))?;
        self.stream = Some(StreamHolder(stream));

        log::debug!(
            "playback started: {:.2}s at {} Hz into {out_channels} output channel(s)",
            audio.duration_secs(),
            audio.sample_rate()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    fn renderer(audio: &DecodedAudio, out_channels: usize, fired: Arc<AtomicBool>) -> Renderer {
        Renderer {
            samples: audio.interleaved(),
            src_channels: audio.channel_count() as usize,
            frames: audio.frame_count(),
            step: 1.0,
            position: 0.0,
            out_channels,
            on_finished: Some(Box::new(move || fired.store(true, Ordering::SeqCst))),
        }
    }

    #[test]
    fn mono_source_duplicates_into_stereo_output() {
        let audio = DecodedAudio::new(8000, vec![vec![0.25, -0.5]]).unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let mut renderer = renderer(&audio, 2, fired);

        let mut out = Vec::new();
        renderer.fill(4, |s| out.push(s));
        assert_eq!(out, vec![0.25, 0.25, -0.5, -0.5]);
    }

    #[test]
    fn completion_fires_once_after_buffer_end() {
        let audio = DecodedAudio::new(8000, vec![vec![0.1]]).unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let mut renderer = renderer(&audio, 1, fired.clone());

        let mut out = Vec::new();
        renderer.fill(1, |s| out.push(s));
        assert!(!fired.load(Ordering::SeqCst));

        renderer.fill(3, |s| out.push(s));
        assert!(fired.load(Ordering::SeqCst));
        assert_eq!(out, vec![0.1, 0.0, 0.0, 0.0]);

        // further fills keep emitting silence without a second callback
        renderer.fill(1, |s| out.push(s));
        assert_eq!(out.last(), Some(&0.0));
    }

    #[test]
    fn rate_ratio_steps_through_source() {
        // source at half the output rate: each frame plays twice
        let audio = DecodedAudio::new(4000, vec![vec![0.1, 0.2]]).unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let mut renderer = Renderer {
            samples: audio.interleaved(),
            src_channels: 1,
            frames: 2,
            step: 0.5,
            position: 0.0,
            out_channels: 1,
            on_finished: Some(Box::new(move || fired.store(true, Ordering::SeqCst))),
        };

        let mut out = Vec::new();
        renderer.fill(4, |s| out.push(s));
        assert_eq!(out, vec![0.1, 0.1, 0.2, 0.2]);
    }
}
