use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use parking_lot::Mutex;

use voice_recorder_core::processing::sample_window::SampleWindow;
use voice_recorder_core::processing::wav;
use voice_recorder_core::traits::capture_device::{AnalysisTap, CaptureDevice, ChunkSink};
use voice_recorder_core::{AudioSpec, RecordError, PCM16_CONTENT_TYPE};

/// Samples retained for the analysis tap's time-domain snapshot.
const TAP_WINDOW: usize = 2048;

/// cpal streams are `!Send`; the holder is only created and dropped from the
/// thread that owns the capture device.
struct StreamHolder(Stream);
unsafe impl Send for StreamHolder {}

/// Microphone capture through the default cpal input device.
///
/// Emits headerless interleaved PCM16 chunks at the device's native rate.
/// Pause gates data delivery without closing the stream, so the analysis
/// tap keeps its window; stop drops the stream and releases the device.
pub struct CpalMicCapture {
    stream: Option<StreamHolder>,
    gate: Arc<AtomicBool>,
    window: Arc<Mutex<SampleWindow>>,
    spec: AudioSpec,
}

struct WindowTap {
    window: Arc<Mutex<SampleWindow>>,
}

impl AnalysisTap for WindowTap {
    fn buffer_len(&self) -> usize {
        self.window.lock().capacity()
    }

    fn time_domain(&self, out: &mut [u8]) {
        self.window.lock().fill_time_domain(out)
    }
}

impl CpalMicCapture {
    pub fn new() -> Self {
        Self {
            stream: None,
            gate: Arc::new(AtomicBool::new(false)),
            window: Arc::new(Mutex::new(SampleWindow::new(TAP_WINDOW))),
            spec: AudioSpec { sample_rate: 44100, channels: 1 },
        }
    }
}

impl Default for CpalMicCapture {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver(samples: &[f32], window: &Mutex<SampleWindow>, chunks: &ChunkSink) {
    window.lock().push(samples);
    chunks(&wav::encode_pcm16(samples));
}

fn build_error(error: cpal::BuildStreamError) -> RecordError {
    match error {
        cpal::BuildStreamError::DeviceNotAvailable => RecordError::DeviceNotAvailable,
        other => RecordError::CaptureFailed(other.to_string()),
    }
}

impl CaptureDevice for CpalMicCapture {
    fn is_available(&self) -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn start(&mut self, chunks: ChunkSink) -> Result<Arc<dyn AnalysisTap>, RecordError> {
        if self.stream.is_some() {
            return Err(RecordError::InvalidState("capture stream already open"));
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(RecordError::DeviceNotAvailable)?;
        let device_name = device
            .description()
            .map(|d| d.name().to_string())
            .unwrap_or_else(|_| String::from("unknown"));
        let config = device
            .default_input_config()
            .map_err(|e| RecordError::CaptureFailed(format!("no input config: {e}")))?;

        let sample_rate = config.sample_rate();
        let channels = config.channels();
        let sample_format = config.sample_format();

        self.window.lock().clear();
        self.gate.store(true, Ordering::SeqCst);

        let gate = Arc::clone(&self.gate);
        let window = Arc::clone(&self.window);
        let err_callback = |err: cpal::StreamError| {
            log::error!("capture stream error: {err}");
        };

        let stream = match sample_format {
            SampleFormat::F32 => device
                .build_input_stream(
                    &config.into(),
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if gate.load(Ordering::SeqCst) {
                            deliver(data, &window, &chunks);
                        }
                    },
                    err_callback,
                    None,
                )
                .map_err(build_error)?,
            SampleFormat::I16 => device
                .build_input_stream(
                    &config.into(),
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if gate.load(Ordering::SeqCst) {
                            let samples: Vec<f32> =
                                data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                            deliver(&samples, &window, &chunks);
                        }
                    },
                    err_callback,
                    None,
                )
                .map_err(build_error)?,
            SampleFormat::U16 => device
                .build_input_stream(
                    &config.into(),
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        if gate.load(Ordering::SeqCst) {
                            let samples: Vec<f32> = data
                                .iter()
                                .map(|&s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0)
                                .collect();
                            deliver(&samples, &window, &chunks);
                        }
                    },
                    err_callback,
                    None,
                )
                .map_err(build_error)?,
            other => {
                return Err(RecordError::CaptureFailed(format!(
                    "unsupported sample format: {other:?}"
                )));
            }
        };

        stream
            .play()
            .map_err(|e| RecordError::CaptureFailed(e.to_string()))?;

        self.stream = Some(StreamHolder(stream));
        self.spec = AudioSpec { sample_rate, channels };
        log::info!(
            "mic capture started on {device_name}: {sample_rate} Hz, {channels} channel(s)"
        );
        Ok(Arc::new(WindowTap { window: Arc::clone(&self.window) }))
    }

    fn pause(&mut self) -> Result<(), RecordError> {
        if self.stream.is_none() {
            return Err(RecordError::InvalidState("no open capture stream"));
        }
        self.gate.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), RecordError> {
        if self.stream.is_none() {
            return Err(RecordError::InvalidState("no open capture stream"));
        }
        self.gate.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecordError> {
        self.gate.store(false, Ordering::SeqCst);
        // Dropping the stream stops capture and releases the device.
        if self.stream.take().is_some() {
            log::info!("mic capture stopped");
        }
        Ok(())
    }

    fn content_type(&self) -> &str {
        PCM16_CONTENT_TYPE
    }

    fn format(&self) -> AudioSpec {
        self.spec
    }
}
