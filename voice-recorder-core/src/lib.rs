//! # voice-recorder-core
//!
//! Platform-agnostic voice recorder core library.
//!
//! Provides the capture lifecycle state machine, playback control, canonical
//! WAV (RIFF/PCM16) encoding, live waveform visualization, and WAV export.
//! Platform backends (cpal mic capture and playback, native save dialogs)
//! implement the capability traits and plug into the generic `VoiceRecorder`.
//!
//! ## Architecture
//!
//! ```text
//! voice-recorder-core (this crate)
//! ├── traits/       ← CaptureDevice, AnalysisTap, AudioDecoder, AudioPlayer,
//! │                   SaveDialog, FileWriter, RecorderDelegate
//! ├── models/       ← RecordError, RecorderState, DisplayStatus, RawRecording,
//! │                   DecodedAudio, WavArtifact, PlaybackSnapshot
//! ├── processing/   ← WAV encoding, waveform polyline math, sample window
//! ├── session/      ← RecorderSession, PlaybackController, WaveformMonitor,
//! │                   VoiceRecorder (facade)
//! └── storage/      ← export pipeline (save dialog → atomic write → checksum)
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::audio::{
    AudioSpec, DecodedAudio, RawRecording, WavArtifact, PCM16_CONTENT_TYPE, WAV_CONTENT_TYPE,
};
pub use models::error::RecordError;
pub use models::playback::PlaybackSnapshot;
pub use models::state::{DisplayStatus, RecorderState};
pub use processing::sample_window::SampleWindow;
pub use processing::wav::{encode_pcm16, encode_wav, quantize_sample, wav_header, WAV_HEADER_SIZE};
pub use processing::waveform::{playback_progress, waveform_polyline, WaveformFrame};
pub use session::app::VoiceRecorder;
pub use session::playback::PlaybackController;
pub use session::recorder::RecorderSession;
pub use session::visualizer::{WaveformMonitor, WaveformSink, FRAME_INTERVAL};
pub use storage::export::{default_export_filename, export_artifact, ExportOutcome};
pub use traits::capture_device::{AnalysisTap, CaptureDevice, ChunkSink};
pub use traits::decoder::AudioDecoder;
pub use traits::export::{FileWriter, SaveDialog};
pub use traits::player::{AudioPlayer, FinishedCallback};
pub use traits::recorder_delegate::RecorderDelegate;
