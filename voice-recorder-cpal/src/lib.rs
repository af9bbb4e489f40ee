//! # voice-recorder-cpal
//!
//! Cross-platform backend for voice-recorder-core.
//!
//! Provides:
//! - `CpalMicCapture` — microphone capture via the default cpal input device
//! - `CpalPlayer` — playback via the default cpal output device
//! - `BlobDecoder` — raw PCM16 chunk streams and RIFF/WAVE (hound) decoding
//! - `AtomicFileWriter` — temp-file-and-rename filesystem writes
//!
//! ## Usage
//! ```ignore
//! use voice_recorder_core::VoiceRecorder;
//! use voice_recorder_cpal::{AtomicFileWriter, BlobDecoder, CpalMicCapture, CpalPlayer};
//!
//! let mut app = VoiceRecorder::new(CpalMicCapture::new(), BlobDecoder, CpalPlayer::new());
//! app.start_recording()?;
//! ```
//!
//! A native save dialog is the embedding shell's concern; any
//! `SaveDialog` implementation combines with `AtomicFileWriter` for export.

pub mod decoder;
pub mod file_writer;
pub mod mic_capture;
pub mod player;

pub use decoder::BlobDecoder;
pub use file_writer::AtomicFileWriter;
pub use mic_capture::CpalMicCapture;
pub use player::CpalPlayer;
