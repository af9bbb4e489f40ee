use thiserror::Error;

/// Errors that can occur across the record → decode → play → export flow.
///
/// None of these are fatal: every variant is recovered by re-attempting the
/// triggering user action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no capture device available")]
    DeviceNotAvailable,

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("decode failed: {0}")]
    DecodeFailed(String),

    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    #[error("playback failed: {0}")]
    PlaybackFailed(String),

    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
