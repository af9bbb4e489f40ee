use serde::Serialize;

use super::error::RecordError;

/// Recorder session state machine.
///
/// State transitions:
/// ```text
/// idle → recording ⇄ paused
///           ↓          ↓
///        processing → idle
///
/// idle → error (failed start; exits only via a fresh start)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderState {
    Idle,
    Recording,
    Paused,
    Processing,
    Error(RecordError),
}

impl RecorderState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Recording or paused: a capture stream is open and the analysis
    /// handle is valid.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
            Self::Processing => "processing",
            Self::Error(_) => "error",
        }
    }
}

/// UI-facing status derived from recorder and playback state.
///
/// Transient sub-states carry typed payloads (`Ready { seconds }`,
/// `PlaybackEnded { seconds }`) instead of string-embedded parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum DisplayStatus {
    Idle,
    Recording,
    Paused,
    Processing,
    Playing,
    Ready { seconds: f64 },
    PlaybackEnded { seconds: f64 },
    Error,
}
