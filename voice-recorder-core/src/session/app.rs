use std::sync::Arc;

use crate::models::error::RecordError;
use crate::models::playback::PlaybackSnapshot;
use crate::models::state::{DisplayStatus, RecorderState};
use crate::session::playback::PlaybackController;
use crate::session::recorder::RecorderSession;
use crate::storage::export::ExportOutcome;
use crate::traits::capture_device::{AnalysisTap, CaptureDevice};
use crate::traits::decoder::AudioDecoder;
use crate::traits::export::{FileWriter, SaveDialog};
use crate::traits::player::AudioPlayer;
use crate::traits::recorder_delegate::RecorderDelegate;

/// Top-level recorder: wires the capture session and the playback
/// controller together and enforces their mutual exclusion.
///
/// Recording and playback never overlap: a start while playing and a play
/// while recording or paused are both silent no-ops, mirroring disabled
/// controls in the UI layer.
pub struct VoiceRecorder<D: CaptureDevice, Dec: AudioDecoder, P: AudioPlayer> {
    recorder: RecorderSession<D>,
    playback: PlaybackController<Dec, P>,
    ready_secs: Option<f64>,
}

impl<D: CaptureDevice, Dec: AudioDecoder, P: AudioPlayer> VoiceRecorder<D, Dec, P> {
    pub fn new(device: D, decoder: Dec, player: P) -> Self {
        Self {
            recorder: RecorderSession::new(device),
            playback: PlaybackController::new(decoder, player),
            ready_secs: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn RecorderDelegate>) {
        self.recorder.set_delegate(delegate);
    }

    /// Begin a capture. Ignored while a playback is in flight.
    pub fn start_recording(&mut self) -> Result<(), RecordError> {
        if self.playback.is_playing() {
            log::debug!("start ignored: playback in progress");
            return Ok(());
        }
        self.recorder.start()
    }

    pub fn pause_recording(&mut self) -> Result<(), RecordError> {
        self.recorder.pause()
    }

    pub fn resume_recording(&mut self) -> Result<(), RecordError> {
        self.recorder.resume()
    }

    /// Stop the capture and run the decode handoff.
    ///
    /// The recorder returns to idle whether or not the decode succeeds; a
    /// decode failure is propagated after the handoff so the caller can
    /// surface it, and leaves any previously processed audio untouched.
    pub fn stop_recording(&mut self) -> Result<(), RecordError> {
        let recording = self.recorder.stop()?;
        let processed = self.playback.process_capture(&recording);
        self.recorder.finish_processing();
        match processed {
            Ok(duration) => {
                self.ready_secs = Some(duration);
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Play the processed capture once, start to finish.
    ///
    /// Returns `Ok(false)` as a no-op while recording or paused, when no
    /// audio is loaded, or when a playback is already in flight.
    pub fn play(&mut self) -> Result<bool, RecordError> {
        if self.recorder.state().is_live() {
            log::debug!("play ignored: capture in progress");
            return Ok(false);
        }
        self.playback.play()
    }

    /// Export the processed capture through the save dialog and writer.
    pub fn export_wav<Dlg, W>(&self, dialog: &Dlg, writer: &W) -> Result<ExportOutcome, RecordError>
    where
        Dlg: SaveDialog + ?Sized,
        W: FileWriter + ?Sized,
    {
        self.playback.export_wav(dialog, writer)
    }

    pub fn recorder_state(&self) -> RecorderState {
        self.recorder.state()
    }

    pub fn analysis_tap(&self) -> Option<Arc<dyn AnalysisTap>> {
        self.recorder.analysis_tap()
    }

    pub fn playback_snapshot(&self) -> PlaybackSnapshot {
        self.playback.snapshot()
    }

    /// UI status, with transient `Ready`/`PlaybackEnded` payloads carrying
    /// the capture duration in seconds.
    pub fn status(&self) -> DisplayStatus {
        match self.recorder.state() {
            RecorderState::Recording => DisplayStatus::Recording,
            RecorderState::Paused => DisplayStatus::Paused,
            RecorderState::Processing => DisplayStatus::Processing,
            RecorderState::Error(_) => DisplayStatus::Error,
            RecorderState::Idle => {
                if self.playback.is_playing() {
                    DisplayStatus::Playing
                } else if let Some(seconds) = self.playback.playback_ended() {
                    DisplayStatus::PlaybackEnded { seconds }
                } else if let Some(seconds) = self.ready_secs {
                    DisplayStatus::Ready { seconds }
                } else {
                    DisplayStatus::Idle
                }
            }
        }
    }
}
