use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio::RawRecording;
use crate::models::error::RecordError;
use crate::models::state::RecorderState;
use crate::traits::capture_device::{AnalysisTap, CaptureDevice, ChunkSink};
use crate::traits::recorder_delegate::RecorderDelegate;

/// Capture session lifecycle: idle → recording ⇄ paused → processing.
///
/// Owns the capture device exclusively. Data chunks emitted by the device
/// accumulate in an internal buffer; stop concatenates them into one
/// immutable `RawRecording`. The analysis tap is non-null exactly while the
/// state is recording or paused.
pub struct RecorderSession<D: CaptureDevice> {
    device: D,
    state: RecorderState,
    chunks: Arc<Mutex<Vec<u8>>>,
    tap: Option<Arc<dyn AnalysisTap>>,
    delegate: Option<Arc<dyn RecorderDelegate>>,
}

impl<D: CaptureDevice> RecorderSession<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            state: RecorderState::Idle,
            chunks: Arc::new(Mutex::new(Vec::new())),
            tap: None,
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn RecorderDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> RecorderState {
        self.state.clone()
    }

    /// Live analysis handle, present iff recording or paused.
    pub fn analysis_tap(&self) -> Option<Arc<dyn AnalysisTap>> {
        self.tap.clone()
    }

    /// Start a capture. Transitions: idle/error → recording.
    ///
    /// A start while a capture is already live is rejected without touching
    /// the open stream. A failed device start transitions to the error
    /// state with no analysis handle and no partial data retained.
    pub fn start(&mut self) -> Result<(), RecordError> {
        match self.state {
            RecorderState::Idle | RecorderState::Error(_) => {}
            RecorderState::Recording | RecorderState::Paused => {
                return Err(RecordError::InvalidState("a capture is already in progress"));
            }
            RecorderState::Processing => {
                return Err(RecordError::InvalidState("previous capture is still processing"));
            }
        }

        if !self.device.is_available() {
            let error = RecordError::DeviceNotAvailable;
            self.fail(error.clone());
            return Err(error);
        }

        self.chunks.lock().clear();
        let chunks = Arc::clone(&self.chunks);
        let sink: ChunkSink = Arc::new(move |data: &[u8]| {
            chunks.lock().extend_from_slice(data);
        });

        match self.device.start(sink) {
            Ok(tap) => {
                self.tap = Some(tap);
                self.set_state(RecorderState::Recording);
                log::info!("capture started");
                Ok(())
            }
            Err(error) => {
                self.tap = None;
                self.chunks.lock().clear();
                self.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Suspend data capture without losing buffered chunks.
    pub fn pause(&mut self) -> Result<(), RecordError> {
        if !self.state.is_recording() {
            return Err(RecordError::InvalidState("can only pause while recording"));
        }
        self.device.pause()?;
        self.set_state(RecorderState::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), RecordError> {
        if !self.state.is_paused() {
            return Err(RecordError::InvalidState("can only resume while paused"));
        }
        self.device.resume()?;
        self.set_state(RecorderState::Recording);
        Ok(())
    }

    /// Stop the capture and assemble the raw recording.
    ///
    /// The microphone is released unconditionally, even when zero chunks
    /// were captured or stream finalization reports an error. Transitions
    /// to processing; the caller hands the blob to the playback controller
    /// and then calls `finish_processing`.
    pub fn stop(&mut self) -> Result<RawRecording, RecordError> {
        if !self.state.is_live() {
            return Err(RecordError::InvalidState("no capture in progress"));
        }

        // Releases the device; any final chunks flush through the sink
        // before this returns.
        if let Err(error) = self.device.stop() {
            log::warn!("capture stream finalization reported an error: {error}");
        }
        self.tap = None;

        let bytes = std::mem::take(&mut *self.chunks.lock());
        let recording = RawRecording::new(
            self.device.content_type().to_string(),
            self.device.format(),
            bytes,
        );
        log::info!(
            "capture stopped: {} bytes of {}",
            recording.len(),
            recording.content_type
        );

        self.set_state(RecorderState::Processing);
        if let Some(ref delegate) = self.delegate {
            delegate.on_recording_ready(&recording);
        }
        Ok(recording)
    }

    /// Return to idle once the downstream decode handoff has finished.
    pub fn finish_processing(&mut self) {
        if self.state.is_processing() {
            self.set_state(RecorderState::Idle);
        }
    }

    fn set_state(&mut self, state: RecorderState) {
        self.state = state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }

    fn fail(&mut self, error: RecordError) {
        log::error!("capture start failed: {error}");
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&error);
        }
        self.set_state(RecorderState::Error(error));
    }
}
