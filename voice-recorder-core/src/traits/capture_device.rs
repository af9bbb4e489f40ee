use std::sync::Arc;

use crate::models::audio::AudioSpec;
use crate::models::error::RecordError;

/// Sink invoked whenever the capture stream has a data chunk available.
///
/// Chunks are encoded bytes in the device's `content_type`; concatenating
/// every chunk emitted during one session yields a complete raw recording.
/// The callback fires on a dedicated audio thread — keep processing minimal.
pub type ChunkSink = Arc<dyn Fn(&[u8]) + Send + Sync + 'static>;

/// Live view into an open capture stream, yielding periodic time-domain
/// amplitude samples for visualization without consuming the stream.
///
/// Sample encoding matches the byte time-domain convention: `0..=255` with
/// `128` at silence, full negative swing at `0`.
pub trait AnalysisTap: Send + Sync {
    /// Fixed length of the time-domain snapshot buffer.
    fn buffer_len(&self) -> usize;

    /// Fill `out` with the most recent amplitude samples, oldest first.
    /// `out` should be `buffer_len()` bytes; shorter buffers get the tail.
    fn time_domain(&self, out: &mut [u8]);
}

/// Interface for platform microphone capture.
///
/// Implemented by `CpalMicCapture` in the backend crate and by fakes in
/// tests. The device is the one exclusive hardware resource in the system:
/// `start` acquires it, `stop` must release it unconditionally.
pub trait CaptureDevice: Send {
    /// Whether a capture device is currently present.
    fn is_available(&self) -> bool;

    /// Acquire the microphone and begin emitting data chunks via `chunks`.
    ///
    /// Returns the live analysis tap for visualization. Fails with
    /// `PermissionDenied` or `DeviceNotAvailable` without retaining any
    /// partial state.
    fn start(&mut self, chunks: ChunkSink) -> Result<Arc<dyn AnalysisTap>, RecordError>;

    /// Suspend data capture. Buffered chunks are kept; the analysis tap
    /// stays valid.
    fn pause(&mut self) -> Result<(), RecordError>;

    /// Resume a paused capture.
    fn resume(&mut self) -> Result<(), RecordError>;

    /// Finalize the stream and release the microphone.
    ///
    /// Must release the device even if zero chunks were captured or the
    /// finalization itself fails.
    fn stop(&mut self) -> Result<(), RecordError>;

    /// Content type of the emitted chunk stream.
    fn content_type(&self) -> &str;

    /// Wire format of the most recent capture.
    fn format(&self) -> AudioSpec;
}
