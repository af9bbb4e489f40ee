use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::processing::waveform::{waveform_polyline, WaveformFrame};
use crate::traits::capture_device::AnalysisTap;

/// Receives rendered waveform frames at display cadence.
pub trait WaveformSink: Send + Sync {
    fn on_frame(&self, frame: &WaveformFrame);
}

/// Default frame interval, roughly one display refresh at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Continuous live-waveform task.
///
/// Samples the analysis tap once per frame interval and delivers a polyline
/// to the sink. The loop is cancelable and cancellation is deterministic:
/// once `stop` returns, the sink receives no further frames.
pub struct WaveformMonitor {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl WaveformMonitor {
    pub fn start(
        tap: Arc<dyn AnalysisTap>,
        sink: Arc<dyn WaveformSink>,
        width: f32,
        height: f32,
        frame_interval: Duration,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let run = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("waveform-monitor".into())
            .spawn(move || {
                let mut snapshot = vec![0u8; tap.buffer_len()];
                while run.load(Ordering::SeqCst) {
                    tap.time_domain(&mut snapshot);
                    let frame = WaveformFrame {
                        width,
                        height,
                        points: waveform_polyline(&snapshot, width, height),
                    };
                    sink.on_frame(&frame);
                    thread::sleep(frame_interval);
                }
            })
            .expect("failed to spawn waveform-monitor thread");

        Self { running, handle: Some(handle) }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the frame loop and wait for it to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for WaveformMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use parking_lot::Mutex;

    use super::*;

    struct RampTap;

    impl AnalysisTap for RampTap {
        fn buffer_len(&self) -> usize {
            8
        }

        fn time_domain(&self, out: &mut [u8]) {
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = (i * 32) as u8;
            }
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        frames: Mutex<Vec<WaveformFrame>>,
    }

    impl WaveformSink for CollectingSink {
        fn on_frame(&self, frame: &WaveformFrame) {
            self.frames.lock().push(frame.clone());
        }
    }

    #[test]
    fn delivers_frames_while_running() {
        let sink = Arc::new(CollectingSink::default());
        let mut monitor = WaveformMonitor::start(
            Arc::new(RampTap),
            sink.clone(),
            100.0,
            80.0,
            Duration::from_millis(1),
        );

        let deadline = Instant::now() + Duration::from_secs(2);
        while sink.frames.lock().len() < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        monitor.stop();

        let frames = sink.frames.lock();
        assert!(frames.len() >= 2, "expected at least two frames");
        // polyline has one point per snapshot byte plus the closing point
        assert_eq!(frames[0].points.len(), 9);
        assert_eq!(frames[0].width, 100.0);
    }

    #[test]
    fn no_frames_after_stop_returns() {
        let sink = Arc::new(CollectingSink::default());
        let mut monitor = WaveformMonitor::start(
            Arc::new(RampTap),
            sink.clone(),
            100.0,
            80.0,
            Duration::from_millis(1),
        );
        thread::sleep(Duration::from_millis(10));
        monitor.stop();
        assert!(!monitor.is_running());

        let count = sink.frames.lock().len();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(sink.frames.lock().len(), count);
    }

    #[test]
    fn stop_is_idempotent() {
        let sink = Arc::new(CollectingSink::default());
        let mut monitor = WaveformMonitor::start(
            Arc::new(RampTap),
            sink,
            10.0,
            10.0,
            Duration::from_millis(1),
        );
        monitor.stop();
        monitor.stop();
    }
}
