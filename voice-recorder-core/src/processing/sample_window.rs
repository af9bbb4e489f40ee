/// Fixed-size window over the most recent capture samples.
///
/// Backs analysis taps: capture callbacks push float samples, the
/// visualizer reads a byte time-domain snapshot. Unlike a queue, reading
/// never consumes — the window always reflects the newest `capacity`
/// samples. Wrap in `Arc<parking_lot::Mutex<SampleWindow>>` for
/// cross-thread access.
#[derive(Debug)]
pub struct SampleWindow {
    buffer: Vec<f32>,
    write_index: usize,
    filled: usize,
}

/// Byte value representing silence in a time-domain snapshot.
pub const SILENCE_BYTE: u8 = 128;

/// Map a float sample in `[-1.0, 1.0]` to the `0..=255` byte encoding with
/// 128 at silence.
pub fn amplitude_byte(sample: f32) -> u8 {
    let scaled = ((sample.clamp(-1.0, 1.0) + 1.0) * 128.0) as i32;
    scaled.min(255) as u8
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: vec![0.0; capacity],
            write_index: 0,
            filled: 0,
        }
    }

    /// Append samples, overwriting the oldest once the window is full.
    pub fn push(&mut self, samples: &[f32]) {
        let capacity = self.buffer.len();
        // Only the tail can survive anyway
        let samples = if samples.len() > capacity {
            &samples[samples.len() - capacity..]
        } else {
            samples
        };
        for &sample in samples {
            self.buffer[self.write_index] = sample;
            self.write_index = (self.write_index + 1) % capacity;
        }
        self.filled = (self.filled + samples.len()).min(capacity);
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn clear(&mut self) {
        self.write_index = 0;
        self.filled = 0;
    }

    /// Fill `out` with the newest samples as time-domain bytes, oldest
    /// first. When fewer samples than `out.len()` are held, the front is
    /// padded with silence.
    pub fn fill_time_domain(&self, out: &mut [u8]) {
        let capacity = self.buffer.len();
        let take = self.filled.min(out.len());
        let pad = out.len() - take;
        for slot in out[..pad].iter_mut() {
            *slot = SILENCE_BYTE;
        }
        // Index of the oldest of the `take` newest samples
        let start = (self.write_index + capacity - take) % capacity;
        for (i, slot) in out[pad..].iter_mut().enumerate() {
            *slot = amplitude_byte(self.buffer[(start + i) % capacity]);
        }
    }
}
