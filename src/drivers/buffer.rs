use std::collections::VecDeque;
use crate::drivers::{InvalidInput, SampleBatch, ScopeError};
/// Immutable snapshot of a filled capture buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleFrame {
    pub sample_rate_khz: f32,
    pub samples: Vec<u8>,
}
/// Fixed-length rolling buffer of raw samples.
///
/// Keeps the newest `capacity` samples and counts how many arrived since the
/// last [`take_frame`](CaptureBuffer::take_frame), so every frame handed out
/// is made of samples no earlier frame contained.
pub struct CaptureBuffer {
    samples: VecDeque<u8>,
    sample_rate_khz: f32,
    capacity: usize,
    fresh: usize,
}
impl CaptureBuffer {
    pub fn with_capacity(sample_rate_khz: f32, capacity: usize) -> Result<Self, ScopeError> {
        if !(sample_rate_khz.is_finite() && sample_rate_khz > 0.0) {
            return Err(InvalidInput::SampleRate(sample_rate_khz).into());
        }
        if capacity == 0 {
            return Err(InvalidInput::EmptyBuffer.into());
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            sample_rate_khz,
            capacity,
            fresh: 0,
        })
    }
    /// True once `capacity` samples arrived since the last frame.
    pub fn is_ready(&self) -> bool {
        self.fresh >= self.capacity
    }
    pub fn push_batch(&mut self, batch: &SampleBatch) -> Result<(), ScopeError> {
        batch.validate()?;
        if batch.sample_rate_khz != self.sample_rate_khz {
            return Err(ScopeError::SampleRateMismatch {
                expected: self.sample_rate_khz,
                actual: batch.sample_rate_khz,
            });
        }
        for &sample in &batch.samples {
            if self.samples.len() == self.capacity {
                self.samples.pop_front();
            }
            self.samples.push_back(sample);
        }
        self.fresh = (self.fresh + batch.samples.len()).min(self.capacity);
        Ok(())
    }
    /// Current contents regardless of freshness.
    pub fn snapshot(&self) -> SampleFrame {
        SampleFrame {
            sample_rate_khz: self.sample_rate_khz,
            samples: self.samples.iter().copied().collect(),
        }
    }
    /// Hands out a full frame of fresh samples, if one is ready.
    pub fn take_frame(&mut self) -> Option<SampleFrame> {
        if !self.is_ready() {
            return None;
        }
        self.fresh = 0;
        Some(self.snapshot())
    }
}
