use std::collections::VecDeque;
use std::f32::consts::PI;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::analysis::FULL_SCALE;
use crate::config::SimulationConfig;
use crate::drivers::ScopeError;
/// Chunk of raw 8-bit samples as delivered by a source.
#[derive(Clone, Debug)]
pub struct SampleBatch {
    pub sample_rate_khz: f32,
    pub samples: Vec<u8>,
}
impl SampleBatch {
    pub fn new(sample_rate_khz: f32, samples: Vec<u8>) -> Self {
        Self {
            sample_rate_khz,
            samples,
        }
    }
    pub fn validate(&self) -> Result<(), ScopeError> {
        if !(self.sample_rate_khz.is_finite() && self.sample_rate_khz > 0.0) {
            return Err(crate::drivers::InvalidInput::SampleRate(self.sample_rate_khz).into());
        }
        Ok(())
    }
}
/// Trait representing something that can yield sample batches on demand.
///
/// `Ok(None)` means the source is exhausted.
pub trait SampleSource {
    fn next_batch(&mut self) -> Result<Option<SampleBatch>, ScopeError>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<SampleBatch>,
}
impl ManualSource {
    pub fn new(batches: impl IntoIterator<Item = SampleBatch>) -> Self {
        Self {
            queue: batches.into_iter().collect(),
        }
    }
    /// Splits one long recording into batches of `chunk` samples.
    pub fn from_samples(sample_rate_khz: f32, samples: &[u8], chunk: usize) -> Self {
        Self::new(
            samples
                .chunks(chunk.max(1))
                .map(|c| SampleBatch::new(sample_rate_khz, c.to_vec())),
        )
    }
}
impl SampleSource for ManualSource {
    fn next_batch(&mut self) -> Result<Option<SampleBatch>, ScopeError> {
        Ok(self.queue.pop_front())
    }
}
/// Noisy sine generator standing in for an ADC.
pub struct SimulatedSource {
    config: SimulationConfig,
    sample_rate_khz: f32,
    batch_len: usize,
    phase: f32,
    rng: StdRng,
}
impl SimulatedSource {
    pub fn new(config: SimulationConfig, sample_rate_khz: f32, batch_len: usize) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            sample_rate_khz,
            batch_len: batch_len.max(1),
            phase: 0.0,
            rng,
        }
    }
    fn next_sample(&mut self) -> u8 {
        let clean = self.config.offset + self.config.amplitude * self.phase.sin();
        // NaN clamps to NaN and fails the check below
        let span = self.config.noise.clamp(0.0, FULL_SCALE);
        let noise = if span > 0.0 {
            self.rng.gen_range(-span..span)
        } else {
            0.0
        };
        let step = 2.0 * PI * self.config.frequency_hz / (self.sample_rate_khz * 1000.0);
        self.phase = (self.phase + step) % (2.0 * PI);
        (clean + noise).round().clamp(0.0, 255.0) as u8
    }
}
impl SampleSource for SimulatedSource {
    fn next_batch(&mut self) -> Result<Option<SampleBatch>, ScopeError> {
        let samples: Vec<u8> = (0..self.batch_len).map(|_| self.next_sample()).collect();
        trace!("simulated batch of {} samples", samples.len());
        Ok(Some(SampleBatch::new(self.sample_rate_khz, samples)))
    }
}
