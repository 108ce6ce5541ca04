//! Mid-level transition counting.
//!
//! Upward crossings of the raw midpoint are confirmed by the mean of the six
//! samples that follow the crossing sample, which rejects noise spikes that
//! cross and immediately fall back. Once a crossing is confirmed the cursor
//! jumps past the rising edge so the same edge is not counted twice.

/// Samples at the end of the buffer the scan never starts from.
pub const LOOKAHEAD: usize = 9;
/// Buffers shorter than this never produce a transition estimate.
pub const MIN_SAMPLES: usize = LOOKAHEAD + 1;
const CONFIRM_START: usize = 2;
const CONFIRM_LEN: usize = 6;
const SKIP_AFTER_CONFIRM: usize = 7;

/// Outcome of a transition scan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransitionCount {
    /// Index of the first confirmed crossing sample.
    pub first: Option<usize>,
    /// Full periods seen between confirmed crossings.
    pub waves: u32,
    /// Sum of the periods, in samples.
    pub period_sum: usize,
}

impl TransitionCount {
    pub fn frequency(&self, sample_rate_khz: f32) -> Option<f32> {
        if self.waves == 0 {
            return None;
        }
        let interval = 1.0 / (sample_rate_khz * 1000.0);
        Some(self.waves as f32 / (interval * self.period_sum as f32))
    }
}

/// Scans `samples` for confirmed upward crossings of `midpoint`.
pub fn count_transitions(samples: &[u8], midpoint: f32) -> TransitionCount {
    let mut count = TransitionCount::default();
    if samples.len() < MIN_SAMPLES {
        return count;
    }
    let end = samples.len() - LOOKAHEAD;
    let mut previous: Option<usize> = None;
    let mut i = 0;
    while i < end {
        if (samples[i] as f32) < midpoint && samples[i + 1] as f32 >= midpoint {
            let window = &samples[i + CONFIRM_START..i + CONFIRM_START + CONFIRM_LEN];
            let total: u32 = window.iter().map(|&s| s as u32).sum();
            if total as f32 / CONFIRM_LEN as f32 > midpoint {
                let crossing = i + 1;
                match previous {
                    None => count.first = Some(crossing),
                    Some(last) => {
                        count.waves += 1;
                        count.period_sum += crossing - last;
                    }
                }
                previous = Some(crossing);
                i += SKIP_AFTER_CONFIRM;
            }
        }
        i += 1;
    }
    count
}

/// Frequency in Hz from mid-level transitions.
pub fn transition_frequency(samples: &[u8], midpoint: f32, sample_rate_khz: f32) -> Option<f32> {
    count_transitions(samples, midpoint).frequency(sample_rate_khz)
}
