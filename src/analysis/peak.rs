//! Autocorrelation peak detection.
//!
//! The buffer is correlated against lagged copies of itself, centred on the
//! nominal mid-scale value of 128. Lags are visited in order and each sum is
//! compared with the previous one:
//!
//! - lag 0 fixes the threshold at half the zero-lag energy,
//! - the first lag whose sum is above the threshold and still rising arms the
//!   detector,
//! - the first armed lag whose sum stops rising is taken as the period.
//!
//! Every lag costs a pass over the overlapping part of the buffer, so the scan
//! is O(n²) in the buffer length. On constrained targets keep buffers to a few
//! hundred samples.

/// Raw value treated as zero by the correlation.
pub const CORRELATION_CENTRE: i32 = 128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PeakState {
    /// Nothing seen yet.
    Init,
    /// Waiting for a rising sum above `threshold`.
    SeekingRise { threshold: f32 },
    /// Armed; waiting for the sum to stop rising.
    SeekingPeak { threshold: f32 },
    /// Period found. Terminal.
    Found { period: usize },
}

impl PeakState {
    /// Advances the machine with the correlation sum at `lag`.
    pub fn step(self, lag: usize, sum: f32, previous: f32) -> Self {
        match self {
            PeakState::Init => PeakState::SeekingRise {
                threshold: 0.5 * sum,
            },
            PeakState::SeekingRise { threshold } if sum > threshold && sum - previous > 0.0 => {
                PeakState::SeekingPeak { threshold }
            }
            PeakState::SeekingPeak { .. } if sum - previous <= 0.0 => {
                PeakState::Found { period: lag }
            }
            other => other,
        }
    }

    pub fn period(&self) -> Option<usize> {
        match *self {
            PeakState::Found { period } => Some(period),
            _ => None,
        }
    }
}

/// Normalised autocorrelation sum of `samples` at `lag`.
pub fn correlation_at(samples: &[u8], lag: usize) -> f32 {
    if lag >= samples.len() {
        return 0.0;
    }
    let overlap = samples.len() - lag;
    let total: i64 = samples[..overlap]
        .iter()
        .zip(&samples[lag..])
        .map(|(&a, &b)| {
            let a = a as i32 - CORRELATION_CENTRE;
            let b = b as i32 - CORRELATION_CENTRE;
            (a * b) as i64
        })
        .sum();
    total as f32 / 256.0
}

/// Returns the detected period in samples, if any.
pub fn detect_period(samples: &[u8]) -> Option<usize> {
    let mut state = PeakState::Init;
    let mut previous = 0.0f32;
    for lag in 0..samples.len() {
        let sum = correlation_at(samples, lag);
        state = state.step(lag, sum, previous);
        if let Some(period) = state.period() {
            return Some(period);
        }
        previous = sum;
    }
    None
}

/// Frequency in Hz from the autocorrelation period.
pub fn autocorrelation_frequency(samples: &[u8], sample_rate_khz: f32) -> Option<f32> {
    let period = detect_period(samples)?;
    // A period of zero cannot come out of the state machine: lag 0 only sets the threshold.
    Some(sample_rate_khz * 1000.0 / period as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    fn sine(period: f32, len: usize) -> Vec<u8> {
        (0..len)
            .map(|k| (128.0 + 100.0 * (2.0 * PI * k as f32 / period).sin()).round() as u8)
            .collect()
    }
    #[test]
    fn zero_lag_sets_half_threshold() {
        let state = PeakState::Init.step(0, 80.0, 0.0);
        assert_eq!(state, PeakState::SeekingRise { threshold: 40.0 });
    }
    #[test]
    fn arms_only_when_rising_above_threshold() {
        let seeking = PeakState::SeekingRise { threshold: 40.0 };
        // above threshold but falling
        assert_eq!(seeking.step(3, 50.0, 60.0), seeking);
        // rising but below threshold
        assert_eq!(seeking.step(3, 30.0, 10.0), seeking);
        assert_eq!(
            seeking.step(3, 45.0, 30.0),
            PeakState::SeekingPeak { threshold: 40.0 }
        );
    }
    #[test]
    fn flat_sum_counts_as_peak() {
        let armed = PeakState::SeekingPeak { threshold: 1.0 };
        assert_eq!(armed.step(7, 5.0, 5.0), PeakState::Found { period: 7 });
        assert_eq!(armed.step(7, 6.0, 5.0), armed);
    }
    #[test]
    fn found_is_terminal() {
        let found = PeakState::Found { period: 12 };
        assert_eq!(found.step(30, 0.0, 100.0), found);
        assert_eq!(found.step(31, 100.0, 0.0), found);
    }
    #[test]
    fn correlation_at_zero_lag_is_energy_about_centre() {
        let samples = [128u8, 144, 112];
        // (0 + 256 + 256) / 256
        assert_eq!(correlation_at(&samples, 0), 2.0);
        assert_eq!(correlation_at(&samples, 2), 0.0);
        assert_eq!(correlation_at(&samples, 3), 0.0);
    }
    #[test]
    fn sine_period_is_found_one_lag_after_peak() {
        let samples = sine(40.0, 400);
        assert_eq!(detect_period(&samples), Some(41));
        let freq = autocorrelation_frequency(&samples, 10.0).unwrap();
        assert!((freq - 250.0).abs() / 250.0 < 0.05, "freq {freq}");
    }
    #[test]
    fn constant_and_ramp_have_no_period() {
        assert_eq!(detect_period(&[77u8; 64]), None);
        assert_eq!(detect_period(&[128u8; 64]), None);
        let ramp: Vec<u8> = (0..=255).collect();
        assert_eq!(detect_period(&ramp), None);
    }
    #[test]
    fn single_sample_has_no_period() {
        assert_eq!(detect_period(&[200]), None);
    }
    #[test]
    fn threshold_keeps_its_fraction() {
        // S(0) = 13.13 and S(2) = 6.27: above a truncated threshold of 6,
        // below the exact 6.56, so lag 2 never arms the detector
        let samples = [
            112u8, 138, 117, 121, 117, 126, 108, 129, 105, 143, 105, 122, 123, 150, 144, 143,
        ];
        let zero = correlation_at(&samples, 0);
        assert!((zero - 13.128906).abs() < 1e-4);
        assert_eq!(
            PeakState::Init.step(0, zero, 0.0),
            PeakState::SeekingRise { threshold: 0.5 * zero }
        );
        assert!(correlation_at(&samples, 2) < 0.5 * zero);
        assert_eq!(detect_period(&samples), None);
    }
}
