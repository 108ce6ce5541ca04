use log::debug;
use serde::Serialize;
use crate::analysis::peak::autocorrelation_frequency;
use crate::analysis::transition::transition_frequency;
use crate::drivers::error::{check_parameters, InvalidInput, ScopeError};
/// Full-scale raw value; `reference_voltage` corresponds to it.
pub const FULL_SCALE: f32 = 255.0;
/// Summary of one analysed buffer. Built fresh on every call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Largest raw sample.
    pub max: u8,
    /// Smallest raw sample.
    pub min: u8,
    /// Mean sample value in volts.
    pub average: f32,
    /// `max - min` in volts.
    pub range: f32,
    /// RMS deviation from the raw midpoint `(max + min) / 2`, in volts.
    pub rms: f32,
    /// Standard deviation about the raw mean, in raw sample units (not volts).
    pub stddev: f32,
    /// Frequency in Hz from autocorrelation peak detection.
    pub freq_autocorr: Option<f32>,
    /// Frequency in Hz from mid-level transition counting.
    pub freq_transition: Option<f32>,
    pub sample_count: usize,
    pub sample_rate_khz: f32,
    pub reference_voltage: f32,
}
impl AnalysisResult {
    /// Volts per raw unit.
    pub fn conversion(&self) -> f32 {
        self.reference_voltage / FULL_SCALE
    }
    /// Raw midpoint `(max + min) / 2`.
    pub fn midpoint(&self) -> f32 {
        raw_midpoint(self.min, self.max)
    }
    pub fn min_volts(&self) -> f32 {
        self.min as f32 * self.conversion()
    }
    pub fn max_volts(&self) -> f32 {
        self.max as f32 * self.conversion()
    }
    /// `stddev` scaled to volts. The field itself stays raw.
    pub fn stddev_volts(&self) -> f32 {
        self.stddev * self.conversion()
    }
    pub fn duration_seconds(&self) -> f32 {
        self.sample_count as f32 / (self.sample_rate_khz * 1000.0)
    }
}
/// Raw extremes and mean from the first pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes {
    pub min: u8,
    pub max: u8,
    pub mean: f32,
}
fn raw_midpoint(min: u8, max: u8) -> f32 {
    (min as f32 + max as f32) / 2.0
}
/// Single scan for min, max and mean. `samples` must be non-empty.
pub fn extremes(samples: &[u8]) -> Extremes {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &sample in samples {
        min = min.min(sample);
        max = max.max(sample);
        sum += sample as u64;
    }
    Extremes {
        min,
        max,
        mean: sum as f32 / samples.len() as f32,
    }
}
/// Second scan: raw RMS about `midpoint` and raw standard deviation about `mean`.
pub fn dispersion(samples: &[u8], midpoint: f32, mean: f32) -> (f32, f32) {
    let mut rms_acc = 0.0f32;
    let mut dev_acc = 0.0f32;
    for &sample in samples {
        let item = sample as f32;
        rms_acc += (item - midpoint) * (item - midpoint);
        dev_acc += (mean - item) * (mean - item);
    }
    let n = samples.len() as f32;
    ((rms_acc / n).sqrt(), (dev_acc / n).sqrt())
}
/// Analyses one buffer of 8-bit samples.
///
/// `sample_rate_khz` must be positive and `reference_voltage` zero or
/// positive; a zero reference gives zero for every voltage output. The
/// autocorrelation stage is O(n²) in the buffer length. Buffers shorter than
/// [`MIN_SAMPLES`](crate::analysis::transition::MIN_SAMPLES) are analysed but
/// never yield a transition frequency.
pub fn analyze(
    sample_rate_khz: f32,
    reference_voltage: f32,
    samples: &[u8],
) -> Result<AnalysisResult, ScopeError> {
    check_parameters(sample_rate_khz, reference_voltage)?;
    if samples.is_empty() {
        return Err(InvalidInput::EmptyBuffer.into());
    }
    let convert = reference_voltage / FULL_SCALE;
    let Extremes { min, max, mean } = extremes(samples);
    let midpoint = raw_midpoint(min, max);
    let (rms_raw, stddev) = dispersion(samples, midpoint, mean);
    let freq_autocorr = autocorrelation_frequency(samples, sample_rate_khz);
    let freq_transition = transition_frequency(samples, midpoint, sample_rate_khz);
    debug!(
        "analysed {} samples: min={min} max={max} autocorr={freq_autocorr:?} transition={freq_transition:?}",
        samples.len()
    );
    Ok(AnalysisResult {
        max,
        min,
        average: mean * convert,
        range: (max - min) as f32 * convert,
        rms: rms_raw * convert,
        stddev,
        freq_autocorr,
        freq_transition,
        sample_count: samples.len(),
        sample_rate_khz,
        reference_voltage,
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::PI;
    fn sine(period: f32, len: usize, amplitude: f32) -> Vec<u8> {
        (0..len)
            .map(|k| (128.0 + amplitude * (2.0 * PI * k as f32 / period).sin()).round() as u8)
            .collect()
    }
    fn within(actual: Option<f32>, expected: f32, tolerance: f32) -> bool {
        actual.map_or(false, |f| (f - expected).abs() / expected <= tolerance)
    }
    #[test]
    fn rejects_bad_input() {
        let err = analyze(1.0, 5.0, &[]).unwrap_err();
        assert!(matches!(err, ScopeError::InvalidInput(InvalidInput::EmptyBuffer)));
        let err = analyze(0.0, 5.0, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ScopeError::InvalidInput(InvalidInput::SampleRate(_))));
        let err = analyze(-4.0, 5.0, &[1, 2, 3]).unwrap_err();
        assert!(err.is_invalid_input());
        let err = analyze(1.0, -1.0, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ScopeError::InvalidInput(InvalidInput::ReferenceVoltage(_))));
    }
    #[test]
    fn constant_buffer_has_no_spread_or_frequency() {
        let result = analyze(2.0, 5.0, &[90u8; 128]).unwrap();
        assert_eq!(result.min, 90);
        assert_eq!(result.max, 90);
        assert_eq!(result.rms, 0.0);
        assert_eq!(result.stddev, 0.0);
        assert_eq!(result.range, 0.0);
        assert_eq!(result.freq_autocorr, None);
        assert_eq!(result.freq_transition, None);
    }
    #[test]
    fn full_scale_ramp() {
        let ramp: Vec<u8> = (0..=255).collect();
        let result = analyze(1.0, 5.0, &ramp).unwrap();
        assert_eq!(result.min, 0);
        assert_eq!(result.max, 255);
        assert!((result.average - 2.5).abs() < 1e-4);
        assert!((result.range - 5.0).abs() < 1e-4);
        assert_eq!(result.freq_autocorr, None);
        assert_eq!(result.freq_transition, None);
    }
    #[test]
    fn alternating_extremes() {
        let samples: Vec<u8> = (0..100).map(|k| if k % 2 == 0 { 0 } else { 255 }).collect();
        let result = analyze(10.0, 3.3, &samples).unwrap();
        // every sample sits on an extreme, so both spreads are half the range
        assert!((result.rms - 1.65).abs() < 1e-4);
        assert!((result.stddev - 127.5).abs() < 1e-3);
        // the lag-1 sum is negative and lag 2 is the first rise above threshold
        assert_eq!(result.freq_autocorr.map(|f| f.round()), Some(3333.0));
        // each confirmation window averages exactly the midpoint, which is not above it
        assert_eq!(result.freq_transition, None);
    }
    #[test]
    fn sine_frequencies_agree() {
        // 250 Hz at 10 kHz: 40 samples per period
        let result = analyze(10.0, 5.0, &sine(40.0, 400, 100.0)).unwrap();
        assert!(within(result.freq_autocorr, 250.0, 0.05), "{:?}", result.freq_autocorr);
        assert!(within(result.freq_transition, 250.0, 0.05), "{:?}", result.freq_transition);
        assert_eq!(result.max, 228);
        assert_eq!(result.min, 28);
        assert!((result.rms - 70.7 * 5.0 / 255.0).abs() < 0.02);
    }
    #[test]
    fn noisy_sine_stays_within_tolerance() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<u8> = (0..400)
            .map(|k| {
                let clean = 128.0 + 90.0 * (2.0 * PI * k as f32 / 40.0).sin();
                (clean + rng.gen_range(-4.0..4.0)).round().clamp(0.0, 255.0) as u8
            })
            .collect();
        let result = analyze(10.0, 5.0, &samples).unwrap();
        assert!(within(result.freq_autocorr, 250.0, 0.05), "{:?}", result.freq_autocorr);
        assert!(within(result.freq_transition, 250.0, 0.05), "{:?}", result.freq_transition);
    }
    #[test]
    fn average_lies_between_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let len = rng.gen_range(1..200);
            let samples: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let result = analyze(1.0, 3.3, &samples).unwrap();
            assert!(result.min <= result.max);
            assert!(result.average >= result.min_volts() - 1e-5);
            assert!(result.average <= result.max_volts() + 1e-5);
        }
    }
    #[test]
    fn zero_reference_zeroes_voltages() {
        let result = analyze(1.0, 0.0, &sine(20.0, 100, 80.0)).unwrap();
        assert_eq!(result.average, 0.0);
        assert_eq!(result.range, 0.0);
        assert_eq!(result.rms, 0.0);
        assert!(result.stddev > 0.0);
    }
    #[test]
    fn stddev_stays_raw() {
        let samples = [100u8, 200, 100, 200];
        let result = analyze(1.0, 5.1, &samples).unwrap();
        assert_eq!(result.stddev, 50.0);
        assert!((result.stddev_volts() - 1.0).abs() < 1e-5);
    }
    #[test]
    fn repeated_calls_are_identical() {
        let samples = sine(25.0, 300, 60.0);
        let first = analyze(8.0, 3.3, &samples).unwrap();
        let second = analyze(8.0, 3.3, &samples).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.average.to_bits(), second.average.to_bits());
    }
    #[test]
    fn tiny_buffers_are_analysed() {
        let result = analyze(1.0, 5.0, &[10]).unwrap();
        assert_eq!((result.min, result.max), (10, 10));
        assert_eq!(result.freq_transition, None);
        let result = analyze(1.0, 5.0, &[0, 255, 0, 255, 0]).unwrap();
        assert_eq!(result.freq_transition, None);
    }
}
