//! Buffer Analysis
//!
//! Statistics and frequency estimates for a buffer of unsigned 8-bit ADC
//! samples.
//!
//! ## Stages
//!
//! - **Levels**: raw min/max/mean, then RMS about the raw midpoint and
//!   standard deviation about the mean
//! - **Autocorrelation**: peak-detection state machine over successive lags
//! - **Transitions**: confirmed upward crossings of the raw midpoint
//!
//! ## Example
//!
//! ```rust
//! use adcscope::analysis::analyze;
//!
//! let samples: Vec<u8> = (0..200).map(|k| if k % 20 < 10 { 200 } else { 50 }).collect();
//! let result = analyze(2.0, 5.0, &samples).unwrap();
//! assert_eq!(result.max, 200);
//! println!("{}", result.to_text());
//! ```

pub mod analyzer;
pub mod peak;
pub mod report;
pub mod transition;

pub use analyzer::{analyze, AnalysisResult, FULL_SCALE};
pub use peak::{autocorrelation_frequency, PeakState};
pub use transition::{count_transitions, TransitionCount, MIN_SAMPLES};
