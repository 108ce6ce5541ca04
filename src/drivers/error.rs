use thiserror::Error;
/// Rejection reasons for the arguments of a single analysis call.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidInput {
    #[error("sample buffer is empty")]
    EmptyBuffer,
    #[error("sample rate must be greater than zero, got {0} kHz")]
    SampleRate(f32),
    #[error("reference voltage must be zero or positive, got {0} V")]
    ReferenceVoltage(f32),
}
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("sample rate mismatch: expected {expected} kHz, got {actual} kHz")]
    SampleRateMismatch { expected: f32, actual: f32 },
    #[error("capture buffer not filled yet; capture at least one frame first")]
    BufferUninitialized,
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}
impl ScopeError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScopeError::InvalidInput(_))
    }
}
/// Checks the acquisition parameters shared by every analysis entry point.
pub fn check_parameters(sample_rate_khz: f32, reference_voltage: f32) -> Result<(), InvalidInput> {
    if !(sample_rate_khz.is_finite() && sample_rate_khz > 0.0) {
        return Err(InvalidInput::SampleRate(sample_rate_khz));
    }
    if !(reference_voltage.is_finite() && reference_voltage >= 0.0) {
        return Err(InvalidInput::ReferenceVoltage(reference_voltage));
    }
    Ok(())
}
