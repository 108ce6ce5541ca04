use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::analysis::FULL_SCALE;
use crate::drivers::ScopeError;
use crate::graph::GraphScale;
/// Where samples come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    #[default]
    Simulation,
    Hardware,
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    /// Read timeouts in a row tolerated before the link counts as dry.
    pub max_timeouts: u32,
}
impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 115_200,
            timeout_ms: 1000,
            max_timeouts: 3,
        }
    }
}
/// Parameters of the simulated input signal, in raw sample units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub frequency_hz: f32,
    pub amplitude: f32,
    pub offset: f32,
    /// Peak uniform noise added to each sample.
    pub noise: f32,
    pub seed: Option<u64>,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 250.0,
            amplitude: 100.0,
            offset: 128.0,
            noise: 4.0,
            seed: None,
        }
    }
}
impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ScopeError> {
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(ScopeError::Config(format!(
                "simulation.frequency_hz must be positive, got {}",
                self.frequency_hz
            )));
        }
        if !(self.amplitude.is_finite() && self.offset.is_finite()) {
            return Err(ScopeError::Config(
                "simulation.amplitude and simulation.offset must be finite".into(),
            ));
        }
        if !(0.0..=FULL_SCALE).contains(&self.noise) {
            return Err(ScopeError::Config(format!(
                "simulation.noise must be within 0..={FULL_SCALE}, got {}",
                self.noise
            )));
        }
        Ok(())
    }
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Raw,
    #[default]
    Volts,
}
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub enabled: bool,
    pub scale: AxisScale,
}
/// Everything one acquisition run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub sample_rate_khz: f32,
    pub reference_voltage: f32,
    pub buffer_len: usize,
    pub mode: ConnectionMode,
    pub serial: SerialConfig,
    pub simulation: SimulationConfig,
    pub graph: GraphConfig,
}
impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_rate_khz: 10.0,
            reference_voltage: 5.0,
            buffer_len: 256,
            mode: ConnectionMode::default(),
            serial: SerialConfig::default(),
            simulation: SimulationConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}
impl AcquisitionConfig {
    pub fn from_json(text: &str) -> Result<Self, ScopeError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScopeError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
    pub fn validate(&self) -> Result<(), ScopeError> {
        if !(self.sample_rate_khz.is_finite() && self.sample_rate_khz > 0.0) {
            return Err(ScopeError::Config(format!(
                "sample_rate_khz must be positive, got {}",
                self.sample_rate_khz
            )));
        }
        if !(self.reference_voltage.is_finite() && self.reference_voltage >= 0.0) {
            return Err(ScopeError::Config(format!(
                "reference_voltage must be zero or positive, got {}",
                self.reference_voltage
            )));
        }
        if self.buffer_len == 0 {
            return Err(ScopeError::Config("buffer_len must be at least 1".into()));
        }
        if self.mode == ConnectionMode::Simulation {
            self.simulation.validate()?;
        }
        Ok(())
    }
    /// Axis scale for the graph. A zero reference always falls back to raw.
    pub fn graph_scale(&self) -> GraphScale {
        match self.graph.scale {
            AxisScale::Raw => GraphScale::Raw,
            AxisScale::Volts => GraphScale::from_reference(self.reference_voltage),
        }
    }
}
