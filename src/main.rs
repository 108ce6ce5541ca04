// src/main.rs
use std::io::{self, Write};
use std::path::PathBuf;

use adcscope::config::AxisScale;
use adcscope::drivers::{AcquisitionPipeline, SampleSource, SerialSource, SimulatedSource};
use adcscope::graph::write_frame;
use adcscope::{AcquisitionConfig, ConnectionMode};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "adcscope")]
#[command(version, about = "Analyse and graph buffers of 8-bit ADC samples", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Acquire from hardware (serial) instead of the simulator
    #[arg(long)]
    hardware: bool,

    /// Serial port name
    #[arg(long)]
    port: Option<String>,

    /// Serial baud rate
    #[arg(long)]
    baud: Option<u32>,

    /// Sampling frequency in kHz
    #[arg(long)]
    rate: Option<f32>,

    /// Reference voltage for a raw sample of 255
    #[arg(long)]
    vref: Option<f32>,

    /// Samples per analysed buffer
    #[arg(long)]
    len: Option<usize>,

    /// Number of buffers to capture
    #[arg(short = 'n', long, default_value = "1")]
    captures: usize,

    /// Draw the text graph after each report
    #[arg(short, long)]
    graph: bool,

    /// Label the graph axis with raw values instead of volts
    #[arg(long)]
    raw_scale: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,
}

impl Cli {
    fn resolve_config(&self) -> Result<AcquisitionConfig> {
        let mut config = match &self.config {
            Some(path) => AcquisitionConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => AcquisitionConfig::default(),
        };
        if self.hardware {
            config.mode = ConnectionMode::Hardware;
        }
        if let Some(port) = &self.port {
            config.serial.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.serial.baud_rate = baud;
        }
        if let Some(rate) = self.rate {
            config.sample_rate_khz = rate;
        }
        if let Some(vref) = self.vref {
            config.reference_voltage = vref;
        }
        if let Some(len) = self.len {
            config.buffer_len = len;
        }
        if self.graph {
            config.graph.enabled = true;
        }
        if self.raw_scale {
            config.graph.scale = AxisScale::Raw;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn run<S: SampleSource>(
    source: S,
    config: &AcquisitionConfig,
    captures: usize,
    format: ReportFormat,
) -> Result<()> {
    let mut pipeline = AcquisitionPipeline::new(
        source,
        config.sample_rate_khz,
        config.reference_voltage,
        config.buffer_len,
    )?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for capture in 0..captures {
        let Some((frame, result)) = pipeline
            .capture_and_analyze()
            .with_context(|| format!("capture {} failed", capture + 1))?
        else {
            warn!("source ran dry after {capture} capture(s)");
            break;
        };
        match format {
            ReportFormat::Text => writeln!(out, "{}", result.to_text())?,
            ReportFormat::Json => writeln!(out, "{}", result.to_json()?)?,
        }
        if config.graph.enabled {
            write_frame(&mut out, &frame, config.graph_scale())?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    info!(
        "{:?} mode, {} kHz, {} V reference, {} samples per buffer",
        config.mode, config.sample_rate_khz, config.reference_voltage, config.buffer_len
    );
    match config.mode {
        ConnectionMode::Simulation => {
            let source = SimulatedSource::new(
                config.simulation.clone(),
                config.sample_rate_khz,
                config.buffer_len,
            );
            run(source, &config, cli.captures, cli.format)
        }
        ConnectionMode::Hardware => {
            let source = SerialSource::open(&config.serial, config.sample_rate_khz, config.buffer_len)
                .with_context(|| format!("failed to open serial port {}", config.serial.port))?;
            run(source, &config, cli.captures, cli.format)
        }
    }
}
