use std::io::{ErrorKind, Read};
use std::time::Duration;
use log::{debug, warn};
use serialport::SerialPort;
use crate::config::SerialConfig;
use crate::drivers::{SampleBatch, SampleSource, ScopeError};
/// Reads raw bytes from a serial link, one byte per sample.
///
/// A read timeout is retried; only `max_timeouts` timeouts in a row end the
/// session.
pub struct SerialSource<R: Read = Box<dyn SerialPort>> {
    port: R,
    sample_rate_khz: f32,
    max_timeouts: u32,
    chunk: Vec<u8>,
}
impl SerialSource {
    pub fn open(config: &SerialConfig, sample_rate_khz: f32, chunk_len: usize) -> Result<Self, ScopeError> {
        let port = serialport::new(config.port.as_str(), config.baud_rate)
            .timeout(Duration::from_millis(config.timeout_ms))
            .open()?;
        debug!("opened {} at {} baud", config.port, config.baud_rate);
        Ok(Self::from_port(port, sample_rate_khz, chunk_len, config.max_timeouts))
    }
}
impl<R: Read> SerialSource<R> {
    pub fn from_port(port: R, sample_rate_khz: f32, chunk_len: usize, max_timeouts: u32) -> Self {
        Self {
            port,
            sample_rate_khz,
            max_timeouts,
            chunk: vec![0; chunk_len.max(1)],
        }
    }
}
impl<R: Read> SampleSource for SerialSource<R> {
    fn next_batch(&mut self) -> Result<Option<SampleBatch>, ScopeError> {
        let mut timeouts = 0;
        loop {
            match self.port.read(&mut self.chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    return Ok(Some(SampleBatch::new(
                        self.sample_rate_khz,
                        self.chunk[..n].to_vec(),
                    )))
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    timeouts += 1;
                    if timeouts > self.max_timeouts {
                        warn!("serial link silent after {timeouts} timeouts");
                        return Ok(None);
                    }
                    warn!("serial read timed out ({timeouts}/{})", self.max_timeouts);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}
