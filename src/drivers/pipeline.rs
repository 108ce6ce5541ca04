use log::{debug, trace};
use crate::analysis::{analyze, AnalysisResult};
use crate::drivers::error::{check_parameters, ScopeError};
use crate::drivers::source::SampleSource;
use crate::drivers::{CaptureBuffer, SampleFrame};
/// Acquisition loop: fills the capture buffer from a source and analyses each
/// full frame.
pub struct AcquisitionPipeline<S: SampleSource> {
    source: S,
    buffer: CaptureBuffer,
    reference_voltage: f32,
    latest: Option<(SampleFrame, AnalysisResult)>,
}
impl<S: SampleSource> AcquisitionPipeline<S> {
    pub fn new(
        source: S,
        sample_rate_khz: f32,
        reference_voltage: f32,
        buffer_len: usize,
    ) -> Result<Self, ScopeError> {
        check_parameters(sample_rate_khz, reference_voltage)?;
        Ok(Self {
            source,
            buffer: CaptureBuffer::with_capacity(sample_rate_khz, buffer_len)?,
            reference_voltage,
            latest: None,
        })
    }
    /// Pumps the source until a full frame is ready. `Ok(None)` when the
    /// source runs dry first.
    pub fn capture(&mut self) -> Result<Option<SampleFrame>, ScopeError> {
        loop {
            if let Some(frame) = self.buffer.take_frame() {
                debug!("captured frame of {} samples", frame.samples.len());
                return Ok(Some(frame));
            }
            let Some(batch) = self.source.next_batch()? else {
                return Ok(None);
            };
            trace!("batch of {} samples", batch.samples.len());
            self.buffer.push_batch(&batch)?;
        }
    }
    pub fn capture_and_analyze(
        &mut self,
    ) -> Result<Option<(SampleFrame, AnalysisResult)>, ScopeError> {
        let Some(frame) = self.capture()? else {
            return Ok(None);
        };
        let result = analyze(frame.sample_rate_khz, self.reference_voltage, &frame.samples)?;
        self.latest = Some((frame.clone(), result));
        Ok(Some((frame, result)))
    }
    pub fn latest_frame(&self) -> Result<&SampleFrame, ScopeError> {
        self.latest
            .as_ref()
            .map(|(frame, _)| frame)
            .ok_or(ScopeError::BufferUninitialized)
    }
    pub fn latest_analysis(&self) -> Result<AnalysisResult, ScopeError> {
        self.latest
            .as_ref()
            .map(|(_, result)| *result)
            .ok_or(ScopeError::BufferUninitialized)
    }
}
