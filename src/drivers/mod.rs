// src/drivers/mod.rs
pub mod buffer;
pub mod error;
pub mod pipeline;
pub mod serial;
pub mod source;
pub use buffer::{CaptureBuffer, SampleFrame};
pub use error::{InvalidInput, ScopeError};
pub use pipeline::AcquisitionPipeline;
pub use serial::SerialSource;
pub use source::{ManualSource, SampleBatch, SampleSource, SimulatedSource};
