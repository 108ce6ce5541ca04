// src/lib.rs

pub mod analysis;
pub mod config;
pub mod drivers;
pub mod format;
pub mod graph;

pub use analysis::{analyze, AnalysisResult};
pub use config::{AcquisitionConfig, ConnectionMode};
pub use drivers::{AcquisitionPipeline, InvalidInput, ScopeError};
pub use format::pad;
pub use graph::{render, write_graph, GraphScale};
