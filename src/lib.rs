// Sensor Monitor - serial strip-chart utility
//
// Reads newline-delimited integer samples from a serial device on a
// background thread, keeps a rolling window of the most recent readings,
// and renders the latest value and a strip-chart in an egui window with
// threshold-based coloring.

pub mod app;
pub mod buffer;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod reader;
pub mod source;
pub mod threshold;

// Re-exports for convenience
pub use app::MonitorApp;
pub use buffer::SampleBuffer;
pub use config::AppConfig;
pub use context::MonitorContext;
pub use display::{DisplayAdapter, DisplayState};
pub use error::SourceError;
pub use reader::{ReaderHandle, SampleReader, StatsSnapshot};
pub use source::{parse_sample_line, SampleSource, ScriptedSource, SerialLineSource};
pub use threshold::ThresholdPolicy;
