//! The export pipeline: math extraction and rendering, layout, PDF output.

mod builder;
mod config;
mod orchestrator;

pub use builder::ExporterBuilder;
pub use config::{DEFAULT_ATTRIBUTION, DEFAULT_AUTHOR, DEFAULT_SPAN_TIMEOUT, ExportConfig};
pub use orchestrator::{ExportedDocument, Exporter};
