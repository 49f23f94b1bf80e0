use mathsheet_layout::PageGeometry;
use mathsheet_math::RenderPolicy;
use std::time::Duration;

pub const DEFAULT_ATTRIBUTION: &str = "Generated by Exercise Generator";
pub const DEFAULT_AUTHOR: &str = "Exercise Generator";
pub const DEFAULT_SPAN_TIMEOUT: Duration = Duration::from_secs(2);

/// Settings for one [`Exporter`](super::Exporter).
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub geometry: PageGeometry,
    pub policy: RenderPolicy,
    /// Upper bound on rendering a single math span. On expiry the span falls
    /// back to its textual placeholder.
    pub span_timeout: Duration,
    /// Footer text stamped on every page next to the page number.
    pub attribution: String,
    /// Author and creator written into the document information.
    pub author: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            policy: RenderPolicy::default(),
            span_timeout: DEFAULT_SPAN_TIMEOUT,
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}
