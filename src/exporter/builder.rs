use super::config::ExportConfig;
use super::orchestrator::Exporter;
use crate::error::ExportError;
use mathsheet_layout::{FontMetrics, LayoutEngine, PageGeometry, StandardFontMetrics};
use mathsheet_math::{MathRenderer, Rasterizer, RenderPolicy, ResvgRasterizer, SvgTypesetter, Typesetter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A builder for creating an [`Exporter`].
pub struct ExporterBuilder {
    config: ExportConfig,
    typesetter: Option<Arc<dyn Typesetter>>,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    metrics: Option<Arc<dyn FontMetrics>>,
    system_fonts: bool,
    font_dirs: Vec<PathBuf>,
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self {
            config: ExportConfig::default(),
            typesetter: None,
            rasterizer: None,
            metrics: None,
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl ExporterBuilder {
    /// Creates a builder with default settings. The built-in rasterizer uses
    /// the system's fonts unless told otherwise.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces every setting at once.
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn with_policy(mut self, policy: RenderPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn with_span_timeout(mut self, timeout: Duration) -> Self {
        self.config.span_timeout = timeout;
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.config.attribution = attribution.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.config.author = author.into();
        self
    }

    pub fn with_typesetter(mut self, typesetter: Arc<dyn Typesetter>) -> Self {
        self.typesetter = Some(typesetter);
        self
    }

    /// Replaces the built-in `resvg` rasterizer. Font settings are ignored
    /// when a custom rasterizer is given.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    /// Metrics used for wrapping body text. Defaults to Helvetica.
    pub fn with_font_metrics(mut self, metrics: Arc<dyn FontMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_system_fonts(mut self, system_fonts: bool) -> Self {
        self.system_fonts = system_fonts;
        self
    }

    /// Scans a directory for font files used when rasterizing math.
    pub fn with_font_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.font_dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Consumes the builder and creates the [`Exporter`].
    pub fn build(self) -> Result<Exporter, ExportError> {
        if self.config.span_timeout.is_zero() {
            return Err(ExportError::Config("span timeout must be greater than zero".to_string()));
        }

        let typesetter = self.typesetter.unwrap_or_else(|| Arc::new(SvgTypesetter::default()));
        let rasterizer = match self.rasterizer {
            Some(rasterizer) => rasterizer,
            None => {
                let mut rasterizer = if self.system_fonts {
                    ResvgRasterizer::with_system_fonts()
                } else {
                    ResvgRasterizer::default()
                };
                for dir in &self.font_dirs {
                    rasterizer = rasterizer.with_font_dir(dir);
                }
                Arc::new(rasterizer)
            }
        };
        let metrics = self.metrics.unwrap_or_else(|| Arc::new(StandardFontMetrics));

        let renderer = MathRenderer::new(typesetter, rasterizer).with_policy(self.config.policy);
        let layout = LayoutEngine::new(self.config.geometry.clone(), metrics);
        Ok(Exporter::new(renderer, layout, self.config))
    }
}
