use super::config::ExportConfig;
use crate::error::ExportError;
use crate::naming::file_name;
use mathsheet_layout::{LaidOutDocument, LayoutEngine, PreparedExercise};
use mathsheet_math::{MathError, MathRenderer, MathSpan, RenderedMathImage, extract_math};
use mathsheet_render_core::DocumentInfo;
use mathsheet_render_lopdf::LopdfRenderer;
use mathsheet_types::{Exercise, ExerciseSet};
use std::any::Any;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::time::timeout;

/// A finished export held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// Suggested file name, derived from the title.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Turns exercise sets into PDF documents. Build one with
/// [`ExporterBuilder`](super::ExporterBuilder).
#[derive(Debug, Clone)]
pub struct Exporter {
    renderer: MathRenderer,
    layout: LayoutEngine,
    config: ExportConfig,
}

impl Exporter {
    pub(super) fn new(renderer: MathRenderer, layout: LayoutEngine, config: ExportConfig) -> Self {
        Self {
            renderer,
            layout,
            config,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Renders `set` to PDF bytes.
    ///
    /// Math spans are rendered one at a time in source order. A span that
    /// fails or exceeds the configured timeout is written as
    /// `[Math Expression n]` instead of an image.
    pub async fn export(&self, set: &ExerciseSet) -> Result<ExportedDocument, ExportError> {
        let start = Instant::now();
        let document = self.lay_out(set).await?;

        let info = DocumentInfo::exercise_set(&set.title, &self.config.author);
        let bytes = LopdfRenderer::new().render(&document, &info)?;

        log::info!(
            "Exported '{}': {} exercises, {} pages, {} math images, {} bytes in {:.2?}",
            set.title,
            set.exercises.len(),
            document.page_count(),
            document.image_count(),
            bytes.len(),
            start.elapsed()
        );

        Ok(ExportedDocument {
            file_name: file_name(&set.title),
            bytes,
            page_count: document.page_count(),
        })
    }

    /// Runs math rendering and layout without producing PDF bytes.
    pub async fn lay_out(&self, set: &ExerciseSet) -> Result<LaidOutDocument, ExportError> {
        let mut prepared = Vec::with_capacity(set.exercises.len());
        for exercise in &set.exercises {
            prepared.push(self.prepare(exercise).await?);
        }
        Ok(self.layout.layout(&set.title, &prepared, &self.config.attribution)?)
    }

    /// Exports `set` and writes it into `dir` under its derived file name.
    ///
    /// The bytes go to a temporary file in `dir` that is renamed into place,
    /// so a failed export leaves nothing behind.
    pub async fn export_to_dir(&self, set: &ExerciseSet, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let document = self.export(set).await?;
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let target = dir.join(&document.file_name);
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&document.bytes)?;
        file.flush()?;
        file.persist(&target)?;

        log::info!("Wrote {}", target.display());
        Ok(target)
    }

    /// Blocking wrapper around [`Exporter::export`] for synchronous callers.
    ///
    /// Must not be called from within a tokio runtime. Renders abandoned
    /// after a timeout are left running in the background; the call returns
    /// without waiting for them.
    pub fn export_blocking(&self, set: &ExerciseSet) -> Result<ExportedDocument, ExportError> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let result = runtime.block_on(self.export(set));
        runtime.shutdown_background();
        result
    }

    async fn prepare(&self, exercise: &Exercise) -> Result<PreparedExercise, ExportError> {
        let extracted = extract_math(&exercise.text);
        let mut images: Vec<RenderedMathImage> = Vec::with_capacity(extracted.spans.len());

        for (index, span) in extracted.spans.iter().enumerate() {
            match self.render_span(span.clone(), index).await? {
                Ok(image) => {
                    log::debug!(
                        "Rendered math expression {} of exercise {} at {:.1}x{:.1}",
                        index + 1,
                        exercise.id,
                        image.width,
                        image.height
                    );
                    images.push(image);
                }
                Err(e) => log::warn!(
                    "Math expression {} of exercise {} ('{}') falls back to text: {}",
                    index + 1,
                    exercise.id,
                    span.latex,
                    e
                ),
            }
        }

        let text = extracted.resolve(|i| images.iter().any(|image| image.span_index == i));
        Ok(PreparedExercise { text, images })
    }

    /// Renders one span on the blocking pool. The outer error is fatal, the
    /// inner one only costs this span its image. A panicking backend counts
    /// as a failed render.
    async fn render_span(
        &self,
        span: MathSpan,
        index: usize,
    ) -> Result<Result<RenderedMathImage, MathError>, ExportError> {
        let renderer = self.renderer.clone();
        let task = tokio::task::spawn_blocking(move || renderer.render(&span, index));
        match timeout(self.config.span_timeout, task).await {
            Ok(Ok(rendered)) => Ok(rendered),
            Ok(Err(e)) if e.is_panic() => Ok(Err(MathError::Panicked(panic_message(e.into_panic())))),
            Ok(Err(e)) => Err(e.into()),
            // The blocking task keeps running to completion; its result is dropped.
            Err(_) => Ok(Err(MathError::TimedOut(self.config.span_timeout))),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
