//! Capability traits for math rendering and the policy that combines them.

use crate::error::MathError;
use crate::extract::{MathKind, MathSpan};
use crate::substitute::latex_to_unicode;
use mathsheet_types::Size;
use std::sync::Arc;

/// Vector output of a [`Typesetter`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMarkup {
    pub svg: String,
    pub width: f32,
    pub height: f32,
}

/// What a [`Rasterizer`] is asked to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterSource {
    Markup(VectorMarkup),
    /// Plain text drawn at `font_size` logical units.
    Text { text: String, font_size: f32 },
}

/// Size limits for rasterized markup. Text sources are sized by their font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBox {
    pub max_width: f32,
    pub max_height: f32,
    /// Upper bound on the scale applied to the markup's intrinsic size.
    pub max_scale: f32,
}

impl TargetBox {
    /// Limits for math set within a line of text.
    pub const INLINE: TargetBox = TargetBox {
        max_width: 60.0,
        max_height: 8.0,
        max_scale: 1.5,
    };

    /// Limits for math set as its own block.
    pub const DISPLAY: TargetBox = TargetBox {
        max_width: 120.0,
        max_height: 18.0,
        max_scale: 1.5,
    };
}

impl Default for TargetBox {
    fn default() -> Self {
        Self::INLINE
    }
}

/// Encoded image plus its logical size.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width: f32,
    pub height: f32,
}

/// Converts LaTeX to vector markup.
pub trait Typesetter: Send + Sync {
    fn typeset(&self, latex: &str, display: bool) -> Result<VectorMarkup, MathError>;
}

/// Converts markup or fallback text to a raster image.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, source: &RasterSource, target: TargetBox) -> Result<RasterImage, MathError>;
}

/// Which rendering result becomes the embedded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Typeset first, then always rasterize the Unicode text fallback and use
    /// that. The typeset result is only logged.
    #[default]
    TextFallback,
    /// Rasterize the typeset markup when it is available, otherwise fall back
    /// to the text rasterization.
    PreferVector,
}

/// The image produced for one math span.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMathImage {
    pub png: Vec<u8>,
    pub width: f32,
    pub height: f32,
    pub kind: MathKind,
    pub latex: String,
    /// Position of the span in extraction order.
    pub span_index: usize,
}

impl RenderedMathImage {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Font size of the text fallback, in logical units.
fn fallback_font_size(kind: MathKind) -> f32 {
    match kind {
        MathKind::Inline => 14.0,
        MathKind::Display => 18.0,
    }
}

/// Inline images taller than this are scaled down before layout.
pub const INLINE_HEIGHT_CAP: f32 = 8.0;

/// Renders math spans through a [`Typesetter`] and a [`Rasterizer`].
///
/// Cheap to clone; the backends are shared.
#[derive(Clone)]
pub struct MathRenderer {
    typesetter: Arc<dyn Typesetter>,
    rasterizer: Arc<dyn Rasterizer>,
    policy: RenderPolicy,
    inline_target: TargetBox,
    display_target: TargetBox,
}

impl MathRenderer {
    pub fn new(typesetter: Arc<dyn Typesetter>, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            typesetter,
            rasterizer,
            policy: RenderPolicy::default(),
            inline_target: TargetBox::INLINE,
            display_target: TargetBox::DISPLAY,
        }
    }

    pub fn with_policy(mut self, policy: RenderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Overrides the size limits used for spans of `kind`.
    pub fn with_target(mut self, kind: MathKind, target: TargetBox) -> Self {
        match kind {
            MathKind::Inline => self.inline_target = target,
            MathKind::Display => self.display_target = target,
        }
        self
    }

    fn target(&self, kind: MathKind) -> TargetBox {
        match kind {
            MathKind::Inline => self.inline_target,
            MathKind::Display => self.display_target,
        }
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Renders one span. Any error means the span gets no image.
    pub fn render(&self, span: &MathSpan, span_index: usize) -> Result<RenderedMathImage, MathError> {
        let typeset = self.typesetter.typeset(&span.latex, span.kind.is_display());
        match &typeset {
            Ok(markup) => log::debug!(
                "Typeset '{}' to {:.1}x{:.1} markup",
                span.latex,
                markup.width,
                markup.height
            ),
            Err(e) => log::debug!("Typesetting '{}' failed: {}", span.latex, e),
        }

        let image = match (self.policy, typeset) {
            (RenderPolicy::PreferVector, Ok(markup)) => {
                match self.rasterizer.rasterize(&RasterSource::Markup(markup), self.target(span.kind)) {
                    Ok(image) => image,
                    Err(e) => {
                        log::debug!("Vector rasterization of '{}' failed: {}", span.latex, e);
                        self.rasterize_text(span)?
                    }
                }
            }
            _ => self.rasterize_text(span)?,
        };

        let mut size = Size::new(image.width, image.height);
        if span.kind == MathKind::Inline {
            size = size.cap_height_rounded(INLINE_HEIGHT_CAP);
        }
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(MathError::EmptyRaster);
        }

        Ok(RenderedMathImage {
            png: image.png,
            width: size.width,
            height: size.height,
            kind: span.kind,
            latex: span.latex.clone(),
            span_index,
        })
    }

    fn rasterize_text(&self, span: &MathSpan) -> Result<RasterImage, MathError> {
        let text = latex_to_unicode(&span.latex);
        log::debug!("Text fallback for '{}': '{}'", span.latex, text);
        let source = RasterSource::Text {
            text,
            font_size: fallback_font_size(span.kind),
        };
        self.rasterizer.rasterize(&source, self.target(span.kind))
    }
}

impl std::fmt::Debug for MathRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MathRenderer")
            .field("policy", &self.policy)
            .field("inline_target", &self.inline_target)
            .field("display_target", &self.display_target)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_math;
    use std::sync::Mutex;

    struct FixedTypesetter(bool);

    impl Typesetter for FixedTypesetter {
        fn typeset(&self, latex: &str, _display: bool) -> Result<VectorMarkup, MathError> {
            if self.0 {
                Ok(VectorMarkup {
                    svg: format!("<svg>{latex}</svg>"),
                    width: 10.0,
                    height: 4.0,
                })
            } else {
                Err(MathError::Typeset("unavailable".into()))
            }
        }
    }

    #[derive(Default)]
    struct RecordingRasterizer {
        seen: Mutex<Vec<RasterSource>>,
        targets: Mutex<Vec<TargetBox>>,
    }

    impl Rasterizer for RecordingRasterizer {
        fn rasterize(&self, source: &RasterSource, target: TargetBox) -> Result<RasterImage, MathError> {
            self.seen.lock().unwrap().push(source.clone());
            self.targets.lock().unwrap().push(target);
            Ok(RasterImage {
                png: vec![1, 2, 3],
                width: 36.0,
                height: 18.0,
            })
        }
    }

    fn span(text: &str) -> MathSpan {
        extract_math(text).spans.remove(0)
    }

    #[test]
    fn text_fallback_wins_even_when_typesetting_succeeds() {
        let _ = env_logger::builder().is_test(true).try_init();
        let rasterizer = Arc::new(RecordingRasterizer::default());
        let renderer = MathRenderer::new(Arc::new(FixedTypesetter(true)), rasterizer.clone());
        renderer.render(&span(r"$\frac{1}{2}$"), 0).unwrap();

        let seen = rasterizer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            RasterSource::Text {
                text: "(1)/(2)".into(),
                font_size: 14.0
            }
        );
    }

    #[test]
    fn prefer_vector_uses_markup() {
        let rasterizer = Arc::new(RecordingRasterizer::default());
        let renderer = MathRenderer::new(Arc::new(FixedTypesetter(true)), rasterizer.clone())
            .with_policy(RenderPolicy::PreferVector);
        renderer.render(&span("$$x$$"), 0).unwrap();
        assert!(matches!(rasterizer.seen.lock().unwrap()[0], RasterSource::Markup(_)));
    }

    #[test]
    fn vector_targets_follow_span_kind() {
        let rasterizer = Arc::new(RecordingRasterizer::default());
        let renderer = MathRenderer::new(Arc::new(FixedTypesetter(true)), rasterizer.clone())
            .with_policy(RenderPolicy::PreferVector);
        renderer.render(&span("$$x$$"), 0).unwrap();
        renderer.render(&span("$y$"), 1).unwrap();

        let targets = rasterizer.targets.lock().unwrap();
        assert_eq!(targets[0], TargetBox::DISPLAY);
        assert_eq!((targets[0].max_width, targets[0].max_height), (120.0, 18.0));
        assert_eq!(targets[1], TargetBox::INLINE);
    }

    #[test]
    fn custom_target_replaces_one_kind() {
        let rasterizer = Arc::new(RecordingRasterizer::default());
        let wide = TargetBox {
            max_width: 150.0,
            ..TargetBox::DISPLAY
        };
        let renderer = MathRenderer::new(Arc::new(FixedTypesetter(true)), rasterizer.clone())
            .with_policy(RenderPolicy::PreferVector)
            .with_target(MathKind::Display, wide);
        renderer.render(&span("$$x$$"), 0).unwrap();
        renderer.render(&span("$y$"), 1).unwrap();

        let targets = rasterizer.targets.lock().unwrap();
        assert_eq!(*targets, vec![wide, TargetBox::INLINE]);
    }

    #[test]
    fn prefer_vector_falls_back_to_text() {
        let rasterizer = Arc::new(RecordingRasterizer::default());
        let renderer = MathRenderer::new(Arc::new(FixedTypesetter(false)), rasterizer.clone())
            .with_policy(RenderPolicy::PreferVector);
        renderer.render(&span("$$x$$"), 0).unwrap();
        assert!(matches!(
            rasterizer.seen.lock().unwrap()[0],
            RasterSource::Text { font_size, .. } if font_size == 18.0
        ));
    }

    #[test]
    fn inline_images_are_capped() {
        let renderer = MathRenderer::new(
            Arc::new(FixedTypesetter(true)),
            Arc::new(RecordingRasterizer::default()),
        );
        let inline = renderer.render(&span("$x$"), 3).unwrap();
        assert_eq!((inline.width, inline.height), (16.0, 8.0));
        assert_eq!(inline.span_index, 3);

        let display = renderer.render(&span("$$x$$"), 0).unwrap();
        assert_eq!((display.width, display.height), (36.0, 18.0));
    }
}
