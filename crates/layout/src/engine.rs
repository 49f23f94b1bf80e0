use crate::algorithms::pagination::check_fit;
use crate::config::PageGeometry;
use crate::fonts::{FontFace, FontMetrics};
use crate::output::LaidOutDocument;
use crate::text::wrap_text;
use crate::{ImageElement, LayoutElement, LayoutError, PositionedElement, RuleElement, TextElement};
use mathsheet_math::{MathKind, RenderedMathImage};
use mathsheet_types::geometry::MM_TO_PT;
use mathsheet_types::{Color, Size};
use std::sync::Arc;

/// An exercise whose math spans have been rendered and whose placeholders
/// have been resolved.
#[derive(Debug, Clone, Default)]
pub struct PreparedExercise {
    pub text: String,
    pub images: Vec<RenderedMathImage>,
}

/// Where the next element goes. Moves forward through the whole document and
/// is never reset between exercises.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub y: f32,
    pub page_index: usize,
}

/// Collects pages, creating them on demand.
struct PageSink {
    pages: Vec<Vec<PositionedElement>>,
    cursor: LayoutCursor,
    top_margin: f32,
}

impl PageSink {
    fn new(start_y: f32, top_margin: f32) -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: LayoutCursor { y: start_y, page_index: 0 },
            top_margin,
        }
    }

    fn push(&mut self, element: PositionedElement) {
        self.pages[self.cursor.page_index].push(element);
    }

    fn break_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor.page_index += 1;
        self.cursor.y = self.top_margin;
        log::trace!("Started page {}", self.cursor.page_index + 1);
    }
}

/// Lays out exercise sheets.
#[derive(Clone)]
pub struct LayoutEngine {
    geometry: PageGeometry,
    metrics: Arc<dyn FontMetrics>,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine").field("geometry", &self.geometry).finish()
    }
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry, metrics: Arc<dyn FontMetrics>) -> Self {
        Self { geometry, metrics }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let g = &self.geometry;
        if g.content_width <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "content width must be positive, got {}",
                g.content_width
            )));
        }
        if g.line_height <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "line height must be positive, got {}",
                g.line_height
            )));
        }
        if g.bottom_limit <= g.top_margin {
            return Err(LayoutError::InvalidGeometry(format!(
                "bottom limit {} must lie below the top margin {}",
                g.bottom_limit, g.top_margin
            )));
        }
        Ok(())
    }

    fn text(&self, content: impl Into<String>, x: f32, y: f32, face: FontFace, size_pt: f32, color: Color) -> PositionedElement {
        let content = content.into();
        PositionedElement {
            x,
            y,
            width: self.metrics.text_width(&content, face, size_pt),
            height: size_pt / MM_TO_PT,
            element: LayoutElement::Text(TextElement {
                content,
                face,
                size_pt,
                color,
            }),
        }
    }

    fn image(image: &RenderedMathImage, x: f32, y: f32, size: Size) -> PositionedElement {
        PositionedElement {
            x,
            y,
            width: size.width,
            height: size.height,
            element: LayoutElement::Image(ImageElement {
                data: Arc::new(image.png.clone()),
                alt: image.latex.clone(),
            }),
        }
    }

    /// Lays out the title block and every exercise, then stamps
    /// `Page i of N` and `attribution` on each page.
    pub fn layout(
        &self,
        title: &str,
        exercises: &[PreparedExercise],
        attribution: &str,
    ) -> Result<LaidOutDocument, LayoutError> {
        self.validate()?;
        let g = &self.geometry;
        let mut sink = PageSink::new(g.body_start_y, g.top_margin);

        sink.push(self.text(title, g.left_margin, g.title_y, FontFace::Bold, g.title_size_pt, g.title_color));
        sink.push(PositionedElement {
            x: g.left_margin,
            y: g.title_rule_y,
            width: g.title_rule_end_x - g.left_margin,
            height: g.title_rule_width,
            element: LayoutElement::Rule(RuleElement {
                thickness: g.title_rule_width,
                color: g.title_rule_color,
            }),
        });

        for (index, exercise) in exercises.iter().enumerate() {
            self.layout_exercise(&mut sink, index, exercise);
        }

        let mut pages = sink.pages;
        self.stamp_footers(&mut pages, attribution);
        log::debug!("Laid out {} exercise(s) on {} page(s)", exercises.len(), pages.len());

        Ok(LaidOutDocument {
            title: title.to_string(),
            page_size: g.page_size,
            pages,
        })
    }

    fn layout_exercise(&self, sink: &mut PageSink, index: usize, exercise: &PreparedExercise) {
        let g = &self.geometry;

        if check_fit(sink.cursor.y, 0.0, g.exercise_break_y).should_break {
            sink.break_page();
        }

        let label = format!("{}.", index + 1);
        sink.push(self.text(label, g.left_margin, sink.cursor.y, FontFace::Bold, g.label_size_pt, g.label_color));

        let text_x = g.text_x();
        let measure = |s: &str| self.metrics.text_width(s, FontFace::Regular, g.text_size_pt);
        let mut lines = wrap_text(&exercise.text, g.content_width, measure);

        let inline: Vec<&RenderedMathImage> = exercise
            .images
            .iter()
            .filter(|img| img.kind == MathKind::Inline)
            .collect();
        if lines.is_empty() && !inline.is_empty() {
            lines.push(String::new());
        }

        for (line_index, line) in lines.iter().enumerate() {
            if line_index > 0 && check_fit(sink.cursor.y, 0.0, g.bottom_limit).should_break {
                sink.break_page();
            }
            let line_y = sink.cursor.y;
            let text = self.text(line.as_str(), text_x, line_y, FontFace::Regular, g.text_size_pt, g.text_color);
            let line_width = text.width;
            sink.push(text);

            // Inline math is only attached to the first wrapped line.
            if line_index == 0 {
                let mut x = text_x + line_width + g.inline_math_gap;
                for image in &inline {
                    let size = image.size().with_height(g.inline_math_height);
                    let y = line_y - size.height + g.inline_baseline_offset;
                    sink.push(Self::image(image, x, y, size));
                    x += size.width + g.inline_math_gap;
                }
            }

            sink.cursor.y += g.line_height;
        }

        for image in exercise.images.iter().filter(|img| img.kind == MathKind::Display) {
            let size = image.size().fit_within(g.max_display_math);
            if check_fit(sink.cursor.y, size.height, g.bottom_limit).should_break {
                sink.break_page();
            }
            let x = (g.page_size.width - size.width) / 2.0;
            sink.push(Self::image(image, x, sink.cursor.y, size));
            sink.cursor.y += size.height + g.display_math_gap;
        }

        sink.cursor.y += g.exercise_gap;
        log::trace!(
            "Exercise {} ends at y={:.1} on page {}",
            index + 1,
            sink.cursor.y,
            sink.cursor.page_index + 1
        );
    }

    fn stamp_footers(&self, pages: &mut [Vec<PositionedElement>], attribution: &str) {
        let g = &self.geometry;
        let total = pages.len();
        for (index, page) in pages.iter_mut().enumerate() {
            page.push(self.text(
                format!("Page {} of {}", index + 1, total),
                g.left_margin,
                g.footer_y,
                FontFace::Regular,
                g.footer_size_pt,
                g.footer_color,
            ));
            if !attribution.is_empty() {
                page.push(self.text(
                    attribution,
                    g.footer_attribution_x,
                    g.footer_y,
                    FontFace::Regular,
                    g.footer_size_pt,
                    g.footer_color,
                ));
            }
        }
    }
}
