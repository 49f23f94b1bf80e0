//! Rasterization through `resvg`.
//!
//! Text fallbacks are wrapped in a minimal SVG document so that both kinds of
//! [`RasterSource`] go through the same parse-and-render path. Every surface
//! created here is owned by the call and dropped on all exit paths.

use crate::error::MathError;
use crate::render::{RasterImage, RasterSource, Rasterizer, TargetBox, VectorMarkup};
use crate::typeset::escape_xml;
use resvg::{tiny_skia, usvg};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
    font_family: String,
    /// Device pixels per logical unit.
    device_scale: f32,
    /// Logical padding around text fallbacks.
    padding: f32,
}

impl std::fmt::Debug for ResvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResvgRasterizer")
            .field("faces", &self.fontdb.len())
            .field("font_family", &self.font_family)
            .field("device_scale", &self.device_scale)
            .finish()
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::with_database(fontdb::Database::new())
    }
}

impl ResvgRasterizer {
    /// A rasterizer that draws with the fonts installed on this system.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces for math rendering", db.len());
        Self::with_database(db)
    }

    pub fn with_database(db: fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(db),
            font_family: "serif".to_string(),
            device_scale: 2.0,
            padding: 2.0,
        }
    }

    /// Adds every font file found in `dir`.
    pub fn with_font_dir(mut self, dir: impl AsRef<Path>) -> Self {
        Arc::make_mut(&mut self.fontdb).load_fonts_dir(dir);
        self
    }

    /// Adds a font from raw TrueType/OpenType bytes.
    pub fn with_font_data(mut self, data: Vec<u8>) -> Self {
        Arc::make_mut(&mut self.fontdb).load_font_data(data);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    fn options(&self) -> usvg::Options<'static> {
        let mut options = usvg::Options::default();
        options.fontdb = self.fontdb.clone();
        options.font_family = self.font_family.clone();
        options
    }

    /// Wraps `text` in an SVG document. The viewport allows a full em per
    /// character; the surface is shrunk to the drawn glyphs afterwards.
    fn text_document(&self, text: &str, font_size: f32) -> String {
        let width = (text.chars().count() as f32 * font_size).max(20.0) + self.padding * 2.0;
        let height = font_size + self.padding * 2.0;
        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
                "<text x=\"{x}\" y=\"{y}\" font-family=\"{family}\" font-size=\"{size}\" fill=\"black\">{text}</text>",
                "</svg>"
            ),
            w = width,
            h = height,
            x = self.padding,
            y = self.padding + font_size * 0.8,
            family = escape_xml(&self.font_family),
            size = font_size,
            text = escape_xml(text),
        )
    }

    fn rasterize_text(&self, text: &str, font_size: f32) -> Result<RasterImage, MathError> {
        let tree = usvg::Tree::from_str(&self.text_document(text, font_size), &self.options())?;
        if !tree.root().has_children() {
            return Err(MathError::EmptyRaster);
        }

        // Shrink the surface to the drawn glyphs, like measuring the text first.
        let content_right = tree.root().bounding_box().right();
        let width = if content_right.is_finite() && content_right > 0.0 {
            content_right + self.padding
        } else {
            tree.size().width()
        };
        let height = font_size + self.padding * 2.0;
        self.draw(&tree, width, height, 1.0)
    }

    fn rasterize_markup(&self, markup: &VectorMarkup, target: TargetBox) -> Result<RasterImage, MathError> {
        let tree = usvg::Tree::from_str(&markup.svg, &self.options())?;
        let size = tree.size();
        let scale = (target.max_height / size.height())
            .min(target.max_width / size.width())
            .min(target.max_scale);
        let width = (size.width() * scale).round().max(1.0);
        let height = (size.height() * scale).round().max(1.0);
        self.draw(&tree, width, height, scale)
    }

    /// Draws `tree` onto a white surface of `width` x `height` logical units.
    fn draw(&self, tree: &usvg::Tree, width: f32, height: f32, scale: f32) -> Result<RasterImage, MathError> {
        let px_width = (width * self.device_scale).ceil() as u32;
        let px_height = (height * self.device_scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(px_width, px_height).ok_or_else(|| {
            MathError::Raster(format!("cannot allocate a {px_width}x{px_height} surface"))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = tiny_skia::Transform::from_scale(scale * self.device_scale, scale * self.device_scale);
        resvg::render(tree, transform, &mut pixmap.as_mut());

        let drawn = pixmap
            .pixels()
            .iter()
            .any(|p| p.red() < 250 || p.green() < 250 || p.blue() < 250);
        if !drawn {
            return Err(MathError::EmptyRaster);
        }

        let png = pixmap
            .encode_png()
            .map_err(|e| MathError::Raster(e.to_string()))?;
        Ok(RasterImage { png, width, height })
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, source: &RasterSource, target: TargetBox) -> Result<RasterImage, MathError> {
        match source {
            RasterSource::Text { text, font_size } => self.rasterize_text(text, *font_size),
            RasterSource::Markup(markup) => self.rasterize_markup(markup, target),
        }
    }
}
