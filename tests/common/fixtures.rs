//! Stub math capabilities and exercise set builders.

use mathsheet::{
    Exercise, ExerciseSet, MathError, RasterImage, RasterSource, Rasterizer, TargetBox, Typesetter, VectorMarkup,
};
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

pub fn exercise_set(title: &str, texts: &[&str]) -> ExerciseSet {
    ExerciseSet::new(
        title,
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Exercise::new(i as i64 + 1, *text))
            .collect(),
    )
}

/// A solid black PNG of the given pixel size.
pub fn black_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width.max(1), height.max(1), image::Rgb([0, 0, 0]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encoding an in-memory PNG");
    out.into_inner()
}

/// Produces fixed markup, or fails when `available` is false.
pub struct StubTypesetter {
    pub available: bool,
}

impl Default for StubTypesetter {
    fn default() -> Self {
        Self { available: true }
    }
}

impl Typesetter for StubTypesetter {
    fn typeset(&self, latex: &str, display: bool) -> Result<VectorMarkup, MathError> {
        if !self.available {
            return Err(MathError::Typeset("no typesetter".into()));
        }
        let height = if display { 18.0 } else { 14.0 };
        Ok(VectorMarkup {
            svg: format!("<svg><text>{latex}</text></svg>"),
            width: latex.chars().count() as f32 * 8.0,
            height,
        })
    }
}

/// Draws a black box sized from the source. Sources whose text equals one
/// of `fail_on` are rejected.
#[derive(Default)]
pub struct BoxRasterizer {
    pub fail_on: Vec<String>,
    pub seen: Mutex<Vec<RasterSource>>,
}

impl BoxRasterizer {
    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            fail_on: texts.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Rasterizer for BoxRasterizer {
    fn rasterize(&self, source: &RasterSource, target: TargetBox) -> Result<RasterImage, MathError> {
        self.seen.lock().unwrap().push(source.clone());
        let (width, height) = match source {
            RasterSource::Text { text, font_size } => {
                if self.fail_on.iter().any(|f| f == text) {
                    return Err(MathError::Raster(format!("refusing '{text}'")));
                }
                (text.chars().count() as f32 * font_size * 0.5 + 4.0, font_size + 4.0)
            }
            RasterSource::Markup(markup) => {
                let scale = (target.max_height / markup.height).min(target.max_scale);
                (markup.width * scale, markup.height * scale)
            }
        };
        Ok(RasterImage {
            png: black_png(width.ceil() as u32, height.ceil() as u32),
            width,
            height,
        })
    }
}

/// Sleeps before delegating to a [`BoxRasterizer`].
pub struct SlowRasterizer {
    pub delay: Duration,
    pub inner: BoxRasterizer,
}

impl Rasterizer for SlowRasterizer {
    fn rasterize(&self, source: &RasterSource, target: TargetBox) -> Result<RasterImage, MathError> {
        std::thread::sleep(self.delay);
        self.inner.rasterize(source, target)
    }
}

/// Panics on every call, like a backend with an internal bug.
pub struct PanickingRasterizer;

impl Rasterizer for PanickingRasterizer {
    fn rasterize(&self, _source: &RasterSource, _target: TargetBox) -> Result<RasterImage, MathError> {
        panic!("rasterizer backend failed");
    }
}
