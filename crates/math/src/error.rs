use std::time::Duration;
use thiserror::Error;

/// Failure to turn one math span into an image.
///
/// These never abort an export; the span falls back to a textual placeholder.
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Typesetting failed: {0}")]
    Typeset(String),
    #[error("Rasterization failed: {0}")]
    Raster(String),
    #[error("Rasterization produced no drawable content")]
    EmptyRaster,
    #[error("SVG parsing failed: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("Rendering timed out after {0:?}")]
    TimedOut(Duration),
    #[error("Rendering panicked: {0}")]
    Panicked(String),
}
