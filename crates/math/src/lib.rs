//! Math handling for exercise sheets.
//!
//! - [`extract`] finds `$..$`, `$$..$$`, `\(..\)` and `\[..\]` spans and swaps
//!   them for placeholders.
//! - [`substitute`] rewrites common LaTeX macros into readable Unicode.
//! - [`typeset`] and [`raster`] are the built-in vector and raster backends.
//! - [`render`] ties them together under a [`RenderPolicy`].

mod error;
pub mod extract;
pub mod raster;
pub mod render;
pub mod substitute;
pub mod typeset;

pub use error::MathError;
pub use extract::{ExtractedText, MathKind, MathSpan, extract_math};
pub use raster::ResvgRasterizer;
pub use render::{
    MathRenderer, RasterImage, RasterSource, Rasterizer, RenderPolicy, RenderedMathImage,
    TargetBox, Typesetter, VectorMarkup,
};
pub use substitute::latex_to_unicode;
pub use typeset::SvgTypesetter;
