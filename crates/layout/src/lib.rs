//! Layout of exercise sheets: word wrapping, inline and display math
//! placement, and pagination into positioned elements.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}

pub mod algorithms;
pub mod config;
mod elements;
pub(crate) mod engine;
pub mod fonts;
pub mod output;
pub mod text;

pub use self::config::PageGeometry;
pub use self::elements::{ImageElement, LayoutElement, PositionedElement, RuleElement, TextElement};
pub use self::engine::{LayoutCursor, LayoutEngine, PreparedExercise};
pub use self::fonts::{FontFace, FontMetrics, MonospaceMetrics, StandardFontMetrics};
pub use self::output::LaidOutDocument;
