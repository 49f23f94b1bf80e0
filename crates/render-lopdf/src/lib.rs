//! PDF output for laid-out exercise sheets using lopdf.
//!
//! Text is set in the standard Helvetica faces, math images are embedded as
//! Flate-compressed RGB image XObjects.

mod encoding;
mod renderer;

pub use encoding::{text_string, to_win_ansi};
pub use renderer::LopdfRenderer;
