//! Core rendering abstractions.
//!
//! - `DocumentRenderer` abstracts the backend that turns laid-out pages into bytes
//! - `RenderError` covers everything a backend can fail on
//! - `DocumentInfo` carries document metadata
//! - `utils` holds coordinate helpers shared by backends

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use traits::{DocumentRenderer, render_document};
pub use types::DocumentInfo;
