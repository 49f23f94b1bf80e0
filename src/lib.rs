//! Exports exercise sets with embedded LaTeX to paginated PDF documents.
//!
//! ```no_run
//! use mathsheet::{Exercise, ExerciseSet, ExporterBuilder};
//!
//! # async fn run() -> Result<(), mathsheet::ExportError> {
//! let exporter = ExporterBuilder::new().build()?;
//! let set = ExerciseSet::new("Algebra", vec![Exercise::new(1, "Solve $x^2 = 4$.")]);
//! let path = exporter.export_to_dir(&set, "out").await?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exporter;
pub mod input;
pub mod naming;

pub use error::ExportError;
pub use exporter::{ExportConfig, ExportedDocument, Exporter, ExporterBuilder};
pub use input::{parse_exercise_set, read_exercise_set};
pub use naming::{file_name, file_stem};

pub use mathsheet_layout::{FontMetrics, MonospaceMetrics, PageGeometry, StandardFontMetrics};
pub use mathsheet_math::{
    MathError, RasterImage, RasterSource, Rasterizer, RenderPolicy, ResvgRasterizer, SvgTypesetter, TargetBox,
    Typesetter, VectorMarkup,
};
pub use mathsheet_types::{Exercise, ExerciseSet};
