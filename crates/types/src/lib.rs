pub mod color;
pub mod exercise;
pub mod geometry;

pub use color::Color;
pub use exercise::{Exercise, ExerciseSet};
pub use geometry::{MM_TO_PT, Size, mm_to_pt};
