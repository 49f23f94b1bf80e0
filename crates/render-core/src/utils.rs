use mathsheet_types::geometry::mm_to_pt;

/// Convert a layout Y coordinate (millimetres from the top) to PDF user
/// space (points from the bottom).
pub fn flip_y(y_mm: f32, page_height_mm: f32) -> f32 {
    mm_to_pt(page_height_mm - y_mm)
}
