/// Outcome of checking whether content fits above a page limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Checks whether `height` more units fit below `cursor_y` without crossing `limit`.
pub fn check_fit(cursor_y: f32, height: f32, limit: f32) -> BreakAnalysis {
    let available = (limit - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: cursor_y + height > limit + EPSILON,
        remaining_height: available,
    }
}
