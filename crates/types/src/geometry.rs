/// Points per millimetre. Layout works in millimetres, PDF user space in points.
pub const MM_TO_PT: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Scales uniformly so that the height equals `height`.
    pub fn with_height(self, height: f32) -> Self {
        if self.height <= 0.0 {
            return Self::new(0.0, height);
        }
        let scale = height / self.height;
        Self::new(self.width * scale, height)
    }

    /// Scales down uniformly until the size fits inside `bounds`.
    /// Sizes that already fit are returned unchanged.
    pub fn fit_within(self, bounds: Size) -> Self {
        if self.width <= bounds.width && self.height <= bounds.height {
            return self;
        }
        let scale = (bounds.width / self.width).min(bounds.height / self.height);
        Self::new(self.width * scale, self.height * scale)
    }

    /// Caps the height at `max_height`, preserving aspect ratio and rounding
    /// both dimensions to whole units.
    pub fn cap_height_rounded(self, max_height: f32) -> Self {
        if self.height <= max_height {
            return self;
        }
        let scale = max_height / self.height;
        Self::new(
            (self.width * scale).round(),
            (self.height * scale).round(),
        )
    }
}
