/// Logical surface size in CSS-like pixels, before the pixel-density scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Device pixel size for the given density factor.
    #[must_use]
    pub fn device_size(self, scale: f64) -> (u32, u32) {
        (
            scale_dimension(self.width, scale),
            scale_dimension(self.height, scale),
        )
    }
}

fn scale_dimension(logical: u32, scale: f64) -> u32 {
    // Float-to-int `as` saturates, so oversized products clamp to u32::MAX.
    (f64::from(logical) * scale).round() as u32
}
