use crate::core::{BarColor, DataRange};
use crate::render::{ColorStop, ColorStops, GradientRectPrimitive};

/// Opacity of a flat bar at its inner end, the edge farthest from the
/// surface's right border.
pub const FLAT_BAR_INNER_OPACITY: f64 = 0.9;

/// Normalized position of `value` inside `range`, clamped to [0, 1].
///
/// NaN values map to 0 so they never produce a bar.
#[must_use]
pub fn bar_fill_fraction(value: f64, range: DataRange) -> f64 {
    let fraction = (value - range.min) / range.span();
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

/// Right-anchored bar rectangle for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    /// Bar that grows leftwards from `surface_width`, vertically centered on
    /// `row_center_y`. Returns `None` for zero-width bars.
    #[must_use]
    pub fn for_row(
        fraction: f64,
        surface_width: f64,
        row_center_y: f64,
        row_height: f64,
    ) -> Option<Self> {
        let width = fraction * surface_width;
        if width.is_nan() || width <= 0.0 {
            return None;
        }
        Some(Self {
            x: surface_width - width,
            y: row_center_y - row_height / 2.0,
            width,
            height: row_height,
        })
    }

    #[must_use]
    pub fn into_primitive(self, stops: ColorStops) -> GradientRectPrimitive {
        GradientRectPrimitive::spanning(self.x, self.y, self.width, self.height, stops)
    }
}

/// Color stops for a bar fill.
///
/// Flat colors taper from [`FLAT_BAR_INNER_OPACITY`] at the inner end to
/// `bar_opacity` at the surface edge. Explicit stops keep a color's own
/// alpha when it is translucent and apply the stop opacity otherwise.
#[must_use]
pub fn bar_color_stops(bar_color: &BarColor, bar_opacity: f64) -> ColorStops {
    match bar_color {
        BarColor::Flat(color) => [
            ColorStop::new(0.0, color.with_alpha(FLAT_BAR_INNER_OPACITY)),
            ColorStop::new(1.0, color.with_alpha(bar_opacity)),
        ]
        .into_iter()
        .collect(),
        BarColor::Gradient(stops) => stops
            .iter()
            .map(|stop| {
                let color = if stop.color.is_opaque() {
                    stop.color.with_alpha(stop.opacity)
                } else {
                    stop.color
                };
                ColorStop::new(stop.position, color)
            })
            .collect(),
    }
}
