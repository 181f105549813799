use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::render::{Color, TextHAlign};

/// Horizontal placement of a column's header and cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Center,
    #[default]
    Right,
}

impl From<ColumnAlign> for TextHAlign {
    fn from(align: ColumnAlign) -> Self {
        match align {
            ColumnAlign::Left => Self::Left,
            ColumnAlign::Center => Self::Center,
            ColumnAlign::Right => Self::Right,
        }
    }
}

/// One ladder column with its color already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub title: String,
    pub key: String,
    pub width: u32,
    pub align: ColumnAlign,
    pub color: Color,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        key: impl Into<String>,
        width: u32,
        align: ColumnAlign,
        color: Color,
    ) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            width,
            align,
            color,
        }
    }
}

/// Value range mapped onto the bar fill fraction. Always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl DataRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// One explicit gradient stop. `position` is not validated; it is clamped
/// when the stop is turned into a draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
    pub opacity: f64,
}

/// Background bar fill.
#[derive(Debug, Clone, PartialEq)]
pub enum BarColor {
    /// Single color painted with an opacity taper across the bar.
    Flat(Color),
    /// Ordered multi-stop gradient across the bar.
    Gradient(SmallVec<[GradientStop; 4]>),
}

/// Row overlay styling carried for the hover collaborator. Paint never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverStyle {
    pub background_color: String,
    pub transition: String,
}

impl Default for HoverStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(255, 255, 255, 0.05)".to_owned(),
            transition: "background-color 0.1s ease".to_owned(),
        }
    }
}

/// Frozen, validated ladder configuration shared by the coordinator and the
/// render worker for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderConfig {
    pub rows: u32,
    pub columns: Vec<ColumnSpec>,
    pub data_range: DataRange,
    pub bar_color: BarColor,
    pub bar_opacity: f64,
    pub show_bg_bar: bool,
    pub bg_color: Color,
    pub text_color: Color,
    pub font_family: String,
    pub font_size: f64,
    pub row_height: u32,
    pub row_gap: u32,
    pub scale: f64,
    pub hover_style: HoverStyle,
}

impl LadderConfig {
    /// Column whose value drives the background bar.
    #[must_use]
    pub fn primary_column(&self) -> Option<&ColumnSpec> {
        self.columns.first()
    }

    /// Font size in device pixels, rounded to whole pixels.
    #[must_use]
    pub fn scaled_font_size(&self) -> f64 {
        (self.font_size * self.scale).round()
    }
}
