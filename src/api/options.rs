use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    BarColor, ColumnAlign, ColumnSpec, DataRange, GradientStop, HoverStyle, LadderConfig,
};
use crate::error::{LadderError, LadderResult};

use super::PlatformCapabilities;
use super::validation::{parse_config_color, validate_ladder_config};

pub const DEFAULT_ROWS: u32 = 20;
pub const DEFAULT_DATA_RANGE: (f64, f64) = (0.0, 100.0);
pub const DEFAULT_BG_COLOR: &str = "#000000";
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_BAR_COLOR: &str = "#333333";
pub const DEFAULT_BAR_OPACITY: f64 = 0.5;
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_ROW_GAP: u32 = 4;
pub const DEFAULT_ROW_HEIGHT: u32 = 20;
pub const DEFAULT_COLUMN_WIDTH: u32 = 100;

/// User-facing column description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOptions {
    pub title: String,
    pub key: String,
    pub width: u32,
    #[serde(default)]
    pub align: ColumnAlign,
    #[serde(default = "default_column_color")]
    pub color: String,
}

impl ColumnOptions {
    #[must_use]
    pub fn new(title: impl Into<String>, key: impl Into<String>, width: u32) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            width,
            align: ColumnAlign::default(),
            color: default_column_color(),
        }
    }

    #[must_use]
    pub fn with_align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// One explicit gradient stop as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStopOptions {
    pub position: f64,
    pub color: String,
    #[serde(default = "default_stop_opacity")]
    pub opacity: f64,
}

impl GradientStopOptions {
    #[must_use]
    pub fn new(position: f64, color: impl Into<String>, opacity: f64) -> Self {
        Self {
            position,
            color: color.into(),
            opacity,
        }
    }
}

/// Either a flat color string or `{ "stops": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarColorOptions {
    Flat(String),
    Gradient { stops: Vec<GradientStopOptions> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoverStyleOptions {
    pub background_color: Option<String>,
    pub transition: Option<String>,
}

/// Partial ladder configuration; every field left out takes its default.
///
/// JSON keys are camelCase (`rowHeight`, `dataRange`, `showBgBar`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LadderOptions {
    pub rows: Option<u32>,
    pub scale: Option<f64>,
    pub data_range: Option<(f64, f64)>,
    pub show_bg_bar: Option<bool>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub bar_color: Option<BarColorOptions>,
    pub bar_opacity: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub row_gap: Option<u32>,
    pub row_height: Option<u32>,
    pub columns: Option<Vec<ColumnOptions>>,
    pub hover_style: Option<HoverStyleOptions>,
}

impl LadderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> LadderResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| LadderError::InvalidConfig(format!("failed to parse options: {err}")))
    }

    #[must_use]
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_data_range(mut self, min: f64, max: f64) -> Self {
        self.data_range = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_show_bg_bar(mut self, show: bool) -> Self {
        self.show_bg_bar = Some(show);
        self
    }

    #[must_use]
    pub fn with_bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_flat_bar_color(mut self, color: impl Into<String>) -> Self {
        self.bar_color = Some(BarColorOptions::Flat(color.into()));
        self
    }

    #[must_use]
    pub fn with_gradient_bar(mut self, stops: Vec<GradientStopOptions>) -> Self {
        self.bar_color = Some(BarColorOptions::Gradient { stops });
        self
    }

    #[must_use]
    pub fn with_bar_opacity(mut self, opacity: f64) -> Self {
        self.bar_opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = Some(family.into());
        self.font_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_row_geometry(mut self, row_height: u32, row_gap: u32) -> Self {
        self.row_height = Some(row_height);
        self.row_gap = Some(row_gap);
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<ColumnOptions>) -> Self {
        self.columns = Some(columns);
        self
    }

    #[must_use]
    pub fn with_hover_style(mut self, hover_style: HoverStyleOptions) -> Self {
        self.hover_style = Some(hover_style);
        self
    }

    /// Merges these overrides onto the defaults, resolves colors and
    /// validates the result.
    pub fn normalize(&self, capabilities: &PlatformCapabilities) -> LadderResult<LadderConfig> {
        let columns = self
            .columns
            .clone()
            .unwrap_or_else(default_columns)
            .into_iter()
            .map(|column| -> LadderResult<ColumnSpec> {
                let color =
                    parse_config_color(&format!("columns.{}.color", column.key), &column.color)?;
                Ok(ColumnSpec::new(
                    column.title,
                    column.key,
                    column.width,
                    column.align,
                    color,
                ))
            })
            .collect::<LadderResult<Vec<_>>>()?;

        let bar_color = match &self.bar_color {
            None => BarColor::Flat(parse_config_color("barColor", DEFAULT_BAR_COLOR)?),
            Some(BarColorOptions::Flat(raw)) => {
                BarColor::Flat(parse_config_color("barColor", raw)?)
            }
            Some(BarColorOptions::Gradient { stops }) => BarColor::Gradient(
                stops
                    .iter()
                    .map(|stop| -> LadderResult<GradientStop> {
                        Ok(GradientStop {
                            position: stop.position,
                            color: parse_config_color("barColor.stops.color", &stop.color)?,
                            opacity: stop.opacity,
                        })
                    })
                    .collect::<LadderResult<SmallVec<_>>>()?,
            ),
        };

        let (range_min, range_max) = self.data_range.unwrap_or(DEFAULT_DATA_RANGE);
        let hover = self.hover_style.clone().unwrap_or_default();
        let default_hover = HoverStyle::default();

        let config = LadderConfig {
            rows: self.rows.unwrap_or(DEFAULT_ROWS),
            columns,
            data_range: DataRange::new(range_min, range_max),
            bar_color,
            bar_opacity: self.bar_opacity.unwrap_or(DEFAULT_BAR_OPACITY),
            show_bg_bar: self.show_bg_bar.unwrap_or(true),
            bg_color: parse_config_color(
                "bgColor",
                self.bg_color.as_deref().unwrap_or(DEFAULT_BG_COLOR),
            )?,
            text_color: parse_config_color(
                "textColor",
                self.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR),
            )?,
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned()),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            row_height: self.row_height.unwrap_or(DEFAULT_ROW_HEIGHT),
            row_gap: self.row_gap.unwrap_or(DEFAULT_ROW_GAP),
            scale: self
                .scale
                .unwrap_or_else(|| default_scale(capabilities.device_pixel_ratio)),
            hover_style: HoverStyle {
                background_color: hover
                    .background_color
                    .unwrap_or(default_hover.background_color),
                transition: hover.transition.unwrap_or(default_hover.transition),
            },
        };

        validate_ladder_config(&config)?;
        Ok(config)
    }
}

/// Price / Volume / Total, each 100px wide, right aligned, white.
#[must_use]
pub fn default_columns() -> Vec<ColumnOptions> {
    [("Price", "price"), ("Volume", "volume"), ("Total", "total")]
        .into_iter()
        .map(|(title, key)| ColumnOptions::new(title, key, DEFAULT_COLUMN_WIDTH))
        .collect()
}

fn default_scale(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio >= 1.0 {
        device_pixel_ratio
    } else {
        1.0
    }
}

fn default_column_color() -> String {
    "white".to_owned()
}

fn default_stop_opacity() -> f64 {
    1.0
}
