use std::collections::HashSet;

use crate::core::{BarColor, LadderConfig};
use crate::error::{LadderError, LadderResult};
use crate::render::Color;

pub(super) fn parse_config_color(field: &str, raw: &str) -> LadderResult<Color> {
    Color::parse(raw).ok_or_else(|| {
        LadderError::InvalidConfig(format!("`{field}` is not a supported color: `{raw}`"))
    })
}

pub(super) fn validate_ladder_config(config: &LadderConfig) -> LadderResult<()> {
    if config.rows == 0 {
        return Err(LadderError::InvalidConfig("rows must be >= 1".to_owned()));
    }
    if config.row_height == 0 {
        return Err(LadderError::InvalidConfig(
            "row height must be >= 1".to_owned(),
        ));
    }
    config
        .row_height
        .checked_add(config.row_gap)
        .and_then(|pitch| pitch.checked_mul(config.rows.checked_add(1)?))
        .ok_or_else(|| {
            LadderError::InvalidConfig("ladder height overflows u32 pixels".to_owned())
        })?;

    validate_columns(config)?;

    let range = config.data_range;
    if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
        return Err(LadderError::InvalidConfig(
            "data range must be finite with min < max".to_owned(),
        ));
    }

    if !config.scale.is_finite() || config.scale < 1.0 {
        return Err(LadderError::InvalidConfig(
            "scale must be finite and >= 1".to_owned(),
        ));
    }
    if !config.font_size.is_finite() || config.font_size <= 0.0 {
        return Err(LadderError::InvalidConfig(
            "font size must be finite and > 0".to_owned(),
        ));
    }
    if config.scaled_font_size() < 1.0 {
        return Err(LadderError::InvalidConfig(format!(
            "font size {} at scale {} rounds to 0 device pixels",
            config.font_size, config.scale
        )));
    }
    if config.font_family.trim().is_empty() {
        return Err(LadderError::InvalidConfig(
            "font family must not be empty".to_owned(),
        ));
    }

    validate_opacity("bar opacity", config.bar_opacity)?;
    if let BarColor::Gradient(stops) = &config.bar_color {
        if stops.is_empty() {
            return Err(LadderError::InvalidConfig(
                "gradient bar color needs at least one stop".to_owned(),
            ));
        }
        for stop in stops {
            validate_opacity("gradient stop opacity", stop.opacity)?;
        }
    }

    Ok(())
}

fn validate_columns(config: &LadderConfig) -> LadderResult<()> {
    if config.columns.is_empty() {
        return Err(LadderError::InvalidConfig(
            "at least one column is required".to_owned(),
        ));
    }

    let mut keys = HashSet::with_capacity(config.columns.len());
    let mut total_width = 0u32;
    for column in &config.columns {
        if column.key.is_empty() {
            return Err(LadderError::InvalidConfig(
                "column key must not be empty".to_owned(),
            ));
        }
        if !keys.insert(column.key.as_str()) {
            return Err(LadderError::InvalidConfig(format!(
                "column key `{}` is used more than once",
                column.key
            )));
        }
        if column.width == 0 {
            return Err(LadderError::InvalidConfig(format!(
                "column `{}` width must be >= 1",
                column.key
            )));
        }
        total_width = total_width.checked_add(column.width).ok_or_else(|| {
            LadderError::InvalidConfig("ladder width overflows u32 pixels".to_owned())
        })?;
    }
    Ok(())
}

fn validate_opacity(name: &str, value: f64) -> LadderResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(LadderError::InvalidConfig(format!(
            "{name} must be finite and in [0, 1]"
        )));
    }
    Ok(())
}
