use smallvec::SmallVec;

use crate::error::{LadderError, LadderResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Parses a CSS-like color string.
    ///
    /// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, `transparent` and a small set of named colors.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(hex) = input.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        let lower = input.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            return Self::from_rgb_function(args.strip_suffix(')')?);
        }

        named_color(&lower)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            Some((hex_digit(s[i])? << 4) | hex_digit(s[i + 1])?)
        }

        fn short(s: &[u8], i: usize) -> Option<u8> {
            let digit = hex_digit(s[i])?;
            Some((digit << 4) | digit)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Some(Self::from_rgba8(
                short(bytes, 0)?,
                short(bytes, 1)?,
                short(bytes, 2)?,
                1.0,
            )),
            4 => Some(Self::from_rgba8(
                short(bytes, 0)?,
                short(bytes, 1)?,
                short(bytes, 2)?,
                f64::from(short(bytes, 3)?) / 255.0,
            )),
            6 => Some(Self::from_rgba8(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                1.0,
            )),
            8 => Some(Self::from_rgba8(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                f64::from(hex_byte(bytes, 6)?) / 255.0,
            )),
            _ => None,
        }
    }

    fn from_rgb_function(args: &str) -> Option<Self> {
        let parts: SmallVec<[f64; 4]> = args
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok())
            .collect::<Option<_>>()?;

        let channel = |value: f64| -> Option<f64> {
            (value.is_finite() && (0.0..=255.0).contains(&value)).then_some(value / 255.0)
        };

        let (red, green, blue) = match parts.as_slice() {
            [r, g, b] | [r, g, b, _] => (channel(*r)?, channel(*g)?, channel(*b)?),
            _ => return None,
        };
        let alpha = match parts.get(3) {
            Some(alpha) if alpha.is_finite() => alpha.clamp(0.0, 1.0),
            Some(_) => return None,
            None => 1.0,
        };
        Some(Self::rgba(red, green, blue, alpha))
    }

    pub fn validate(self) -> LadderResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(LadderError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn named_color(name: &str) -> Option<Color> {
    let (red, green, blue) = match name {
        "transparent" => return Some(Color::TRANSPARENT),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        _ => return None,
    };
    Some(Color::from_rgba8(red, green, blue, 1.0))
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in logical pixel space.
///
/// `y` is the vertical middle of the text line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> LadderResult<()> {
        if self.text.is_empty() {
            return Err(LadderError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(LadderError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(LadderError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One color stop of a linear gradient. `offset` is always inside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    /// Creates a stop, clamping `offset` into [0, 1] (NaN maps to 0).
    #[must_use]
    pub fn new(offset: f64, color: Color) -> Self {
        let offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, 1.0)
        };
        Self { offset, color }
    }
}

pub type ColorStops = SmallVec<[ColorStop; 4]>;

/// Rectangle filled with a horizontal linear gradient running from
/// `gradient_x0` (offset 0) to `gradient_x1` (offset 1).
#[derive(Debug, Clone, PartialEq)]
pub struct GradientRectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub gradient_x0: f64,
    pub gradient_x1: f64,
    pub stops: ColorStops,
}

impl GradientRectPrimitive {
    /// Creates a rectangle whose gradient spans its own horizontal extent.
    #[must_use]
    pub fn spanning(x: f64, y: f64, width: f64, height: f64, stops: ColorStops) -> Self {
        Self {
            x,
            y,
            width,
            height,
            gradient_x0: x,
            gradient_x1: x + width,
            stops,
        }
    }

    pub fn validate(&self) -> LadderResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.gradient_x0.is_finite()
            || !self.gradient_x1.is_finite()
        {
            return Err(LadderError::InvalidData(
                "gradient rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(LadderError::InvalidData(
                "gradient rect width must be finite and > 0".to_owned(),
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(LadderError::InvalidData(
                "gradient rect height must be finite and > 0".to_owned(),
            ));
        }
        if self.stops.is_empty() {
            return Err(LadderError::InvalidData(
                "gradient rect needs at least one color stop".to_owned(),
            ));
        }
        for stop in &self.stops {
            stop.color.validate()?;
        }
        Ok(())
    }
}
