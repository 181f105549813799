use crate::core::Viewport;
use crate::error::{LadderError, LadderResult};
use crate::render::{Color, GradientRectPrimitive, TextPrimitive};

/// Font parameters applied by the backend before drawing text.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Device-scaled size in pixels.
    pub size_px: f64,
}

/// Backend-agnostic scene for one ladder paint pass.
///
/// Coordinates are logical pixels; backends apply `scale` themselves. Every
/// frame starts from a cleared surface filled with `background`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub scale: f64,
    pub background: Color,
    pub font: FontSpec,
    pub bars: Vec<GradientRectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, scale: f64, background: Color, font: FontSpec) -> Self {
        Self {
            viewport,
            scale,
            background,
            font,
            bars: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bar(mut self, bar: GradientRectPrimitive) -> Self {
        self.bars.push(bar);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> LadderResult<()> {
        if !self.viewport.is_valid() {
            return Err(LadderError::InvalidData(format!(
                "invalid viewport size: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(LadderError::InvalidData(
                "frame scale must be finite and > 0".to_owned(),
            ));
        }
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(LadderError::InvalidData(
                "frame font size must be finite and > 0".to_owned(),
            ));
        }
        self.background.validate()?;

        for bar in &self.bars {
            bar.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.texts.is_empty()
    }
}
