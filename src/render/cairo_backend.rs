use cairo::{Context, Format, ImageSurface, LinearGradient, Operator};
use pango::FontDescription;

use crate::error::{LadderError, LadderResult};
use crate::render::{
    Color, FontSpec, RenderFrame, Renderer, SurfaceHandle, SurfaceSetup, TextHAlign,
};

/// Callback invoked on the render worker after every painted frame.
pub type CairoPresentFn = Box<dyn FnMut(&ImageSurface) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub bars_drawn: usize,
    pub texts_drawn: usize,
}

/// Transferable handle for a Cairo image surface created on the render worker.
pub struct CairoSurface {
    label: String,
    present: Option<CairoPresentFn>,
}

impl CairoSurface {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            present: None,
        }
    }

    /// Registers a callback that receives the surface after each frame,
    /// e.g. to blit it or write a PNG snapshot.
    #[must_use]
    pub fn with_present(mut self, present: impl FnMut(&ImageSurface) + Send + 'static) -> Self {
        self.present = Some(Box::new(present));
        self
    }
}

impl SurfaceHandle for CairoSurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn acquire(self: Box<Self>, setup: &SurfaceSetup) -> LadderResult<Box<dyn Renderer>> {
        let renderer = CairoRenderer::new(setup, self.present)?;
        Ok(Box::new(renderer))
    }
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// The image surface is sized in device pixels and the drawing context keeps
/// the pixel-density scale applied at acquisition, so frames are painted in
/// logical coordinates.
pub struct CairoRenderer {
    surface: ImageSurface,
    context: Context,
    font: FontDescription,
    present: Option<CairoPresentFn>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(setup: &SurfaceSetup, present: Option<CairoPresentFn>) -> LadderResult<Self> {
        let width = i32::try_from(setup.device_width).unwrap_or(0);
        let height = i32::try_from(setup.device_height).unwrap_or(0);
        if width <= 0 || height <= 0 {
            return Err(LadderError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        context.scale(setup.scale, setup.scale);

        Ok(Self {
            surface,
            context,
            font: font_description(&setup.font),
            present,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> LadderResult<()> {
        frame.validate()?;
        let context = &self.context;

        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);
        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to fill background", err))?;

        self.font = font_description(&frame.font);
        let mut stats = CairoRenderStats::default();

        for bar in &frame.bars {
            let gradient = LinearGradient::new(bar.gradient_x0, 0.0, bar.gradient_x1, 0.0);
            for stop in &bar.stops {
                gradient.add_color_stop_rgba(
                    stop.offset,
                    stop.color.red,
                    stop.color.green,
                    stop.color.blue,
                    stop.color.alpha,
                );
            }
            context
                .set_source(&gradient)
                .map_err(|err| map_backend_error("failed to set bar gradient", err))?;
            context.rectangle(bar.x, bar.y, bar.width, bar.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill bar", err))?;
            stats.bars_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            layout.set_font_description(Some(&self.font));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };
            let y = text.y - f64::from(text_height) / 2.0;

            apply_color(context, text.color);
            context.move_to(x, y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.surface.flush();
        self.last_stats = stats;
        if let Some(present) = self.present.as_mut() {
            present(&self.surface);
        }
        Ok(())
    }

    fn release(&mut self) {
        self.present = None;
        self.surface.finish();
    }
}

fn font_description(font: &FontSpec) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    description
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> LadderError {
    LadderError::InvalidData(format!("{prefix}: {err}"))
}
