mod frame;
mod null_renderer;
mod primitives;
mod recording;

pub use frame::{FontSpec, RenderFrame};
pub use null_renderer::{NullRenderer, NullSurface};
pub use primitives::{
    Color, ColorStop, ColorStops, GradientRectPrimitive, TextHAlign, TextPrimitive,
};
pub use recording::{FrameLog, RecordingRenderer, RecordingSurface};

use crate::core::Viewport;
use crate::error::LadderResult;

/// Contract implemented by any drawing context the render worker paints into.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from ladder layout and protocol logic.
/// Renderers are created on the worker thread and never leave it.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> LadderResult<()>;

    /// Releases backend resources once the worker is destroyed.
    fn release(&mut self) {}
}

/// Surface geometry handed to a backend when its drawing context is acquired.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSetup {
    /// Logical ladder size.
    pub viewport: Viewport,
    pub device_width: u32,
    pub device_height: u32,
    /// Pixel-density transform applied once at acquisition.
    pub scale: f64,
    pub font: FontSpec,
}

/// Exclusive, transferable handle to a raster surface.
///
/// The coordinator moves the handle to the render worker exactly once; the
/// worker then acquires the drawing context on its own thread.
pub trait SurfaceHandle: Send {
    fn label(&self) -> &str;

    /// Whether drawing control can be moved to another thread.
    fn supports_transfer(&self) -> bool {
        true
    }

    fn acquire(self: Box<Self>, setup: &SurfaceSetup) -> LadderResult<Box<dyn Renderer>>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoPresentFn, CairoRenderStats, CairoRenderer, CairoSurface};
