use crate::error::LadderResult;
use crate::render::{RenderFrame, Renderer, SurfaceHandle, SurfaceSetup};

/// No-op renderer used by benches and headless ladder usage.
///
/// It still validates frame content so invalid geometry is caught before a
/// real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_bar_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> LadderResult<()> {
        frame.validate()?;
        self.last_bar_count = frame.bars.len();
        self.last_text_count = frame.texts.len();
        self.frames_rendered += 1;
        Ok(())
    }
}

/// Surface handle that produces a [`NullRenderer`].
#[derive(Debug, Clone)]
pub struct NullSurface {
    label: String,
    transferable: bool,
}

impl NullSurface {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            transferable: true,
        }
    }

    /// A surface whose drawing control cannot leave the embedding thread.
    #[must_use]
    pub fn non_transferable(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            transferable: false,
        }
    }
}

impl SurfaceHandle for NullSurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn supports_transfer(&self) -> bool {
        self.transferable
    }

    fn acquire(self: Box<Self>, _setup: &SurfaceSetup) -> LadderResult<Box<dyn Renderer>> {
        Ok(Box::new(NullRenderer::default()))
    }
}
