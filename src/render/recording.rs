use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::LadderResult;
use crate::render::{RenderFrame, Renderer, SurfaceHandle, SurfaceSetup};

#[derive(Debug, Default)]
struct LogState {
    setup: Option<SurfaceSetup>,
    frames: Vec<RenderFrame>,
    released: bool,
}

/// Shared, thread-safe record of everything a [`RecordingRenderer`] painted.
///
/// The log stays with the embedding thread while the renderer lives on the
/// render worker.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    inner: Arc<(Mutex<LogState>, Condvar)>,
}

impl FrameLog {
    fn state(&self) -> MutexGuard<'_, LogState> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, f: impl FnOnce(&mut LogState)) {
        f(&mut *self.state());
        self.inner.1.notify_all();
    }

    #[must_use]
    pub fn frames(&self) -> Vec<RenderFrame> {
        self.state().frames.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state().frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn last(&self) -> Option<RenderFrame> {
        self.state().frames.last().cloned()
    }

    /// Setup the renderer was acquired with, once the worker initialized it.
    #[must_use]
    pub fn setup(&self) -> Option<SurfaceSetup> {
        self.state().setup.clone()
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.state().released
    }

    /// Blocks until at least `count` frames were recorded or `timeout` passes.
    ///
    /// Returns `true` when the count was reached.
    pub fn wait_for_frames(&self, count: usize, timeout: Duration) -> bool {
        self.wait_until(timeout, |state| state.frames.len() >= count)
    }

    /// Blocks until the renderer was released or `timeout` passes.
    pub fn wait_for_release(&self, timeout: Duration) -> bool {
        self.wait_until(timeout, |state| state.released)
    }

    fn wait_until(&self, timeout: Duration, done: impl Fn(&LogState) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state();
        loop {
            if done(&*state) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            state = self
                .inner
                .1
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

/// Renderer that validates and appends each frame to a [`FrameLog`].
#[derive(Debug)]
pub struct RecordingRenderer {
    log: FrameLog,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> LadderResult<()> {
        frame.validate()?;
        let frame = frame.clone();
        self.log.mutate(|state| state.frames.push(frame));
        Ok(())
    }

    fn release(&mut self) {
        self.log.mutate(|state| state.released = true);
    }
}

/// Surface handle whose painted frames can be inspected from another thread.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    label: String,
    log: FrameLog,
}

impl RecordingSurface {
    /// Returns the transferable handle plus the log it will write into.
    #[must_use]
    pub fn new(label: impl Into<String>) -> (Self, FrameLog) {
        let log = FrameLog::default();
        (
            Self {
                label: label.into(),
                log: log.clone(),
            },
            log,
        )
    }
}

impl SurfaceHandle for RecordingSurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn acquire(self: Box<Self>, setup: &SurfaceSetup) -> LadderResult<Box<dyn Renderer>> {
        let setup = setup.clone();
        self.log.mutate(|state| state.setup = Some(setup));
        Ok(Box::new(RecordingRenderer { log: self.log }))
    }
}
