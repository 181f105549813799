use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::core::{FrameBuffer, LadderConfig, LadderFrame, SLOT_FRAME_SEQUENCE};
use crate::render::{Renderer, SurfaceHandle};

use super::metrics::EngineMetrics;
use super::paint::LadderPainter;
use super::{MessageKind, WorkerMessage};

/// Lifecycle state of a [`RenderEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Destroyed,
}

/// What the engine did with one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Initialized,
    /// `Init` arrived but the surface could not be acquired.
    InitFailed,
    Painted,
    /// The frame was built but the renderer rejected it.
    RenderFailed,
    /// Wrong-state message, dropped by policy.
    Ignored,
    Destroyed,
}

struct ReadyStage {
    painter: LadderPainter,
    renderer: Box<dyn Renderer>,
}

enum Stage {
    Uninitialized,
    Ready(ReadyStage),
    Destroyed,
}

/// Worker-side owner of the surface and the paint algorithm.
///
/// Messages are handled one at a time and each runs to completion.
/// Messages that arrive in the wrong state (anything but `Init`/`Destroy`
/// before `Init`, anything after `Destroy`) are dropped without error; they
/// are logged at `debug` and counted in `ignored_messages`.
pub struct RenderEngine {
    stage: Stage,
    metrics: Arc<EngineMetrics>,
}

impl RenderEngine {
    #[must_use]
    pub fn new(metrics: Arc<EngineMetrics>) -> Self {
        Self {
            stage: Stage::Uninitialized,
            metrics,
        }
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        match self.stage {
            Stage::Uninitialized => EngineState::Uninitialized,
            Stage::Ready(_) => EngineState::Ready,
            Stage::Destroyed => EngineState::Destroyed,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.metrics
    }

    pub fn handle(&mut self, message: WorkerMessage) -> Disposition {
        match message {
            WorkerMessage::Init {
                surface,
                config,
                buffer,
            } => self.handle_init(surface, config, buffer),
            WorkerMessage::Update { frame, buffer } => {
                self.metrics.frame_dequeued();
                self.handle_update(&frame, &buffer)
            }
            WorkerMessage::Destroy => self.handle_destroy(),
        }
    }

    fn ignore(&self, kind: MessageKind) -> Disposition {
        self.metrics.record_ignored();
        debug!(message = ?kind, state = ?self.state(), "ignoring message in current state");
        Disposition::Ignored
    }

    fn handle_init(
        &mut self,
        surface: Box<dyn SurfaceHandle>,
        config: Arc<LadderConfig>,
        buffer: Option<FrameBuffer>,
    ) -> Disposition {
        if !matches!(self.stage, Stage::Uninitialized) {
            return self.ignore(MessageKind::Init);
        }

        self.metrics.reset();
        let painter = LadderPainter::new(config);
        let setup = painter.surface_setup();
        let label = surface.label().to_owned();

        match surface.acquire(&setup) {
            Ok(renderer) => {
                debug!(
                    surface = %label,
                    device_width = setup.device_width,
                    device_height = setup.device_height,
                    scale = setup.scale,
                    shared_buffer = buffer.is_some(),
                    "render engine ready"
                );
                self.stage = Stage::Ready(ReadyStage { painter, renderer });
                Disposition::Initialized
            }
            Err(err) => {
                error!(surface = %label, error = %err, "failed to acquire drawing context");
                Disposition::InitFailed
            }
        }
    }

    fn handle_update(&mut self, frame: &LadderFrame, buffer: &FrameBuffer) -> Disposition {
        let Stage::Ready(ready) = &mut self.stage else {
            return self.ignore(MessageKind::Update);
        };

        if let Some(sequence) = buffer.get(SLOT_FRAME_SEQUENCE) {
            self.metrics.record_buffer_sequence(sequence);
        }

        let outcome = ready.painter.paint(&frame.rows);
        if let Err(err) = ready.renderer.render(&outcome.frame) {
            self.metrics.record_failed();
            warn!(error = %err, "dropping frame rejected by renderer");
            return Disposition::RenderFailed;
        }

        if let Some(ts) = frame.ts {
            self.metrics
                .record_latency(Utc::now().timestamp_millis().saturating_sub(ts));
        }
        self.metrics.record_painted(outcome.skipped_cells);
        Disposition::Painted
    }

    fn handle_destroy(&mut self) -> Disposition {
        match std::mem::replace(&mut self.stage, Stage::Destroyed) {
            Stage::Destroyed => self.ignore(MessageKind::Destroy),
            Stage::Ready(mut ready) => {
                ready.renderer.release();
                debug!("render engine destroyed");
                Disposition::Destroyed
            }
            Stage::Uninitialized => {
                debug!("render engine destroyed before init");
                Disposition::Destroyed
            }
        }
    }
}
