use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

use chrono::Utc;
use tracing::{debug, warn};

use crate::core::{
    FrameBuffer, FrameBufferMode, LadderConfig, LadderFrame, LadderLayout, RowRecord,
    SLOT_FRAME_SEQUENCE, SLOT_SENT_AT_MS,
};
use crate::engine::{EngineMetrics, MetricsSnapshot, WorkerMessage, spawn_render_worker};
use crate::error::{LadderError, LadderResult};

use super::{EventRegistry, HandlerId, LadderEvent, LadderOptions, RowEvent, SurfaceHost};

/// Embedding-side handle of one order-book ladder.
///
/// Owns the normalized configuration, the channel to the render worker and
/// the last rows it forwarded. Drawing happens exclusively on the worker.
pub struct OrderBookLadder {
    surface_id: String,
    config: Arc<LadderConfig>,
    layout: LadderLayout,
    metrics: Arc<EngineMetrics>,
    shutdown: Arc<AtomicBool>,
    sender: Option<Sender<WorkerMessage>>,
    buffer: FrameBuffer,
    frame_sequence: u64,
    rows: Arc<[RowRecord]>,
    events: EventRegistry,
    destroyed: bool,
}

impl OrderBookLadder {
    /// Binds a new ladder to the surface registered under `surface_id`.
    ///
    /// On error the surface stays registered in `host` and no worker thread
    /// is left running.
    pub fn new(
        host: &mut SurfaceHost,
        surface_id: &str,
        options: LadderOptions,
    ) -> LadderResult<Self> {
        let capabilities = host.capabilities();
        let config = options.normalize(&capabilities)?;

        let surface = host
            .get(surface_id)
            .ok_or_else(|| LadderError::SurfaceNotFound(surface_id.to_owned()))?;

        let layout = LadderLayout::from_config(&config);

        if !capabilities.offscreen_transfer {
            return Err(LadderError::UnsupportedPlatform(
                "host cannot move surface drawing control to another thread".to_owned(),
            ));
        }
        if !surface.supports_transfer() {
            return Err(LadderError::UnsupportedPlatform(format!(
                "surface `{}` cannot be transferred to the render worker",
                surface.label()
            )));
        }

        let buffer = FrameBuffer::allocate(capabilities.shared_memory);

        let metrics = Arc::new(EngineMetrics::default());
        let shutdown = Arc::new(AtomicBool::new(false));
        let (sender, _worker) = spawn_render_worker(Arc::clone(&metrics), Arc::clone(&shutdown))?;

        let Some(surface) = host.take(surface_id) else {
            shutdown.store(true, Ordering::Release);
            return Err(LadderError::SurfaceNotFound(surface_id.to_owned()));
        };

        let config = Arc::new(config);
        let init_buffer = match buffer.mode() {
            FrameBufferMode::Shared => Some(buffer.for_next_frame()),
            FrameBufferMode::Private => None,
        };
        if sender
            .send(WorkerMessage::Init {
                surface,
                config: Arc::clone(&config),
                buffer: init_buffer,
            })
            .is_err()
        {
            warn!(surface_id, "render worker exited before init");
        }

        let (width, height) = (layout.total_width(), layout.total_height());
        debug!(
            surface_id,
            width,
            height,
            scale = config.scale,
            rows = config.rows,
            buffer = ?buffer.mode(),
            "order book ladder initialized"
        );

        Ok(Self {
            surface_id: surface_id.to_owned(),
            config,
            layout,
            metrics,
            shutdown,
            sender: Some(sender),
            buffer,
            frame_sequence: 0,
            rows: Arc::from(Vec::new()),
            events: EventRegistry::default(),
            destroyed: false,
        })
    }

    /// Forwards one frame of rows to the render worker.
    ///
    /// Never blocks and never waits for the paint. No-op after `destroy`.
    pub fn update(&mut self, rows: Vec<RowRecord>) {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };

        let rows: Arc<[RowRecord]> = rows.into();
        self.rows = Arc::clone(&rows);

        self.frame_sequence += 1;
        let mut buffer = self.buffer.for_next_frame();
        buffer.set(SLOT_FRAME_SEQUENCE, self.frame_sequence as f64);
        buffer.set(SLOT_SENT_AT_MS, Utc::now().timestamp_millis() as f64);

        self.metrics.frame_enqueued();
        let message = WorkerMessage::Update {
            frame: LadderFrame::new(rows),
            buffer,
        };
        if sender.send(message).is_err() {
            self.metrics.frame_dequeued();
            warn!(
                surface_id = %self.surface_id,
                "render worker is gone; frame dropped"
            );
        }
    }

    /// Stops the worker and releases handlers and rows. Idempotent.
    ///
    /// Frames still queued behind this call are discarded unpainted.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.shutdown.store(true, Ordering::Release);
        if let Some(sender) = self.sender.take() {
            // The worker may already have exited on the shutdown flag.
            let _ = sender.send(WorkerMessage::Destroy);
        }
        self.events.clear();
        self.rows = Arc::from(Vec::new());
        debug!(surface_id = %self.surface_id, "order book ladder destroyed");
    }

    pub fn on(
        &mut self,
        event: LadderEvent,
        handler: impl Fn(&RowEvent) + Send + Sync + 'static,
    ) -> HandlerId {
        self.events.on(event, handler)
    }

    pub fn off(&mut self, event: LadderEvent, id: HandlerId) -> bool {
        self.events.off(event, id)
    }

    /// Reports a row interaction from the overlay; returns how many handlers ran.
    ///
    /// Indices outside the configured rows deliver nothing. Hover needs a row
    /// at `index` in the last frame; click is delivered with `data: None`.
    pub fn dispatch(&self, event: LadderEvent, index: usize) -> usize {
        if self.destroyed || index >= self.config.rows as usize {
            return 0;
        }
        let data = self.rows.get(index).cloned();
        if event == LadderEvent::Hover && data.is_none() {
            return 0;
        }
        self.events.emit(&RowEvent { event, index, data })
    }

    #[must_use]
    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &LadderLayout {
        &self.layout
    }

    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn frame_buffer_mode(&self) -> FrameBufferMode {
        self.buffer.mode()
    }

    /// Updates sent that the worker has not picked up yet.
    #[must_use]
    pub fn queued_frames(&self) -> usize {
        self.metrics.queued_frames()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&RowRecord> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    #[must_use]
    pub fn handler_count(&self, event: LadderEvent) -> usize {
        self.events.handler_count(event)
    }
}

impl Drop for OrderBookLadder {
    fn drop(&mut self) {
        self.destroy();
    }
}
