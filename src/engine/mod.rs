//! Render worker: message protocol, state machine, paint algorithm and the
//! thread that drives them.

mod color_cache;
mod message;
mod metrics;
mod paint;
mod render_engine;
mod worker;

pub use color_cache::{CellColorCache, CellColorCacheStats};
pub use message::{MessageKind, WorkerMessage};
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use paint::{LadderPainter, PaintOutcome};
pub use render_engine::{Disposition, EngineState, RenderEngine};
pub use worker::{WORKER_THREAD_NAME, spawn_render_worker};
