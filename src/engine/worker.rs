use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::telemetry::FrameRateWindow;

use super::metrics::EngineMetrics;
use super::render_engine::{Disposition, EngineState, RenderEngine};
use super::WorkerMessage;

pub const WORKER_THREAD_NAME: &str = "ladder-render";

/// How often an idle worker wakes up to flush the frame-rate window.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Spawns the render worker thread.
///
/// The worker drains messages strictly in send order over an unbounded
/// channel. It stops after `Destroy`, when every sender is dropped, or as soon
/// as it observes `shutdown`; in the last case queued frames are discarded
/// unpainted.
pub fn spawn_render_worker(
    metrics: Arc<EngineMetrics>,
    shutdown: Arc<AtomicBool>,
) -> io::Result<(Sender<WorkerMessage>, JoinHandle<()>)> {
    let (tx, rx) = mpsc::channel::<WorkerMessage>();
    let handle = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_owned())
        .spawn(move || run_worker(rx, RenderEngine::new(metrics), &shutdown))?;
    Ok((tx, handle))
}

fn run_worker(rx: Receiver<WorkerMessage>, mut engine: RenderEngine, shutdown: &AtomicBool) {
    let mut window = FrameRateWindow::default();

    loop {
        let message = match rx.recv_timeout(IDLE_POLL) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if shutdown.load(Ordering::Acquire) {
            debug!("render worker shutdown requested");
            break;
        }

        if let Some(message) = message {
            if engine.handle(message) == Disposition::Painted {
                window.record_frame();
            }
        }

        if let Some(sample) = window.poll(Instant::now()) {
            let snapshot = engine.metrics().snapshot();
            debug!(
                frames = sample.frames,
                fps = sample.frames_per_second(),
                latency_ms = snapshot.last_latency_ms,
                queued = snapshot.queued_frames,
                "ladder frame rate"
            );
        }

        if engine.state() == EngineState::Destroyed {
            return;
        }
    }

    if engine.state() != EngineState::Destroyed {
        engine.handle(WorkerMessage::Destroy);
    }
}
