use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};

const NO_LATENCY: i64 = i64::MIN;
const NO_SEQUENCE: u64 = u64::MAX;

/// Render worker diagnostics, shared between the worker and any reader.
///
/// Counters are reset when the engine accepts `Init`; `queued_frames` is
/// owned by the send/receive pair and survives resets.
#[derive(Debug)]
pub struct EngineMetrics {
    frames_painted: AtomicU64,
    failed_frames: AtomicU64,
    ignored_messages: AtomicU64,
    skipped_cells: AtomicU64,
    last_latency_ms: AtomicI64,
    last_buffer_sequence: AtomicU64,
    queued_frames: AtomicUsize,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSnapshot {
    pub frames_painted: u64,
    /// Frames whose renderer call failed.
    pub failed_frames: u64,
    /// Messages dropped because they arrived in the wrong engine state.
    pub ignored_messages: u64,
    /// Cells skipped because their row lacked the column key.
    pub skipped_cells: u64,
    pub last_latency_ms: Option<i64>,
    /// Sequence number last read from the frame buffer.
    pub last_buffer_sequence: Option<f64>,
    /// Updates sent but not yet taken by the worker.
    pub queued_frames: usize,
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self {
            frames_painted: AtomicU64::new(0),
            failed_frames: AtomicU64::new(0),
            ignored_messages: AtomicU64::new(0),
            skipped_cells: AtomicU64::new(0),
            last_latency_ms: AtomicI64::new(NO_LATENCY),
            last_buffer_sequence: AtomicU64::new(NO_SEQUENCE),
            queued_frames: AtomicUsize::new(0),
        }
    }
}

impl EngineMetrics {
    pub(crate) fn reset(&self) {
        self.frames_painted.store(0, Ordering::Relaxed);
        self.failed_frames.store(0, Ordering::Relaxed);
        self.ignored_messages.store(0, Ordering::Relaxed);
        self.skipped_cells.store(0, Ordering::Relaxed);
        self.last_latency_ms.store(NO_LATENCY, Ordering::Relaxed);
        self.last_buffer_sequence
            .store(NO_SEQUENCE, Ordering::Relaxed);
    }

    pub(crate) fn record_painted(&self, skipped_cells: usize) {
        self.frames_painted.fetch_add(1, Ordering::Relaxed);
        self.skipped_cells
            .fetch_add(skipped_cells as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_ignored(&self) {
        self.ignored_messages.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_latency(&self, latency_ms: i64) {
        self.last_latency_ms.store(latency_ms, Ordering::Relaxed);
    }

    pub(crate) fn record_buffer_sequence(&self, sequence: f64) {
        self.last_buffer_sequence
            .store(sequence.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn frame_enqueued(&self) {
        self.queued_frames.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn frame_dequeued(&self) {
        let _ = self
            .queued_frames
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |queued| {
                queued.checked_sub(1)
            });
    }

    #[must_use]
    pub fn queued_frames(&self) -> usize {
        self.queued_frames.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let latency = self.last_latency_ms.load(Ordering::Relaxed);
        let sequence = self.last_buffer_sequence.load(Ordering::Relaxed);
        MetricsSnapshot {
            frames_painted: self.frames_painted.load(Ordering::Relaxed),
            failed_frames: self.failed_frames.load(Ordering::Relaxed),
            ignored_messages: self.ignored_messages.load(Ordering::Relaxed),
            skipped_cells: self.skipped_cells.load(Ordering::Relaxed),
            last_latency_ms: (latency != NO_LATENCY).then_some(latency),
            last_buffer_sequence: (sequence != NO_SEQUENCE).then(|| f64::from_bits(sequence)),
            queued_frames: self.queued_frames(),
        }
    }
}
