use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

/// Size of the advisory per-frame buffer.
pub const FRAME_BUFFER_BYTES: usize = 1024;
/// Number of `f64` slots in the buffer.
pub const FRAME_BUFFER_SLOTS: usize = FRAME_BUFFER_BYTES / std::mem::size_of::<f64>();

/// Slot holding the coordinator's frame sequence number.
pub const SLOT_FRAME_SEQUENCE: usize = 0;
/// Slot holding the send time in Unix epoch milliseconds.
pub const SLOT_SENT_AT_MS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBufferMode {
    /// One block visible to both threads for the whole session.
    Shared,
    /// A fresh thread-private block per frame.
    Private,
}

/// `f64` block visible to both the coordinator and the render worker.
///
/// Slots are stored as raw bits in relaxed atomics; ordering between a write
/// and the worker's read comes from the message send that follows the write.
#[derive(Debug, Clone)]
pub struct SharedFrameBuffer {
    slots: Arc<[AtomicU64]>,
}

impl SharedFrameBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: (0..FRAME_BUFFER_SLOTS)
                .map(|_| AtomicU64::new(0f64.to_bits()))
                .collect(),
        }
    }

    /// Whether both handles point at the same memory.
    #[must_use]
    pub fn shares_memory_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}

impl Default for SharedFrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrivateFrameBuffer {
    slots: Box<[f64]>,
}

impl PrivateFrameBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![0.0; FRAME_BUFFER_SLOTS].into_boxed_slice(),
        }
    }
}

impl Default for PrivateFrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Advisory numeric side channel sent with every update.
///
/// Its contents never influence paint output.
#[derive(Debug, Clone)]
pub enum FrameBuffer {
    Shared(SharedFrameBuffer),
    Private(PrivateFrameBuffer),
}

impl FrameBuffer {
    /// Allocates a shared block when the host allows cross-thread shared
    /// memory, otherwise falls back to a private block.
    #[must_use]
    pub fn allocate(shared_memory_available: bool) -> Self {
        if shared_memory_available {
            return Self::Shared(SharedFrameBuffer::new());
        }
        warn!(
            bytes = FRAME_BUFFER_BYTES,
            "shared memory unavailable, falling back to a private frame buffer"
        );
        Self::Private(PrivateFrameBuffer::new())
    }

    #[must_use]
    pub fn mode(&self) -> FrameBufferMode {
        match self {
            Self::Shared(_) => FrameBufferMode::Shared,
            Self::Private(_) => FrameBufferMode::Private,
        }
    }

    /// Buffer to send with the next frame: the same block when shared, a
    /// fresh zeroed block when private.
    #[must_use]
    pub fn for_next_frame(&self) -> Self {
        match self {
            Self::Shared(shared) => Self::Shared(shared.clone()),
            Self::Private(_) => Self::Private(PrivateFrameBuffer::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        FRAME_BUFFER_SLOTS
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<f64> {
        match self {
            Self::Shared(shared) => shared
                .slots
                .get(slot)
                .map(|bits| f64::from_bits(bits.load(Ordering::Relaxed))),
            Self::Private(private) => private.slots.get(slot).copied(),
        }
    }

    /// Writes `value` into `slot`. Returns `false` for out-of-range slots.
    pub fn set(&mut self, slot: usize, value: f64) -> bool {
        match self {
            Self::Shared(shared) => match shared.slots.get(slot) {
                Some(bits) => {
                    bits.store(value.to_bits(), Ordering::Relaxed);
                    true
                }
                None => false,
            },
            Self::Private(private) => match private.slots.get_mut(slot) {
                Some(entry) => {
                    *entry = value;
                    true
                }
                None => false,
            },
        }
    }

    /// Copies the whole block as `f64` values.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        (0..FRAME_BUFFER_SLOTS)
            .filter_map(|slot| self.get(slot))
            .collect()
    }
}
