use std::fmt;
use std::sync::Arc;

use crate::core::{FrameBuffer, LadderConfig, LadderFrame};
use crate::render::SurfaceHandle;

/// Coordinator → render worker protocol.
pub enum WorkerMessage {
    /// Sent exactly once; moves the surface handle to the worker.
    Init {
        surface: Box<dyn SurfaceHandle>,
        config: Arc<LadderConfig>,
        buffer: Option<FrameBuffer>,
    },
    /// Sent per frame.
    Update {
        frame: LadderFrame,
        buffer: FrameBuffer,
    },
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Init,
    Update,
    Destroy,
}

impl WorkerMessage {
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Init { .. } => MessageKind::Init,
            Self::Update { .. } => MessageKind::Update,
            Self::Destroy => MessageKind::Destroy,
        }
    }
}

impl fmt::Debug for WorkerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init {
                surface, buffer, ..
            } => f
                .debug_struct("Init")
                .field("surface", &surface.label())
                .field("buffer", &buffer.as_ref().map(FrameBuffer::mode))
                .finish_non_exhaustive(),
            Self::Update { frame, buffer } => f
                .debug_struct("Update")
                .field("rows", &frame.rows.len())
                .field("ts", &frame.ts)
                .field("buffer", &buffer.mode())
                .finish(),
            Self::Destroy => f.write_str("Destroy"),
        }
    }
}
