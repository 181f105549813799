//! ladder-rs: order-book ladder renderer with an off-thread render worker.
//!
//! The embedding thread owns an [`OrderBookLadder`], which normalizes options,
//! moves a drawing surface to a dedicated worker thread and forwards row
//! frames to it. The worker lays out and paints each frame into a
//! backend-agnostic display list consumed by a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{LadderEvent, LadderOptions, OrderBookLadder, PlatformCapabilities, SurfaceHost};
pub use error::{LadderError, LadderResult};
