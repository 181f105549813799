pub mod bar;
pub mod config;
pub mod format;
pub mod frame_buffer;
pub mod layout;
pub mod row;
pub mod types;

pub use bar::{BarGeometry, bar_color_stops, bar_fill_fraction};
pub use config::{
    BarColor, ColumnAlign, ColumnSpec, DataRange, GradientStop, HoverStyle, LadderConfig,
};
pub use format::{format_fixed, format_plain, format_value};
pub use frame_buffer::{
    FRAME_BUFFER_BYTES, FRAME_BUFFER_SLOTS, FrameBuffer, FrameBufferMode, PrivateFrameBuffer,
    SLOT_FRAME_SEQUENCE, SLOT_SENT_AT_MS, SharedFrameBuffer,
};
pub use layout::{ColumnSlot, LadderLayout, TEXT_INSET_PX, text_anchor_x};
pub use row::{CellData, LadderFrame, RowRecord};
pub use types::Viewport;
