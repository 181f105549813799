//! Embedding-side surface: options, surface registry, row events and the
//! `OrderBookLadder` coordinator.

mod events;
mod host;
mod ladder;
mod options;
mod validation;

pub use events::{EventRegistry, HandlerId, LadderEvent, RowEvent, RowEventHandlerFn};
pub use host::{PlatformCapabilities, SurfaceHost};
pub use ladder::OrderBookLadder;
pub use options::{
    BarColorOptions, ColumnOptions, DEFAULT_BAR_COLOR, DEFAULT_BAR_OPACITY, DEFAULT_BG_COLOR,
    DEFAULT_COLUMN_WIDTH, DEFAULT_DATA_RANGE, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
    DEFAULT_ROW_GAP, DEFAULT_ROW_HEIGHT, DEFAULT_ROWS, DEFAULT_TEXT_COLOR, GradientStopOptions,
    HoverStyleOptions, LadderOptions, default_columns,
};
