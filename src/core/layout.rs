use crate::core::{ColumnAlign, LadderConfig, Viewport};

/// Horizontal inset between a column edge and left/right aligned text.
pub const TEXT_INSET_PX: f64 = 5.0;

/// Horizontal slot of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot {
    pub left: f64,
    pub width: f64,
    pub align: ColumnAlign,
}

impl ColumnSlot {
    #[must_use]
    pub fn text_anchor_x(self) -> f64 {
        text_anchor_x(self.left, self.width, self.align)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }
}

/// Anchor x for text in a column starting at `left`.
#[must_use]
pub fn text_anchor_x(left: f64, width: f64, align: ColumnAlign) -> f64 {
    match align {
        ColumnAlign::Left => left + TEXT_INSET_PX,
        ColumnAlign::Right => left + width - TEXT_INSET_PX,
        ColumnAlign::Center => left + width / 2.0,
    }
}

/// Fixed ladder geometry in logical pixels: a header band plus `rows`
/// equally spaced rows.
///
/// The header band occupies one row pitch (`row_height + row_gap`); data row
/// `i` (0-based) sits one pitch further down per index.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderLayout {
    viewport: Viewport,
    rows: u32,
    row_height: u32,
    row_gap: u32,
    columns: Vec<ColumnSlot>,
}

impl LadderLayout {
    #[must_use]
    pub fn from_config(config: &LadderConfig) -> Self {
        let mut columns = Vec::with_capacity(config.columns.len());
        let mut left = 0u32;
        for column in &config.columns {
            columns.push(ColumnSlot {
                left: f64::from(left),
                width: f64::from(column.width),
                align: column.align,
            });
            left = left.saturating_add(column.width);
        }

        let pitch = config.row_height.saturating_add(config.row_gap);
        let height = config.rows.saturating_add(1).saturating_mul(pitch);

        Self {
            viewport: Viewport::new(left, height),
            rows: config.rows,
            row_height: config.row_height,
            row_gap: config.row_gap,
            columns,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Sum of all column widths.
    #[must_use]
    pub fn total_width(&self) -> u32 {
        self.viewport.width
    }

    /// `(rows + 1) * (row_height + row_gap)`.
    #[must_use]
    pub fn total_height(&self) -> u32 {
        self.viewport.height
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn row_pitch(&self) -> u32 {
        self.row_height + self.row_gap
    }

    #[must_use]
    pub fn header_height(&self) -> u32 {
        self.row_pitch()
    }

    #[must_use]
    pub fn row_height(&self) -> f64 {
        f64::from(self.row_height)
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<ColumnSlot> {
        self.columns.get(index).copied()
    }

    /// Vertical center of the header band.
    #[must_use]
    pub fn header_center_y(&self) -> f64 {
        f64::from(self.row_height) / 2.0
    }

    /// Top edge of data row `index`, as used by the row overlay.
    #[must_use]
    pub fn row_top_y(&self, index: usize) -> f64 {
        f64::from(self.header_height()) + index as f64 * f64::from(self.row_pitch())
    }

    /// Vertical center of data row `index`.
    #[must_use]
    pub fn row_center_y(&self, index: usize) -> f64 {
        self.row_top_y(index) + f64::from(self.row_height) / 2.0
    }

    #[must_use]
    pub fn device_size(&self, scale: f64) -> (u32, u32) {
        self.viewport.device_size(scale)
    }
}
