use std::sync::Arc;

use tracing::trace;

use crate::core::{
    BarGeometry, LadderConfig, LadderLayout, RowRecord, bar_color_stops, bar_fill_fraction,
    format_value,
};
use crate::render::{ColorStops, FontSpec, RenderFrame, SurfaceSetup, TextPrimitive};

use super::color_cache::{CellColorCache, CellColorCacheStats};

/// Result of painting one update.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintOutcome {
    pub frame: RenderFrame,
    /// Data rows painted, at most `config.rows`.
    pub painted_rows: usize,
    /// Cells left blank because the row lacked the column key.
    pub skipped_cells: usize,
}

/// Builds ladder frames for one frozen configuration.
///
/// A painted frame is a pure function of the configuration and the rows; the
/// only state kept between frames is the parsed cell color cache.
#[derive(Debug, Clone)]
pub struct LadderPainter {
    config: Arc<LadderConfig>,
    layout: LadderLayout,
    bar_stops: ColorStops,
    colors: CellColorCache,
}

impl LadderPainter {
    #[must_use]
    pub fn new(config: Arc<LadderConfig>) -> Self {
        let layout = LadderLayout::from_config(&config);
        let bar_stops = bar_color_stops(&config.bar_color, config.bar_opacity);
        let colors = CellColorCache::new(config.text_color);
        Self {
            config,
            layout,
            bar_stops,
            colors,
        }
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
    pub fn color_cache_stats(&self) -> CellColorCacheStats {
        self.colors.stats()
    }

    fn font(&self) -> FontSpec {
        FontSpec {
            family: self.config.font_family.clone(),
            size_px: self.config.scaled_font_size(),
        }
    }

    /// Geometry and font handed to the backend when the surface is acquired.
    #[must_use]
    pub fn surface_setup(&self) -> SurfaceSetup {
        let (device_width, device_height) = self.layout.device_size(self.config.scale);
        SurfaceSetup {
            viewport: self.layout.viewport(),
            device_width,
            device_height,
            scale: self.config.scale,
            font: self.font(),
        }
    }

    pub fn paint(&mut self, rows: &[RowRecord]) -> PaintOutcome {
        let config = &self.config;
        let layout = &self.layout;
        let font = self.font();
        let font_px = font.size_px;
        let mut frame = RenderFrame::new(layout.viewport(), config.scale, config.bg_color, font);

        let header_y = layout.header_center_y();
        for (column, slot) in config.columns.iter().zip(layout.columns()) {
            if column.title.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                column.title.clone(),
                slot.text_anchor_x(),
                header_y,
                font_px,
                column.color,
                column.align.into(),
            ));
        }

        let visible_rows = rows.len().min(config.rows as usize);
        let surface_width = f64::from(layout.total_width());
        let mut skipped_cells = 0;

        for (index, row) in rows.iter().take(visible_rows).enumerate() {
            let center_y = layout.row_center_y(index);

            if config.show_bg_bar {
                if let Some(primary) = config.primary_column() {
                    match row.cell(&primary.key) {
                        Some(cell) => {
                            let fraction = bar_fill_fraction(cell.value, config.data_range);
                            if let Some(bar) = BarGeometry::for_row(
                                fraction,
                                surface_width,
                                center_y,
                                layout.row_height(),
                            ) {
                                frame.bars.push(bar.into_primitive(self.bar_stops.clone()));
                            }
                        }
                        None => trace!(row = index, key = %primary.key, "row has no bar value"),
                    }
                }
            }

            for (column, slot) in config.columns.iter().zip(layout.columns()) {
                let Some(cell) = row.cell(&column.key) else {
                    skipped_cells += 1;
                    trace!(row = index, key = %column.key, "skipping cell missing from row");
                    continue;
                };
                frame.texts.push(TextPrimitive::new(
                    format_value(cell.value, &column.key),
                    slot.text_anchor_x(),
                    center_y,
                    font_px,
                    self.colors.resolve(&cell.color),
                    column.align.into(),
                ));
            }
        }

        PaintOutcome {
            frame,
            painted_rows: visible_rows,
            skipped_cells,
        }
    }
}
