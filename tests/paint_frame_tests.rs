use std::sync::Arc;

use approx::assert_relative_eq;
use ladder_rs::api::{ColumnOptions, GradientStopOptions, LadderOptions, PlatformCapabilities};
use ladder_rs::core::{LadderConfig, RowRecord};
use ladder_rs::engine::LadderPainter;
use ladder_rs::render::{Color, TextHAlign};

fn config_from(options: LadderOptions) -> Arc<LadderConfig> {
    Arc::new(
        options
            .normalize(&PlatformCapabilities::default())
            .expect("valid options"),
    )
}

fn level(price: f64, volume: f64, total: f64) -> RowRecord {
    RowRecord::new()
        .with_cell("price", price, "#00ff00")
        .with_cell("volume", volume, "#ffffff")
        .with_cell("total", total, "#ffffff")
}

#[test]
fn empty_payload_paints_background_and_header_only() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default()));
    let outcome = painter.paint(&[]);

    assert_eq!(outcome.painted_rows, 0);
    assert_eq!(outcome.skipped_cells, 0);
    assert!(outcome.frame.bars.is_empty());
    assert_eq!(outcome.frame.background, Color::BLACK);

    let titles: Vec<&str> = outcome.frame.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(titles, ["Price", "Volume", "Total"]);
    for text in &outcome.frame.texts {
        assert_relative_eq!(text.y, 10.0);
        assert_eq!(text.h_align, TextHAlign::Right);
    }
    assert_relative_eq!(outcome.frame.texts[0].x, 95.0);
    assert_relative_eq!(outcome.frame.texts[2].x, 295.0);
}

#[test]
fn row_cells_are_formatted_colored_and_centered() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default()));
    let outcome = painter.paint(&[level(101.25, 1.5, 42.0)]);
    outcome.frame.validate().expect("valid frame");

    let cells = &outcome.frame.texts[3..];
    let labels: Vec<&str> = cells.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(labels, ["101.3", "1.50000", "42.00000"]);
    assert_eq!(cells[0].color, Color::rgb(0.0, 1.0, 0.0));
    assert_eq!(cells[1].color, Color::WHITE);
    for cell in cells {
        assert_relative_eq!(cell.y, 34.0);
        assert_relative_eq!(cell.font_size_px, 12.0);
    }
}

#[test]
fn bar_width_tracks_primary_column_fraction_and_anchors_right() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default()));
    let outcome = painter.paint(&[level(50.0, 1.0, 1.0), level(250.0, 1.0, 1.0)]);

    assert_eq!(outcome.frame.bars.len(), 2);
    let half = &outcome.frame.bars[0];
    assert_relative_eq!(half.width, 150.0);
    assert_relative_eq!(half.x, 150.0);
    assert_relative_eq!(half.y, 24.0);
    assert_relative_eq!(half.height, 20.0);
    assert_relative_eq!(half.gradient_x0, 150.0);
    assert_relative_eq!(half.gradient_x1, 300.0);

    let clamped = &outcome.frame.bars[1];
    assert_relative_eq!(clamped.width, 300.0);
    assert_relative_eq!(clamped.x, 0.0);
}

#[test]
fn flat_bar_color_tapers_from_inner_to_edge_opacity() {
    let mut painter = LadderPainter::new(config_from(
        LadderOptions::default()
            .with_flat_bar_color("#ff0000")
            .with_bar_opacity(0.25),
    ));
    let outcome = painter.paint(&[level(40.0, 1.0, 1.0)]);

    let stops = &outcome.frame.bars[0].stops;
    assert_eq!(stops.len(), 2);
    assert_relative_eq!(stops[0].offset, 0.0);
    assert_relative_eq!(stops[0].color.alpha, 0.9);
    assert_relative_eq!(stops[1].offset, 1.0);
    assert_relative_eq!(stops[1].color.alpha, 0.25);
    assert_relative_eq!(stops[1].color.red, 1.0);
}

#[test]
fn gradient_positions_are_clamped_and_translucent_colors_keep_alpha() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default().with_gradient_bar(
        vec![
            GradientStopOptions::new(-0.5, "#0000ff", 0.3),
            GradientStopOptions::new(f64::NAN, "rgba(0, 0, 255, 0.6)", 1.0),
            GradientStopOptions::new(7.0, "#0000ff", 0.8),
        ],
    )));
    let outcome = painter.paint(&[level(100.0, 1.0, 1.0)]);

    let stops = &outcome.frame.bars[0].stops;
    assert_relative_eq!(stops[0].offset, 0.0);
    assert_relative_eq!(stops[0].color.alpha, 0.3);
    assert_relative_eq!(stops[1].offset, 0.0);
    assert_relative_eq!(stops[1].color.alpha, 0.6);
    assert_relative_eq!(stops[2].offset, 1.0);
    assert_relative_eq!(stops[2].color.alpha, 0.8);
}

#[test]
fn rows_beyond_configured_depth_are_ignored() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default().with_rows(2)));
    let rows: Vec<RowRecord> = (0..5).map(|i| level(f64::from(i), 1.0, 1.0)).collect();
    let outcome = painter.paint(&rows);

    assert_eq!(outcome.painted_rows, 2);
    assert_eq!(outcome.frame.texts.len(), 3 + 2 * 3);
}

#[test]
fn missing_cell_keys_are_skipped_without_failing_the_frame() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default()));
    let partial = RowRecord::new().with_cell("volume", 2.0, "#fff");
    let outcome = painter.paint(&[partial, level(10.0, 1.0, 1.0)]);
    outcome.frame.validate().expect("valid frame");

    assert_eq!(outcome.painted_rows, 2);
    assert_eq!(outcome.skipped_cells, 2);
    // No price on the first row means no bar for it either.
    assert_eq!(outcome.frame.bars.len(), 1);
    assert_relative_eq!(outcome.frame.bars[0].y, 24.0 + 24.0);
}

#[test]
fn unparseable_cell_color_falls_back_to_text_color() {
    let mut painter = LadderPainter::new(config_from(
        LadderOptions::default().with_text_color("#808080"),
    ));
    let row = RowRecord::new()
        .with_cell("price", 1.0, "definitely-not-a-color")
        .with_cell("volume", 1.0, "#ff0000")
        .with_cell("total", 1.0, "");
    let outcome = painter.paint(&[row]);

    let fallback = Color::from_rgba8(0x80, 0x80, 0x80, 1.0);
    assert_eq!(outcome.frame.texts[3].color, fallback);
    assert_eq!(outcome.frame.texts[4].color, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(outcome.frame.texts[5].color, fallback);
}

#[test]
fn hidden_bars_and_zero_fraction_emit_no_bar() {
    let mut hidden =
        LadderPainter::new(config_from(LadderOptions::default().with_show_bg_bar(false)));
    assert!(hidden.paint(&[level(80.0, 1.0, 1.0)]).frame.bars.is_empty());

    let mut shown = LadderPainter::new(config_from(LadderOptions::default()));
    let outcome = shown.paint(&[level(0.0, 1.0, 1.0), level(f64::NAN, 1.0, 1.0)]);
    assert!(outcome.frame.bars.is_empty());
    assert_eq!(outcome.frame.texts[6].text, "NaN");
}

#[test]
fn painting_is_idempotent_for_identical_input() {
    let mut painter = LadderPainter::new(config_from(LadderOptions::default()));
    let rows = vec![level(10.0, 0.5, 0.5), level(20.0, 1.0, 1.5)];

    let first = painter.paint(&rows);
    let second = painter.paint(&rows);
    assert_eq!(first, second);
    assert!(painter.color_cache_stats().hits > 0);
}

#[test]
fn empty_titles_are_not_painted_and_font_scales_with_density() {
    let options = LadderOptions::default()
        .with_scale(2.0)
        .with_columns(vec![
            ColumnOptions::new("", "price", 100),
            ColumnOptions::new("Qty", "volume", 100),
        ]);
    let mut painter = LadderPainter::new(config_from(options));
    let outcome = painter.paint(&[]);

    assert_eq!(outcome.frame.texts.len(), 1);
    assert_eq!(outcome.frame.texts[0].text, "Qty");
    assert_relative_eq!(outcome.frame.font.size_px, 24.0);
    assert_relative_eq!(outcome.frame.scale, 2.0);

    let setup = painter.surface_setup();
    assert_eq!((setup.device_width, setup.device_height), (400, 1008));
}
