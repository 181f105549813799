#![cfg(feature = "cairo-backend")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ladder_rs::LadderError;
use ladder_rs::api::{LadderOptions, OrderBookLadder, PlatformCapabilities, SurfaceHost};
use ladder_rs::core::{RowRecord, Viewport};
use ladder_rs::engine::LadderPainter;
use ladder_rs::render::{CairoRenderer, CairoSurface, FontSpec, Renderer, SurfaceSetup};

fn setup(width: u32, height: u32, scale: f64) -> SurfaceSetup {
    SurfaceSetup {
        viewport: Viewport::new(width, height),
        device_width: (f64::from(width) * scale).round() as u32,
        device_height: (f64::from(height) * scale).round() as u32,
        scale,
        font: FontSpec {
            family: "Sans".to_owned(),
            size_px: 12.0 * scale,
        },
    }
}

fn level(price: f64) -> RowRecord {
    RowRecord::new()
        .with_cell("price", price, "#00ff00")
        .with_cell("volume", 3.0, "#ffffff")
        .with_cell("total", 9.0, "#ffffff")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(&setup(0, 480, 1.0), None)
        .err()
        .expect("invalid width must fail");
    assert!(matches!(err, LadderError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_bars_and_labels() {
    let config = Arc::new(
        LadderOptions::default()
            .normalize(&PlatformCapabilities::default())
            .expect("valid options"),
    );
    let mut painter = LadderPainter::new(config);
    let mut renderer =
        CairoRenderer::new(&painter.surface_setup(), None).expect("cairo renderer");

    let outcome = painter.paint(&[level(50.0), level(75.0)]);
    renderer.render(&outcome.frame).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.bars_drawn, 2);
    assert_eq!(stats.texts_drawn, 3 + 2 * 3);
    assert_eq!(renderer.surface().width(), 300);
    assert_eq!(renderer.surface().height(), 504);
}

#[test]
fn surface_is_sized_in_device_pixels() {
    let renderer = CairoRenderer::new(&setup(300, 504, 2.0), None).expect("cairo renderer");
    assert_eq!(renderer.surface().width(), 600);
    assert_eq!(renderer.surface().height(), 1008);
    assert_eq!(renderer.backend_name(), "cairo+pango+pangocairo");
}

#[test]
fn ladder_presents_cairo_frames_from_the_worker() {
    let presented = Arc::new(Mutex::new(Vec::<(i32, i32)>::new()));
    let sink = Arc::clone(&presented);
    let surface = CairoSurface::new("cairo").with_present(move |image| {
        sink.lock()
            .expect("lock")
            .push((image.width(), image.height()));
    });

    let mut host = SurfaceHost::new();
    host.register("cairo", surface);
    let mut ladder =
        OrderBookLadder::new(&mut host, "cairo", LadderOptions::default().with_rows(4))
            .expect("ladder init");
    ladder.update(vec![level(10.0)]);

    let mut waited = Duration::ZERO;
    while presented.lock().expect("lock").is_empty() && waited < Duration::from_secs(5) {
        std::thread::sleep(Duration::from_millis(10));
        waited += Duration::from_millis(10);
    }
    ladder.destroy();

    let presented = presented.lock().expect("lock");
    assert_eq!(presented.first(), Some(&(300, 5 * 24)));
}
