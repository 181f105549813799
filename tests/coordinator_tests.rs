use std::time::Duration;

use approx::assert_relative_eq;
use ladder_rs::LadderError;
use ladder_rs::api::{LadderOptions, OrderBookLadder, PlatformCapabilities, SurfaceHost};
use ladder_rs::core::{FrameBufferMode, RowRecord};
use ladder_rs::render::{NullSurface, RecordingSurface};

const WAIT: Duration = Duration::from_secs(5);

fn level(price: f64) -> RowRecord {
    RowRecord::new()
        .with_cell("price", price, "#00ff00")
        .with_cell("volume", 2.0, "#ffffff")
        .with_cell("total", 4.0, "#ffffff")
}

#[test]
fn missing_surface_fails_with_surface_not_found() {
    let mut host = SurfaceHost::new();
    host.register("other", NullSurface::new("other"));

    let err = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .err()
        .expect("missing surface must fail");
    assert!(matches!(err, LadderError::SurfaceNotFound(ref id) if id == "ladder"));
    assert_eq!(host.ids().collect::<Vec<_>>(), ["other"]);
}

#[test]
fn invalid_options_fail_before_the_surface_is_touched() {
    let mut host = SurfaceHost::new();
    host.register("ladder", NullSurface::new("ladder"));

    let err = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default().with_rows(0))
        .err()
        .expect("invalid options must fail");
    assert!(matches!(err, LadderError::InvalidConfig(_)));
    assert!(host.contains("ladder"));
}

#[test]
fn hosts_without_offscreen_transfer_are_unsupported() {
    let mut host = SurfaceHost::new()
        .with_capabilities(PlatformCapabilities::default().with_offscreen_transfer(false));
    host.register("ladder", NullSurface::new("ladder"));

    let err = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .err()
        .expect("unsupported platform must fail");
    assert!(matches!(err, LadderError::UnsupportedPlatform(_)));
    assert!(host.contains("ladder"), "surface stays with the host on failure");
}

#[test]
fn non_transferable_surfaces_are_unsupported() {
    let mut host = SurfaceHost::new();
    host.register("ladder", NullSurface::non_transferable("ladder"));

    let err = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .err()
        .expect("non-transferable surface must fail");
    assert!(matches!(err, LadderError::UnsupportedPlatform(_)));
    assert!(host.contains("ladder"));
}

#[test]
fn construction_moves_the_surface_to_the_worker() {
    let mut host = SurfaceHost::new()
        .with_capabilities(PlatformCapabilities::default().with_device_pixel_ratio(2.0));
    let (surface, log) = RecordingSurface::new("ladder");
    host.register("ladder", surface);

    let ladder = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .expect("ladder init");

    assert!(!host.contains("ladder"));
    assert!(host.is_empty());
    assert_eq!(ladder.surface_id(), "ladder");
    assert_relative_eq!(ladder.config().scale, 2.0);
    assert_eq!(ladder.layout().total_width(), 300);
    assert_eq!(ladder.layout().total_height(), 504);
    assert_eq!(ladder.frame_buffer_mode(), FrameBufferMode::Shared);

    let mut waited = Duration::ZERO;
    while log.setup().is_none() && waited < WAIT {
        std::thread::sleep(Duration::from_millis(5));
        waited += Duration::from_millis(5);
    }
    let setup = log.setup().expect("worker acquired the surface");
    assert_eq!((setup.device_width, setup.device_height), (600, 1008));
}

#[test]
fn shared_memory_restriction_falls_back_to_private_buffers() {
    let mut host = SurfaceHost::new()
        .with_capabilities(PlatformCapabilities::default().with_shared_memory(false));
    let (surface, log) = RecordingSurface::new("ladder");
    host.register("ladder", surface);

    let mut ladder = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .expect("private buffer fallback still initializes");
    assert_eq!(ladder.frame_buffer_mode(), FrameBufferMode::Private);

    ladder.update(vec![level(10.0)]);
    assert!(log.wait_for_frames(1, WAIT));
}

#[test]
fn updates_are_painted_in_send_order() {
    let mut host = SurfaceHost::new();
    let (surface, log) = RecordingSurface::new("ladder");
    host.register("ladder", surface);
    let mut ladder = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .expect("ladder init");

    for price in [10.0, 20.0, 30.0] {
        ladder.update(vec![level(price)]);
    }
    assert!(log.wait_for_frames(3, WAIT), "all frames painted");

    let prices: Vec<String> = log
        .frames()
        .iter()
        .map(|frame| frame.texts[3].text.clone())
        .collect();
    assert_eq!(prices, ["10.0", "20.0", "30.0"]);

    let mut waited = Duration::ZERO;
    while ladder.metrics().frames_painted < 3 && waited < WAIT {
        std::thread::sleep(Duration::from_millis(5));
        waited += Duration::from_millis(5);
    }
    let snapshot = ladder.metrics();
    assert_eq!(snapshot.frames_painted, 3);
    assert_eq!(snapshot.last_buffer_sequence, Some(3.0));
    assert_eq!(ladder.queued_frames(), 0);
}

#[test]
fn update_keeps_the_last_seen_rows_for_events() {
    let mut host = SurfaceHost::new();
    host.register("ladder", NullSurface::new("ladder"));
    let mut ladder = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .expect("ladder init");

    assert!(ladder.rows().is_empty());
    ladder.update(vec![level(1.0), level(2.0)]);
    ladder.update(vec![level(3.0)]);

    assert_eq!(ladder.rows().len(), 1);
    let first = ladder.row(0).expect("row 0");
    assert_relative_eq!(first.cell("price").expect("price").value, 3.0);
    assert!(ladder.row(1).is_none());
}

#[test]
fn destroy_is_idempotent_and_releases_the_renderer() {
    let mut host = SurfaceHost::new();
    let (surface, log) = RecordingSurface::new("ladder");
    host.register("ladder", surface);
    let mut ladder = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .expect("ladder init");
    ladder.update(vec![level(10.0)]);
    assert!(log.wait_for_frames(1, WAIT));

    ladder.destroy();
    ladder.destroy();
    assert!(ladder.is_destroyed());
    assert!(log.wait_for_release(WAIT), "renderer released on destroy");
    assert!(ladder.rows().is_empty());

    let painted = log.len();
    ladder.update(vec![level(20.0)]);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(log.len(), painted, "updates after destroy are no-ops");
    assert!(ladder.row(0).is_none());
}

#[test]
fn dropping_the_ladder_stops_the_worker() {
    let mut host = SurfaceHost::new();
    let (surface, log) = RecordingSurface::new("ladder");
    host.register("ladder", surface);
    let ladder = OrderBookLadder::new(&mut host, "ladder", LadderOptions::default())
        .expect("ladder init");

    drop(ladder);
    // The shutdown flag may stop the worker before it ever sees Init, in
    // which case there is no renderer to release.
    let released = log.wait_for_release(WAIT);
    assert!(released || log.setup().is_none());
}

#[test]
fn two_ladders_render_independently() {
    let mut host = SurfaceHost::new();
    let (bids, bid_log) = RecordingSurface::new("bids");
    let (asks, ask_log) = RecordingSurface::new("asks");
    host.register("bids", bids);
    host.register("asks", asks);

    let mut bid_ladder = OrderBookLadder::new(&mut host, "bids", LadderOptions::default())
        .expect("bids init");
    let mut ask_ladder = OrderBookLadder::new(
        &mut host,
        "asks",
        LadderOptions::default().with_rows(2),
    )
    .expect("asks init");

    assert!(host.ids().next().is_none(), "both surfaces moved to workers");
    bid_ladder.update(vec![level(1.0)]);
    ask_ladder.update(vec![level(2.0), level(3.0), level(4.0)]);

    assert!(bid_ladder.config().rows != ask_ladder.config().rows);
    assert!(bid_log.wait_for_frames(1, WAIT));
    assert!(ask_log.wait_for_frames(1, WAIT));
    assert_eq!(ask_log.last().expect("frame").texts.len(), 3 + 2 * 3);
    assert_eq!(bid_log.last().expect("frame").texts.len(), 3 + 3);
}
