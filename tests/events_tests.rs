use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ladder_rs::api::{
    EventRegistry, LadderEvent, LadderOptions, OrderBookLadder, RowEvent, SurfaceHost,
};
use ladder_rs::core::RowRecord;
use ladder_rs::render::NullSurface;

fn ladder_with_rows(rows: u32) -> OrderBookLadder {
    let mut host = SurfaceHost::new();
    host.register("ladder", NullSurface::new("ladder"));
    OrderBookLadder::new(&mut host, "ladder", LadderOptions::default().with_rows(rows))
        .expect("ladder init")
}

fn level(price: f64) -> RowRecord {
    RowRecord::new()
        .with_cell("price", price, "#fff")
        .with_cell("volume", 1.0, "#fff")
        .with_cell("total", 1.0, "#fff")
}

#[test]
fn hover_is_delivered_only_for_populated_rows() {
    let mut ladder = ladder_with_rows(5);
    let seen = Arc::new(Mutex::new(Vec::<RowEvent>::new()));
    let sink = Arc::clone(&seen);
    ladder.on(LadderEvent::Hover, move |event| {
        sink.lock().expect("lock").push(event.clone());
    });

    ladder.update(vec![level(10.0), level(11.0)]);
    assert_eq!(ladder.dispatch(LadderEvent::Hover, 1), 1);
    assert_eq!(ladder.dispatch(LadderEvent::Hover, 3), 0);

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].event, LadderEvent::Hover);
    assert_eq!(seen[0].index, 1);
    assert_eq!(seen[0].data.as_ref(), Some(&level(11.0)));
}

#[test]
fn click_on_an_empty_row_carries_no_data() {
    let mut ladder = ladder_with_rows(5);
    let seen = Arc::new(Mutex::new(Vec::<RowEvent>::new()));
    let sink = Arc::clone(&seen);
    ladder.on(LadderEvent::Click, move |event| {
        sink.lock().expect("lock").push(event.clone());
    });

    ladder.update(vec![level(10.0)]);
    assert_eq!(ladder.dispatch(LadderEvent::Click, 0), 1);
    assert_eq!(ladder.dispatch(LadderEvent::Click, 4), 1);

    let seen = seen.lock().expect("lock");
    assert!(seen[0].data.is_some());
    assert!(seen[1].data.is_none());
}

#[test]
fn indices_outside_the_ladder_deliver_nothing() {
    let mut ladder = ladder_with_rows(2);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    ladder.on(LadderEvent::Click, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    ladder.update(vec![level(1.0), level(2.0), level(3.0)]);

    assert_eq!(ladder.dispatch(LadderEvent::Click, 2), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn off_unsubscribes_a_single_handler() {
    let mut ladder = ladder_with_rows(5);
    let calls = Arc::new(AtomicUsize::new(0));

    let first = Arc::clone(&calls);
    let id = ladder.on(LadderEvent::Click, move |_| {
        first.fetch_add(1, Ordering::SeqCst);
    });
    let second = Arc::clone(&calls);
    ladder.on(LadderEvent::Click, move |_| {
        second.fetch_add(10, Ordering::SeqCst);
    });

    assert!(!ladder.off(LadderEvent::Hover, id), "wrong event keeps the handler");
    assert!(ladder.off(LadderEvent::Click, id));
    assert!(!ladder.off(LadderEvent::Click, id));

    assert_eq!(ladder.dispatch(LadderEvent::Click, 0), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[test]
fn destroy_clears_handlers() {
    let mut ladder = ladder_with_rows(5);
    ladder.on(LadderEvent::Click, |_| {});
    ladder.on(LadderEvent::Hover, |_| {});
    ladder.update(vec![level(1.0)]);

    ladder.destroy();
    assert_eq!(ladder.handler_count(LadderEvent::Click), 0);
    assert_eq!(ladder.handler_count(LadderEvent::Hover), 0);
    assert_eq!(ladder.dispatch(LadderEvent::Click, 0), 0);
}

#[test]
fn registry_delivers_in_registration_order() {
    let mut registry = EventRegistry::default();
    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in ["a", "b", "c"] {
        let order = Arc::clone(&order);
        registry.on(LadderEvent::Hover, move |_| {
            order.lock().expect("lock").push(tag);
        });
    }

    let event = RowEvent {
        event: LadderEvent::Hover,
        index: 0,
        data: None,
    };
    assert_eq!(registry.emit(&event), 3);
    assert_eq!(*order.lock().expect("lock"), ["a", "b", "c"]);
}

#[test]
fn event_names_serialize_lowercase() {
    assert_eq!(
        serde_json::to_string(&LadderEvent::Hover).expect("serialize"),
        "\"hover\""
    );
    let click: LadderEvent = serde_json::from_str("\"click\"").expect("deserialize");
    assert_eq!(click, LadderEvent::Click);
}
