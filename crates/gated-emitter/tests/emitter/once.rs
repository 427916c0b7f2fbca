//! Tests for once-listeners and the sweep that follows them.

use gated_emitter::EventEmitter;
use serde_json::Value;
use std::sync::Arc;

use super::{entries, make_log};

#[test]
fn only_listen_to_a_specific_event_once() {
    let emitter = EventEmitter::new();
    let log = make_log();
    let log_clone = Arc::clone(&log);

    emitter.once("test-event", move |_| log_clone.lock().unwrap().push("hit".to_string()));
    emitter.emit("test-event", Value::Null);
    emitter.emit("test-event", Value::Null);

    assert_eq!(entries(&log).len(), 1);
}

#[test]
fn has_is_false_after_only_once_listener_fired() {
    let emitter = EventEmitter::new();
    emitter.once("e", |_| {});
    assert!(emitter.has("e"));

    emitter.emit("e", Value::Null);

    assert!(!emitter.has("e"));
    // The emptied key is still stored.
    assert!(emitter.has_listeners());
    assert_eq!(emitter.event_names(), vec!["e"]);
}

#[test]
fn sweep_keeps_order_of_persistent_listeners() {
    let emitter = EventEmitter::new();
    let log = make_log();

    {
        let log = Arc::clone(&log);
        emitter.on("e", move |_| log.lock().unwrap().push("a".to_string()));
    }
    {
        let log = Arc::clone(&log);
        emitter.once("e", move |_| log.lock().unwrap().push("once".to_string()));
    }
    {
        let log = Arc::clone(&log);
        emitter.on("e", move |_| log.lock().unwrap().push("b".to_string()));
    }

    emitter.emit("e", Value::Null);
    emitter.emit("e", Value::Null);

    assert_eq!(entries(&log), vec!["a", "once", "b", "a", "b"]);
    assert_eq!(emitter.listener_count("e"), 2);
}

#[test]
fn adjacent_once_listeners_are_all_removed() {
    let emitter = EventEmitter::new();
    let log = make_log();

    for tag in ["x", "y", "z"] {
        let log = Arc::clone(&log);
        emitter.once("e", move |_| log.lock().unwrap().push(tag.to_string()));
    }

    emitter.emit("e", Value::Null);
    emitter.emit("e", Value::Null);

    assert_eq!(entries(&log), vec!["x", "y", "z"]);
    assert_eq!(emitter.listener_count("e"), 0);
}

#[test]
fn gated_once_listener_stays_registered() {
    let emitter = EventEmitter::new();
    let log = make_log();
    let log_clone = Arc::clone(&log);

    emitter.once("e", move |_| log_clone.lock().unwrap().push("hit".to_string()));
    emitter.middleware("e", |_, _, _| {});

    emitter.emit("e", Value::Null);
    assert!(entries(&log).is_empty());
    assert!(emitter.has("e"), "a gated once-listener has not fired yet");

    emitter.emit_silent("e", Value::Null);
    assert_eq!(entries(&log), vec!["hit"]);
    assert!(!emitter.has("e"));
}

#[test]
fn once_applies_to_every_name_of_a_fan_out() {
    let emitter = EventEmitter::new();
    let log = make_log();
    let log_clone = Arc::clone(&log);

    emitter.once("a, b", move |d| log_clone.lock().unwrap().push(d.to_string()));
    emitter.emit("a", 1);
    emitter.emit("a", 2);
    emitter.emit("b", 3);
    emitter.emit("b", 4);

    assert_eq!(entries(&log), vec!["1", "3"]);
}

#[test]
fn once_listener_is_swept_after_a_panicking_emit() {
    let emitter = EventEmitter::new();
    let log = make_log();
    let log_clone = Arc::clone(&log);

    emitter.once("e", move |_| log_clone.lock().unwrap().push("once".to_string()));
    emitter.on("e", |d| {
        if d.as_bool() == Some(true) {
            panic!("abort");
        }
    });

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        emitter.emit("e", true);
    }));
    assert!(result.is_err());
    assert_eq!(entries(&log), vec!["once"]);
    assert!(emitter.has("e"), "persistent listener is still there");
    assert_eq!(emitter.listener_count("e"), 1, "spent listener no longer counts");

    emitter.emit("e", false);

    assert_eq!(entries(&log), vec!["once"], "spent listener never fires again");
    assert_eq!(emitter.listener_count("e"), 1);
}
