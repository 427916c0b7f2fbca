//! Tests for emitters built from `EmitterOptions`.

use gated_emitter::{EmitterOptions, EventEmitter};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{entries, make_log};

#[test]
fn default_options_are_used_by_new() {
    let emitter = EventEmitter::new();
    assert_eq!(emitter.options(), &EmitterOptions::default());
}

#[test]
fn split_middleware_names_gates_each_event() {
    let opts = EmitterOptions::from_value(json!({ "splitMiddlewareNames": true })).unwrap();
    let emitter = EventEmitter::with_options(opts);
    let log = make_log();
    let log_clone = Arc::clone(&log);

    emitter.on("a, b", move |_| log_clone.lock().unwrap().push("called".to_string()));
    emitter.middleware("a, b", |_, _, _| {});

    assert_eq!(emitter.middleware_count("a"), 1);
    assert_eq!(emitter.middleware_count("b"), 1);
    assert_eq!(emitter.middleware_count("a, b"), 0);

    emitter.emit("a", Value::Null);
    emitter.emit("b", Value::Null);
    assert!(entries(&log).is_empty());
}

#[test]
fn split_option_does_not_affect_removal() {
    let emitter = EventEmitter::with_options(EmitterOptions {
        split_middleware_names: true,
    });
    emitter.middleware("a b", |_, _, _| {});

    // Removal takes names verbatim.
    emitter.remove_middleware("a b");
    assert_eq!(emitter.middleware_count("a"), 1);

    emitter.remove_middleware(["a", "b"]);
    assert_eq!(emitter.middleware_count("a"), 0);
    assert_eq!(emitter.middleware_count("b"), 0);
}
