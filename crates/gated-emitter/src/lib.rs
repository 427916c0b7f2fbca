//! Synchronous in-process event emitter with middleware gates.
//!
//! # Overview
//!
//! [`EventEmitter`] maps event names to ordered listener lists and ordered
//! middleware chains. `emit` runs each listener in registration order, first
//! asking the event's middleware to let it through; `emit_silent` skips the
//! middleware. `once` listeners are dropped after they fire.
//!
//! ```
//! use gated_emitter::EventEmitter;
//! use serde_json::json;
//!
//! let emitter = EventEmitter::new();
//! emitter.on("user-saved, user-deleted", |data| println!("changed: {data}"));
//! emitter.middleware("user-saved", |data, next, _event| {
//!     if data["id"].is_string() {
//!         next.proceed();
//!     }
//! });
//!
//! let report = emitter.emit("user-saved", json!({ "id": "u1" }));
//! assert_eq!(report.delivered, 1);
//! ```
//!
//! # Modules
//!
//! - [`emitter`] — [`EventEmitter`], [`ListenerId`], [`EmitReport`].
//! - [`middleware`] — [`Next`] proceed handle and [`MiddlewareFn`].
//! - [`names`] — [`EventNames`] and the delimiter-splitting rule.
//! - [`options`] — [`EmitterOptions`].
//! - [`error`] — [`EmitterError`].

pub mod emitter;
pub mod error;
pub mod middleware;
pub mod names;
pub mod options;

pub use emitter::{EmitReport, EventEmitter, ListenerFn, ListenerId};
pub use error::{EmitterError, Result};
pub use middleware::{MiddlewareFn, Next};
pub use names::EventNames;
pub use options::EmitterOptions;
