//! EventEmitter — named-event pub/sub with middleware gates.
//!
//! Listeners and middleware are stored per event name as `Arc`s so snapshots
//! are cheap. Snapshot-on-emit semantics mean:
//!   - A listener removed *during* emission is still called in that round.
//!   - A listener added *during* emission is NOT called until the next emit.
//!   - Middleware added or removed during emission takes effect next emit.
//!
//! Once-listeners are marked spent (atomically, before their callback runs)
//! and swept out of the stored list after the pass. A once-listener whose
//! callback re-emits its own event therefore fires exactly once.
//!
//! Panics inside a listener or middleware propagate to the caller and abort
//! the rest of that emission — no error isolation at this level.
//!
//! All methods take `&self` (interior mutability via `parking_lot::Mutex`).
//! No lock is held while callbacks run, so listeners may call `on()`,
//! `off()`, `remove_*()` or `emit()` on the same emitter.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::middleware::{run_gate, MiddlewareFn, Next};
use crate::names::EventNames;
use crate::options::EmitterOptions;

/// A listener ID returned by [`EventEmitter::on`] / [`EventEmitter::once`]
/// that can be passed to [`EventEmitter::off`].
///
/// A registration that fans out over several event names shares one ID.
pub type ListenerId = u64;

/// Closure type for event listeners.
pub type ListenerFn = dyn Fn(&Value) + Send + Sync;

/// What a single `emit` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Listener callbacks invoked.
    pub delivered: usize,
    /// Listeners held shut by middleware.
    pub gated: usize,
}

struct ListenerRecord {
    id: ListenerId,
    once: bool,
    spent: AtomicBool,
    callback: Arc<ListenerFn>,
}

impl ListenerRecord {
    /// Take the right to fire. Persistent listeners always get it; a
    /// once-listener gets it a single time.
    fn claim(&self) -> bool {
        !self.once || !self.spent.swap(true, Ordering::AcqRel)
    }

    fn is_spent(&self) -> bool {
        self.spent.load(Ordering::Acquire)
    }
}

type ListenerMap = BTreeMap<String, Vec<Arc<ListenerRecord>>>;
type MiddlewareMap = BTreeMap<String, Vec<Arc<MiddlewareFn>>>;

/// Synchronous named-event emitter.
///
/// Payloads are `serde_json::Value`s. Each instance owns its own registries;
/// emitters never share state.
pub struct EventEmitter {
    listeners: Mutex<ListenerMap>,
    middleware: Mutex<MiddlewareMap>,
    next_id: AtomicU64,
    options: EmitterOptions,
}

impl EventEmitter {
    /// Create a new, empty emitter with default options.
    pub fn new() -> Self {
        Self::with_options(EmitterOptions::default())
    }

    /// Create a new, empty emitter.
    pub fn with_options(options: EmitterOptions) -> Self {
        Self {
            listeners: Mutex::new(BTreeMap::new()),
            middleware: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            options,
        }
    }

    /// The options this emitter was built with.
    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register `callback` for one or more events and return its [`ListenerId`].
    ///
    /// `names` may be a list, or a single string holding several names
    /// separated by `,`, `, ` or a space. Registering the same callback twice
    /// is allowed; each registration fires independently.
    pub fn on(
        &self,
        names: impl Into<EventNames>,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> ListenerId {
        self.register(names.into(), Arc::new(callback), false)
    }

    /// Like [`on`](Self::on), but each registration is removed after its
    /// first invocation.
    pub fn once(
        &self,
        names: impl Into<EventNames>,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> ListenerId {
        self.register(names.into(), Arc::new(callback), true)
    }

    fn register(&self, names: EventNames, callback: Arc<ListenerFn>, once: bool) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self.listeners.lock();
        for event in names.expand(true) {
            trace!(event = %event, id, once, "listener registered");
            listeners.entry(event).or_default().push(Arc::new(ListenerRecord {
                id,
                once,
                spent: AtomicBool::new(false),
                callback: Arc::clone(&callback),
            }));
        }
        id
    }

    /// Add a middleware gate to one or more events.
    ///
    /// A list of names fans out per element, but a single delimited string
    /// such as `"a,b"` is NOT split: it gates one event literally named
    /// `"a,b"`. This differs from [`on`](Self::on); set
    /// [`EmitterOptions::split_middleware_names`] to split here as well.
    pub fn middleware(
        &self,
        names: impl Into<EventNames>,
        f: impl Fn(&Value, &mut Next, &str) + Send + Sync + 'static,
    ) {
        let f: Arc<MiddlewareFn> = Arc::new(f);
        let mut middleware = self.middleware.lock();
        for event in names.into().expand(self.options.split_middleware_names) {
            trace!(event = %event, "middleware registered");
            middleware.entry(event).or_default().push(Arc::clone(&f));
        }
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Remove every listener registered under `id`, on every event.
    ///
    /// Does nothing if `id` is not present (safe to call multiple times).
    pub fn off(&self, id: ListenerId) {
        for records in self.listeners.lock().values_mut() {
            records.retain(|r| r.id != id);
        }
    }

    /// Delete the listener entries of the given events. Middleware is kept.
    pub fn remove_listeners(&self, names: impl Into<EventNames>) {
        self.remove_entries(names.into(), false);
    }

    /// Delete both the listener and the middleware entries of the given events.
    pub fn remove_listeners_and_middleware(&self, names: impl Into<EventNames>) {
        self.remove_entries(names.into(), true);
    }

    /// Delete every listener of every event. Middleware is kept.
    pub fn remove_all_listeners(&self) {
        self.listeners.lock().clear();
    }

    /// Delete the middleware entries of the given events.
    pub fn remove_middleware(&self, names: impl Into<EventNames>) {
        let names = names.into().expand(false);
        let mut middleware = self.middleware.lock();
        for event in &names {
            middleware.remove(event);
        }
    }

    /// Delete every middleware of every event.
    pub fn remove_all_middleware(&self) {
        self.middleware.lock().clear();
    }

    fn remove_entries(&self, names: EventNames, with_middleware: bool) {
        let names = names.expand(false);
        {
            let mut listeners = self.listeners.lock();
            for event in &names {
                listeners.remove(event);
            }
        }
        if with_middleware {
            let mut middleware = self.middleware.lock();
            for event in &names {
                middleware.remove(event);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Emit `event` with `data`, running its middleware before each listener.
    ///
    /// `event` is looked up by its `Display` form, so `emit(42, ..)` reaches
    /// listeners registered under `"42"`.
    pub fn emit(&self, event: impl Display, data: impl Into<Value>) -> EmitReport {
        self.dispatch(&event.to_string(), data.into(), false)
    }

    /// Emit `event` with `data`, bypassing middleware entirely.
    pub fn emit_silent(&self, event: impl Display, data: impl Into<Value>) -> EmitReport {
        self.dispatch(&event.to_string(), data.into(), true)
    }

    fn dispatch(&self, event: &str, mut data: Value, silent: bool) -> EmitReport {
        let mut report = EmitReport::default();

        // Snapshot under the locks; both are released before any callback.
        let snapshot: Vec<Arc<ListenerRecord>> = match self.listeners.lock().get(event) {
            Some(records) if !records.is_empty() => records.clone(),
            _ => {
                trace!(event, "emit with no listeners");
                return report;
            }
        };
        let chain: Vec<Arc<MiddlewareFn>> = if silent {
            Vec::new()
        } else {
            self.middleware.lock().get(event).cloned().unwrap_or_default()
        };

        for record in &snapshot {
            if record.is_spent() {
                continue;
            }
            if !chain.is_empty() {
                let gate = run_gate(&chain, &mut data, event);
                if !gate.is_open() {
                    debug!(
                        event,
                        passed = gate.passed,
                        required = gate.required,
                        "listener held by middleware"
                    );
                    report.gated += 1;
                    continue;
                }
            }
            if !record.claim() {
                continue;
            }
            (record.callback)(&data);
            report.delivered += 1;
        }

        if snapshot.iter().any(|r| r.is_spent()) {
            self.sweep_spent(event);
        }
        report
    }

    /// Drop spent once-listeners from the stored list for `event`, keeping
    /// the order of the rest. An emptied list stays in the map.
    fn sweep_spent(&self, event: &str) {
        let mut listeners = self.listeners.lock();
        if let Some(records) = listeners.get_mut(event) {
            let before = records.len();
            records.retain(|r| !r.is_spent());
            let removed = before - records.len();
            if removed > 0 {
                debug!(event, removed, "once-listeners removed");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// True if any event key is present, even one whose list is now empty.
    pub fn has_listeners(&self) -> bool {
        !self.listeners.lock().is_empty()
    }

    /// True if `event` has at least one listener that can still fire.
    pub fn has(&self, event: impl Display) -> bool {
        self.listener_count(event) > 0
    }

    /// Number of listeners on `event` that can still fire.
    pub fn listener_count(&self, event: impl Display) -> usize {
        self.listeners
            .lock()
            .get(&event.to_string())
            .map_or(0, |records| records.iter().filter(|r| !r.is_spent()).count())
    }

    /// Number of middleware gating `event`.
    pub fn middleware_count(&self, event: impl Display) -> usize {
        self.middleware
            .lock()
            .get(&event.to_string())
            .map_or(0, Vec::len)
    }

    /// Keys of the listener map in sorted order, including emptied ones.
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.lock().keys().cloned().collect()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}
