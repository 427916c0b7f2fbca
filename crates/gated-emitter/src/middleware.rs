//! Middleware gates.
//!
//! A middleware receives the current payload, a [`Next`] handle and the event
//! name. It lets the listener through by calling [`Next::proceed`] or swaps
//! the payload via [`Next::proceed_with`]. A middleware that returns without
//! proceeding keeps the gate shut for the listener being evaluated.

use std::sync::Arc;

use serde_json::Value;

/// Closure type for middleware: `(data, next, event_name)`.
pub type MiddlewareFn = dyn Fn(&Value, &mut Next, &str) + Send + Sync;

/// Proceed handle given to each middleware invocation.
///
/// Every middleware gets a fresh handle, so calling `proceed` more than once
/// still counts as a single pass.
#[derive(Debug, Default)]
pub struct Next {
    proceeded: bool,
    replacement: Option<Value>,
}

impl Next {
    /// Let the event through unchanged.
    pub fn proceed(&mut self) {
        self.proceeded = true;
    }

    /// Let the event through, replacing the payload with `data`.
    ///
    /// A `Value::Null` replacement is ignored and behaves like
    /// [`proceed`](Self::proceed). When called several times the last non-null
    /// value wins.
    pub fn proceed_with(&mut self, data: Value) {
        self.proceeded = true;
        if !data.is_null() {
            self.replacement = Some(data);
        }
    }

    /// Whether this handle has been proceeded.
    pub fn has_proceeded(&self) -> bool {
        self.proceeded
    }
}

/// Result of running one middleware chain for one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Gate {
    /// Middleware that called proceed at least once.
    pub passed: usize,
    /// Length of the chain.
    pub required: usize,
}

impl Gate {
    pub fn is_open(&self) -> bool {
        self.passed == self.required
    }
}

/// Run every middleware in `chain`, in order, against `data`.
///
/// All middleware run regardless of earlier outcomes. Replacements are written
/// back to `data` as soon as the middleware that produced them returns.
pub(crate) fn run_gate(chain: &[Arc<MiddlewareFn>], data: &mut Value, event: &str) -> Gate {
    let mut passed = 0;
    for mw in chain {
        let mut next = Next::default();
        mw(&*data, &mut next, event);
        if next.proceeded {
            passed += 1;
        }
        if let Some(replacement) = next.replacement {
            *data = replacement;
        }
    }
    Gate {
        passed,
        required: chain.len(),
    }
}
