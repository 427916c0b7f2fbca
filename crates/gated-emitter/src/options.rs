//! Construction options for [`EventEmitter`](crate::EventEmitter).

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Options accepted by [`EventEmitter::with_options`](crate::EventEmitter::with_options).
///
/// Deserializable so hosts can keep emitter settings next to the rest of their
/// JSON configuration. Missing fields take their defaults; unknown fields are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EmitterOptions {
    /// Split delimited names (`"a,b"`) passed to `middleware` the same way
    /// `on` does.
    ///
    /// Default: `false`, so `middleware("a,b", ..)` gates a single event
    /// literally named `"a,b"`.
    pub split_middleware_names: bool,
}

impl EmitterOptions {
    /// Parse options from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse options from a JSON string.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
