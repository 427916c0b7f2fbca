//! `EventNames` — one event name or an explicit list of them.
//!
//! Registration and removal methods accept `impl Into<EventNames>`, so callers
//! can pass `"save"`, `String`, `["save", "load"]` or a `Vec` interchangeably.
//!
//! A single name may also carry several events separated by `,`, `, ` or a
//! space (`"save,load"`, `"save, load"`, `"save load"`). Whether that string
//! is split depends on the caller: `on`/`once` split, `middleware` and the
//! removal methods do not.

/// A single event name or a sequence of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventNames {
    One(String),
    Many(Vec<String>),
}

impl EventNames {
    /// Flatten into the concrete names to act on.
    ///
    /// `Many` always fans out per element. When `split` is true every name
    /// (including each element of `Many`) is further broken on the delimiter
    /// set; otherwise names are taken verbatim.
    pub fn expand(self, split: bool) -> Vec<String> {
        let names = match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        };
        if !split {
            return names;
        }
        names.iter().flat_map(|n| split_delimited(n)).collect()
    }
}

/// Split `name` on `,`, `, ` and ` `.
///
/// A name containing none of the delimiters comes back unchanged as the only
/// element, including the empty name. Empty fragments between adjacent
/// delimiters are dropped.
pub fn split_delimited(name: &str) -> Vec<String> {
    if !name.contains([',', ' ']) {
        return vec![name.to_string()];
    }
    name.split([',', ' '])
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<&str> for EventNames {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for EventNames {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<&String> for EventNames {
    fn from(name: &String) -> Self {
        Self::One(name.clone())
    }
}

impl From<Vec<String>> for EventNames {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for EventNames {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EventNames {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EventNames {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|n| n.to_string()).collect())
    }
}
