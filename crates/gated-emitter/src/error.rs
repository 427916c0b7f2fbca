use thiserror::Error;

// ---------------------------------------------------------------------------
// EmitterError
// ---------------------------------------------------------------------------

/// Errors surfaced by the emitter's fallible entry points.
///
/// Registration and dispatch never fail: panics raised inside listener or
/// middleware callbacks propagate to the caller of `emit` unchanged.
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("Invalid emitter options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Convenience alias — the default error type is `EmitterError`.
pub type Result<T, E = EmitterError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
