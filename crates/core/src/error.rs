//! Domain-level error type shared across crates.

/// Errors produced by domain logic, independent of any transport.
///
/// The API layer maps these onto its response envelope; nothing in
/// this crate knows about HTTP. Business outcomes (bad credentials,
/// inactive account) are envelope codes, not errors, so this enum
/// only covers genuinely unexpected failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Something went wrong internally (e.g. corrupt stored state).
    #[error("Internal error: {0}")]
    Internal(String),
}
