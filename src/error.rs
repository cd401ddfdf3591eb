//! Registry error types.
//!
//! [`RegistryError`] is the single error type raised by the registry. It is
//! returned synchronously from `on`, `emit` and `off` when an argument has
//! the wrong kind. Listener panics are never caught or wrapped here.

/// Errors raised by [`crate::domain::Registry`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An argument was missing or had the wrong kind.
    #[error("{argument} must be a {expected}")]
    InvalidArgumentType {
        /// Name of the offending argument (e.g. `"eventName"`).
        argument: &'static str,
        /// Kind the argument was expected to have (e.g. `"string"`).
        expected: &'static str,
    },
}

impl RegistryError {
    /// Error for an event name that is absent or not a string.
    #[must_use]
    pub const fn event_name_not_string() -> Self {
        Self::InvalidArgumentType {
            argument: "eventName",
            expected: "string",
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::InvalidArgumentType { .. } => "invalid_argument_type",
        }
    }
}
