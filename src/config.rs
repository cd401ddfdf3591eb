//! Registry configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing or unparsable values fall back to defaults.

/// Default listener count per event above which a warning is logged.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Tunables for a [`crate::domain::Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Listener count per event above which a leak warning is logged.
    ///
    /// `0` disables the warning. Registration is never refused.
    pub max_listeners: usize,
}

impl RegistryConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file, then
    /// reads `EVENT_REGISTRY_MAX_LISTENERS`.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let max_listeners = parse_env("EVENT_REGISTRY_MAX_LISTENERS", DEFAULT_MAX_LISTENERS);

        Self { max_listeners }
    }

    /// Returns `true` if `count` listeners on one event should trigger a warning.
    #[must_use]
    pub const fn exceeds_max(&self, count: usize) -> bool {
        self.max_listeners != 0 && count > self.max_listeners
    }

    /// Returns `true` if growing to `count` listeners is the registration
    /// that first exceeds the limit.
    ///
    /// Dropping back under the limit and growing past it again crosses anew.
    #[must_use]
    pub const fn crossed_max(&self, count: usize) -> bool {
        self.exceeds_max(count) && !self.exceeds_max(count.saturating_sub(1))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
