//! # event-registry
//!
//! Synchronous publish/subscribe registry: register listeners under event
//! names, emit events with a payload, and deregister listeners.
//!
//! ## Architecture
//!
//! ```text
//! caller ── on/off ──► Registry ── table: EventName → [Listener, ...]
//!    │                    │
//!    └──── emit ─────────►├─ snapshot sequence (under guard)
//!                         └─ call each listener in order (guard released)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use event_registry::{Listener, Registry};
//!
//! let registry: Registry<String> = Registry::new();
//! let log = Listener::new(|msg: &String| println!("{msg}"));
//!
//! registry.on("data", &log)?;
//! registry.emit("data", &"Hello, world!".to_string())?;
//! registry.off("data", &log)?;
//! assert!(!registry.contains("data"));
//! # Ok::<(), event_registry::RegistryError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;

pub use config::RegistryConfig;
pub use domain::{EventName, IntoEventName, Listener, ListenerFn, Registry};
pub use error::RegistryError;
