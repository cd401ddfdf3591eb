//! Domain layer: event names, listener handles, and the registry.

pub mod event_name;
pub mod listener;
pub mod registry;

pub use event_name::{EventName, IntoEventName};
pub use listener::{Listener, ListenerFn};
pub use registry::Registry;
