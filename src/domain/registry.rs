//! Named-event listener table with snapshot-on-emit dispatch.
//!
//! [`Registry`] maps each [`EventName`] to an ordered, non-empty sequence of
//! [`Listener`]s. The table sits behind a [`parking_lot::Mutex`] that is held
//! only for bookkeeping and never while listeners run, so a listener may call
//! back into `on`, `off` or `emit` on the same registry.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

use super::event_name::{EventName, IntoEventName};
use super::listener::Listener;
use crate::config::RegistryConfig;
use crate::error::RegistryError;

/// Synchronous publish/subscribe registry.
///
/// `A` is the payload forwarded to listeners on every `emit`. Positional
/// arguments are modelled as a tuple (`(u32, String)`), and `()` means
/// "no arguments".
///
/// # Invariants
///
/// - Listener order per event is registration order.
/// - An event name present in the table always has at least one listener.
///
/// # Concurrency
///
/// `Registry<A>` is `Send + Sync`. Each read-modify-write of a sequence,
/// and each emit snapshot, happens under the table guard.
pub struct Registry<A> {
    table: Mutex<HashMap<EventName, Vec<Listener<A>>>>,
    config: RegistryConfig,
}

impl<A> Registry<A> {
    /// Creates an empty registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Returns the configuration this registry was built with.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Appends `listener` to the sequence for `event_name`.
    ///
    /// An absent listener (`None`) is accepted and ignored. Registering the
    /// same handle twice stores it twice.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgumentType`] if `event_name` is
    /// absent or not a string. The name is checked before the listener.
    pub fn on<'a, N, L>(&self, event_name: N, listener: L) -> Result<(), RegistryError>
    where
        N: IntoEventName,
        L: Into<Option<&'a Listener<A>>>,
        A: 'a,
    {
        let name = required_name(event_name)?;
        let listener: Option<&Listener<A>> = listener.into();
        let Some(listener) = listener else {
            return Ok(());
        };

        let count = {
            let mut table = self.table.lock();
            let listeners = table.entry(name.clone()).or_default();
            listeners.push(listener.clone());
            listeners.len()
        };

        tracing::debug!(event = %name, listeners = count, "listener registered");
        if self.config.crossed_max(count) {
            tracing::warn!(
                event = %name,
                listeners = count,
                max_listeners = self.config.max_listeners,
                "possible listener leak: max listeners exceeded"
            );
        }
        Ok(())
    }

    /// Invokes every listener registered for `event_name` with `args`.
    ///
    /// The listener sequence is copied before the first call, so listeners
    /// added during this emit are not called and listeners removed during
    /// this emit still are. An absent name or an unknown name is a no-op.
    ///
    /// A panicking listener unwinds out of `emit`; later listeners in the
    /// snapshot are skipped. The registry remains usable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgumentType`] if `event_name` is
    /// present but not a string.
    pub fn emit<N>(&self, event_name: N, args: &A) -> Result<(), RegistryError>
    where
        N: IntoEventName,
    {
        let Some(name) = event_name.into_event_name()? else {
            return Ok(());
        };

        let snapshot: Vec<Listener<A>> = {
            let table = self.table.lock();
            match table.get(&name) {
                Some(listeners) => listeners.clone(),
                None => return Ok(()),
            }
        };

        tracing::trace!(event = %name, listeners = snapshot.len(), "emitting");
        for listener in &snapshot {
            listener.call(args);
        }
        Ok(())
    }

    /// Removes every occurrence of `listener` from the sequence for
    /// `event_name`, deleting the entry once it is empty.
    ///
    /// An absent listener, an unknown event, or a listener that was never
    /// registered is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgumentType`] if `event_name` is
    /// absent or not a string.
    pub fn off<'a, N, L>(&self, event_name: N, listener: L) -> Result<(), RegistryError>
    where
        N: IntoEventName,
        L: Into<Option<&'a Listener<A>>>,
        A: 'a,
    {
        let name = required_name(event_name)?;
        let listener: Option<&Listener<A>> = listener.into();
        let Some(listener) = listener else {
            return Ok(());
        };

        let mut table = self.table.lock();
        let Some(listeners) = table.get_mut(&name) else {
            return Ok(());
        };

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(listeners)
            .into_iter()
            .partition(|registered| registered.same_as(listener));
        let emptied = kept.is_empty();
        if emptied {
            table.remove(&name);
        } else {
            *listeners = kept;
        }
        drop(table);
        // Removed handles are released after the guard.
        let removed = removed.len();

        if removed > 0 {
            tracing::debug!(event = %name, removed, "listener removed");
        }
        if emptied {
            tracing::debug!(event = %name, "event entry deleted");
        }
        Ok(())
    }

    /// Returns `true` if at least one listener is registered for `event_name`.
    #[must_use]
    pub fn contains(&self, event_name: &str) -> bool {
        self.table.lock().contains_key(event_name)
    }

    /// Returns the number of listeners registered for `event_name`.
    #[must_use]
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.table.lock().get(event_name).map_or(0, Vec::len)
    }

    /// Returns all event names that currently have listeners, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<EventName> {
        let mut names: Vec<EventName> = self.table.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of events with at least one listener.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Returns `true` if no listeners are registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Registry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        let mut counts: Vec<(&str, usize)> = table
            .iter()
            .map(|(name, listeners)| (name.as_str(), listeners.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("Registry")
            .field("events", &counts)
            .field("config", &self.config)
            .finish()
    }
}

/// Converts a name for `on`/`off`, where absence is an error.
fn required_name<N: IntoEventName>(event_name: N) -> Result<EventName, RegistryError> {
    event_name
        .into_event_name()?
        .ok_or_else(RegistryError::event_name_not_string)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn recorder() -> (Listener<Value>, Arc<Mutex<Vec<Value>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = Listener::new(move |v: &Value| sink.lock().push(v.clone()));
        (listener, seen)
    }

    #[test]
    fn subscribe_and_emit() {
        let registry: Registry<Value> = Registry::new();
        let (listener, seen) = recorder();
        assert!(registry.on("testEvent", &listener).is_ok());

        let payload = json!({ "data": 123 });
        assert!(registry.emit("testEvent", &payload).is_ok());

        assert_eq!(*seen.lock(), vec![payload]);
    }

    #[test]
    fn several_listeners_on_one_event() {
        let registry: Registry<Value> = Registry::new();
        let (first, seen_first) = recorder();
        let (second, seen_second) = recorder();
        let _ = registry.on("multiEvent", &first);
        let _ = registry.on("multiEvent", &second);

        let _ = registry.emit("multiEvent", &json!("payload"));

        assert_eq!(*seen_first.lock(), vec![json!("payload")]);
        assert_eq!(*seen_second.lock(), vec![json!("payload")]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let registry: Registry<Value> = Registry::new();
        let (listener, seen) = recorder();
        let _ = registry.on("removeEvent", &listener);
        let _ = registry.emit("removeEvent", &json!("hello world"));
        assert_eq!(seen.lock().len(), 1);

        assert!(registry.off("removeEvent", &listener).is_ok());
        let _ = registry.emit("removeEvent", &json!("hello universe"));
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn off_with_foreign_listener_is_noop() {
        let registry: Registry<Value> = Registry::new();
        let (listener, seen) = recorder();
        let (other, seen_other) = recorder();
        let _ = registry.on("event", &listener);

        assert!(registry.off("event", &other).is_ok());
        let _ = registry.emit("event", &json!("internship"));

        assert_eq!(*seen.lock(), vec![json!("internship")]);
        assert!(seen_other.lock().is_empty());
    }

    #[test]
    fn off_removes_every_occurrence() {
        let registry: Registry<Value> = Registry::new();
        let (listener, seen) = recorder();
        let _ = registry.on("dup", &listener);
        let _ = registry.on("dup", &listener);
        assert_eq!(registry.listener_count("dup"), 2);

        let _ = registry.emit("dup", &json!(1));
        assert_eq!(seen.lock().len(), 2);

        let _ = registry.off("dup", &listener);
        assert!(!registry.contains("dup"));
    }

    #[test]
    fn last_off_deletes_entry() {
        let registry: Registry<Value> = Registry::new();
        let (listener, _) = recorder();
        let _ = registry.on("tempEvent", &listener);
        let _ = registry.emit("tempEvent", &Value::Null);
        assert!(registry.contains("tempEvent"));

        let _ = registry.off("tempEvent", &listener);
        assert!(!registry.contains("tempEvent"));
        assert!(registry.is_empty());
    }

    #[test]
    fn off_unknown_event_is_noop() {
        let registry: Registry<Value> = Registry::new();
        let (listener, seen) = recorder();
        assert!(registry.off("never", &listener).is_ok());
        assert!(registry.is_empty());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn off_keeps_order_of_remaining_listeners() {
        let registry: Registry<()> = Registry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let make = |label: &'static str| {
            let sink = Arc::clone(&order);
            Listener::new(move |_: &()| sink.lock().push(label))
        };
        let (a, b, c) = (make("a"), make("b"), make("c"));
        for l in [&a, &b, &c] {
            let _ = registry.on("seq", l);
        }

        assert!(registry.off("seq", &b).is_ok());
        let _ = registry.emit("seq", &());
        assert_eq!(*order.lock(), vec!["a", "c"]);
    }

    #[test]
    fn absent_listener_is_ignored() {
        let registry: Registry<Value> = Registry::new();
        assert!(registry.on("event", None).is_ok());
        assert!(registry.off("event", None).is_ok());
        assert!(!registry.contains("event"));
    }

    #[test]
    fn event_name_checked_before_listener() {
        let registry: Registry<Value> = Registry::new();
        assert_eq!(
            registry.on(json!(123), None),
            Err(RegistryError::event_name_not_string())
        );
        assert_eq!(
            registry.off(None::<&str>, None),
            Err(RegistryError::event_name_not_string())
        );
    }

    #[test]
    fn emit_tolerates_absent_and_unknown_names() {
        let registry: Registry<Value> = Registry::new();
        assert!(registry.emit("nonExistentEvent", &json!("vk")).is_ok());
        assert!(registry.emit(None::<&str>, &json!("vk")).is_ok());
        assert!(registry.emit(json!(null), &json!("vk")).is_ok());
        assert!(registry.is_empty());
    }

    #[test]
    fn emit_rejects_non_string_name() {
        let registry: Registry<Value> = Registry::new();
        assert_eq!(
            registry.emit(json!(456), &Value::Null),
            Err(RegistryError::event_name_not_string())
        );
    }

    #[test]
    fn callback_order_is_registration_order() {
        let registry: Registry<()> = Registry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["listener1", "listener2", "listener3"] {
            let sink = Arc::clone(&order);
            let listener = Listener::new(move |_: &()| sink.lock().push(label));
            let _ = registry.on("orderEvent", &listener);
        }

        let _ = registry.emit("orderEvent", &());

        assert_eq!(*order.lock(), vec!["listener1", "listener2", "listener3"]);
    }

    #[test]
    fn event_names_are_sorted() {
        let registry: Registry<()> = Registry::new();
        let l = Listener::new(|_: &()| {});
        let _ = registry.on("b", &l);
        let _ = registry.on("a", &l);
        let names: Vec<String> = registry
            .event_names()
            .into_iter()
            .map(EventName::into_inner)
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registration_beyond_max_still_succeeds() {
        let registry: Registry<()> = Registry::with_config(RegistryConfig { max_listeners: 1 });
        let l = Listener::new(|_: &()| {});
        assert!(registry.on("busy", &l).is_ok());
        assert!(registry.on("busy", &l).is_ok());
        assert!(registry.on("busy", &l).is_ok());
        assert_eq!(registry.listener_count("busy"), 3);
    }

    #[test]
    fn limit_is_crossed_again_after_dropping_below_it() {
        let registry: Registry<()> = Registry::with_config(RegistryConfig { max_listeners: 2 });
        let keep = Listener::new(|_: &()| {});
        let extra = Listener::new(|_: &()| {});
        let _ = registry.on("busy", &keep);
        let _ = registry.on("busy", &keep);
        let _ = registry.on("busy", &extra);
        let count = registry.listener_count("busy");
        assert_eq!(count, 3);
        assert!(registry.config().crossed_max(count));

        let _ = registry.off("busy", &extra);
        let count = registry.listener_count("busy");
        assert_eq!(count, 2);
        assert!(!registry.config().exceeds_max(count));

        let _ = registry.on("busy", &extra);
        let count = registry.listener_count("busy");
        assert!(registry.config().crossed_max(count));
    }

    #[test]
    fn debug_lists_event_counts() {
        let registry: Registry<()> = Registry::new();
        let _ = registry.on("x", &Listener::new(|_: &()| {}));
        let out = format!("{registry:?}");
        assert!(out.contains("\"x\""));
        assert!(out.contains("max_listeners"));
    }
}
