//! Event name keys and argument conversion.
//!
//! [`EventName`] is a newtype over `String` used as the key of the listener
//! table. [`IntoEventName`] turns caller-supplied arguments into one of three
//! outcomes: a name, the absence-of-value marker, or
//! [`RegistryError::InvalidArgumentType`].

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// String key identifying a class of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    /// Creates an `EventName` from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name, returning the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.0
    }
}

/// Conversion of a caller-supplied event name argument.
///
/// `Ok(None)` is the absence-of-value marker. Whether absence is an error
/// depends on the operation: `emit` ignores it, `on` and `off` reject it.
pub trait IntoEventName {
    /// Converts `self` into an optional [`EventName`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgumentType`] if the value is present
    /// but is not a string.
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError>;
}

impl IntoEventName for EventName {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        Ok(Some(self))
    }
}

impl IntoEventName for &EventName {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        Ok(Some(self.clone()))
    }
}

impl IntoEventName for &str {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        Ok(Some(EventName::new(self)))
    }
}

impl IntoEventName for String {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        Ok(Some(EventName(self)))
    }
}

impl IntoEventName for &String {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        Ok(Some(EventName::new(self.as_str())))
    }
}

impl<T: IntoEventName> IntoEventName for Option<T> {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        match self {
            Some(inner) => inner.into_event_name(),
            None => Ok(None),
        }
    }
}

/// Dynamic values: JSON strings are names, `null` is absence, anything
/// else is the wrong kind.
impl IntoEventName for &serde_json::Value {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        match self {
            serde_json::Value::String(s) => Ok(Some(EventName::new(s.as_str()))),
            serde_json::Value::Null => Ok(None),
            _ => Err(RegistryError::event_name_not_string()),
        }
    }
}

impl IntoEventName for serde_json::Value {
    fn into_event_name(self) -> Result<Option<EventName>, RegistryError> {
        match self {
            Self::String(s) => Ok(Some(EventName(s))),
            other => (&other).into_event_name(),
        }
    }
}
