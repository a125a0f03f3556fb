//! Store capability used by [`RegistrationStore`](super::RegistrationStore).
//!
//! A backend opens a [`Namespace`] and hands out a short-lived handle. The
//! handle is released when dropped, so every operation holds it only for
//! the duration of one call.

use crate::config::RegistrationConfig;
use crate::{LaunchPadError, Result};
use std::fmt;

/// Location of a set of values inside a backend, e.g.
/// `Software\PW\AppRegistration`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from a non-blank path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(LaunchPadError::blank_argument("namespace"));
        }
        Ok(Self(path))
    }

    /// The fixed namespace that holds LaunchPad registrations.
    pub fn app_registration() -> Self {
        Self(RegistrationConfig::NAMESPACE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::app_registration()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup key for a value name. Names are case-insensitive: `Notepad` and
/// `NOTEPAD` address the same value.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// An opened namespace. Values are plain strings keyed by name.
///
/// Name lookups go through [`fold_name`]; the stored name keeps the casing
/// it was first written with.
pub trait NamespaceHandle {
    /// Set `name` to `value`, replacing any previous value under the same
    /// folded name.
    fn set_value(&mut self, name: &str, value: &str) -> Result<()>;

    /// Read the stored `(name, value)` pair matching `name`.
    fn get_entry(&self, name: &str) -> Result<Option<(String, String)>>;

    /// Read the value stored under `name`.
    fn get_value(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get_entry(name)?.map(|(_, value)| value))
    }

    /// Delete `name` if present. Returns whether a value was removed.
    fn delete_value(&mut self, name: &str) -> Result<bool>;

    /// Names of all values in the namespace, in no particular order.
    fn value_names(&self) -> Result<Vec<String>>;

    /// All `(name, value)` pairs in the namespace, in no particular order.
    ///
    /// Names that disappear between enumeration and read are skipped.
    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for name in self.value_names()? {
            match self.get_value(&name)? {
                Some(value) => entries.push((name, value)),
                None => tracing::warn!("Value vanished while listing: {}", name),
            }
        }
        Ok(entries)
    }
}

/// A per-user persistent key-value store.
pub trait RegistrationBackend: Send + Sync {
    type Handle: NamespaceHandle;

    /// Open `namespace`, creating it (and the store) if missing.
    fn open_or_create(&self, namespace: &Namespace) -> Result<Self::Handle>;

    /// Open `namespace` only if it already exists. Never creates anything.
    fn open_existing(&self, namespace: &Namespace) -> Result<Option<Self::Handle>>;
}
