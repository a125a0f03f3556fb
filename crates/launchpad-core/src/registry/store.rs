//! The LaunchPad registration store.

use super::backend::{Namespace, NamespaceHandle, RegistrationBackend};
use super::memory::MemoryBackend;
use super::sqlite::SqliteBackend;
use super::types::Registration;
use crate::{LaunchPadError, Result};
use std::path::Path;
use tracing::debug;

/// Registers, unregisters and lists LaunchPad applications.
///
/// Holds no registration state of its own: every call opens the namespace,
/// performs one operation and drops the handle before returning.
#[derive(Debug, Clone)]
pub struct RegistrationStore<B: RegistrationBackend = SqliteBackend> {
    backend: B,
    namespace: Namespace,
}

impl RegistrationStore<SqliteBackend> {
    /// Store at the default per-user location.
    pub fn open() -> Result<Self> {
        Ok(Self::with_backend(SqliteBackend::open()?))
    }

    /// Store in a specific SQLite database file.
    pub fn open_at(db_path: impl AsRef<Path>) -> Self {
        Self::with_backend(SqliteBackend::at(db_path.as_ref()))
    }
}

impl RegistrationStore<MemoryBackend> {
    /// Volatile store, mostly useful in tests.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }
}

impl<B: RegistrationBackend> RegistrationStore<B> {
    /// Store over `backend` using the fixed LaunchPad namespace.
    pub fn with_backend(backend: B) -> Self {
        Self::with_namespace(backend, Namespace::app_registration())
    }

    pub fn with_namespace(backend: B, namespace: Namespace) -> Self {
        Self { backend, namespace }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Register an application, replacing the path of an existing title.
    ///
    /// Titles are case-insensitive; re-registering under different casing
    /// keeps the original title and replaces the path.
    ///
    /// Fails with `InvalidArgument` when `title` or `path` is missing, empty
    /// or whitespace-only; the store is not opened in that case.
    pub fn register<'a>(
        &self,
        title: impl Into<Option<&'a str>>,
        path: impl Into<Option<&'a str>>,
    ) -> Result<()> {
        let title = require_non_blank("title", title.into())?;
        let path = require_non_blank("path", path.into())?;

        let mut handle = self.backend.open_or_create(&self.namespace)?;
        handle.set_value(title, path)?;

        debug!("Registered {} -> {}", title, path);
        Ok(())
    }

    /// Unregister an application.
    ///
    /// Only a missing title is rejected (`NullArgument`). Unknown titles,
    /// blank ones included, are ignored.
    pub fn unregister<'a>(&self, title: impl Into<Option<&'a str>>) -> Result<()> {
        let title = title
            .into()
            .ok_or(LaunchPadError::NullArgument { param: "title" })?;

        let mut handle = self.backend.open_or_create(&self.namespace)?;
        if handle.delete_value(title)? {
            debug!("Unregistered {}", title);
        } else {
            debug!("Nothing to unregister for {:?}", title);
        }
        Ok(())
    }

    /// All registrations, sorted by title (ordinal comparison).
    ///
    /// Returns an empty list without creating anything when the namespace
    /// does not exist yet.
    pub fn registrations(&self) -> Result<Vec<Registration>> {
        let Some(handle) = self.backend.open_existing(&self.namespace)? else {
            return Ok(Vec::new());
        };

        let mut registrations: Vec<Registration> = handle
            .entries()?
            .into_iter()
            .map(Registration::from)
            .collect();
        registrations.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(registrations)
    }

    /// Look up a single registration by title (case-insensitive).
    pub fn get_registration(&self, title: &str) -> Result<Option<Registration>> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        let Some(handle) = self.backend.open_existing(&self.namespace)? else {
            return Ok(None);
        };

        Ok(handle.get_entry(title)?.map(Registration::from))
    }
}

fn require_non_blank<'a>(param: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(LaunchPadError::blank_argument(param)),
    }
}
