//! In-memory key-value store for tests and embedding.

use super::backend::{fold_name, Namespace, NamespaceHandle, RegistrationBackend};
use crate::{LaunchPadError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Namespace path -> folded name -> (stored name, value).
type Namespaces = BTreeMap<String, BTreeMap<String, (String, String)>>;

/// Volatile backend. Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    namespaces: Arc<Mutex<Namespaces>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `namespace` has been created.
    pub fn contains_namespace(&self, namespace: &Namespace) -> Result<bool> {
        Ok(lock(&self.namespaces)?.contains_key(namespace.as_str()))
    }
}

#[cfg(test)]
impl MemoryBackend {
    /// Poison the shared lock the way a panicking writer would.
    pub(crate) fn poison(&self) {
        let namespaces = Arc::clone(&self.namespaces);
        let _ = std::thread::spawn(move || {
            let _guard = namespaces.lock();
            panic!("writer panicked while holding the store lock");
        })
        .join();
    }
}

fn lock(namespaces: &Mutex<Namespaces>) -> Result<MutexGuard<'_, Namespaces>> {
    namespaces.lock().map_err(|_| LaunchPadError::StoreAccess {
        message: "Failed to acquire in-memory store lock".to_string(),
    })
}

impl RegistrationBackend for MemoryBackend {
    type Handle = MemoryNamespace;

    fn open_or_create(&self, namespace: &Namespace) -> Result<MemoryNamespace> {
        lock(&self.namespaces)?
            .entry(namespace.as_str().to_string())
            .or_default();
        Ok(MemoryNamespace {
            namespaces: Arc::clone(&self.namespaces),
            namespace: namespace.as_str().to_string(),
        })
    }

    fn open_existing(&self, namespace: &Namespace) -> Result<Option<MemoryNamespace>> {
        if !self.contains_namespace(namespace)? {
            return Ok(None);
        }
        Ok(Some(MemoryNamespace {
            namespaces: Arc::clone(&self.namespaces),
            namespace: namespace.as_str().to_string(),
        }))
    }
}

/// Handle onto one namespace of a [`MemoryBackend`].
pub struct MemoryNamespace {
    namespaces: Arc<Mutex<Namespaces>>,
    namespace: String,
}

impl NamespaceHandle for MemoryNamespace {
    fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        let mut namespaces = lock(&self.namespaces)?;
        let values = namespaces.entry(self.namespace.clone()).or_default();
        values
            .entry(fold_name(name))
            .and_modify(|(_, stored)| *stored = value.to_string())
            .or_insert_with(|| (name.to_string(), value.to_string()));
        Ok(())
    }

    fn get_entry(&self, name: &str) -> Result<Option<(String, String)>> {
        Ok(lock(&self.namespaces)?
            .get(&self.namespace)
            .and_then(|values| values.get(&fold_name(name)).cloned()))
    }

    fn delete_value(&mut self, name: &str) -> Result<bool> {
        Ok(lock(&self.namespaces)?
            .get_mut(&self.namespace)
            .map(|values| values.remove(&fold_name(name)).is_some())
            .unwrap_or(false))
    }

    fn value_names(&self) -> Result<Vec<String>> {
        Ok(lock(&self.namespaces)?
            .get(&self.namespace)
            .map(|values| values.values().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default())
    }
}
