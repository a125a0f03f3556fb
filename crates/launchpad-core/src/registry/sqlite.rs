//! SQLite-backed per-user key-value store.
//!
//! Every handle owns its own `Connection`, so the database is opened once
//! per operation and closed when the handle is dropped.

use super::backend::{fold_name, Namespace, NamespaceHandle, RegistrationBackend};
use crate::config::RegistrationConfig;
use crate::{LaunchPadError, Result};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key-value store kept in a single SQLite database file.
///
/// Uses WAL mode and a busy timeout for safe concurrent access across
/// processes.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    db_path: PathBuf,
}

impl SqliteBackend {
    /// Backend at the default platform location.
    pub fn open() -> Result<Self> {
        Ok(Self::at(crate::platform::registry_db_path()?))
    }

    /// Backend at a specific database file. Nothing is created until the
    /// first write.
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| LaunchPadError::io_with_path(e, parent))?;
            }
        }
        Ok(())
    }

    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout={};\n\
             PRAGMA journal_mode=WAL;\n\
             PRAGMA synchronous=NORMAL;",
            RegistrationConfig::BUSY_TIMEOUT_MS,
        ))?;
        Ok(())
    }

    fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS namespaces (
                path TEXT PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS registry_values (
                namespace TEXT NOT NULL,
                name_key TEXT NOT NULL,
                name TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (namespace, name_key)
            );",
        )?;
        Ok(())
    }

    fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl RegistrationBackend for SqliteBackend {
    type Handle = SqliteNamespace;

    fn open_or_create(&self, namespace: &Namespace) -> Result<SqliteNamespace> {
        self.create_parent_dir()?;

        let conn = Connection::open(&self.db_path)?;
        Self::configure_connection(&conn)?;
        Self::ensure_schema(&conn)?;

        let created = conn.execute(
            "INSERT INTO namespaces (path) VALUES (?1)
             ON CONFLICT(path) DO NOTHING",
            params![namespace.as_str()],
        )?;
        if created > 0 {
            debug!(
                "Created namespace {} in {}",
                namespace,
                self.db_path.display()
            );
        }

        Ok(SqliteNamespace {
            conn,
            namespace: namespace.as_str().to_string(),
        })
    }

    fn open_existing(&self, namespace: &Namespace) -> Result<Option<SqliteNamespace>> {
        if !self.db_path.exists() {
            return Ok(None);
        }

        // No SQLITE_OPEN_CREATE: a file deleted since the check is an error, not a new store.
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(RegistrationConfig::busy_timeout())?;

        if !Self::table_exists(&conn, "namespaces")?
            || !Self::table_exists(&conn, "registry_values")?
        {
            return Ok(None);
        }

        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM namespaces WHERE path = ?1",
                params![namespace.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(exists.map(|_| SqliteNamespace {
            conn,
            namespace: namespace.as_str().to_string(),
        }))
    }
}

/// An open SQLite connection scoped to one namespace.
pub struct SqliteNamespace {
    conn: Connection,
    namespace: String,
}

impl NamespaceHandle for SqliteNamespace {
    fn set_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO registry_values (namespace, name_key, name, value)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace, name_key) DO UPDATE SET value = excluded.value",
            params![self.namespace, fold_name(name), name, value],
        )?;
        Ok(())
    }

    fn get_entry(&self, name: &str) -> Result<Option<(String, String)>> {
        let entry = self
            .conn
            .query_row(
                "SELECT name, value FROM registry_values WHERE namespace = ?1 AND name_key = ?2",
                params![self.namespace, fold_name(name)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(entry)
    }

    fn delete_value(&mut self, name: &str) -> Result<bool> {
        let rows = self.conn.execute(
            "DELETE FROM registry_values WHERE namespace = ?1 AND name_key = ?2",
            params![self.namespace, fold_name(name)],
        )?;
        Ok(rows > 0)
    }

    fn value_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM registry_values WHERE namespace = ?1")?;
        let names = stmt
            .query_map(params![self.namespace], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, value FROM registry_values WHERE namespace = ?1")?;
        let entries = stmt
            .query_map(params![self.namespace], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_backend() -> (SqliteBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = SqliteBackend::at(temp_dir.path().join("nested").join("registry.db"));
        (backend, temp_dir)
    }

    #[test]
    fn test_open_or_create_creates_database_and_parent_dirs() {
        let (backend, _temp_dir) = create_test_backend();
        assert!(!backend.db_path().exists());

        let _handle = backend.open_or_create(&Namespace::default()).unwrap();
        assert!(backend.db_path().exists());
    }

    #[test]
    fn test_open_existing_missing_database_creates_nothing() {
        let (backend, temp_dir) = create_test_backend();

        let handle = backend.open_existing(&Namespace::default()).unwrap();
        assert!(handle.is_none());
        assert!(!backend.db_path().exists());
        assert!(!temp_dir.path().join("nested").exists());
    }

    #[test]
    fn test_open_existing_unknown_namespace_returns_none() {
        let (backend, _temp_dir) = create_test_backend();
        backend.open_or_create(&Namespace::default()).unwrap();

        let other = Namespace::new(r"Software\PW\Other").unwrap();
        assert!(backend.open_existing(&other).unwrap().is_none());
        assert!(backend.open_existing(&Namespace::default()).unwrap().is_some());
    }

    #[test]
    fn test_set_get_delete_value() {
        let (backend, _temp_dir) = create_test_backend();
        let mut handle = backend.open_or_create(&Namespace::default()).unwrap();

        handle.set_value("Notepad", "/bin/notepad").unwrap();
        assert_eq!(
            handle.get_value("Notepad").unwrap().as_deref(),
            Some("/bin/notepad")
        );

        handle.set_value("Notepad", "/usr/bin/notepad").unwrap();
        assert_eq!(
            handle.get_value("Notepad").unwrap().as_deref(),
            Some("/usr/bin/notepad")
        );

        assert!(handle.delete_value("Notepad").unwrap());
        assert!(!handle.delete_value("Notepad").unwrap());
        assert!(handle.get_value("Notepad").unwrap().is_none());
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let (backend, _temp_dir) = create_test_backend();
        let mut handle = backend.open_or_create(&Namespace::default()).unwrap();

        handle.set_value("Notepad", "/bin/a").unwrap();
        handle.set_value("NOTEPAD", "/bin/b").unwrap();
        assert_eq!(
            handle.entries().unwrap(),
            vec![("Notepad".to_string(), "/bin/b".to_string())]
        );

        handle.set_value("Éditeur", "/opt/editeur").unwrap();
        assert_eq!(
            handle.get_value("ÉDITEUR").unwrap().as_deref(),
            Some("/opt/editeur")
        );

        assert!(handle.delete_value("notepad").unwrap());
        assert!(handle.get_entry("Notepad").unwrap().is_none());
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let (backend, _temp_dir) = create_test_backend();
        let other = Namespace::new(r"Software\PW\Other").unwrap();

        let mut first = backend.open_or_create(&Namespace::default()).unwrap();
        first.set_value("A", "p1").unwrap();
        drop(first);

        let second = backend.open_or_create(&other).unwrap();
        assert!(second.value_names().unwrap().is_empty());
    }

    #[test]
    fn test_two_backends_same_db_see_each_other() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("shared-registry.db");
        let writer = SqliteBackend::at(&db_path);
        let reader = SqliteBackend::at(&db_path);

        let mut handle = writer.open_or_create(&Namespace::default()).unwrap();
        handle.set_value("Shared", "/opt/shared").unwrap();
        drop(handle);

        let handle = reader.open_existing(&Namespace::default()).unwrap().unwrap();
        assert_eq!(
            handle.entries().unwrap(),
            vec![("Shared".to_string(), "/opt/shared".to_string())]
        );
    }
}
