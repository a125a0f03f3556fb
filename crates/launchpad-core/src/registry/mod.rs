//! Per-user storage of LaunchPad application registrations.
//!
//! A registration is a `(title, path)` pair kept in one fixed namespace of a
//! per-user key-value store. [`RegistrationStore`] is the entry point; the
//! store itself is reached through the [`RegistrationBackend`] capability so
//! that tests and embedders can substitute their own.
//!
//! # Location
//!
//! The default SQLite backend lives at a platform-standard config directory:
//! - **Linux**: `~/.config/pw/launchpad/registry.db`
//! - **Windows**: `%APPDATA%\pw\launchpad\registry.db`
//! - **macOS**: `~/Library/Application Support/pw/launchpad/registry.db`

pub mod backend;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use backend::{fold_name, Namespace, NamespaceHandle, RegistrationBackend};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::RegistrationStore;
pub use types::Registration;
