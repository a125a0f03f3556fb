//! LaunchPad Core - per-user storage of application registrations.
//!
//! A registration pairs a display title with the path of an external
//! program that the LaunchPad host can launch. Registrations live in one
//! fixed namespace of a per-user key-value store (SQLite by default).
//!
//! # Example
//!
//! ```rust,no_run
//! use launchpad_core::RegistrationStore;
//!
//! fn main() -> launchpad_core::Result<()> {
//!     let store = RegistrationStore::open()?;
//!
//!     store.register("Notepad", "/usr/bin/gedit")?;
//!     for registration in store.registrations()? {
//!         println!("{} -> {}", registration.title, registration.path);
//!     }
//!     store.unregister("Notepad")?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod registry;

pub use config::RegistrationConfig;
pub use error::{LaunchPadError, Result};
pub use registry::{
    MemoryBackend, Namespace, NamespaceHandle, Registration, RegistrationBackend,
    RegistrationStore, SqliteBackend,
};
