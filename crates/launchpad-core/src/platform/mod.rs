//! Platform abstraction layer.
//!
//! All `#[cfg]`-sensitive path resolution lives here. Today that is only
//! the location of the per-user configuration directory.

pub mod paths;

pub use paths::{launchpad_config_dir, registry_db_path};
