//! Centralized configuration for LaunchPad registrations.
//!
//! All values are compile-time constants; the library reads no
//! environment variables or configuration files.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const VENDOR_DIR_NAME: &'static str = "pw";
    pub const PRODUCT_DIR_NAME: &'static str = "launchpad";
}

/// Configuration for the registration store.
pub struct RegistrationConfig;

impl RegistrationConfig {
    /// Fixed namespace holding every LaunchPad registration.
    pub const NAMESPACE: &'static str = r"Software\PW\AppRegistration";
    pub const DB_FILENAME: &'static str = "registry.db";
    pub const BUSY_TIMEOUT_MS: u64 = 5_000;

    pub fn busy_timeout() -> Duration {
        Duration::from_millis(Self::BUSY_TIMEOUT_MS)
    }
}
