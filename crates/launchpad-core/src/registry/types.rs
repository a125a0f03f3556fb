use serde::{Deserialize, Serialize};

/// A registered application: display title and launch target.
///
/// `path` is stored verbatim; it is never resolved or checked on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Registration {
    pub title: String,
    pub path: String,
}

impl Registration {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

impl From<Registration> for (String, String) {
    fn from(registration: Registration) -> Self {
        (registration.title, registration.path)
    }
}

impl From<(String, String)> for Registration {
    fn from((title, path): (String, String)) -> Self {
        Self { title, path }
    }
}
