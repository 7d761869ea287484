//! Application-wide configuration read by the plotting core.
//!
//! Settings are an explicit context handle (`Rc<Settings>`) created by the
//! application root and shared with the registry and every plot; there is
//! no hidden global configuration object.

use std::cell::RefCell;
use std::collections::HashMap;

/// Well-known configuration keys.
pub mod keys {
    /// Global auto-update flag gating non-forced redraws.
    pub const AUTO_UPDATE: &str = "auto-update";
}

/// String-keyed configuration store.
///
/// Values are stored as strings and parsed on read; a missing or
/// unparseable value falls back to the caller-provided default. The store
/// is single-threaded by design, matching the GUI event-loop model.
#[derive(Debug, Default)]
pub struct Settings {
    values: RefCell<HashMap<String, String>>,
}

impl Settings {
    /// Create an empty settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.borrow_mut().insert(key.into(), value.into());
    }

    /// Remove a value, restoring the default for readers.
    pub fn unset(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Get a boolean value, falling back to `default` when the key is
    /// missing or not a recognized boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.borrow().get(key).map(|v| v.as_str()) {
            Some("true") | Some("1") | Some("on") => true,
            Some("false") | Some("0") | Some("off") => false,
            _ => default,
        }
    }

    /// Set a boolean value.
    pub fn set_bool(&self, key: impl Into<String>, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}
