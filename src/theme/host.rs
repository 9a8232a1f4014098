use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// The browser facilities the theme store needs.
///
/// Storage and media queries are assumed to be available; implementations
/// swallow platform errors.
pub trait ThemeHost: Send + Sync {
    /// Read a value from persistent storage.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value to persistent storage.
    fn set_item(&self, key: &str, value: &str);

    /// Whether the OS asks for a dark colour scheme.
    fn prefers_dark(&self) -> bool;

    /// Add or remove a class on the document root.
    fn set_root_class(&self, class: &str, enabled: bool);
}

/// In-process host for tests and non-browser runs.
#[derive(Debug, Default)]
pub struct MemoryHost {
    storage: Mutex<HashMap<String, String>>,
    root_classes: Mutex<HashSet<String>>,
    prefers_dark: bool,
}

impl MemoryHost {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark,
            ..Self::default()
        }
    }

    /// Seed a stored value.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.set_item(key, value);
        self
    }

    pub fn has_root_class(&self, class: &str) -> bool {
        self.root_classes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(class)
    }
}

impl ThemeHost for MemoryHost {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        let mut classes = self
            .root_classes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}

/// Host backed by `window.localStorage`, `matchMedia` and the root `classList`.
#[cfg(feature = "web")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WebHost;

#[cfg(feature = "web")]
impl WebHost {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

#[cfg(feature = "web")]
impl ThemeHost for WebHost {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.set_item(key, value) {
                tracing::warn!(key, "Failed to write localStorage: {:?}", e);
            }
        }
    }

    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        if let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            if let Err(e) = root.class_list().toggle_with_force(class, enabled) {
                tracing::warn!(class, "Failed to toggle root class: {:?}", e);
            }
        }
    }
}
