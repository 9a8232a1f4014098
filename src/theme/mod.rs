//! Light/dark theme preference.
//!
//! [`ThemeStore`] keeps the current [`Theme`] and mirrors every change onto a
//! [`ThemeHost`]: a root CSS class and a persisted storage entry.

mod host;
mod store;
mod theme;

#[cfg(feature = "web")]
pub use host::WebHost;
pub use host::{MemoryHost, ThemeHost};
pub use store::{ThemeStore, DARK_CLASS, THEME_STORAGE_KEY};
pub use theme::{ParseThemeError, Theme};
