use super::host::ThemeHost;
use super::theme::Theme;
use crate::store::{Store, SubscriptionId};
use std::sync::Arc;

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class present on the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

/// Light/dark preference mirrored onto a [`ThemeHost`].
///
/// Every change toggles [`DARK_CLASS`] on the document root and persists the
/// value under [`THEME_STORAGE_KEY`]. Without a host (server-side rendering,
/// tests) the value is tracked but nothing is applied.
#[derive(Clone)]
pub struct ThemeStore {
    theme: Store<Theme>,
    host: Option<Arc<dyn ThemeHost>>,
}

fn apply_theme(host: &dyn ThemeHost, theme: Theme) {
    host.set_root_class(DARK_CLASS, theme.is_dark());
    host.set_item(THEME_STORAGE_KEY, theme.as_str());
    tracing::debug!(theme = %theme, "applied theme");
}

impl ThemeStore {
    /// A store attached to a host; changes are applied to it from now on.
    pub fn new(host: Arc<dyn ThemeHost>) -> Self {
        let theme = Store::new(Theme::default());
        let subscriber_host = Arc::clone(&host);
        theme.subscribe(move |theme: &Theme| apply_theme(subscriber_host.as_ref(), *theme));
        Self {
            theme,
            host: Some(host),
        }
    }

    /// A store with no host.
    pub fn headless() -> Self {
        Self {
            theme: Store::new(Theme::default()),
            host: None,
        }
    }

    pub fn get(&self) -> Theme {
        self.theme.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Theme) + Send + Sync + 'static,
    {
        self.theme.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.theme.unsubscribe(id)
    }

    /// Set the theme. Setting the current value again is a no-op.
    pub fn set(&self, theme: Theme) {
        self.theme.set_distinct(theme);
    }

    /// Switch to the other theme.
    pub fn toggle(&self) {
        self.theme.update(|theme| *theme = theme.toggled());
    }

    /// Load the stored preference, falling back to the system colour scheme,
    /// and apply it. Does nothing without a host.
    pub fn init(&self) {
        let Some(host) = &self.host else {
            return;
        };

        let stored = host.get_item(THEME_STORAGE_KEY);
        let initial = match stored.as_deref().map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::from_system(host.prefers_dark())
            }
            None => Theme::from_system(host.prefers_dark()),
        };

        tracing::debug!(theme = %initial, stored = stored.is_some(), "initialising theme");
        self.theme.set_distinct(initial);
        // an unchanged value does not notify, so apply explicitly
        apply_theme(host.as_ref(), initial);
    }
}
