// ThemeController Service
// Validates, applies, persists and announces theme changes

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;

use crate::models::{
    available_theme_list, Theme, ThemeChangedEvent, ThemeSettings, THEME_CHANGED_EVENT,
};
use crate::services::{emit_event, DocumentError, EventSink, KeyValueStore, ThemeDocument};

/// Errors that can occur while applying a theme
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme \"{0}\" is not available")]
    InvalidTheme(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Owns the page's theme state.
///
/// Every read and write of the root theme attribute goes through
/// [`apply`](Self::apply) and [`current`](Self::current), so the attribute
/// only ever holds a member of [`Theme`]. Storage and notifications are
/// shared capabilities; the document is owned.
pub struct ThemeController<D: ThemeDocument> {
    document: D,
    store: Arc<dyn KeyValueStore>,
    events: Arc<dyn EventSink>,
    settings: ThemeSettings,
}

impl<D: ThemeDocument> ThemeController<D> {
    pub fn new(
        document: D,
        store: Arc<dyn KeyValueStore>,
        events: Arc<dyn EventSink>,
        settings: ThemeSettings,
    ) -> Self {
        Self {
            document,
            store,
            events,
            settings,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Apply `name` to the document, returning whether it took effect.
    ///
    /// Invalid names and document failures are logged and leave the theme
    /// unchanged. A failed storage write is logged but still counts as success.
    pub fn apply(&mut self, name: &str, persist: bool) -> bool {
        match self.try_apply(name, persist) {
            Ok(_) => true,
            Err(ThemeError::InvalidTheme(requested)) => {
                log::warn!(
                    "Theme \"{requested}\" is not available. Available themes: {}",
                    available_theme_list()
                );
                false
            }
            Err(e) => {
                log::error!("Error changing theme: {e}");
                false
            }
        }
    }

    /// Like [`apply`](Self::apply), but returns the typed error instead of logging it.
    pub fn try_apply(&mut self, name: &str, persist: bool) -> Result<Theme, ThemeError> {
        let theme = Theme::parse(name)?;
        let previous_theme = self.current();

        self.document.set_theme_attribute(theme.as_str())?;
        if let Err(e) = self.mirror_and_sync(theme) {
            self.rollback(previous_theme);
            return Err(e.into());
        }

        if persist {
            self.persist(theme);
        }

        emit_event(
            self.events.as_ref(),
            THEME_CHANGED_EVENT,
            &ThemeChangedEvent {
                theme,
                previous_theme,
            },
        );

        log::info!("Theme switched to: {theme}");
        Ok(theme)
    }

    /// The applied theme, or the configured default when none is set.
    pub fn current(&self) -> Theme {
        match self.document.theme_attribute() {
            Some(value) => Theme::from_id(&value).unwrap_or_else(|| {
                log::debug!("Unrecognized theme attribute \"{value}\", using default");
                self.settings.default_theme
            }),
            None => self.settings.default_theme,
        }
    }

    /// Raw persisted value. Read failures are logged and reported as absent.
    pub fn saved_theme(&self) -> Option<String> {
        match self.store.get_item(&self.settings.storage_key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read saved theme: {e}");
                None
            }
        }
    }

    /// Restore the persisted theme, or apply and persist the default.
    pub fn initialize(&mut self) -> Theme {
        let saved = self.saved_theme();
        let restored = saved.as_deref().and_then(Theme::from_id);
        match restored {
            Some(theme) => {
                // Already persisted
                self.apply(theme.as_str(), false);
            }
            None => {
                if let Some(value) = saved {
                    log::warn!("Ignoring invalid saved theme \"{value}\"");
                }
                let default_theme = self.settings.default_theme;
                self.apply(default_theme.as_str(), true);
            }
        }
        self.current()
    }

    /// Switch between light and dark. Any other theme goes to dark.
    pub fn toggle(&mut self) -> bool {
        let next = if self.current().is_dark() {
            Theme::Light
        } else {
            Theme::Dark
        };
        self.apply(next.as_str(), true)
    }

    pub fn apply_random(&mut self) -> bool {
        let theme = Self::random_theme();
        self.apply(theme.as_str(), true)
    }

    /// A uniformly random theme.
    pub fn random_theme() -> Theme {
        let index = rand::thread_rng().gen_range(0..Theme::ALL.len());
        Theme::ALL[index]
    }

    pub fn available_themes() -> &'static [Theme] {
        Theme::ALL
    }

    /// Remove the persisted theme so the next `initialize` falls back to the default.
    pub fn forget_saved_theme(&self) -> bool {
        match self.store.remove_item(&self.settings.storage_key) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not remove saved theme: {e}");
                false
            }
        }
    }

    fn mirror_and_sync(&mut self, theme: Theme) -> Result<(), DocumentError> {
        if self.settings.mirror_body_attribute {
            self.document.set_body_theme_attribute(theme.as_str())?;
        }
        self.sync_controls(theme)
    }

    // Best effort: put the document back on the theme observers last heard about
    fn rollback(&mut self, previous_theme: Theme) {
        if let Err(e) = self.document.set_theme_attribute(previous_theme.as_str()) {
            log::debug!("Could not restore theme attribute: {e}");
        }
        if let Err(e) = self.mirror_and_sync(previous_theme) {
            log::debug!("Could not restore theme controls: {e}");
        }
    }

    fn sync_controls(&mut self, theme: Theme) -> Result<(), DocumentError> {
        let id = theme.as_str();
        self.document.for_each_theme_control(&mut |control| {
            let checked = control.value() == id;
            control.set_checked(checked);
        })
    }

    fn persist(&self, theme: Theme) {
        if let Err(e) = self.store.set_item(&self.settings.storage_key, theme.as_str()) {
            log::warn!("Could not save theme to storage: {e}");
        }
    }
}
