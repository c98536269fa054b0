// Theme Switcher
// Validated theme selection with persistence and change notifications

pub mod logging;
pub mod models;
pub mod services;

pub use models::{Theme, ThemeChangedEvent, ThemeSettings, THEME_CHANGED_EVENT};
pub use services::{ThemeController, ThemeError};
