// Theme Model
// The fixed theme enumeration and the change notification payload

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::ThemeError;

/// Name of the notification emitted after every successful apply.
pub const THEME_CHANGED_EVENT: &str = "themeChanged";

macro_rules! themes {
    ($($(#[$attr:meta])* $variant:ident => $id:literal),+ $(,)?) => {
        /// A visual theme, drawn from a fixed ordered set of identifiers.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum Theme {
            $($(#[$attr])* $variant),+
        }

        impl Theme {
            /// Every theme, in presentation order.
            pub const ALL: &'static [Theme] = &[$(Theme::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Theme::$variant => $id),+
                }
            }

            /// Exact lookup by identifier, no normalization.
            pub fn from_id(id: &str) -> Option<Theme> {
                match id {
                    $($id => Some(Theme::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

themes! {
    #[default]
    Light => "light",
    Dark => "dark",
    Cupcake => "cupcake",
    Bumblebee => "bumblebee",
    Emerald => "emerald",
    Corporate => "corporate",
    Synthwave => "synthwave",
    Retro => "retro",
    Cyberpunk => "cyberpunk",
    Valentine => "valentine",
    Halloween => "halloween",
    Garden => "garden",
    Forest => "forest",
    Aqua => "aqua",
    Lofi => "lofi",
    Pastel => "pastel",
    Fantasy => "fantasy",
    Wireframe => "wireframe",
    Black => "black",
    Luxury => "luxury",
    Dracula => "dracula",
    Cmyk => "cmyk",
    Autumn => "autumn",
    Business => "business",
    Acid => "acid",
    Lemonade => "lemonade",
    Night => "night",
    Coffee => "coffee",
    Winter => "winter",
    Dim => "dim",
    Nord => "nord",
    Sunset => "sunset",
    Caramellatte => "caramellatte",
    Abyss => "abyss",
    Silk => "silk",
}

impl Theme {
    /// Normalizes `name` (trimmed, lowercased) and looks it up.
    pub fn parse(name: &str) -> Result<Theme, ThemeError> {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return Err(ThemeError::InvalidTheme(name.to_string()));
        }
        Theme::from_id(&normalized).ok_or_else(|| ThemeError::InvalidTheme(name.to_string()))
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::parse(s)
    }
}

/// Trim and lowercase a requested theme name.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Comma separated list of every theme id, for diagnostics.
pub fn available_theme_list() -> String {
    Theme::ALL
        .iter()
        .map(Theme::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// Payload of the themeChanged notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChangedEvent {
    pub theme: Theme,
    pub previous_theme: Theme,
}
