// Theme Switcher Models
// Data structures for the theme controller

mod settings;
mod theme;

pub use settings::*;
pub use theme::*;
