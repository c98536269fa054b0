// Theme Switcher Services
// Business logic layer

mod document;
mod events;
mod storage;
mod theme_controller;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

pub use document::*;
pub use events::*;
pub use storage::*;
pub use theme_controller::*;
