//! Structural edits on the config object.

mod dark_mode;
mod plugins;
mod theme;

pub use dark_mode::add_dark_mode;
pub use dark_mode::DEFAULT_DARK_MODE_SELECTOR;
pub use plugins::add_plugin;
pub use theme::merge_theme;
