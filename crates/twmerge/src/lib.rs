//! Merge design tokens, dark mode selectors and plugins into a Tailwind
//! config file while keeping its formatting, comments and spreads.

pub mod codec;
pub mod colors;
pub mod edit;
mod engine;
mod error;
pub mod merge;
pub mod nest;
mod spec;
mod update;
pub mod value;

pub use colors::theme_colors_from_css_vars;
pub use engine::merge_config;
pub use engine::merge_config_as;
pub use error::Error;
pub use error::Result;
pub use spec::MergeSpec;
pub use twmerge_syntax::ParseError;
pub use twmerge_syntax::ScriptKind;
pub use update::UpdateOptions;
pub use update::update_tailwind_config;
pub use value::Value;
