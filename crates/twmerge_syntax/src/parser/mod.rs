#[allow(clippy::module_inception)]
mod parser;

pub use parser::parse_object;
pub use parser::parse_value;
