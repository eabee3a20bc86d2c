use std::path::PathBuf;

use twmerge_syntax::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse Tailwind config: {0}")]
    Parse(#[from] ParseError),

    /// The printed config no longer lexes. Always a bug in the edits.
    #[error("Merged Tailwind config is not valid source: {0}")]
    InvalidOutput(#[source] ParseError),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load merge spec {}: {message}", path.display())]
    Spec { path: PathBuf, message: String },

    #[error("Invalid merge spec: {0}")]
    InvalidSpec(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
