use std::path::Path;

use tracing::info;
use twmerge_syntax::ScriptKind;

use crate::engine::merge_config_as;
use crate::error::Error;
use crate::error::Result;
use crate::spec::MergeSpec;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Suppress progress logs.
    pub silent: bool,
}

/// Merge `spec` into the Tailwind config file at `path`.
///
/// The grammar profile follows the file extension. The file is only written
/// when the merge changed it; returns whether it did.
pub fn update_tailwind_config(
    path: &Path,
    spec: &MergeSpec,
    options: &UpdateOptions,
) -> Result<bool> {
    if !options.silent {
        info!("Updating {}", path.display());
    }

    let raw = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let output = merge_config_as(&raw, spec, ScriptKind::from_path(path))?;
    if output == raw {
        if !options.silent {
            info!("{} is up to date", path.display());
        }
        return Ok(false);
    }

    std::fs::write(path, output).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !options.silent {
        info!("Updated {}", path.display());
    }
    Ok(true)
}
