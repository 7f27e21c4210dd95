//! Log file discovery
//!
//! Walks the configured root directory recursively and collects every regular
//! file whose name ends in the configured log extension. The result is sorted
//! so that a run over the same tree always reads files in the same order.

use crate::types::LedgerError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Find all log files under `root`
///
/// # Arguments
///
/// * `root` - Directory to search
/// * `extension` - File name suffix without the dot (e.g. `log`)
/// * `exclude` - Directory to skip entirely, typically the output directory
///
/// # Errors
///
/// * `RootNotFound` if `root` is not an existing directory
/// * `Io` if any directory in the tree cannot be listed
pub fn discover_log_files(
    root: &Path,
    extension: &str,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>, LedgerError> {
    if !root.is_dir() {
        return Err(LedgerError::root_not_found(root));
    }

    let suffix = format!(".{}", extension);
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        if exclude.is_some_and(|excluded| excluded == dir.as_path()) {
            trace!(dir = %dir.display(), "Skipping excluded directory");
            continue;
        }

        let entries = fs::read_dir(&dir).map_err(|e| LedgerError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| LedgerError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| LedgerError::io(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if path.is_file() && has_suffix(&path, &suffix) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}
