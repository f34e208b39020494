use std::fs;
use std::path::{Path, PathBuf};

use crate::spec::{C_NAME_DIR_RESOURCES, CollectError};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Canonical form when the path exists, absolute form otherwise.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| _absolutize_path(path))
}

/// `<directory of path_program>/resources`.
pub fn resolve_resources_root(path_program: &Path) -> Result<PathBuf, CollectError> {
    let path_dir_program = path_program.parent().ok_or_else(|| {
        CollectError::ResourcesRootUnresolved(format!(
            "No parent directory for {}",
            path_program.display()
        ))
    })?;
    Ok(path_dir_program.join(C_NAME_DIR_RESOURCES))
}

/// Mirror the directory holding a match from the source root onto the resources root.
///
/// A match directly under the source root maps onto the resources root itself.
pub(crate) fn derive_destination_dir(
    path_dir_parent: &Path,
    path_dir_src: &Path,
    path_dir_resources: &Path,
) -> Result<PathBuf, CollectError> {
    let path_rel = path_dir_parent.strip_prefix(path_dir_src).map_err(|_| {
        CollectError::OutsideSourceRoot {
            path: path_dir_parent.to_path_buf(),
            root: path_dir_src.to_path_buf(),
        }
    })?;
    if path_rel.as_os_str().is_empty() {
        return Ok(path_dir_resources.to_path_buf());
    }
    Ok(path_dir_resources.join(path_rel))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
