//! Stale artifact removal
//!
//! Deletes every version of a package from the staging directory before the
//! fresh artifact is copied in.

use super::artifact::is_package_file;
use crate::core::error::ReleaseError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Delete all artifacts of `package_name` directly inside `staging_dir`.
///
/// Subdirectories are not searched. Symlinks are removed like files unless
/// they point at a directory; their targets are left alone. The first listing or deletion failure
/// aborts the removal; files deleted before it stay deleted.
pub fn remove_stale_artifacts(
    staging_dir: &Path,
    package_name: &str,
) -> Result<Vec<PathBuf>, ReleaseError> {
    let mut removed = Vec::new();

    for entry in WalkDir::new(staging_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ReleaseError::StagingDirUnreadable {
            path: staging_dir.to_path_buf(),
            source,
        })?;

        if is_directory(&entry) {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };

        if !is_package_file(file_name, package_name) {
            continue;
        }

        let path = entry.into_path();
        fs::remove_file(&path).map_err(|source| ReleaseError::DeleteFailed {
            path: path.clone(),
            source,
        })?;

        log::info!("Removed stale artifact {}", path.display());
        removed.push(path);
    }

    Ok(removed)
}

/// Directory, or symlink to one. Dangling links count as files.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        || (entry.path_is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir()))
}
