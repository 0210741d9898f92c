//! Emptying a generated data tree.

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// What a clean pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Files deleted.
    pub files_removed: usize,
    /// Directories visited (kept).
    pub dirs_visited: usize,
}

/// Delete every file below `dir`, keeping the directory tree.
///
/// After cleaning, the next generate pass starts numbering at 1 again.
/// Symlinks are removed, never followed.
pub fn clean_data_dir(dir: &Path) -> Result<CleanReport> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut report = CleanReport::default();
    clean_recursive(dir, &mut report)?;
    Ok(report)
}

fn clean_recursive(dir: &Path, report: &mut CleanReport) -> Result<()> {
    report.dirs_visited += 1;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            clean_recursive(&path, report)?;
        } else {
            debug!("Removing {}", path.display());
            std::fs::remove_file(&path)?;
            report.files_removed += 1;
        }
    }

    Ok(())
}
