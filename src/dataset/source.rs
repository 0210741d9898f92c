//! Dataset directory scanning.

use crate::dataset::filename::{SnapshotKind, SnapshotName, classify};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, trace};

/// List the principal snapshots of a dataset directory.
///
/// Companion channel files are skipped. The result is sorted by base name,
/// then numerically by index, so output numbering is reproducible.
pub fn scan_source(dir: &Path) -> Result<Vec<SnapshotName>> {
    if !dir.is_dir() {
        return Err(Error::DatasetDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut snapshots = Vec::new();
    let mut companions = 0usize;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            debug!("Skipping non-UTF-8 file name: {}", entry.path().display());
            continue;
        };

        match classify(file_name) {
            SnapshotKind::Principal(name) => snapshots.push(name),
            SnapshotKind::Companion(tag) => {
                trace!("Companion ({tag}): {file_name}");
                companions += 1;
            }
            SnapshotKind::Unrecognized => debug!("Skipping unrecognized file: {file_name}"),
        }
    }

    snapshots.sort();
    debug!(
        "{}: {} snapshots, {} companion files",
        dir.display(),
        snapshots.len(),
        companions
    );

    Ok(snapshots)
}
