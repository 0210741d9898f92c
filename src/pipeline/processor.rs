//! Per-source copy loop: load snapshot sets, derive masks, write pairs.

use crate::constants::PROGRESS_LOG_INTERVAL;
use crate::dataset::{ChannelTag, Mask, SnapshotName, Thresholds, compute_mask};
use crate::error::{Error, Result};
use crate::output::progress;
use crate::pipeline::SegmentDirs;
use image::RgbImage;
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{debug, info, warn};

/// The three images needed to produce one (image, mask) pair.
#[derive(Debug)]
pub struct SnapshotSet {
    /// Principal frame, written out as the training image.
    pub dye: RgbImage,
    /// Velocity companion.
    pub velocity: RgbImage,
    /// Curl companion.
    pub curl: RgbImage,
}

/// Load the principal snapshot and its velocity and curl companions.
///
/// Alpha channels are dropped. All three images must share one size.
pub fn load_snapshot_set(source_dir: &Path, name: &SnapshotName) -> Result<SnapshotSet> {
    let dye = load_rgb(&source_dir.join(name.file_name()))?;
    let expected = dye.dimensions();

    let companion = |tag: ChannelTag| -> Result<RgbImage> {
        let path = source_dir.join(name.companion_name(tag));
        let img = load_rgb(&path)?;
        if img.dimensions() != expected {
            return Err(Error::SnapshotSizeMismatch {
                path,
                expected,
                found: img.dimensions(),
            });
        }
        Ok(img)
    };

    let velocity = companion(ChannelTag::Velocity)?;
    let curl = companion(ChannelTag::Curl)?;

    Ok(SnapshotSet {
        dye,
        velocity,
        curl,
    })
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(image::DynamicImage::into_rgb8)
        .map_err(|e| Error::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Write one (image, mask) pair under output index `index`.
pub fn write_pair(dirs: &SegmentDirs, index: u64, image: &RgbImage, mask: &Mask) -> Result<()> {
    let image_path = dirs.image_path(index);
    image.save(&image_path).map_err(|e| Error::ImageSave {
        path: image_path,
        source: e,
    })?;

    let mask_path = dirs.mask_path(index);
    mask.to_luma_image()
        .save(&mask_path)
        .map_err(|e| Error::ImageSave {
            path: mask_path,
            source: e,
        })
}

/// Outcome of copying one source dataset into a segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutcome {
    /// Pairs written.
    pub written: usize,
    /// Snapshots skipped because a file was missing or unreadable.
    pub skipped: usize,
    /// First output index written, if any.
    pub first_index: Option<u64>,
    /// Last output index written, if any.
    pub last_index: Option<u64>,
}

/// Copy up to `target` snapshots from `source_dir` into `dirs`.
///
/// `last_index` is the highest index already present in the segment and is
/// advanced for every pair written. Unreadable snapshot sets are skipped with
/// a warning and do not consume an index.
pub fn process_source(
    source_dir: &Path,
    snapshots: &[SnapshotName],
    target: usize,
    dirs: &SegmentDirs,
    thresholds: &Thresholds,
    last_index: &mut u64,
    progress_bar: Option<&ProgressBar>,
) -> Result<SourceOutcome> {
    let mut outcome = SourceOutcome::default();

    for name in snapshots {
        if outcome.written >= target {
            break;
        }

        let (image, mask) = match load_snapshot_set(source_dir, name).and_then(|set| {
            let mask = compute_mask(&set.velocity, &set.curl, thresholds)?;
            Ok((set.dye, mask))
        }) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Skipping {} in {}: {e}", name, source_dir.display());
                outcome.skipped += 1;
                continue;
            }
        };

        let index = last_index
            .checked_add(1)
            .ok_or_else(|| Error::IndexOverflow {
                segment_dir: dirs.root.clone(),
                last: *last_index,
            })?;
        write_pair(dirs, index, &image, &mask)?;
        *last_index = index;

        outcome.first_index.get_or_insert(index);
        outcome.last_index = Some(index);
        outcome.written += 1;

        if (outcome.written - 1) % PROGRESS_LOG_INTERVAL == 0 {
            info!(
                "Saved {} as {}.png ({:.1}% masked)",
                name,
                index,
                mask.coverage() * 100.0
            );
        } else {
            debug!(
                "Saved {} as {}.png ({:.1}% masked)",
                name,
                index,
                mask.coverage() * 100.0
            );
        }
        progress::inc_progress(progress_bar);
    }

    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dataset::Segment;
    use image::{Rgb, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_set(dir: &Path, name: &SnapshotName, velocity: [u8; 3], curl: [u8; 3]) {
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]))
            .save(dir.join(name.file_name()))
            .unwrap();
        let [r, g, b] = velocity;
        RgbaImage::from_pixel(4, 3, Rgba([r, g, b, 255]))
            .save(dir.join(name.companion_name(ChannelTag::Velocity)))
            .unwrap();
        RgbImage::from_pixel(4, 3, Rgb(curl))
            .save(dir.join(name.companion_name(ChannelTag::Curl)))
            .unwrap();
    }

    fn segment_dirs(temp: &TempDir) -> SegmentDirs {
        let dirs = SegmentDirs::new(&temp.path().join("data"), Segment::Train);
        dirs.ensure().unwrap();
        dirs
    }

    #[test]
    fn test_load_snapshot_set_drops_alpha() {
        let temp = TempDir::new().unwrap();
        let name = SnapshotName::new("sim", 1);
        write_set(temp.path(), &name, [255, 128, 0], [0, 0, 0]);

        let set = load_snapshot_set(temp.path(), &name).unwrap();
        assert_eq!(set.dye.dimensions(), (4, 3));
        assert_eq!(*set.dye.get_pixel(0, 0), Rgb([10, 20, 30]));
        assert_eq!(*set.velocity.get_pixel(3, 2), Rgb([255, 128, 0]));
    }

    #[test]
    fn test_load_snapshot_set_missing_curl() {
        let temp = TempDir::new().unwrap();
        let name = SnapshotName::new("sim", 1);
        write_set(temp.path(), &name, [255, 128, 0], [0, 0, 0]);
        std::fs::remove_file(temp.path().join(name.companion_name(ChannelTag::Curl))).unwrap();

        let err = load_snapshot_set(temp.path(), &name).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn test_load_snapshot_set_size_mismatch() {
        let temp = TempDir::new().unwrap();
        let name = SnapshotName::new("sim", 1);
        write_set(temp.path(), &name, [255, 128, 0], [0, 0, 0]);
        RgbImage::new(2, 2)
            .save(temp.path().join(name.companion_name(ChannelTag::Velocity)))
            .unwrap();

        let err = load_snapshot_set(temp.path(), &name).unwrap_err();
        assert!(matches!(
            err,
            Error::SnapshotSizeMismatch {
                expected: (4, 3),
                found: (2, 2),
                ..
            }
        ));
    }

    #[test]
    fn test_process_source_respects_target_and_continues_index() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("run");
        std::fs::create_dir(&source).unwrap();
        let names: Vec<SnapshotName> = (1..=4).map(|i| SnapshotName::new("sim", i)).collect();
        for name in &names {
            write_set(&source, name, [255, 128, 0], [0, 0, 0]);
        }
        let dirs = segment_dirs(&temp);

        let mut last = 7;
        let outcome = process_source(
            &source,
            &names,
            3,
            &dirs,
            &Thresholds::default(),
            &mut last,
            None,
        )
        .unwrap();

        assert_eq!(outcome.written, 3);
        assert_eq!(outcome.first_index, Some(8));
        assert_eq!(outcome.last_index, Some(10));
        assert_eq!(last, 10);
        assert!(dirs.image_path(10).exists());
        assert!(dirs.mask_path(10).exists());
        assert!(!dirs.image_path(11).exists());
    }

    #[test]
    fn test_process_source_skips_broken_set() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("run");
        std::fs::create_dir(&source).unwrap();
        let names: Vec<SnapshotName> = (1..=3).map(|i| SnapshotName::new("sim", i)).collect();
        for name in &names {
            write_set(&source, name, [255, 128, 0], [0, 0, 0]);
        }
        std::fs::remove_file(source.join(names[1].companion_name(ChannelTag::Velocity))).unwrap();
        let dirs = segment_dirs(&temp);

        let mut last = 0;
        let outcome = process_source(
            &source,
            &names,
            usize::MAX,
            &dirs,
            &Thresholds::default(),
            &mut last,
            None,
        )
        .unwrap();

        assert_eq!(outcome.written, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(last, 2);
    }

    #[test]
    fn test_process_source_index_overflow() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("run");
        std::fs::create_dir(&source).unwrap();
        let name = SnapshotName::new("sim", 1);
        write_set(&source, &name, [255, 128, 0], [0, 0, 0]);
        let dirs = segment_dirs(&temp);

        let mut last = u64::MAX;
        let err = process_source(
            &source,
            std::slice::from_ref(&name),
            1,
            &dirs,
            &Thresholds::default(),
            &mut last,
            None,
        )
        .unwrap_err();

        assert!(matches!(err, Error::IndexOverflow { last: u64::MAX, .. }));
        assert_eq!(last, u64::MAX);
        assert_eq!(std::fs::read_dir(&dirs.image_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_written_mask_matches_thresholds() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("run");
        std::fs::create_dir(&source).unwrap();
        let strong = SnapshotName::new("sim", 1);
        let weak = SnapshotName::new("sim", 2);
        write_set(&source, &strong, [255, 128, 0], [0, 0, 0]);
        write_set(&source, &weak, [128, 128, 0], [0, 0, 0]);
        let dirs = segment_dirs(&temp);

        let mut last = 0;
        process_source(
            &source,
            &[strong, weak],
            2,
            &dirs,
            &Thresholds::default(),
            &mut last,
            None,
        )
        .unwrap();

        let on = image::open(dirs.mask_path(1)).unwrap().into_luma8();
        let off = image::open(dirs.mask_path(2)).unwrap().into_luma8();
        assert!(on.pixels().all(|p| p.0[0] == 255));
        assert!(off.pixels().all(|p| p.0[0] == 0));

        let img = image::open(dirs.image_path(1)).unwrap().into_rgb8();
        assert_eq!(*img.get_pixel(0, 0), Rgb([10, 20, 30]));
    }
}
