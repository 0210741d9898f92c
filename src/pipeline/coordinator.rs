//! Pipeline coordination: destination layout, index discovery and the
//! plan-level generate loop.

use crate::constants::layout::{EXTENSION, IMAGE_DIR, LEAF_DIR, MASK_DIR};
use crate::dataset::{
    CountSpec, DatasetPlan, Segment, SnapshotName, SourceSpec, Thresholds, scan_source,
};
use crate::error::{Error, Result};
use crate::output::progress;
use crate::pipeline::process_source;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Output directories of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDirs {
    /// `<dest>/<segment>`.
    pub root: PathBuf,
    /// `<dest>/<segment>/image/img`.
    pub image_dir: PathBuf,
    /// `<dest>/<segment>/mask/img`.
    pub mask_dir: PathBuf,
}

impl SegmentDirs {
    /// Layout for `segment` under the destination root `dest`.
    pub fn new(dest: &Path, segment: Segment) -> Self {
        let root = dest.join(segment.as_str());
        Self {
            image_dir: root.join(IMAGE_DIR).join(LEAF_DIR),
            mask_dir: root.join(MASK_DIR).join(LEAF_DIR),
            root,
        }
    }

    /// Create both output directories if missing.
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.image_dir)?;
        std::fs::create_dir_all(&self.mask_dir)?;
        Ok(())
    }

    /// Path of output image `index`.
    pub fn image_path(&self, index: u64) -> PathBuf {
        self.image_dir.join(format!("{index}.{EXTENSION}"))
    }

    /// Path of output mask `index`.
    pub fn mask_path(&self, index: u64) -> PathBuf {
        self.mask_dir.join(format!("{index}.{EXTENSION}"))
    }

    /// Highest index already present, shared by images and masks.
    ///
    /// Fails with [`Error::IndexMismatch`] if the two trees disagree.
    pub fn highest_index(&self) -> Result<u64> {
        let images = highest_index(&self.image_dir)?;
        let masks = highest_index(&self.mask_dir)?;
        if images != masks {
            return Err(Error::IndexMismatch {
                segment_dir: self.root.clone(),
                images,
                masks,
            });
        }
        Ok(images)
    }
}

/// Highest numeric file stem in `dir` (0 when there is none).
///
/// Entries whose stem is not an unsigned integer are ignored.
pub fn highest_index(dir: &Path) -> Result<u64> {
    let mut highest = 0;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let index = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok());

        match index {
            Some(index) => highest = highest.max(index),
            None => debug!("Ignoring non-numeric entry: {}", path.display()),
        }
    }

    Ok(highest)
}

/// Everything needed to run a generate pass.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Destination root.
    pub dest: PathBuf,
    /// Root holding the source dataset directories.
    pub loc: PathBuf,
    /// Sources per segment.
    pub plan: DatasetPlan,
    /// Mask thresholds.
    pub thresholds: Thresholds,
    /// Show progress bars.
    pub progress: bool,
}

/// Result of copying one source into one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    /// Segment written to.
    pub segment: Segment,
    /// Source dataset name.
    pub dataset: String,
    /// Principal snapshots available in the source.
    pub available: usize,
    /// Snapshots requested after resolving `*`.
    pub requested: usize,
    /// Pairs written.
    pub written: usize,
    /// Snapshots skipped because a file was missing or unreadable.
    pub skipped: usize,
    /// First output index written, if any.
    pub first_index: Option<u64>,
    /// Last output index written, if any.
    pub last_index: Option<u64>,
}

/// Totals of a generate pass.
#[derive(Debug, Clone, Default)]
pub struct GenerateSummary {
    /// One report per planned source, in processing order.
    pub sources: Vec<SourceReport>,
    /// Wall-clock duration in seconds.
    pub duration_secs: f64,
}

impl GenerateSummary {
    /// Pairs written across all sources.
    pub fn written(&self) -> usize {
        self.sources.iter().map(|s| s.written).sum()
    }

    /// Snapshots skipped across all sources.
    pub fn skipped(&self) -> usize {
        self.sources.iter().map(|s| s.skipped).sum()
    }

    /// Pairs written into `segment`.
    pub fn written_to(&self, segment: Segment) -> usize {
        self.sources
            .iter()
            .filter(|s| s.segment == segment)
            .map(|s| s.written)
            .sum()
    }
}

/// A segment ready to be filled: layout, starting index and scanned sources.
struct PreparedSegment<'a> {
    segment: Segment,
    dirs: SegmentDirs,
    start_index: u64,
    sources: Vec<(&'a SourceSpec, PathBuf, Vec<SnapshotName>)>,
}

/// Check every destination and source before anything is written.
fn prepare<'a>(request: &'a GenerateRequest) -> Result<Vec<PreparedSegment<'a>>> {
    let mut prepared = Vec::new();

    for (segment, specs) in request.plan.segments() {
        let dirs = SegmentDirs::new(&request.dest, segment);
        dirs.ensure()?;
        let start_index = dirs.highest_index()?;
        info!("Found {} existing images in {}", start_index, dirs.root.display());

        let mut sources = Vec::with_capacity(specs.len());
        for spec in specs {
            let source_dir = request.loc.join(&spec.dataset);
            let snapshots = scan_source(&source_dir)?;
            sources.push((spec, source_dir, snapshots));
        }

        prepared.push(PreparedSegment {
            segment,
            dirs,
            start_index,
            sources,
        });
    }

    Ok(prepared)
}

/// Copy every planned source into its segment.
///
/// Output indices in each segment continue from the highest index already
/// on disk. No pair is written if any segment has mismatched image and mask
/// trees or any source directory is missing.
pub fn generate(request: &GenerateRequest) -> Result<GenerateSummary> {
    if request.plan.is_empty() {
        return Err(Error::EmptyPlan);
    }

    let start_time = Instant::now();
    let prepared = prepare(request)?;
    let mut summary = GenerateSummary::default();

    for segment in prepared {
        let mut last_index = segment.start_index;

        for (spec, source_dir, snapshots) in &segment.sources {
            let available = snapshots.len();
            let requested = spec.count.resolve(available);
            info!(
                "{}: pulling {} of {} snapshots from {}",
                segment.segment,
                requested,
                available,
                source_dir.display()
            );
            if let CountSpec::Limit(n) = spec.count
                && n > available
            {
                warn!(
                    "{} has only {} snapshots ({} requested)",
                    spec.dataset, available, n
                );
            }

            let label = format!("{}/{}", segment.segment, spec.dataset);
            let bar = progress::create_source_progress(requested, &label, request.progress);

            let outcome = process_source(
                source_dir,
                snapshots,
                requested,
                &segment.dirs,
                &request.thresholds,
                &mut last_index,
                bar.as_ref(),
            )?;
            progress::finish_progress(bar, "done");

            if outcome.written < requested {
                warn!(
                    "{}: wrote {} of {} requested ({} skipped)",
                    spec.dataset, outcome.written, requested, outcome.skipped
                );
            }
            info!("Done with {}", spec.dataset);

            summary.sources.push(SourceReport {
                segment: segment.segment,
                dataset: spec.dataset.clone(),
                available,
                requested,
                written: outcome.written,
                skipped: outcome.skipped,
                first_index: outcome.first_index,
                last_index: outcome.last_index,
            });
        }
    }

    summary.duration_secs = start_time.elapsed().as_secs_f64();
    Ok(summary)
}
