//! Simulation dataset model: snapshot names, source scanning, dataset plans
//! and mask derivation.

pub mod filename;
pub mod mask;
pub mod plan;
mod source;

pub use filename::{ChannelTag, SnapshotKind, SnapshotName};
pub use mask::{Mask, Thresholds, compute_mask, curl_magnitude, velocity_magnitude};
pub use plan::{CountSpec, DatasetPlan, Segment, SourceSpec, load_plan_file};
pub use source::scan_source;
