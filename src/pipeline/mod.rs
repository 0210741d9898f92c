//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    GenerateRequest, GenerateSummary, SegmentDirs, SourceReport, generate, highest_index,
};
pub use processor::{SnapshotSet, SourceOutcome, load_snapshot_set, process_source, write_pair};
