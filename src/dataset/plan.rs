//! Dataset plan: which source datasets feed which segment, and how many
//! snapshots to take from each.

use crate::constants::COUNT_ALL;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Output partition of the generated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Training data.
    Train,
    /// Development (validation) data.
    Dev,
    /// Held-out test data.
    Test,
}

impl Segment {
    /// All segments in processing order.
    pub const ALL: [Self; 3] = [Self::Train, Self::Dev, Self::Test];

    /// Directory name of the segment under the destination root.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of snapshots requested from one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCount", into = "RawCount")]
pub enum CountSpec {
    /// Take every eligible snapshot.
    #[default]
    All,
    /// Take at most this many.
    Limit(usize),
}

impl CountSpec {
    /// Number of snapshots to take given how many are available.
    pub fn resolve(self, available: usize) -> usize {
        match self {
            Self::All => available,
            Self::Limit(n) => n.min(available),
        }
    }
}

impl fmt::Display for CountSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(COUNT_ALL),
            Self::Limit(n) => write!(f, "{n}"),
        }
    }
}

impl std::str::FromStr for CountSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s == COUNT_ALL {
            return Ok(Self::All);
        }
        s.parse::<usize>()
            .map(Self::Limit)
            .map_err(|_| format!("'{s}' is not a count (expected a number or '{COUNT_ALL}')"))
    }
}

/// Serialized form of [`CountSpec`]: an integer or `"*"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(usize),
    Text(String),
}

impl TryFrom<RawCount> for CountSpec {
    type Error = String;

    fn try_from(raw: RawCount) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawCount::Number(n) => Ok(Self::Limit(n)),
            RawCount::Text(s) => s.parse(),
        }
    }
}

impl From<CountSpec> for RawCount {
    fn from(count: CountSpec) -> Self {
        match count {
            CountSpec::All => Self::Text(COUNT_ALL.to_string()),
            CountSpec::Limit(n) => Self::Number(n),
        }
    }
}

/// One source dataset and the number of snapshots to pull from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Directory name under the dataset root.
    pub dataset: String,
    /// Requested snapshot count.
    #[serde(default)]
    pub count: CountSpec,
}

impl SourceSpec {
    /// Create a source spec.
    pub fn new(dataset: impl Into<String>, count: CountSpec) -> Self {
        Self {
            dataset: dataset.into(),
            count,
        }
    }
}

impl std::str::FromStr for SourceSpec {
    type Err = String;

    /// Parse `NAME` or `NAME=COUNT`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, count) = match s.split_once('=') {
            Some((name, count)) => (name.trim(), count.parse()?),
            None => (s.trim(), CountSpec::All),
        };
        validate_dataset_name(name)?;
        Ok(Self::new(name, count))
    }
}

/// Check that a dataset name refers to a single directory under the root.
pub fn validate_dataset_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("dataset name cannot be empty".to_string());
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(format!(
            "dataset name '{name}' must be a single directory name"
        ));
    }
    Ok(())
}

/// Sources for each segment, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPlan {
    /// Sources for the train segment.
    pub train: Vec<SourceSpec>,
    /// Sources for the dev segment.
    pub dev: Vec<SourceSpec>,
    /// Sources for the test segment.
    pub test: Vec<SourceSpec>,
}

impl DatasetPlan {
    /// Sources planned for `segment`.
    pub fn sources(&self, segment: Segment) -> &[SourceSpec] {
        match segment {
            Segment::Train => &self.train,
            Segment::Dev => &self.dev,
            Segment::Test => &self.test,
        }
    }

    /// Replace the sources of `segment`.
    pub fn set_sources(&mut self, segment: Segment, sources: Vec<SourceSpec>) {
        match segment {
            Segment::Train => self.train = sources,
            Segment::Dev => self.dev = sources,
            Segment::Test => self.test = sources,
        }
    }

    /// Segments that have at least one source, with their sources.
    pub fn segments(&self) -> impl Iterator<Item = (Segment, &[SourceSpec])> {
        Segment::ALL
            .into_iter()
            .map(|segment| (segment, self.sources(segment)))
            .filter(|(_, sources)| !sources.is_empty())
    }

    /// True if no segment has any source.
    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }

    /// Total number of planned sources across segments.
    pub fn source_count(&self) -> usize {
        Segment::ALL.iter().map(|s| self.sources(*s).len()).sum()
    }
}

/// Load a standalone plan file (`[[train]]`, `[[dev]]`, `[[test]]` tables).
pub fn load_plan_file(path: &Path) -> Result<DatasetPlan> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::PlanRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::PlanParse {
        path: path.to_path_buf(),
        source: e,
    })
}
