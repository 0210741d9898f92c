//! Error types for flowmask.

use std::path::PathBuf;

/// Result type alias for flowmask operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for flowmask.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to read a dataset plan file.
    #[error("failed to read plan file '{path}'")]
    PlanRead {
        /// Path to the plan file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a dataset plan file.
    #[error("failed to parse plan file '{path}'")]
    PlanParse {
        /// Path to the plan file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The plan names no datasets at all.
    #[error("no datasets to process (use --train/--dev/--test or a plan file)")]
    EmptyPlan,

    /// A dataset directory does not exist.
    #[error("dataset directory does not exist: {path}")]
    DatasetDirNotFound {
        /// Path to the missing directory.
        path: PathBuf,
    },

    /// Image and mask directories disagree on the highest index.
    #[error(
        "number of images ({images}) does not equal number of masks ({masks}) in '{segment_dir}'"
    )]
    IndexMismatch {
        /// Segment directory holding both trees.
        segment_dir: PathBuf,
        /// Highest index found in the image directory.
        images: u64,
        /// Highest index found in the mask directory.
        masks: u64,
    },

    /// The next output index does not fit in a `u64`.
    #[error("no output index left after {last} in '{segment_dir}'")]
    IndexOverflow {
        /// Segment directory being filled.
        segment_dir: PathBuf,
        /// Highest index already used.
        last: u64,
    },

    /// Failed to load a snapshot image.
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        /// Path to the image file.
        path: PathBuf,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an output image.
    #[error("failed to save image '{path}': {source}")]
    ImageSave {
        /// Path to the output file.
        path: PathBuf,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// Velocity and curl snapshots differ in size.
    #[error("velocity image is {velocity:?} but curl image is {curl:?}")]
    DimensionMismatch {
        /// Velocity image `(width, height)`.
        velocity: (u32, u32),
        /// Curl image `(width, height)`.
        curl: (u32, u32),
    },

    /// A snapshot differs in size from the rest of its set.
    #[error("'{path}' is {found:?}, expected {expected:?}")]
    SnapshotSizeMismatch {
        /// Path to the offending snapshot.
        path: PathBuf,
        /// Size of the principal snapshot `(width, height)`.
        expected: (u32, u32),
        /// Size of this snapshot `(width, height)`.
        found: (u32, u32),
    },

    /// Directory to clean does not exist.
    #[error("directory does not exist: {path}")]
    DirectoryNotFound {
        /// Path to the missing directory.
        path: PathBuf,
    },
}
