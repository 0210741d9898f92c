//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "flowmask";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default minimum curl magnitude for a pixel to be masked.
pub const DEFAULT_CURL_THRESHOLD: f64 = 0.49;

/// Default minimum velocity magnitude for a pixel to be masked.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 18.0;

/// Default destination root for generated data.
pub const DEFAULT_DEST_DIR: &str = "data";

/// Default root holding the simulation dataset directories.
pub const DEFAULT_LOC_DIR: &str = "datasets";

/// Encoding of signed field values in 8-bit channels.
pub mod channel {
    /// Channel value that encodes zero.
    pub const CENTER: f64 = 127.5;

    /// Full channel range used to normalize values.
    pub const RANGE: f64 = 255.0;

    /// Scale applied to each normalized velocity component.
    pub const VELOCITY_SCALE: f64 = 100.0;

    /// Largest curl magnitude an 8-bit channel can encode.
    pub const MAX_CURL_MAGNITUDE: f64 = CENTER / RANGE;

    /// Largest velocity magnitude two 8-bit channels can encode.
    ///
    /// Each component reaches at most `VELOCITY_SCALE / 2`.
    pub const MAX_VELOCITY_MAGNITUDE: f64 = VELOCITY_SCALE * std::f64::consts::FRAC_1_SQRT_2;
}

/// Mask pixel values written to disk.
pub mod mask_value {
    /// Pixel value for masked (true) pixels.
    pub const ON: u8 = 255;
    /// Pixel value for unmasked (false) pixels.
    pub const OFF: u8 = 0;
}

/// Source snapshot naming.
pub mod snapshot {
    /// Separator between name components.
    pub const SEPARATOR: char = '_';

    /// Extension of snapshot images (without dot).
    pub const EXTENSION: &str = "png";
}

/// Destination directory layout: `<dest>/<segment>/{image,mask}/img/<n>.png`.
pub mod layout {
    /// Directory holding input images of a segment.
    pub const IMAGE_DIR: &str = "image";
    /// Directory holding masks of a segment.
    pub const MASK_DIR: &str = "mask";
    /// Leaf directory expected by image-folder loaders.
    pub const LEAF_DIR: &str = "img";
    /// Extension of written files (without dot).
    pub const EXTENSION: &str = "png";
}

/// Every this many written snapshots, the copy loop logs at info level.
pub const PROGRESS_LOG_INTERVAL: usize = 50;

/// Count value meaning "take every available snapshot".
pub const COUNT_ALL: &str = "*";
