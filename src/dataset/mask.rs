//! Binary mask derivation from velocity and curl snapshots.
//!
//! Field snapshots store signed values centered on `127.5` in 8-bit channels.
//! A pixel is masked when both the curl magnitude and the velocity magnitude
//! reach their thresholds.

use crate::constants::channel::{CENTER, RANGE, VELOCITY_SCALE};
use crate::constants::mask_value;
use crate::constants::{DEFAULT_CURL_THRESHOLD, DEFAULT_VELOCITY_THRESHOLD};
use crate::error::{Error, Result};
use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};

/// Thresholds applied when computing a mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum curl magnitude (0.0-0.5).
    pub curl: f64,
    /// Minimum velocity magnitude.
    pub velocity: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            curl: DEFAULT_CURL_THRESHOLD,
            velocity: DEFAULT_VELOCITY_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Whether a pixel with the given magnitudes is masked.
    pub fn admits(&self, curl_magnitude: f64, velocity_magnitude: f64) -> bool {
        curl_magnitude >= self.curl && velocity_magnitude >= self.velocity
    }
}

/// Velocity magnitude encoded by the first two channels of a velocity pixel.
pub fn velocity_magnitude(x: u8, y: u8) -> f64 {
    let vx = VELOCITY_SCALE * (f64::from(x) - CENTER) / RANGE;
    let vy = VELOCITY_SCALE * (f64::from(y) - CENTER) / RANGE;
    vx.hypot(vy)
}

/// Curl magnitude encoded by the first channel of a curl pixel.
pub fn curl_magnitude(c: u8) -> f64 {
    (f64::from(c) - CENTER).abs() / RANGE
}

/// Boolean grid with the dimensions of its source images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.data.get(idx).copied()
    }

    /// Number of masked pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Fraction of masked pixels (0.0 for an empty grid).
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count() as f64 / self.data.len() as f64
    }

    /// Render as an 8-bit grayscale image (255 masked, 0 otherwise).
    pub fn to_luma_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let on = self.get(x, y).unwrap_or(false);
            Luma([if on { mask_value::ON } else { mask_value::OFF }])
        })
    }
}

/// Compute the mask for one velocity/curl snapshot pair.
pub fn compute_mask(velocity: &RgbImage, curl: &RgbImage, thresholds: &Thresholds) -> Result<Mask> {
    if velocity.dimensions() != curl.dimensions() {
        return Err(Error::DimensionMismatch {
            velocity: velocity.dimensions(),
            curl: curl.dimensions(),
        });
    }

    let data = velocity
        .pixels()
        .zip(curl.pixels())
        .map(|(v, c)| {
            thresholds.admits(curl_magnitude(c.0[0]), velocity_magnitude(v.0[0], v.0[1]))
        })
        .collect();

    let (width, height) = velocity.dimensions();
    Ok(Mask {
        width,
        height,
        data,
    })
}
