//! Miscellaneous utilities.

pub mod clean;
