//! Snapshot filename parsing.
//!
//! A simulation run writes one principal frame per time step plus one
//! companion file per recorded field:
//!
//! - principal: `<base>_<idx>.png`
//! - companion: `<base>_<tag>_<idx>.png` with `tag` in `{v, d, c, p}`

use crate::constants::snapshot::{EXTENSION, SEPARATOR};
use std::fmt;
use std::path::Path;

/// Simulation field stored in a companion snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelTag {
    /// Velocity field (`v`), x/y components in channels 0 and 1.
    Velocity,
    /// Dye concentration (`d`).
    Dye,
    /// Curl / vorticity (`c`) in channel 0.
    Curl,
    /// Pressure (`p`).
    Pressure,
}

impl ChannelTag {
    /// All tags, in filename order.
    pub const ALL: [Self; 4] = [Self::Velocity, Self::Dye, Self::Curl, Self::Pressure];

    /// Single-letter suffix used in filenames.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Velocity => "v",
            Self::Dye => "d",
            Self::Curl => "c",
            Self::Pressure => "p",
        }
    }

    /// Parse a filename component as a channel tag.
    pub fn from_component(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for ChannelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a file found in a dataset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotKind {
    /// Untagged frame of the simulation, the training input.
    Principal(SnapshotName),
    /// Tagged field file belonging to some principal frame.
    Companion(ChannelTag),
    /// Anything that does not follow the naming scheme.
    Unrecognized,
}

/// Parsed name of a principal snapshot.
///
/// `file` is the name as found on disk. Companion names are rebuilt from
/// `base` and the parsed `index`, so `sim_007.png` pairs with `sim_v_7.png`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotName {
    /// Everything before the final `_<idx>` component.
    pub base: String,
    /// Simulation step index.
    pub index: u64,
    file: String,
}

impl SnapshotName {
    /// Create a snapshot name whose file is `<base>_<index>.png`.
    pub fn new(base: impl Into<String>, index: u64) -> Self {
        let base = base.into();
        let file = format!("{base}{SEPARATOR}{index}.{EXTENSION}");
        Self { base, index, file }
    }

    /// File name of the principal snapshot, as found on disk.
    pub fn file_name(&self) -> &str {
        &self.file
    }

    /// File name of the companion snapshot holding `tag`.
    pub fn companion_name(&self, tag: ChannelTag) -> String {
        format!(
            "{}{SEPARATOR}{tag}{SEPARATOR}{}.{EXTENSION}",
            self.base, self.index
        )
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Classify a file name from a dataset directory.
pub fn classify(file_name: &str) -> SnapshotKind {
    let path = Path::new(file_name);
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()).filter(|_| is_png) else {
        return SnapshotKind::Unrecognized;
    };

    let mut parts = stem.rsplitn(3, SEPARATOR);
    let (Some(last), Some(second_last)) = (parts.next(), parts.next()) else {
        return SnapshotKind::Unrecognized;
    };

    if let Some(tag) = ChannelTag::from_component(second_last) {
        return SnapshotKind::Companion(tag);
    }

    let Ok(index) = last.parse::<u64>() else {
        return SnapshotKind::Unrecognized;
    };

    match stem.rsplit_once(SEPARATOR) {
        Some((base, _)) => SnapshotKind::Principal(SnapshotName {
            base: base.to_string(),
            index,
            file: file_name.to_string(),
        }),
        None => SnapshotKind::Unrecognized,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_principal() {
        assert_eq!(
            classify("sim_42.png"),
            SnapshotKind::Principal(SnapshotName::new("sim", 42))
        );
    }

    #[test]
    fn test_classify_principal_with_underscored_base() {
        assert_eq!(
            classify("karman_re200_7.png"),
            SnapshotKind::Principal(SnapshotName::new("karman_re200", 7))
        );
    }

    #[test]
    fn test_classify_companions() {
        assert_eq!(
            classify("sim_v_42.png"),
            SnapshotKind::Companion(ChannelTag::Velocity)
        );
        assert_eq!(
            classify("sim_d_42.png"),
            SnapshotKind::Companion(ChannelTag::Dye)
        );
        assert_eq!(
            classify("sim_c_42.png"),
            SnapshotKind::Companion(ChannelTag::Curl)
        );
        assert_eq!(
            classify("a_b_p_1.png"),
            SnapshotKind::Companion(ChannelTag::Pressure)
        );
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify("notes.txt"), SnapshotKind::Unrecognized);
        assert_eq!(classify("single.png"), SnapshotKind::Unrecognized);
        assert_eq!(classify("sim_last.png"), SnapshotKind::Unrecognized);
        assert_eq!(classify("sim_-3.png"), SnapshotKind::Unrecognized);
        assert_eq!(classify(".ipynb_checkpoints"), SnapshotKind::Unrecognized);
    }

    #[test]
    fn test_classify_extension_case_insensitive() {
        let SnapshotKind::Principal(name) = classify("sim_3.PNG") else {
            panic!("expected a principal snapshot");
        };
        assert_eq!(name.index, 3);
        assert_eq!(name.file_name(), "sim_3.PNG");
        assert_eq!(name.companion_name(ChannelTag::Curl), "sim_c_3.png");
    }

    #[test]
    fn test_classify_keeps_padded_file_name() {
        let SnapshotKind::Principal(name) = classify("sim_007.png") else {
            panic!("expected a principal snapshot");
        };
        assert_eq!(name.base, "sim");
        assert_eq!(name.index, 7);
        assert_eq!(name.file_name(), "sim_007.png");
        assert_eq!(name.companion_name(ChannelTag::Velocity), "sim_v_7.png");
    }

    #[test]
    fn test_classify_base_with_tag_like_segment() {
        let SnapshotKind::Principal(name) = classify("run_v_a_5.png") else {
            panic!("expected a principal snapshot");
        };
        assert_eq!(name.base, "run_v_a");
        assert_eq!(name.companion_name(ChannelTag::Velocity), "run_v_a_v_5.png");
    }

    #[test]
    fn test_same_index_different_files_stay_distinct() {
        let SnapshotKind::Principal(plain) = classify("sim_7.png") else {
            panic!("expected a principal snapshot");
        };
        let SnapshotKind::Principal(padded) = classify("sim_07.png") else {
            panic!("expected a principal snapshot");
        };
        assert_ne!(plain, padded);
        assert_eq!(plain.index, padded.index);
    }

    #[test]
    fn test_companion_name() {
        let name = SnapshotName::new("karman_re200", 7);
        assert_eq!(name.file_name(), "karman_re200_7.png");
        assert_eq!(
            name.companion_name(ChannelTag::Velocity),
            "karman_re200_v_7.png"
        );
        assert_eq!(name.companion_name(ChannelTag::Curl), "karman_re200_c_7.png");
    }

    #[test]
    fn test_ordering_is_numeric_within_base() {
        let mut names = vec![
            SnapshotName::new("sim", 10),
            SnapshotName::new("sim", 2),
            SnapshotName::new("alt", 5),
        ];
        names.sort();
        assert_eq!(
            names,
            vec![
                SnapshotName::new("alt", 5),
                SnapshotName::new("sim", 2),
                SnapshotName::new("sim", 10),
            ]
        );
    }
}
