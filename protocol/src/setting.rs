//! Settable equalizer parameters

use std::fmt;

#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};

/// Level applied to a single band
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct BandLevel {
    /// Band index, as advertised in the descriptor's band frequencies
    pub index: i32,

    /// Level in millibels
    pub level_mb: i32,
}

impl BandLevel {
    pub fn new(index: i32, level_mb: i32) -> Self {
        Self { index, level_mb }
    }
}

impl fmt::Display for BandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{index: {}, levelMb: {}}}", self.index, self.level_mb)
    }
}

/// A single equalizer parameter, either a preset selection or a set of band levels
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use_serde", serde(rename_all = "snake_case"))]
pub enum EqualizerSetting {
    Preset(i32),
    BandLevels(Vec<BandLevel>),
}

/// Identifies which field of the equalizer a read targets
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "use_serde",
    derive(strum::EnumString, strum::Display, Serialize, Deserialize)
)]
#[cfg_attr(feature = "use_serde", strum(serialize_all = "snake_case"))]
#[cfg_attr(feature = "use_serde", serde(rename_all = "snake_case"))]
pub enum EqualizerTag {
    Preset,
    BandLevels,
}

impl EqualizerSetting {
    /// Builds a band level setting from `(index, level)` pairs
    pub fn band_levels<I: IntoIterator<Item = (i32, i32)>>(levels: I) -> Self {
        EqualizerSetting::BandLevels(
            levels
                .into_iter()
                .map(|(index, level_mb)| BandLevel { index, level_mb })
                .collect(),
        )
    }

    pub fn tag(&self) -> EqualizerTag {
        match self {
            EqualizerSetting::Preset(_) => EqualizerTag::Preset,
            EqualizerSetting::BandLevels(_) => EqualizerTag::BandLevels,
        }
    }
}

impl Default for EqualizerSetting {
    fn default() -> Self {
        EqualizerSetting::Preset(0)
    }
}

impl fmt::Display for EqualizerSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EqualizerSetting::Preset(index) => write!(f, "preset: {}", index),
            EqualizerSetting::BandLevels(levels) => {
                let strs: Vec<String> = levels.iter().map(ToString::to_string).collect();
                write!(f, "bandLevels: [{}]", strs.join(", "))
            }
        }
    }
}
