//! Equivalence between a parameter write and the state read back afterwards
//!
//! A band level write only touches the bands it lists, while reading band levels back
//! returns the complete state of every band. Writing `{3, -1}` on a five band equalizer is
//! therefore expected to read back as `[{0, 0}, {1, 0}, {2, 0}, {3, -1}, {4, 0}]`.

use std::collections::BTreeSet;

use crate::{BandLevel, Capability, EqualizerSetting};

/// Sorts band levels by index and drops repeated indices, keeping the first occurrence
pub fn normalize_band_levels(levels: &[BandLevel]) -> Vec<BandLevel> {
    let mut levels = levels.to_vec();
    // Stable sort, the first write of an index stays in front
    levels.sort_by_key(|level| level.index);
    levels.dedup_by_key(|level| level.index);
    levels
}

/// Whether `observed` reflects a successful write of `expected`
pub fn matches(expected: &EqualizerSetting, observed: &EqualizerSetting) -> bool {
    if expected == observed {
        return true;
    }

    match (expected, observed) {
        (EqualizerSetting::Preset(expected), EqualizerSetting::Preset(observed)) => {
            expected == observed
        }
        (EqualizerSetting::BandLevels(expected), EqualizerSetting::BandLevels(observed)) => {
            let observed: BTreeSet<&BandLevel> = observed.iter().collect();
            normalize_band_levels(expected)
                .iter()
                .all(|level| observed.contains(level))
        }
        _ => false,
    }
}

/// Supported band indices absent from a band level read-back
pub fn missing_bands(cap: &Capability, observed: &[BandLevel]) -> Vec<i32> {
    let present: BTreeSet<i32> = observed.iter().map(|level| level.index).collect();
    cap.band_indices
        .iter()
        .copied()
        .filter(|index| !present.contains(index))
        .collect()
}
