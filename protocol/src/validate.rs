//! Range validation of equalizer settings against a [`Capability`]

use crate::{BandLevel, Capability, EqualizerSetting};

/// Whether `setting` only refers to indices the effect advertised.
///
/// A band level batch is rejected as a whole if any of its entries is out of range.
pub fn is_in_range(cap: &Capability, setting: &EqualizerSetting) -> bool {
    match setting {
        EqualizerSetting::Preset(index) => cap.presets.contains(*index),
        EqualizerSetting::BandLevels(levels) => bands_in_range(cap, levels),
    }
}

fn bands_in_range(cap: &Capability, levels: &[BandLevel]) -> bool {
    levels.iter().all(|level| cap.bands.contains(level.index))
}
