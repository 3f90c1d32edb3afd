//! Boundary scenarios derived from a capability
//!
//! Each settable field is probed one below its minimum, at its minimum, at its midpoint, at
//! its maximum and one above its maximum. Two more scenarios chain several writes together.

use eqvts_protocol::{Capability, EqualizerSetting, IndexRange};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter)]
pub enum ScenarioKind {
    PresetBelowMin,
    PresetAtMin,
    PresetMidpoint,
    PresetAtMax,
    PresetAboveMax,
    BandBelowMin,
    BandAtMin,
    BandMidpoint,
    BandAtMax,
    BandAboveMax,
    /// Minimum preset, then the lowest, highest and middle bands in a single write
    MultiBands,
    /// Middle band, then middle preset
    MultipleParams,
}

/// An ordered list of writes, each one checked independently
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub steps: Vec<EqualizerSetting>,
}

impl Scenario {
    pub fn new(kind: ScenarioKind, steps: Vec<EqualizerSetting>) -> Self {
        Self { kind, steps }
    }
}

#[derive(Copy, Clone)]
enum Probe {
    BelowMin,
    AtMin,
    Midpoint,
    AtMax,
    AboveMax,
}

impl Probe {
    fn index(self, range: &IndexRange) -> Option<i32> {
        match self {
            Probe::BelowMin => range.one_below(),
            Probe::AtMin => Some(range.min),
            Probe::Midpoint => Some(range.midpoint()),
            Probe::AtMax => Some(range.max),
            Probe::AboveMax => range.one_above(),
        }
    }
}

const PROBES: [(Probe, ScenarioKind, ScenarioKind); 5] = [
    (
        Probe::BelowMin,
        ScenarioKind::PresetBelowMin,
        ScenarioKind::BandBelowMin,
    ),
    (Probe::AtMin, ScenarioKind::PresetAtMin, ScenarioKind::BandAtMin),
    (
        Probe::Midpoint,
        ScenarioKind::PresetMidpoint,
        ScenarioKind::BandMidpoint,
    ),
    (Probe::AtMax, ScenarioKind::PresetAtMax, ScenarioKind::BandAtMax),
    (
        Probe::AboveMax,
        ScenarioKind::PresetAboveMax,
        ScenarioKind::BandAboveMax,
    ),
];

/// Generates every scenario for a capability, writing `band_level` to each probed band
pub fn generate(cap: &Capability, band_level: i32) -> Vec<Scenario> {
    let mut scenarios = Vec::with_capacity(PROBES.len() * 2 + 2);

    for &(probe, kind, _) in &PROBES {
        match probe.index(&cap.presets) {
            Some(index) => {
                scenarios.push(Scenario::new(kind, vec![EqualizerSetting::Preset(index)]))
            }
            None => log::warn!("skipping {}: preset index isn't representable", kind),
        }
    }

    for &(probe, _, kind) in &PROBES {
        match probe.index(&cap.bands) {
            Some(index) => scenarios.push(Scenario::new(
                kind,
                vec![EqualizerSetting::band_levels([(index, band_level)])],
            )),
            None => log::warn!("skipping {}: band index isn't representable", kind),
        }
    }

    let bands = &cap.bands;
    scenarios.push(Scenario::new(
        ScenarioKind::MultiBands,
        vec![
            EqualizerSetting::Preset(cap.presets.min),
            EqualizerSetting::band_levels([
                (bands.min, band_level),
                (bands.max, band_level),
                (bands.midpoint(), band_level),
            ]),
        ],
    ));

    scenarios.push(Scenario::new(
        ScenarioKind::MultipleParams,
        vec![
            EqualizerSetting::band_levels([(bands.midpoint(), band_level)]),
            EqualizerSetting::Preset(cap.presets.midpoint()),
        ],
    ));

    scenarios
}
