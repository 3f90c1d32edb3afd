//! Provides a reference equalizer for testing purposes
//!
//! [`MockEffect`] behaves like the software reference equalizer: ten presets and five bands
//! covering 30 Hz to 20 kHz. A few switches make it misbehave in the ways a broken
//! implementation would, which is how the conformance checks themselves get tested.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use eqvts_protocol::{
    descriptor::{EQUALIZER_SW_UUID, EQUALIZER_TYPE_UUID},
    normalize_band_levels, BandFrequency, BandLevel, Descriptor, EffectCapability,
    EqualizerCapability, EqualizerSetting, EqualizerTag, Identity, IndexRange, OpenConfig,
    Preset, Uuid,
};

use crate::{
    config::MockConfig,
    effect::{Effect, EffectError, Factory},
};

/// Names of the reference presets
pub static PRESET_NAMES: &[&str] = &[
    "Normal",
    "Classical",
    "Dance",
    "Flat",
    "Folk",
    "Heavy Metal",
    "Hip Hop",
    "Jazz",
    "Pop",
    "Rock",
];

/// Frequency range of each reference band, in milliHertz
pub static BAND_FREQUENCIES: &[(i32, i32)] = &[
    (30000, 120000),
    (120001, 460000),
    (460001, 1800000),
    (1800001, 7000000),
    (7000001, 20000000),
];

const MIN_FREQUENCY_MH: f64 = 30000.;
const MAX_FREQUENCY_MH: f64 = 20000000.;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Initialized,
    Opened,
    Closed,
}

#[derive(Clone, Debug)]
pub struct MockEffect {
    pub descriptor: Descriptor,

    /// Accept out-of-range writes instead of rejecting them
    pub accept_out_of_range: bool,

    /// Only return the bands that were written when reading band levels back
    pub partial_read_back: bool,

    /// Report band writes as successful without storing them
    pub drop_band_writes: bool,

    state: State,
    preset: i32,
    band_levels: BTreeMap<i32, i32>,
    written_bands: BTreeSet<i32>,
}

impl Default for MockEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEffect {
    /// The reference equalizer
    pub fn new() -> Self {
        Self::with_capability(reference_capability())
    }

    /// An equalizer advertising the given presets and bands
    pub fn with_capability(capability: EqualizerCapability) -> Self {
        Self::from_descriptor(Descriptor {
            identity: Identity {
                type_uuid: EQUALIZER_TYPE_UUID,
                uuid: EQUALIZER_SW_UUID,
                proxy: None,
            },
            name: "EqualizerSw".to_string(),
            implementor: "The Android Open Source Project".to_string(),
            capability: EffectCapability::Equalizer(capability),
        })
    }

    /// An effect reporting the given descriptor. Band state is allocated from the
    /// descriptor's band list, if any.
    pub fn from_descriptor(descriptor: Descriptor) -> Self {
        let band_levels = descriptor
            .capability
            .as_equalizer()
            .map(|cap| cap.band_frequencies.iter().map(|b| (b.index, 0)).collect())
            .unwrap_or_default();

        Self {
            descriptor,
            accept_out_of_range: false,
            partial_read_back: false,
            drop_band_writes: false,
            state: State::Initialized,
            preset: 0,
            band_levels,
            written_bands: BTreeSet::new(),
        }
    }

    /// An equalizer with `presets` presets and `bands` bands spread over 30 Hz to 20 kHz
    pub fn with_sizes(presets: usize, bands: usize) -> Self {
        Self::with_capability(EqualizerCapability {
            presets: make_presets(presets),
            band_frequencies: make_bands(bands),
        })
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.descriptor.identity.uuid = uuid;
        self
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Opened
    }

    /// Current preset
    pub fn preset(&self) -> i32 {
        self.preset
    }

    /// Current level of every band, sorted by index
    pub fn band_levels(&self) -> Vec<BandLevel> {
        self.band_levels
            .iter()
            .map(|(&index, &level_mb)| BandLevel { index, level_mb })
            .collect()
    }

    /// Returns a copy of this effect with its state reset, as a newly created instance would be
    fn instantiate(&self) -> Self {
        let mut effect = Self::from_descriptor(self.descriptor.clone());
        effect.accept_out_of_range = self.accept_out_of_range;
        effect.partial_read_back = self.partial_read_back;
        effect.drop_band_writes = self.drop_band_writes;
        effect
    }

    fn capability(&self) -> Option<&EqualizerCapability> {
        self.descriptor.capability.as_equalizer()
    }

    fn has_preset(&self, index: i32) -> bool {
        self.capability()
            .map(|cap| cap.presets.iter().any(|p| p.index == index))
            .unwrap_or(false)
    }

    // Any index between the lowest and highest advertised band is settable
    fn has_band(&self, index: i32) -> bool {
        self.capability()
            .and_then(|cap| IndexRange::spanning(cap.band_frequencies.iter().map(|b| b.index)))
            .map_or(false, |range| range.contains(index))
    }

    fn ensure_open(&self) -> Result<(), EffectError> {
        match self.state {
            State::Opened => Ok(()),
            State::Initialized => Err(EffectError::IllegalState("effect is not open".into())),
            State::Closed => Err(EffectError::IllegalState("effect is closed".into())),
        }
    }

    // Validates and applies a setting while updating the internal state
    fn apply(&mut self, setting: &EqualizerSetting) -> Result<(), EffectError> {
        match setting {
            &EqualizerSetting::Preset(index) => {
                if !self.has_preset(index) && !self.accept_out_of_range {
                    return Err(EffectError::InvalidArgument(format!(
                        "preset {} is not supported",
                        index
                    )));
                }
                self.preset = index;
            }
            EqualizerSetting::BandLevels(levels) => {
                if let Some(level) = levels.iter().find(|l| !self.has_band(l.index)) {
                    if !self.accept_out_of_range {
                        return Err(EffectError::InvalidArgument(format!(
                            "band {} is not supported",
                            level.index
                        )));
                    }
                }

                if self.drop_band_writes {
                    return Ok(());
                }

                // A repeated index keeps its first level
                for level in normalize_band_levels(levels) {
                    if self.has_band(level.index) {
                        self.band_levels.insert(level.index, level.level_mb);
                        self.written_bands.insert(level.index);
                    }
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Effect for MockEffect {
    async fn open(&mut self, config: &OpenConfig) -> Result<(), EffectError> {
        if self.state != State::Initialized {
            return Err(EffectError::IllegalState("effect was already opened".into()));
        }
        if config.input_sample_rate == 0 || config.output_sample_rate == 0 {
            return Err(EffectError::InvalidArgument("sample rate must be set".into()));
        }

        self.apply(&config.initial)?;
        self.state = State::Opened;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), EffectError> {
        self.ensure_open()?;
        self.state = State::Closed;
        Ok(())
    }

    async fn get_descriptor(&self) -> Result<Descriptor, EffectError> {
        Ok(self.descriptor.clone())
    }

    async fn set_parameter(&mut self, setting: &EqualizerSetting) -> Result<(), EffectError> {
        self.ensure_open()?;
        self.apply(setting)
    }

    async fn get_parameter(&self, tag: EqualizerTag) -> Result<EqualizerSetting, EffectError> {
        self.ensure_open()?;
        Ok(match tag {
            EqualizerTag::Preset => EqualizerSetting::Preset(self.preset),
            EqualizerTag::BandLevels if self.partial_read_back => EqualizerSetting::BandLevels(
                self.band_levels()
                    .into_iter()
                    .filter(|l| self.written_bands.contains(&l.index))
                    .collect(),
            ),
            EqualizerTag::BandLevels => EqualizerSetting::BandLevels(self.band_levels()),
        })
    }
}

/// Creates [`MockEffect`] instances from a list of templates
#[derive(Debug, Default)]
pub struct MockFactory {
    templates: Vec<MockEffect>,
    live: AtomicUsize,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory serving only the reference equalizer
    pub fn reference() -> Self {
        Self::new().with_effect(MockEffect::new())
    }

    pub fn from_config(config: &MockConfig) -> Self {
        let effect = match (config.presets, config.bands) {
            (None, None) => MockEffect::new(),
            (presets, bands) => MockEffect::with_sizes(
                presets.unwrap_or(PRESET_NAMES.len()),
                bands.unwrap_or(BAND_FREQUENCIES.len()),
            ),
        };
        Self::new().with_effect(effect)
    }

    pub fn with_effect(mut self, effect: MockEffect) -> Self {
        self.templates.push(effect);
        self
    }

    /// Number of instances created and not yet destroyed
    pub fn live_instances(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Factory for MockFactory {
    async fn query_effects(
        &self,
        type_uuid: Option<&Uuid>,
    ) -> Result<Vec<Descriptor>, EffectError> {
        Ok(self
            .templates
            .iter()
            .map(|t| &t.descriptor)
            .filter(|d| type_uuid.map_or(true, |uuid| d.identity.type_uuid == *uuid))
            .cloned()
            .collect())
    }

    async fn create_effect(&self, uuid: &Uuid) -> Result<Box<dyn Effect>, EffectError> {
        let template = self
            .templates
            .iter()
            .find(|t| t.descriptor.identity.uuid == *uuid)
            .ok_or(EffectError::NoSuchEffect(*uuid))?;

        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(template.instantiate()))
    }

    async fn destroy_effect(&self, effect: Box<dyn Effect>) -> Result<(), EffectError> {
        drop(effect);
        self.live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map_err(|_| EffectError::IllegalState("no live instance to destroy".into()))?;
        Ok(())
    }
}

/// Presets and bands of the reference equalizer
pub fn reference_capability() -> EqualizerCapability {
    EqualizerCapability {
        presets: make_presets(PRESET_NAMES.len()),
        band_frequencies: BAND_FREQUENCIES
            .iter()
            .enumerate()
            .map(|(index, &(min_mh, max_mh))| BandFrequency {
                index: index as i32,
                min_mh,
                max_mh,
            })
            .collect(),
    }
}

fn make_presets(count: usize) -> Vec<Preset> {
    (0..count)
        .map(|index| Preset {
            index: index as i32,
            name: PRESET_NAMES
                .get(index)
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("Custom {}", index)),
        })
        .collect()
}

// Splits the audible range into `count` bands of equal width on a log scale
fn make_bands(count: usize) -> Vec<BandFrequency> {
    let ratio = MAX_FREQUENCY_MH / MIN_FREQUENCY_MH;
    let edge = |i: usize| (MIN_FREQUENCY_MH * ratio.powf(i as f64 / count as f64)).round() as i32;

    (0..count)
        .map(|index| BandFrequency {
            index: index as i32,
            min_mh: if index == 0 { edge(0) } else { edge(index) + 1 },
            max_mh: edge(index + 1),
        })
        .collect()
}
