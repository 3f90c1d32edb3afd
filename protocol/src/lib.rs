//! Equalizer parameter model and conformance rules.
//!
//! This crate holds everything needed to decide whether an equalizer effect behaves
//! correctly, independently of how the effect is reached:
//!
//! - [`setting`]: the settable parameters ([`EqualizerSetting`], [`BandLevel`])
//! - [`descriptor`]: what an effect reports about itself ([`Descriptor`])
//! - [`open`]: how an effect instance is opened ([`OpenConfig`])
//! - [`capability`]: the valid index ranges derived from a descriptor ([`Capability`])
//! - [`validate`]: whether a setting lies within a capability
//! - [`compare`]: whether a read-back matches a previous write
//!
//! It doesn't include any effect service implementation.

pub mod capability;
pub use capability::{Capability, CapabilityError, IndexRange};

pub mod compare;
pub use compare::{matches, missing_bands, normalize_band_levels};

pub mod descriptor;
pub use descriptor::{
    BandFrequency, Descriptor, EffectCapability, EqualizerCapability, Identity, Preset, Uuid,
};

pub mod open;
pub use open::OpenConfig;

pub mod setting;
pub use setting::{BandLevel, EqualizerSetting, EqualizerTag};

pub mod validate;
pub use validate::is_in_range;
