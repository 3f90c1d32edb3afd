//! Effect descriptors
//!
//! A descriptor is what an effect reports about itself: its identity, who implements it and
//! which parameters it supports. For an equalizer, the supported parameters are the list of
//! presets and the list of bands, each identified by an index.

#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};
pub use uuid::Uuid;

/// Effect type shared by every equalizer implementation
pub const EQUALIZER_TYPE_UUID: Uuid = Uuid::from_fields(
    0x0bed_4300,
    0xddd6,
    0x11db,
    &[0x8f, 0x34, 0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1b],
);

/// Software reference equalizer implementation
pub const EQUALIZER_SW_UUID: Uuid = Uuid::from_fields(
    0x0bed_4300,
    0x847d,
    0x11df,
    &[0xbb, 0x17, 0x00, 0x02, 0xa5, 0xd5, 0xc5, 0x1b],
);

/// Identifies an effect instance: which kind of effect it is and who implements it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct Identity {
    /// Effect type, [`EQUALIZER_TYPE_UUID`] for equalizers
    pub type_uuid: Uuid,

    /// Implementation
    pub uuid: Uuid,

    /// Set when this implementation is a proxy for another one
    #[cfg_attr(
        feature = "use_serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub proxy: Option<Uuid>,
}

/// A preset supported by the equalizer
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct Preset {
    pub index: i32,
    pub name: String,
}

/// Frequency range covered by a band, in milliHertz
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct BandFrequency {
    pub index: i32,
    pub min_mh: i32,
    pub max_mh: i32,
}

/// Parameters supported by an equalizer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct EqualizerCapability {
    pub presets: Vec<Preset>,
    pub band_frequencies: Vec<BandFrequency>,
}

/// Effect specific capability advertised in a descriptor
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use_serde", serde(rename_all = "snake_case"))]
pub enum EffectCapability {
    Equalizer(EqualizerCapability),
    Unsupported,
}

impl EffectCapability {
    pub fn as_equalizer(&self) -> Option<&EqualizerCapability> {
        match self {
            EffectCapability::Equalizer(cap) => Some(cap),
            EffectCapability::Unsupported => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct Descriptor {
    pub identity: Identity,
    pub name: String,
    pub implementor: String,
    pub capability: EffectCapability,
}

impl Descriptor {
    pub fn is_equalizer(&self) -> bool {
        self.identity.type_uuid == EQUALIZER_TYPE_UUID
    }
}
