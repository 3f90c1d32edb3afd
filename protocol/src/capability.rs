//! Valid index ranges derived from an equalizer descriptor

use std::{convert::TryFrom, fmt};

#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Descriptor, EqualizerCapability};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("the descriptor does not advertise any {field}, no valid range can be established")]
    EmptyCapability { field: &'static str },

    #[error("the descriptor does not carry an equalizer capability")]
    NotAnEqualizer,
}

/// An inclusive range of indices
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct IndexRange {
    pub min: i32,
    pub max: i32,
}

impl IndexRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Computes the range spanned by a list of indices, `None` if the list is empty
    pub fn spanning<I: IntoIterator<Item = i32>>(indices: I) -> Option<Self> {
        indices.into_iter().fold(None, |range, index| {
            Some(match range {
                None => IndexRange::new(index, index),
                Some(IndexRange { min, max }) => IndexRange::new(min.min(index), max.max(index)),
            })
        })
    }

    pub fn contains(&self, index: i32) -> bool {
        self.min <= index && index <= self.max
    }

    /// Middle of the range, rounded down
    pub fn midpoint(&self) -> i32 {
        ((self.min as i64 + self.max as i64) >> 1) as i32
    }

    /// The first index below the range, if representable
    pub fn one_below(&self) -> Option<i32> {
        self.min.checked_sub(1)
    }

    /// The first index above the range, if representable
    pub fn one_above(&self) -> Option<i32> {
        self.max.checked_add(1)
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Valid preset and band indices of one effect instance.
///
/// Built once from the descriptor when an instance is set up, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
pub struct Capability {
    pub presets: IndexRange,
    pub bands: IndexRange,

    /// Every supported band index, sorted and unique
    pub band_indices: Vec<i32>,
}

impl Capability {
    pub fn from_indices<P, B>(presets: P, bands: B) -> Result<Self, CapabilityError>
    where
        P: IntoIterator<Item = i32>,
        B: IntoIterator<Item = i32>,
    {
        let presets = IndexRange::spanning(presets)
            .ok_or(CapabilityError::EmptyCapability { field: "presets" })?;

        let mut band_indices: Vec<i32> = bands.into_iter().collect();
        band_indices.sort_unstable();
        band_indices.dedup();
        let bands = IndexRange::spanning(band_indices.iter().copied())
            .ok_or(CapabilityError::EmptyCapability { field: "bands" })?;

        Ok(Self {
            presets,
            bands,
            band_indices,
        })
    }

    pub fn from_descriptor(cap: &EqualizerCapability) -> Result<Self, CapabilityError> {
        Self::from_indices(
            cap.presets.iter().map(|p| p.index),
            cap.band_frequencies.iter().map(|b| b.index),
        )
    }
}

impl TryFrom<&Descriptor> for Capability {
    type Error = CapabilityError;

    fn try_from(desc: &Descriptor) -> Result<Self, Self::Error> {
        let cap = desc
            .capability
            .as_equalizer()
            .ok_or(CapabilityError::NotAnEqualizer)?;
        Self::from_descriptor(cap)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "presets: {}, bands: {}", self.presets, self.bands)
    }
}
