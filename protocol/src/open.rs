//! Parameters used when opening an effect instance

#[cfg(feature = "use_serde")]
use serde::{Deserialize, Serialize};

use crate::EqualizerSetting;

/// Configuration passed to an effect when it is opened
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use_serde", serde(default))]
pub struct OpenConfig {
    /// Audio session the effect is attached to
    pub session: i32,

    /// Input/output stream handle
    pub io_handle: i32,

    /// Sample rates in Hz
    pub input_sample_rate: u32,
    pub output_sample_rate: u32,

    /// Frames per buffer
    pub input_frame_count: u32,
    pub output_frame_count: u32,

    /// Parameter applied when the effect opens
    pub initial: EqualizerSetting,
}

impl OpenConfig {
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
    pub const DEFAULT_FRAME_COUNT: u32 = 0x100;
}

impl Default for OpenConfig {
    fn default() -> Self {
        Self {
            session: 0,
            io_handle: 1,
            input_sample_rate: Self::DEFAULT_SAMPLE_RATE,
            output_sample_rate: Self::DEFAULT_SAMPLE_RATE,
            input_frame_count: Self::DEFAULT_FRAME_COUNT,
            output_frame_count: Self::DEFAULT_FRAME_COUNT,
            initial: EqualizerSetting::Preset(0),
        }
    }
}
