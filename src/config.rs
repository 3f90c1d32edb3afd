//! Suite configuration, loaded from a TOML file
use std::path::Path;

use eqvts_protocol::OpenConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Band levels exercised when the configuration doesn't specify any
pub const DEFAULT_BAND_LEVELS: [i32; 3] = [0, -10, 10];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't read configuration file: {0}")]
    IOError(#[from] std::io::Error),

    #[error("couldn't parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Level in millibels used by every band level scenario. Each value runs the
    /// full set of scenarios against every instance.
    pub band_levels: Vec<i32>,

    /// Parameters used to open each effect instance
    pub open: OpenConfig,

    /// Layout of the reference mock equalizer
    pub mock: MockConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            band_levels: DEFAULT_BAND_LEVELS.to_vec(),
            open: OpenConfig::default(),
            mock: MockConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Number of presets, defaults to the ten reference presets
    pub presets: Option<usize>,

    /// Number of bands, defaults to the five reference bands
    pub bands: Option<usize>,
}

impl SuiteConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
