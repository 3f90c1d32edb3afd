//! This crate checks that an equalizer effect handles its parameters correctly.
//! To get started, implement [`Effect`] (and [`Factory`] to enumerate implementations) on
//! top of the effect service being tested. The [`mock`] module provides a reference
//! equalizer that passes every check.
//!
//! ```no_run
//! use anyhow::Result;
//! use eqvts::{config::SuiteConfig, mock::MockFactory, Suite};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let factory = MockFactory::reference();
//!     let config = SuiteConfig::default();
//!
//!     // Every equalizer implementation, once per band level
//!     let report = Suite::new(&factory, &config).run().await?;
//!     print!("{}", report);
//!
//!     if !report.passed() {
//!         std::process::exit(1);
//!     }
//!     Ok(())
//! }
//! ```

pub use eqvts_protocol::{
    self as protocol, is_in_range, matches, BandLevel, Capability, CapabilityError, Descriptor,
    EqualizerSetting, EqualizerTag, OpenConfig,
};

pub type Result<T, E = EffectError> = core::result::Result<T, E>;

pub mod effect;
pub use effect::{Effect, EffectError, Factory, Status};
pub mod config;
pub mod driver;
pub use driver::{Failure, SetupError, TestInstance};
pub mod logging;
#[cfg(feature = "mock")]
pub mod mock;
pub mod report;
pub use report::SuiteReport;
pub mod scenario;
pub use scenario::{Scenario, ScenarioKind};
pub mod suite;
pub use suite::Suite;
