//! Runs scenarios against a single effect instance
//!
//! Setup errors are fatal to the instance. Once set up, every step of every scenario runs to
//! completion and its failures are collected, a failing step never stops the ones after it.

use std::convert::TryFrom;

use eqvts_protocol::{
    is_in_range, matches, missing_bands, Capability, CapabilityError, Descriptor,
    EqualizerSetting, OpenConfig,
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    effect::{Effect, EffectError, Status},
    scenario::{self, Scenario, ScenarioKind},
};

/// Errors preventing an instance from being exercised at all
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("couldn't open effect: {0}")]
    Open(#[source] EffectError),

    #[error("couldn't get descriptor: {0}")]
    Descriptor(#[source] EffectError),

    #[error("unusable capability: {0}")]
    Capability(#[from] CapabilityError),
}

/// A failed expectation within a scenario step
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Failure {
    #[error("set_parameter returned {actual}, expected {expected}")]
    StatusMismatch {
        expected: Status,
        actual: Status,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    #[error("read back {observed} after writing {expected}")]
    UnexpectedMismatch {
        expected: EqualizerSetting,
        observed: EqualizerSetting,
    },

    #[error("band read-back is missing bands {missing:?}")]
    IncompleteReadBack { missing: Vec<i32> },

    #[error("get_parameter failed with {status}: {message}")]
    ReadFailed { status: Status, message: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct StepOutcome {
    pub setting: EqualizerSetting,
    pub expected: Status,
    pub actual: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<EqualizerSetting>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
}

impl StepOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioOutcome {
    pub kind: ScenarioKind,
    pub steps: Vec<StepOutcome>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.steps.iter().all(StepOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.steps.iter().flat_map(|step| step.failures.iter())
    }
}

/// Returned when setting up an instance fails, giving the effect back so it can be destroyed
#[derive(Debug)]
pub struct SetupFailure<E> {
    pub effect: E,
    pub error: SetupError,
}

/// An opened effect instance along with the capability it advertised
pub struct TestInstance<E> {
    effect: E,
    descriptor: Descriptor,
    capability: Capability,
    band_level: i32,
}

impl<E: Effect> TestInstance<E> {
    /// Opens the effect and derives its capability from its descriptor
    pub async fn set_up(
        mut effect: E,
        config: &OpenConfig,
        band_level: i32,
    ) -> Result<Self, SetupFailure<E>> {
        if let Err(e) = effect.open(config).await {
            return Err(SetupFailure {
                effect,
                error: SetupError::Open(e),
            });
        }

        let discovered = match effect.get_descriptor().await {
            Ok(descriptor) => Capability::try_from(&descriptor)
                .map(|capability| (descriptor, capability))
                .map_err(SetupError::from),
            Err(e) => Err(SetupError::Descriptor(e)),
        };

        match discovered {
            Ok((descriptor, capability)) => {
                log::debug!("{}: {}", descriptor.name, capability);
                Ok(Self {
                    effect,
                    descriptor,
                    capability,
                    band_level,
                })
            }
            Err(error) => {
                if let Err(e) = effect.close().await {
                    log::error!("couldn't close effect after failed setup: {}", e);
                }
                Err(SetupFailure { effect, error })
            }
        }
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        scenario::generate(&self.capability, self.band_level)
    }

    /// Runs every generated scenario in order
    pub async fn run_all(&mut self) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::new();
        for scenario in self.scenarios() {
            outcomes.push(self.run(&scenario).await);
        }
        outcomes
    }

    pub async fn run(&mut self, scenario: &Scenario) -> ScenarioOutcome {
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for setting in &scenario.steps {
            let step = self.run_step(setting).await;
            for failure in &step.failures {
                log::warn!("{} ({}): {}", scenario.kind, setting, failure);
            }
            steps.push(step);
        }

        ScenarioOutcome {
            kind: scenario.kind,
            steps,
        }
    }

    async fn run_step(&mut self, setting: &EqualizerSetting) -> StepOutcome {
        let expected = Status::expected_for(is_in_range(&self.capability, setting));
        let result = self.effect.set_parameter(setting).await;
        let actual = Status::of(&result);

        let mut failures = Vec::new();
        if actual != expected {
            failures.push(Failure::StatusMismatch {
                expected,
                actual,
                message: result.err().map(|e| e.to_string()),
            });
        }

        // Only read back what the effect was supposed to accept
        let mut observed = None;
        if expected == Status::Ok {
            match self.effect.get_parameter(setting.tag()).await {
                Ok(value) => {
                    failures.extend(self.check_read_back(setting, &value));
                    observed = Some(value);
                }
                Err(e) => failures.push(Failure::ReadFailed {
                    status: e.status(),
                    message: e.to_string(),
                }),
            }
        }

        StepOutcome {
            setting: setting.clone(),
            expected,
            actual,
            observed,
            failures,
        }
    }

    fn check_read_back(
        &self,
        expected: &EqualizerSetting,
        observed: &EqualizerSetting,
    ) -> Vec<Failure> {
        let mut failures = Vec::new();
        if !matches(expected, observed) {
            failures.push(Failure::UnexpectedMismatch {
                expected: expected.clone(),
                observed: observed.clone(),
            });
        }

        if let EqualizerSetting::BandLevels(levels) = observed {
            let missing = missing_bands(&self.capability, levels);
            if !missing.is_empty() {
                failures.push(Failure::IncompleteReadBack { missing });
            }
        }

        failures
    }

    /// Closes the effect, returning it along with the result of the close call
    pub async fn tear_down(mut self) -> (E, Result<(), EffectError>) {
        let result = self.effect.close().await;
        (self.effect, result)
    }
}

#[cfg(all(test, feature = "mock"))]
mod test {
    use eqvts_protocol::{EffectCapability, EqualizerCapability};

    use super::*;
    use crate::mock::MockEffect;

    // Opening with a preset would be rejected by effects without presets
    fn open_config() -> OpenConfig {
        OpenConfig {
            initial: EqualizerSetting::BandLevels(vec![]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reference_passes() {
        let mut instance = TestInstance::set_up(MockEffect::new(), &OpenConfig::default(), -10)
            .await
            .unwrap();

        let outcomes = instance.run_all().await;
        assert_eq!(outcomes.len(), 12);
        for outcome in &outcomes {
            assert!(outcome.passed(), "{:?}", outcome);
        }

        let (effect, result) = instance.tear_down().await;
        result.unwrap();
        assert!(!effect.is_open());
    }

    #[tokio::test]
    async fn test_out_of_range_is_not_read() {
        let mut instance = TestInstance::set_up(MockEffect::new(), &OpenConfig::default(), 0)
            .await
            .unwrap();

        let outcome = instance
            .run(&Scenario::new(
                ScenarioKind::BandAboveMax,
                vec![EqualizerSetting::band_levels([(5, 0)])],
            ))
            .await;
        assert!(outcome.passed());
        assert_eq!(outcome.steps[0].expected, Status::IllegalArgument);
        assert_eq!(outcome.steps[0].observed, None);
    }

    #[tokio::test]
    async fn test_empty_capability() {
        let effect = MockEffect::with_capability(EqualizerCapability {
            presets: vec![],
            ..crate::mock::reference_capability()
        });

        let failure = TestInstance::set_up(effect, &open_config(), 0)
            .await
            .err()
            .unwrap();
        assert!(matches!(
            failure.error,
            SetupError::Capability(CapabilityError::EmptyCapability { field: "presets" })
        ));
        // Opened then closed again
        assert!(!failure.effect.is_open());
    }

    #[tokio::test]
    async fn test_not_an_equalizer() {
        let mut effect = MockEffect::new();
        effect.descriptor.capability = EffectCapability::Unsupported;

        let failure = TestInstance::set_up(effect, &open_config(), 0)
            .await
            .err()
            .unwrap();
        assert!(matches!(
            failure.error,
            SetupError::Capability(CapabilityError::NotAnEqualizer)
        ));
    }
}
