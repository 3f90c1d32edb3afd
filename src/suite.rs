//! Runs every scenario against every equalizer implementation exposed by a factory
//!
//! Each implementation is exercised once per configured band level. Every such case creates
//! its own effect instance, so cases never share state and can't affect each other.

use eqvts_protocol::{descriptor::EQUALIZER_TYPE_UUID, Descriptor};
use log::Level;

use crate::{
    config::SuiteConfig,
    driver::{SetupFailure, TestInstance},
    effect::{Effect, EffectError, Factory},
    logging::LoggingEffect,
    report::{CaseReport, CaseResult, SuiteReport},
};

/// One implementation exercised at one band level
#[derive(Clone, Debug)]
pub struct Case {
    pub name: String,
    pub descriptor: Descriptor,
    pub band_level: i32,
}

impl Case {
    pub fn new(descriptor: Descriptor, band_level: i32) -> Self {
        Self {
            name: case_name(&descriptor, band_level),
            descriptor,
            band_level,
        }
    }
}

/// Builds a unique, identifier-safe name for a case
pub fn case_name(descriptor: &Descriptor, band_level: i32) -> String {
    let (time_low, time_mid, ..) = descriptor.identity.uuid.as_fields();
    format!(
        "factory_{}_UUID_timeLow_{}_timeMid_{}_bandLevel_{}",
        descriptor.implementor, time_low, time_mid, band_level
    )
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
    .collect()
}

pub struct Suite<'a> {
    factory: &'a dyn Factory,
    config: &'a SuiteConfig,
    call_logging: Option<Level>,
}

impl<'a> Suite<'a> {
    pub fn new(factory: &'a dyn Factory, config: &'a SuiteConfig) -> Self {
        Self {
            factory,
            config,
            call_logging: None,
        }
    }

    /// Logs every call made to the effects at the given level
    pub fn with_call_logging(mut self, level: Level) -> Self {
        self.call_logging = Some(level);
        self
    }

    /// Lists the cases: every equalizer implementation crossed with every band level
    pub async fn cases(&self) -> Result<Vec<Case>, EffectError> {
        let descriptors = self
            .factory
            .query_effects(Some(&EQUALIZER_TYPE_UUID))
            .await?;

        Ok(descriptors
            .iter()
            .flat_map(|desc| {
                self.config
                    .band_levels
                    .iter()
                    .map(move |&level| Case::new(desc.clone(), level))
            })
            .collect())
    }

    pub async fn run(&self) -> Result<SuiteReport, EffectError> {
        let cases = self.cases().await?;
        if cases.is_empty() {
            log::warn!("no equalizer implementation found");
        }

        let mut report = SuiteReport::default();
        for case in &cases {
            report.cases.push(self.run_case(case).await);
        }

        Ok(report)
    }

    pub async fn run_case(&self, case: &Case) -> CaseReport {
        log::info!("running {}", case.name);

        let result = match self
            .factory
            .create_effect(&case.descriptor.identity.uuid)
            .await
        {
            Ok(effect) => {
                let (effect, result) = match self.call_logging {
                    Some(level) => {
                        let (effect, result) =
                            self.exercise(LoggingEffect::new(effect, level), case).await;
                        (effect.into_inner(), result)
                    }
                    None => self.exercise(effect, case).await,
                };

                if let Err(e) = self.factory.destroy_effect(effect).await {
                    log::error!("{}: couldn't destroy effect: {}", case.name, e);
                }
                result
            }
            Err(e) => CaseResult::SetupFailed {
                error: format!("couldn't create effect: {}", e),
            },
        };

        let report = CaseReport {
            name: case.name.clone(),
            identity: case.descriptor.identity,
            band_level: case.band_level,
            result,
        };
        if !report.passed() {
            log::warn!("{} failed", case.name);
        }
        report
    }

    async fn exercise<E: Effect>(&self, effect: E, case: &Case) -> (E, CaseResult) {
        match TestInstance::set_up(effect, &self.config.open, case.band_level).await {
            Ok(mut instance) => {
                let scenarios = instance.run_all().await;
                let capability = instance.capability().clone();
                let (effect, closed) = instance.tear_down().await;
                if let Err(e) = &closed {
                    log::error!("{}: couldn't close effect: {}", case.name, e);
                }

                (
                    effect,
                    CaseResult::Completed {
                        capability,
                        scenarios,
                        teardown_error: closed.err().map(|e| e.to_string()),
                    },
                )
            }
            Err(SetupFailure { effect, error }) => {
                log::error!("{}: {}", case.name, error);
                (
                    effect,
                    CaseResult::SetupFailed {
                        error: error.to_string(),
                    },
                )
            }
        }
    }
}
