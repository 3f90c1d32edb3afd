use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eqvts::{
    driver::ScenarioOutcome, mock::MockEffect, Descriptor, Effect, EffectError,
    EqualizerSetting, EqualizerTag, OpenConfig, ScenarioKind, TestInstance,
};

// Runs a single scenario made of the given steps
#[allow(unused_macros)]
macro_rules! run {
    ($instance:expr, $kind:ident, $($step:expr),+ $(,)?) => {
        $instance
            .run(&eqvts::Scenario::new(
                eqvts::ScenarioKind::$kind,
                vec![$($step),+],
            ))
            .await
    };
}

/// A call received by a [`RecordingEffect`]
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Open,
    Close,
    GetDescriptor,
    Set(EqualizerSetting),
    Get(EqualizerTag),
}

/// Forwards to a mock effect while keeping a log of every call
#[derive(Debug)]
pub struct RecordingEffect {
    inner: MockEffect,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingEffect {
    pub fn new(inner: MockEffect) -> (Self, Arc<Mutex<Vec<Call>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                inner,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Effect for RecordingEffect {
    async fn open(&mut self, config: &OpenConfig) -> Result<(), EffectError> {
        self.record(Call::Open);
        self.inner.open(config).await
    }

    async fn close(&mut self) -> Result<(), EffectError> {
        self.record(Call::Close);
        self.inner.close().await
    }

    async fn get_descriptor(&self) -> Result<Descriptor, EffectError> {
        self.record(Call::GetDescriptor);
        self.inner.get_descriptor().await
    }

    async fn set_parameter(&mut self, setting: &EqualizerSetting) -> Result<(), EffectError> {
        self.record(Call::Set(setting.clone()));
        self.inner.set_parameter(setting).await
    }

    async fn get_parameter(&self, tag: EqualizerTag) -> Result<EqualizerSetting, EffectError> {
        self.record(Call::Get(tag));
        self.inner.get_parameter(tag).await
    }
}

/// Opens `effect` with the default configuration
pub async fn instance<E: Effect + std::fmt::Debug>(effect: E, band_level: i32) -> TestInstance<E> {
    TestInstance::set_up(effect, &OpenConfig::default(), band_level)
        .await
        .unwrap()
}

/// Kinds of the scenarios that failed
#[allow(dead_code)]
pub fn failed_kinds(outcomes: &[ScenarioOutcome]) -> Vec<ScenarioKind> {
    outcomes
        .iter()
        .filter(|o| !o.passed())
        .map(|o| o.kind)
        .collect()
}
