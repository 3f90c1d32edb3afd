//! Call logging for effect instances
use async_trait::async_trait;
use eqvts_protocol::{Descriptor, EqualizerSetting, EqualizerTag, OpenConfig};
use log::Level;

use crate::effect::{Effect, EffectError};

/// Wraps an effect, logging every call made to it along with its result
pub struct LoggingEffect<E> {
    inner: E,
    level: Level,
}

impl<E> LoggingEffect<E> {
    pub fn new(inner: E, level: Level) -> Self {
        Self { inner, level }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

fn outcome<T>(result: &Result<T, EffectError>) -> String {
    match result {
        Ok(_) => "ok".to_string(),
        Err(e) => format!("{} ({})", e.status(), e),
    }
}

#[async_trait]
impl<E: Effect> Effect for LoggingEffect<E> {
    async fn open(&mut self, config: &OpenConfig) -> Result<(), EffectError> {
        let result = self.inner.open(config).await;
        log::log!(self.level, "open({:?}) -> {}", config, outcome(&result));
        result
    }

    async fn close(&mut self) -> Result<(), EffectError> {
        let result = self.inner.close().await;
        log::log!(self.level, "close() -> {}", outcome(&result));
        result
    }

    async fn get_descriptor(&self) -> Result<Descriptor, EffectError> {
        let result = self.inner.get_descriptor().await;
        match &result {
            Ok(desc) => log::log!(
                self.level,
                "get_descriptor() -> {} ({}, {})",
                desc.name,
                desc.identity.uuid,
                desc.implementor
            ),
            Err(_) => log::log!(self.level, "get_descriptor() -> {}", outcome(&result)),
        }
        result
    }

    async fn set_parameter(&mut self, setting: &EqualizerSetting) -> Result<(), EffectError> {
        let result = self.inner.set_parameter(setting).await;
        log::log!(self.level, "set_parameter({}) -> {}", setting, outcome(&result));
        result
    }

    async fn get_parameter(&self, tag: EqualizerTag) -> Result<EqualizerSetting, EffectError> {
        let result = self.inner.get_parameter(tag).await;
        match &result {
            Ok(value) => log::log!(self.level, "get_parameter({}) -> {}", tag, value),
            Err(_) => log::log!(self.level, "get_parameter({}) -> {}", tag, outcome(&result)),
        }
        result
    }
}
