//! Traits implemented by an effect service, and the errors it reports

use async_trait::async_trait;
use eqvts_protocol::{Descriptor, EqualizerSetting, EqualizerTag, OpenConfig, Uuid};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EffectError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("no effect implementation with uuid {0}")]
    NoSuchEffect(Uuid),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of a call to the effect service, as seen by a caller
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    IllegalArgument,
    IllegalState,
    UnsupportedOperation,
    ServiceSpecific,
}

impl Status {
    /// Status expected from a write, given whether it is in range
    pub fn expected_for(in_range: bool) -> Self {
        if in_range {
            Status::Ok
        } else {
            Status::IllegalArgument
        }
    }

    pub fn of<T>(result: &Result<T, EffectError>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}

impl EffectError {
    pub fn status(&self) -> Status {
        match self {
            EffectError::InvalidArgument(_) | EffectError::NoSuchEffect(_) => {
                Status::IllegalArgument
            }
            EffectError::IllegalState(_) => Status::IllegalState,
            EffectError::UnsupportedOperation(_) => Status::UnsupportedOperation,
            EffectError::Internal(_) => Status::ServiceSpecific,
        }
    }
}

/// A single effect instance.
///
/// Calls are issued one at a time. `open` must succeed before any parameter is accessed,
/// and `close` is called exactly once when the instance is no longer needed.
#[async_trait]
pub trait Effect: Send + Sync {
    async fn open(&mut self, config: &OpenConfig) -> Result<(), EffectError>;

    async fn close(&mut self) -> Result<(), EffectError>;

    async fn get_descriptor(&self) -> Result<Descriptor, EffectError>;

    /// Applies a parameter, failing with [`EffectError::InvalidArgument`] if any index it
    /// refers to is not supported
    async fn set_parameter(&mut self, setting: &EqualizerSetting) -> Result<(), EffectError>;

    /// Reads back the complete current value of the given field
    async fn get_parameter(&self, tag: EqualizerTag) -> Result<EqualizerSetting, EffectError>;
}

#[async_trait]
impl<E: Effect + ?Sized> Effect for Box<E> {
    async fn open(&mut self, config: &OpenConfig) -> Result<(), EffectError> {
        (**self).open(config).await
    }

    async fn close(&mut self) -> Result<(), EffectError> {
        (**self).close().await
    }

    async fn get_descriptor(&self) -> Result<Descriptor, EffectError> {
        (**self).get_descriptor().await
    }

    async fn set_parameter(&mut self, setting: &EqualizerSetting) -> Result<(), EffectError> {
        (**self).set_parameter(setting).await
    }

    async fn get_parameter(&self, tag: EqualizerTag) -> Result<EqualizerSetting, EffectError> {
        (**self).get_parameter(tag).await
    }
}

/// Enumerates and instantiates effect implementations
#[async_trait]
pub trait Factory: Send + Sync {
    /// Lists the available implementations, optionally restricted to a single effect type
    async fn query_effects(&self, type_uuid: Option<&Uuid>)
        -> Result<Vec<Descriptor>, EffectError>;

    async fn create_effect(&self, uuid: &Uuid) -> Result<Box<dyn Effect>, EffectError>;

    async fn destroy_effect(&self, effect: Box<dyn Effect>) -> Result<(), EffectError>;
}
