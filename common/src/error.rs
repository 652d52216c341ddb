// SPDX-License-Identifier: MIT

use std::time::Duration;

use thiserror::Error;

/// Failure to get a JSON body out of the sensor endpoint.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// The endpoint answered, but not with a 2xx status.
    #[error("sensor answered with HTTP status {0}")]
    Status(u16),

    /// The request could not be sent or the connection broke.
    #[error("sensor unreachable: {0}")]
    Network(String),

    /// The body arrived but is not JSON.
    #[error("sensor body is not JSON: {0}")]
    Body(String),
}

/// The payload parsed as JSON but does not describe a sensor reading.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PayloadError {
    #[error("payload does not have the sensor reading shape: {0}")]
    Shape(String),

    #[error("co2 value {0} is not a non-negative concentration")]
    Concentration(f64),
}

/// Everything that can go wrong within one tick. None of these stop the poll loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TickError {
    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Transport(#[from] FetchError),

    #[error(transparent)]
    MalformedPayload(#[from] PayloadError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
}
