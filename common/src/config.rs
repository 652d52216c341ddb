// SPDX-License-Identifier: MIT

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Path of the reading endpoint on the sensor's web server.
pub const SENSOR_READING_PATH: &str = "/updatesensorreading";

/// Polling parameters.
///
/// Every field may be left out of the JSON; missing fields take the defaults
/// of the device's own dashboard (poll every 3 s, give up after 2 s).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PollConfig {
    /// Base URL of the sensor, e.g. `http://192.168.4.1`. `None` selects the dummy sensor.
    pub host: Option<String>,

    /// Interval between two ticks.
    pub period_ms: u64,

    /// How long a single request may take before the tick counts as timed out.
    pub timeout_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            host: None,
            period_ms: 3000,
            timeout_ms: 2000,
        }
    }
}

impl PollConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_ms == 0 {
            return Err(ConfigError::Zero("period_ms"));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Zero("timeout_ms"));
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the reading endpoint, if a host is configured.
    pub fn endpoint(&self) -> Option<String> {
        self.host
            .as_deref()
            .map(|host| format!("{}{}", host.trim_end_matches('/'), SENSOR_READING_PATH))
    }
}

#[test]
fn test_defaults() {
    let config = PollConfig::from_json("{}").unwrap();

    assert_eq!(config, PollConfig::default());
    assert_eq!(config.period(), Duration::from_secs(3));
    assert_eq!(config.timeout(), Duration::from_secs(2));
    assert_eq!(config.endpoint(), None);
}

#[test]
fn test_partial_config() {
    let config = PollConfig::from_json(r#"{ "host": "http://192.168.4.1/", "timeout_ms": 500 }"#).unwrap();

    assert_eq!(config.period_ms, 3000);
    assert_eq!(config.timeout_ms, 500);
    assert_eq!(
        config.endpoint().as_deref(),
        Some("http://192.168.4.1/updatesensorreading")
    );
}

#[test]
fn test_zero_period_is_rejected() {
    let err = PollConfig::from_json(r#"{ "period_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Zero("period_ms")));

    let err = PollConfig::from_json(r#"{ "timeout_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Zero("timeout_ms")));
}

#[test]
fn test_garbage_is_rejected() {
    assert!(matches!(
        PollConfig::from_json(r#"{ "period_ms": "fast" }"#),
        Err(ConfigError::Parse(_))
    ));
}
