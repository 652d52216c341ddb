// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Status string the sensor reports once it delivers steady-state values.
pub const MEASURING: &str = "measuring";

/// The JSON body served at `/updatesensorreading`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SensorPayload {
    pub co2: f64,
    pub status: String,
    /// Warm-up percent. Only read while the sensor is not measuring, and even
    /// then a missing or non-numeric value does not reject the reading.
    #[serde(default)]
    pub readystatus: Option<serde_json::Value>,
}

/// Lifecycle of the sensor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SensorStatus {
    Measuring,

    /// Any status other than `measuring`, e.g. `preheating`.
    WarmingUp {
        /// The status string as reported by the device.
        phase: String,
        /// Warm-up completion in percent, `0..=100`. `None` if the device did
        /// not report a usable number.
        ready_percent: Option<u8>,
    },
}

/// A normalized sensor observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    /// CO2 concentration in ppm.
    pub concentration: u32,
    pub status: SensorStatus,
}

impl Reading {
    /// Interprets a JSON value received from the sensor.
    pub fn from_json(value: serde_json::Value) -> Result<Self, PayloadError> {
        let payload = serde_json::from_value::<SensorPayload>(value)
            .map_err(|e| PayloadError::Shape(e.to_string()))?;

        payload.try_into()
    }

    pub fn is_measuring(&self) -> bool {
        self.status == SensorStatus::Measuring
    }
}

impl TryFrom<SensorPayload> for Reading {
    type Error = PayloadError;

    fn try_from(payload: SensorPayload) -> Result<Self, Self::Error> {
        let co2 = payload.co2;
        if !co2.is_finite() || co2 < 0.0 || co2 > u32::MAX as f64 {
            return Err(PayloadError::Concentration(co2));
        }

        let status = if payload.status == MEASURING {
            SensorStatus::Measuring
        } else {
            let ready_percent = payload
                .readystatus
                .as_ref()
                .and_then(serde_json::Value::as_f64)
                .filter(|ready| ready.is_finite())
                .map(|ready| ready.clamp(0.0, 100.0) as u8);

            SensorStatus::WarmingUp {
                phase: payload.status,
                ready_percent,
            }
        };

        Ok(Self {
            // Fractional ppm values are cut off like the chart always did.
            concentration: co2 as u32,
            status,
        })
    }
}
