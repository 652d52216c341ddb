// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use crate::error::FetchError;
use crate::reading::{SensorPayload, MEASURING};
use crate::sensor::sensorsource::{FetchFuture, SensorSource};

/// Script driving the simulated sensor.
#[derive(Deserialize, Clone, Debug)]
struct DummyScript {
    warmup_status: String,
    warmup_step: u32,
    concentrations: Vec<u32>,
}

/// A simulated MH-Z19B: preheats in `warmup_step` percent increments, then
/// measures the scripted concentrations in a loop.
#[derive(Debug)]
pub struct DummySensorSource {
    script: DummyScript,
    requests: AtomicUsize,
}

impl DummySensorSource {
    pub fn new() -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./dummysensor.json");

        let script = serde_json::from_str::<DummyScript>(json_data)?;

        Ok(Self {
            script,
            requests: AtomicUsize::new(0),
        })
    }

    fn payload(&self, request: usize) -> SensorPayload {
        let concentrations = &self.script.concentrations;
        let co2 = match concentrations.len() {
            0 => 0,
            len => concentrations[request % len],
        };

        let ready = (request as u64).saturating_mul(self.script.warmup_step as u64);

        if ready < 100 && self.script.warmup_step > 0 {
            SensorPayload {
                co2: co2 as f64,
                status: self.script.warmup_status.clone(),
                readystatus: Some(ready.into()),
            }
        } else {
            SensorPayload {
                co2: co2 as f64,
                status: MEASURING.to_string(),
                readystatus: Some(100.into()),
            }
        }
    }
}

impl SensorSource for DummySensorSource {
    fn fetch(&self) -> FetchFuture<'_> {
        let request = self.requests.fetch_add(1, Ordering::Relaxed);
        let payload = self.payload(request);

        Box::pin(async move {
            serde_json::to_vec(&payload).map_err(|e| FetchError::Body(e.to_string()))
        })
    }

    fn describe(&self) -> String {
        "dummy sensor".to_string()
    }
}
