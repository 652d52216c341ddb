// SPDX-License-Identifier: MIT

use crate::error::FetchError;
use crate::sensor::sensorsource::{FetchFuture, SensorSource};

/// Reads the sensor over its HTTP endpoint.
pub struct HttpSensorSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSensorSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl SensorSource for HttpSensorSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            log::debug!("-> GET {}", self.url);
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status();
            log::debug!("<- {status}");
            if status != reqwest::StatusCode::OK {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            Ok(body.to_vec())
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
