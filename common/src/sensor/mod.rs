// SPDX-License-Identifier: MIT

mod sensorsource;
mod dummysensorsource;

pub use sensorsource::FetchFuture;
pub use sensorsource::SensorSource;
pub use sensorsource::SensorSourcePointer;

pub use dummysensorsource::DummySensorSource;

#[cfg(feature = "http")]
mod httpsensorsource;

#[cfg(feature = "http")]
pub use httpsensorsource::HttpSensorSource;
