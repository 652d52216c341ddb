// SPDX-License-Identifier: MIT

//! Polling, interpretation and view state for the CO2 monitor.
//!
//! The pipeline of one tick is `Poller` -> `PollOutcome` -> `Reading` -> `ViewState`.
//! Nothing in this crate touches a UI toolkit directly; the window implements
//! [`view::DisplaySurface`] and hands it to [`view::ViewState::apply`].

pub mod chart;
pub mod config;
pub mod error;
pub mod poller;
pub mod reading;
pub mod sensor;
pub mod view;

pub use config::PollConfig;
pub use error::{ConfigError, FetchError, PayloadError, TickError};
pub use poller::{PollOutcome, Poller, Tick};
pub use reading::{Reading, SensorPayload, SensorStatus};
pub use sensor::{DummySensorSource, SensorSource, SensorSourcePointer};
pub use view::{ConnectionStatus, DisplaySurface, SeriesPoint, ViewState};

#[cfg(feature = "http")]
pub use sensor::HttpSensorSource;
