// SPDX-License-Identifier: MIT

use std::future::Future;
use std::pin::Pin;

use crate::error::FetchError;

/// Future returned by [`SensorSource::fetch`], resolving to the raw response body.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, FetchError>> + Send + 'a>>;

/// Something that can be asked for the current sensor reading.
///
/// Implemented once for the real device and once for a simulated one.
pub trait SensorSource {
    /// Starts one request. The future is not bounded in time, the poller races it
    /// against its own timeout.
    fn fetch(&self) -> FetchFuture<'_>;

    /// Human readable origin of the readings, used in log output.
    fn describe(&self) -> String;
}

pub type SensorSourcePointer = Box<dyn SensorSource + Send + Sync>;
