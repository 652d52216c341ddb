// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::PollConfig;
use crate::error::{FetchError, TickError};
use crate::reading::Reading;
use crate::sensor::SensorSourcePointer;

/// Result of one bounded request.
#[derive(Clone, Debug, PartialEq)]
pub enum PollOutcome {
    /// The sensor answered 200 with a JSON body.
    Success(serde_json::Value),

    /// No answer within the configured timeout.
    Timeout(Duration),

    TransportError(FetchError),
}

impl PollOutcome {
    /// Runs the outcome through the reading interpreter.
    pub fn interpret(self) -> Result<Reading, TickError> {
        match self {
            PollOutcome::Success(value) => Ok(Reading::from_json(value)?),
            PollOutcome::Timeout(after) => Err(TickError::Timeout(after)),
            PollOutcome::TransportError(e) => Err(e.into()),
        }
    }
}

/// An outcome tagged with the sequence number of the tick that issued it.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub seq: u64,
    pub outcome: PollOutcome,
}

/// Issues one request per tick against a [`crate::SensorSource`].
///
/// Ticks are independent: a slow request is not cancelled when the next tick
/// starts, so several may be pending at once. The poller only counts them.
pub struct Poller {
    source: SensorSourcePointer,
    timeout: Duration,
    issued: AtomicU64,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter even if the tick's future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Poller {
    pub fn new(source: SensorSourcePointer, config: &PollConfig) -> Self {
        Self {
            source,
            timeout: config.timeout(),
            issued: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Performs one request, bounded by the timeout, and classifies the result.
    ///
    /// When the timeout fires first the request future is dropped, so a late
    /// answer for this tick never reaches the view.
    pub async fn poll_once(&self) -> Tick {
        let seq = self.issued.fetch_add(1, Ordering::Relaxed) + 1;

        let pending = self.in_flight.fetch_add(1, Ordering::Relaxed);
        let _guard = InFlight(&self.in_flight);
        if pending > 0 {
            log::debug!("tick {seq}: {pending} earlier request(s) still pending");
        }

        let outcome = match tokio::time::timeout(self.timeout, self.source.fetch()).await {
            Err(_) => PollOutcome::Timeout(self.timeout),
            Ok(Err(e)) => PollOutcome::TransportError(e),
            Ok(Ok(body)) => match serde_json::from_slice::<serde_json::Value>(&body) {
                Ok(value) => PollOutcome::Success(value),
                Err(e) => PollOutcome::TransportError(FetchError::Body(e.to_string())),
            },
        };

        log::debug!("tick {seq} from {}: {outcome:?}", self.source.describe());

        Tick { seq, outcome }
    }

    /// Number of requests started but not resolved yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}
