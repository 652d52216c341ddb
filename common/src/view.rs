// SPDX-License-Identifier: MIT

use std::fmt;

use crate::error::TickError;
use crate::reading::{Reading, SensorStatus};

/// One point of the concentration chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesPoint {
    pub timestamp_label: String,
    pub concentration: u32,
}

/// What the status line and the progress indicator currently report.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Measuring,
    WarmingUp { phase: String, percent: u8 },
    #[default]
    Disconnected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Measuring => write!(f, "Status: measuring"),
            ConnectionStatus::WarmingUp { phase, .. } => write!(f, "Status: {phase}"),
            ConnectionStatus::Disconnected => write!(f, "Status: disconnected"),
        }
    }
}

/// The widgets a tick may touch.
///
/// Implemented by the window; every call is expected to redraw what it changed.
pub trait DisplaySurface {
    /// Sets the gauge needle to `ppm`.
    fn set_gauge(&mut self, ppm: u32);

    /// Appends `point` to the chart. `series` is the whole history, `point` included.
    fn add_point(&mut self, point: &SeriesPoint, series: &[SeriesPoint]);

    /// Shows the warm-up progress at `percent`, or hides the indicator on `None`.
    fn set_progress(&mut self, percent: Option<u8>);

    fn set_status_text(&mut self, text: &str);
}

/// Everything the display remembers between ticks.
#[derive(Debug, Default)]
pub struct ViewState {
    gauge: Option<u32>,
    series: Vec<SeriesPoint>,
    status: ConnectionStatus,
    /// Last percent put on the progress indicator.
    progress: u8,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the result of one tick.
    ///
    /// A reading moves the gauge, appends a point labelled `timestamp_label` and
    /// updates status and progress. Any error only flips the status line to
    /// disconnected; gauge, chart and progress keep their last values.
    pub fn apply<S>(
        &mut self,
        result: Result<Reading, TickError>,
        timestamp_label: impl Into<String>,
        surface: &mut S,
    ) where
        S: DisplaySurface + ?Sized,
    {
        match result {
            Ok(reading) => self.show_reading(reading, timestamp_label.into(), surface),
            Err(e) => {
                log::warn!("{e}");
                self.set_status(ConnectionStatus::Disconnected, surface);
            }
        }
    }

    fn show_reading<S>(&mut self, reading: Reading, timestamp_label: String, surface: &mut S)
    where
        S: DisplaySurface + ?Sized,
    {
        self.gauge = Some(reading.concentration);
        surface.set_gauge(reading.concentration);

        self.series.push(SeriesPoint {
            timestamp_label,
            concentration: reading.concentration,
        });
        if let Some(point) = self.series.last() {
            surface.add_point(point, &self.series);
        }

        let status = match reading.status {
            SensorStatus::Measuring => {
                surface.set_progress(None);
                ConnectionStatus::Measuring
            }
            SensorStatus::WarmingUp {
                phase,
                ready_percent,
            } => {
                // Without a usable percent the indicator keeps its last value.
                let percent = ready_percent.unwrap_or(self.progress);
                self.progress = percent;
                surface.set_progress(Some(percent));
                ConnectionStatus::WarmingUp { phase, percent }
            }
        };
        self.set_status(status, surface);
    }

    fn set_status<S>(&mut self, status: ConnectionStatus, surface: &mut S)
    where
        S: DisplaySurface + ?Sized,
    {
        let text = status.to_string();
        if status != self.status {
            log::info!("{text}");
        }
        self.status = status;
        surface.set_status_text(&text);
    }

    /// Concentration on the gauge, `None` until the first reading arrived.
    pub fn gauge(&self) -> Option<u32> {
        self.gauge
    }

    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, PayloadError};
    use std::time::Duration;

    /// Keeps what the widgets would show.
    #[derive(Default)]
    struct RecordingSurface {
        gauge: Option<u32>,
        gauge_draws: usize,
        chart: Vec<u32>,
        progress: Option<u8>,
        status: String,
    }

    impl DisplaySurface for RecordingSurface {
        fn set_gauge(&mut self, ppm: u32) {
            self.gauge = Some(ppm);
            self.gauge_draws += 1;
        }

        fn add_point(&mut self, point: &SeriesPoint, series: &[SeriesPoint]) {
            assert_eq!(series.last(), Some(point));
            self.chart.push(point.concentration);
        }

        fn set_progress(&mut self, percent: Option<u8>) {
            self.progress = percent;
        }

        fn set_status_text(&mut self, text: &str) {
            self.status = text.to_string();
        }
    }

    fn measuring(concentration: u32) -> Result<Reading, TickError> {
        Ok(Reading {
            concentration,
            status: SensorStatus::Measuring,
        })
    }

    fn warming(concentration: u32, phase: &str, ready_percent: u8) -> Result<Reading, TickError> {
        Ok(Reading {
            concentration,
            status: SensorStatus::WarmingUp {
                phase: phase.into(),
                ready_percent: Some(ready_percent),
            },
        })
    }

    #[test]
    fn test_initially_disconnected() {
        let view = ViewState::new();

        assert_eq!(view.gauge(), None);
        assert!(view.series().is_empty());
        assert_eq!(view.status().to_string(), "Status: disconnected");
    }

    #[test]
    fn test_measuring_hides_progress() {
        let mut view = ViewState::new();
        let mut surface = RecordingSurface {
            progress: Some(60),
            ..Default::default()
        };

        view.apply(measuring(450), "10:00:00", &mut surface);

        assert_eq!(surface.progress, None);
        assert_eq!(surface.status, "Status: measuring");
        assert_eq!(surface.gauge, Some(450));
        assert_eq!(view.gauge(), Some(450));
        assert_eq!(view.status(), &ConnectionStatus::Measuring);
    }

    #[test]
    fn test_warming_up_shows_progress() {
        let mut view = ViewState::new();
        let mut surface = RecordingSurface::default();

        view.apply(warming(1200, "warming_up", 40), "10:00:00", &mut surface);

        assert_eq!(surface.progress, Some(40));
        assert_eq!(surface.status, "Status: warming_up");
        assert_eq!(surface.gauge, Some(1200));
        assert_eq!(surface.chart, vec![1200]);
        assert_eq!(
            view.series(),
            &[SeriesPoint {
                timestamp_label: "10:00:00".into(),
                concentration: 1200
            }]
        );
    }

    #[test]
    fn test_warming_up_without_percent_keeps_last_progress() {
        let mut view = ViewState::new();
        let mut surface = RecordingSurface::default();
        let unknown_percent = || {
            Ok(Reading {
                concentration: 900,
                status: SensorStatus::WarmingUp {
                    phase: "preheating".into(),
                    ready_percent: None,
                },
            })
        };

        view.apply(unknown_percent(), "a", &mut surface);
        assert_eq!(surface.progress, Some(0));
        assert_eq!(surface.status, "Status: preheating");
        assert_eq!(view.gauge(), Some(900));
        assert_eq!(view.series().len(), 1);

        view.apply(warming(950, "preheating", 60), "b", &mut surface);
        view.apply(unknown_percent(), "c", &mut surface);

        assert_eq!(surface.progress, Some(60));
        assert_eq!(
            view.status(),
            &ConnectionStatus::WarmingUp {
                phase: "preheating".into(),
                percent: 60
            }
        );
        assert_eq!(view.series().len(), 3);
    }

    #[test]
    fn test_series_follows_completion_order() {
        let mut view = ViewState::new();
        let mut surface = RecordingSurface::default();

        for (i, ppm) in [410, 530, 480, 990].into_iter().enumerate() {
            view.apply(measuring(ppm), format!("t{i}"), &mut surface);
        }

        let ppms: Vec<_> = view.series().iter().map(|p| p.concentration).collect();
        assert_eq!(ppms, vec![410, 530, 480, 990]);
        assert_eq!(surface.chart, ppms);
        assert_eq!(view.series()[3].timestamp_label, "t3");
        assert_eq!(view.gauge(), Some(990));
    }

    #[test]
    fn test_failures_leave_gauge_and_series_alone() {
        let failures = [
            TickError::Timeout(Duration::from_secs(2)),
            TickError::Transport(FetchError::Status(503)),
            TickError::Transport(FetchError::Network("connection refused".into())),
            TickError::MalformedPayload(PayloadError::Shape("missing field `co2`".into())),
        ];

        for failure in failures {
            let mut view = ViewState::new();
            let mut surface = RecordingSurface::default();
            view.apply(warming(800, "preheating", 20), "a", &mut surface);

            view.apply(Err(failure), "b", &mut surface);

            assert_eq!(surface.status, "Status: disconnected");
            assert_eq!(view.status(), &ConnectionStatus::Disconnected);
            assert_eq!(view.gauge(), Some(800));
            assert_eq!(view.series().len(), 1);
            assert_eq!(surface.gauge_draws, 1);
            assert_eq!(surface.chart, vec![800]);
            assert_eq!(surface.progress, Some(20));
        }
    }

    #[test]
    fn test_recovery_after_disconnect() {
        let mut view = ViewState::new();
        let mut surface = RecordingSurface::default();

        view.apply(measuring(500), "a", &mut surface);
        view.apply(Err(TickError::Timeout(Duration::from_secs(2))), "b", &mut surface);
        view.apply(measuring(520), "c", &mut surface);

        assert_eq!(surface.status, "Status: measuring");
        assert_eq!(view.series().len(), 2);
        assert_eq!(view.gauge(), Some(520));
    }

    #[test]
    fn test_same_reading_twice_appends_twice() {
        let mut view = ViewState::new();
        let mut surface = RecordingSurface::default();

        view.apply(measuring(450), "10:00:00", &mut surface);
        view.apply(measuring(450), "10:00:03", &mut surface);

        assert_eq!(view.series().len(), 2);
        assert_ne!(view.series()[0], view.series()[1]);
        assert_eq!(view.gauge(), Some(450));
        assert_eq!(surface.gauge, Some(450));
    }
}
