// SPDX-License-Identifier: MIT

// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod surface;

slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use slint::ComponentHandle;

use co2_monitor_common::chart;
use co2_monitor_common::{
    DummySensorSource, HttpSensorSource, PollConfig, Poller, SensorSourcePointer, ViewState,
};

use surface::{band_color, SlintSurface};

/// Our App struct that holds the UI, the poller and the state shown in the UI.
///
/// Two timers drive it: one polls the sensor, one keeps the clock running.
/// Requests run on a small tokio runtime; their results come back to the UI
/// event loop, where they are applied to the view state one at a time.
struct App {
    ui: AppWindow,
    config: PollConfig,
    poller: Arc<Poller>,
    runtime: tokio::runtime::Runtime,
    view: Rc<RefCell<ViewState>>,
    records: Rc<slint::VecModel<SeriesRecord>>,
    poll_timer: slint::Timer,
    clock_timer: slint::Timer,
}

impl App {
    const CLOCK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(500);

    /// Create a new App struct.
    ///
    /// Without a configured host the app shows a simulated sensor.
    fn new(config: PollConfig) -> anyhow::Result<Self> {
        // Make a new AppWindow
        let ui = AppWindow::new()?;

        let source: SensorSourcePointer = match config.endpoint() {
            Some(url) => Box::new(HttpSensorSource::new(url)?),
            None => Box::new(DummySensorSource::new()?),
        };
        log::info!(
            "Polling {} every {:?}, timeout {:?}",
            source.describe(),
            config.period(),
            config.timeout()
        );

        // The poller is shared by all in-flight requests.
        let poller = Arc::new(Poller::new(source, &config));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("starting the request runtime")?;

        // Create a shared model for the readings list
        let records: Rc<slint::VecModel<SeriesRecord>> = Rc::default();

        let model = ui.global::<ViewModel>();
        model.set_records(slint::ModelRc::from(records.clone()));
        model.set_gauge_track(chart::gauge_track().into());
        let bands: Vec<GaugeBand> = chart::gauge_bands()
            .into_iter()
            .map(|(band, commands)| GaugeBand {
                commands: commands.into(),
                color: band_color(band),
            })
            .collect();
        model.set_gauge_bands(slint::ModelRc::new(slint::VecModel::from(bands)));
        let ticks: Vec<GaugeTick> = chart::gauge_ticks()
            .into_iter()
            .map(|tick| GaugeTick {
                label: tick.label.into(),
                x: tick.x,
                y: tick.y,
            })
            .collect();
        model.set_gauge_ticks(slint::ModelRc::new(slint::VecModel::from(ticks)));
        model.set_gauge_arc(chart::gauge_arc(0).into());

        let view = Rc::new(RefCell::new(ViewState::new()));
        model.set_status_text(view.borrow().status().to_string().into());

        Ok(Self {
            ui,
            config,
            poller,
            runtime,
            view,
            records,
            poll_timer: slint::Timer::default(),
            clock_timer: slint::Timer::default(),
        })
    }

    /// Run the App: start both timers and the UI event loop.
    fn run(&mut self) -> anyhow::Result<()> {
        self.start_clock();
        self.start_polling();

        // Run the UI (and map an error to an anyhow::Error).
        self.ui.run().map_err(|e| e.into())
    }

    fn start_clock(&self) {
        let ui_handle = self.ui.as_weak();
        let tick = move || {
            if let Some(ui) = ui_handle.upgrade() {
                let now = chrono::Local::now();
                ui.global::<ViewModel>().set_clock(clock_label(&now).into());
            }
        };

        tick();
        self.clock_timer
            .start(slint::TimerMode::Repeated, Self::CLOCK_INTERVAL, tick);
    }

    /// Each tick starts one request and does not wait for earlier ones.
    fn start_polling(&self) {
        let ui_handle = self.ui.as_weak();
        let poller = self.poller.clone();
        let runtime = self.runtime.handle().clone();
        let view = self.view.clone();
        let records = self.records.clone();

        self.poll_timer.start(
            slint::TimerMode::Repeated,
            self.config.period(),
            move || {
                let poller = poller.clone();
                let request = runtime.spawn(async move { poller.poll_once().await });

                let ui_handle = ui_handle.clone();
                let view = view.clone();
                let records = records.clone();

                // Results are applied in the order they resolve.
                let applied = slint::spawn_local(async move {
                    let tick = match request.await {
                        Ok(tick) => tick,
                        Err(e) => {
                            log::error!("Poll task failed: {e}");
                            return;
                        }
                    };

                    let Some(ui) = ui_handle.upgrade() else {
                        return;
                    };

                    let mut surface = SlintSurface {
                        ui: &ui,
                        records: &records,
                    };
                    view.borrow_mut().apply(
                        tick.outcome.interpret(),
                        series_label(&chrono::Local::now()),
                        &mut surface,
                    );
                });

                if let Err(e) = applied {
                    log::error!("Cannot schedule tick: {e}");
                }
            },
        );
    }
}

/// Clock above the gauge, e.g. `9:05:07`.
fn clock_label<Tz: chrono::TimeZone>(now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%-H:%M:%S").to_string()
}

/// Timestamp of a chart point, e.g. `Sun Oct 18 2026 09:05:07 GMT+0200`.
fn series_label<Tz: chrono::TimeZone>(now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

/// Reads `config.json` from the platform configuration directory, if there is one.
fn load_config() -> anyhow::Result<PollConfig> {
    let Some(dirs) = directories::ProjectDirs::from("", "", "co2-monitor") else {
        log::warn!("No home directory, using default configuration");
        return Ok(PollConfig::default());
    };

    let path = dirs.config_dir().join("config.json");
    match std::fs::read_to_string(&path) {
        Ok(json) => {
            log::info!("Loading configuration from {}", path.display());
            PollConfig::from_json(&json).with_context(|| format!("in {}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No configuration at {}, using defaults", path.display());
            Ok(PollConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut app = App::new(config)?;

    app.run()
}
