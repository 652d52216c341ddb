// SPDX-License-Identifier: MIT

//! Geometry for the gauge and the line chart.
//!
//! Both widgets are Slint `Path` elements; this module turns concentrations into
//! SVG path commands in the widgets' view box coordinates.

use std::fmt::Write;

/// Upper end of the gauge scale in ppm.
pub const GAUGE_MAX_PPM: u32 = 5000;

/// Fixed vertical window of the line chart in ppm.
pub const CHART_MAX_PPM: u32 = 3000;

/// Gauge view box, a half circle resting on its diameter. Must match `ui/appwindow.slint`.
const GAUGE_VIEWBOX: (f32, f32) = (200.0, 110.0);
const GAUGE_CENTER: (f32, f32) = (100.0, 100.0);
const GAUGE_RADIUS: f32 = 80.0;
/// Ring carrying the colour zones, inside the value arc.
const BAND_RADIUS: f32 = 68.0;
/// Where the scale labels sit.
const TICK_RADIUS: f32 = 52.0;
const TICK_STEP_PPM: u32 = 1000;

/// Line chart view box. Must match `ui/appwindow.slint`.
const CHART_VIEWBOX: (f32, f32) = (600.0, 300.0);
/// Length of the stub drawn for a single reading.
const SINGLE_POINT_MARKER: f32 = 6.0;

/// Colour band of the gauge a concentration falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AirQualityBand {
    /// Below 1000 ppm.
    Good,
    /// 1000 to 1999 ppm.
    Elevated,
    /// 2000 ppm and above.
    Poor,
}

impl AirQualityBand {
    pub fn of(ppm: u32) -> Self {
        match ppm {
            0..=999 => AirQualityBand::Good,
            1000..=1999 => AirQualityBand::Elevated,
            _ => AirQualityBand::Poor,
        }
    }

    /// Range of the band on the gauge scale, `from..to` in ppm.
    pub fn range(self) -> (u32, u32) {
        match self {
            AirQualityBand::Good => (0, 1000),
            AirQualityBand::Elevated => (1000, 2000),
            AirQualityBand::Poor => (2000, GAUGE_MAX_PPM),
        }
    }

    /// Colour as `0xRRGGBB`.
    pub fn rgb(self) -> u32 {
        match self {
            AirQualityBand::Good => 0x109618,
            AirQualityBand::Elevated => 0xff9900,
            AirQualityBand::Poor => 0xdc3912,
        }
    }
}

/// Share of the gauge scale covered by `ppm`, in `0.0..=1.0`.
pub fn gauge_fraction(ppm: u32) -> f32 {
    ppm.min(GAUGE_MAX_PPM) as f32 / GAUGE_MAX_PPM as f32
}

fn gauge_point(radius: f32, fraction: f32) -> (f32, f32) {
    let angle = std::f32::consts::PI * (1.0 - fraction);
    (
        GAUGE_CENTER.0 + radius * angle.cos(),
        GAUGE_CENTER.1 - radius * angle.sin(),
    )
}

/// Arc from the left end of the scale up to `ppm`.
pub fn gauge_arc(ppm: u32) -> String {
    arc_between(GAUGE_RADIUS, 0.0, gauge_fraction(ppm))
}

/// The full scale, drawn underneath the value arc.
pub fn gauge_track() -> String {
    arc_between(GAUGE_RADIUS, 0.0, 1.0)
}

/// The fixed green, yellow and red zones of the dial.
pub fn gauge_bands() -> Vec<(AirQualityBand, String)> {
    [
        AirQualityBand::Good,
        AirQualityBand::Elevated,
        AirQualityBand::Poor,
    ]
    .into_iter()
    .map(|band| {
        let (from, to) = band.range();
        let commands = arc_between(BAND_RADIUS, gauge_fraction(from), gauge_fraction(to));
        (band, commands)
    })
    .collect()
}

/// A scale label of the gauge.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeTick {
    pub label: String,
    /// Centre of the label relative to the gauge size, both in `0.0..=1.0`.
    pub x: f32,
    pub y: f32,
}

/// Labels at 0, 1000, ... 5000 ppm.
pub fn gauge_ticks() -> Vec<GaugeTick> {
    (0..=GAUGE_MAX_PPM)
        .step_by(TICK_STEP_PPM as usize)
        .map(|ppm| {
            let (x, y) = gauge_point(TICK_RADIUS, gauge_fraction(ppm));
            GaugeTick {
                label: ppm.to_string(),
                x: x / GAUGE_VIEWBOX.0,
                y: y / GAUGE_VIEWBOX.1,
            }
        })
        .collect()
}

fn arc_between(radius: f32, from: f32, to: f32) -> String {
    let (x0, y0) = gauge_point(radius, from);
    let mut commands = format!("M {x0:.2} {y0:.2}");
    if to > from {
        let (x1, y1) = gauge_point(radius, to);
        // Never more than half a circle, so the small arc always fits.
        let _ = write!(commands, " A {radius} {radius} 0 0 1 {x1:.2} {y1:.2}");
    }
    commands
}

/// Polyline through `concentrations`, spread evenly over the chart width.
///
/// Values above [`CHART_MAX_PPM`] stick to the top edge. An empty series gives
/// an empty path, a single reading a short horizontal stub.
pub fn line_path(concentrations: &[u32]) -> String {
    let (width, height) = CHART_VIEWBOX;
    let step = match concentrations.len() {
        0 | 1 => 0.0,
        n => width / (n - 1) as f32,
    };

    let mut commands = String::new();
    for (i, ppm) in concentrations.iter().enumerate() {
        let x = i as f32 * step;
        let y = height - (*ppm).min(CHART_MAX_PPM) as f32 / CHART_MAX_PPM as f32 * height;
        let verb = if i == 0 { "M" } else { " L" };
        let _ = write!(commands, "{verb} {x:.2} {y:.2}");
        if concentrations.len() == 1 {
            let _ = write!(commands, " L {:.2} {y:.2}", x + SINGLE_POINT_MARKER);
        }
    }
    commands
}
