// SPDX-License-Identifier: MIT

use slint::ComponentHandle;

use co2_monitor_common::chart::{self, AirQualityBand};
use co2_monitor_common::{DisplaySurface, SeriesPoint};

use crate::{AppWindow, SeriesRecord, ViewModel};

/// The widgets of the [`AppWindow`], as seen by the view state.
pub struct SlintSurface<'a> {
    pub ui: &'a AppWindow,
    pub records: &'a slint::VecModel<SeriesRecord>,
}

pub fn band_color(band: AirQualityBand) -> slint::Color {
    slint::Color::from_argb_encoded(0xff00_0000 | band.rgb())
}

/// Slint ints are `i32`; anything above saturates.
fn ppm_property(ppm: u32) -> i32 {
    i32::try_from(ppm).unwrap_or(i32::MAX)
}

impl DisplaySurface for SlintSurface<'_> {
    fn set_gauge(&mut self, ppm: u32) {
        let model = self.ui.global::<ViewModel>();
        model.set_gauge_ppm(ppm_property(ppm));
        model.set_gauge_arc(chart::gauge_arc(ppm).into());
        model.set_gauge_color(band_color(AirQualityBand::of(ppm)));
    }

    fn add_point(&mut self, point: &SeriesPoint, series: &[SeriesPoint]) {
        self.records.push(SeriesRecord {
            timestamp: point.timestamp_label.as_str().into(),
            ppm: ppm_property(point.concentration),
        });

        let concentrations: Vec<u32> = series.iter().map(|point| point.concentration).collect();
        self.ui
            .global::<ViewModel>()
            .set_chart_path(chart::line_path(&concentrations).into());
    }

    fn set_progress(&mut self, percent: Option<u8>) {
        let model = self.ui.global::<ViewModel>();
        model.set_progress_visible(percent.is_some());
        if let Some(percent) = percent {
            model.set_progress(percent as f32 / 100.0);
        }
    }

    fn set_status_text(&mut self, text: &str) {
        self.ui.global::<ViewModel>().set_status_text(text.into());
    }
}

#[test]
fn test_huge_concentrations_saturate() {
    assert_eq!(ppm_property(450), 450);
    assert_eq!(ppm_property(i32::MAX as u32), i32::MAX);
    assert_eq!(ppm_property(3_000_000_000), i32::MAX);
    assert_eq!(ppm_property(u32::MAX), i32::MAX);
}
