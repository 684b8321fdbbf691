// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time scales driven by the chrono adapter.

use std::sync::Arc;

use float_cmp::assert_approx_eq;
use kurbo::Insets;
use tickwise_chrono::ChronoAdapter;
use tickwise_scales::{
    Bounds, DataSource, DateAdapter, Dataset, Position, RawValue, Scale, ScaleKind, TickOptions,
    TimeOptions, TimeUnit, UpdateContext, create_scale, default_options,
};
use tickwise_text::HeuristicTextMeasurer;

fn time_scale(kind: ScaleKind, time: TimeOptions, data: &Dataset, width: f64) -> Scale {
    let options = default_options(kind)
        .with_position(Position::Bottom)
        .with_ticks(TickOptions::default().with_rotation(0.0, 0.0))
        .with_time(time);
    let mut scale = create_scale(kind, options, Some(Arc::new(ChronoAdapter::utc()))).unwrap();
    let sources: [&dyn DataSource; 1] = [data];
    scale.update(
        width,
        100.0,
        Insets::ZERO,
        &UpdateContext::new(&sources, &HeuristicTextMeasurer),
    );
    scale
}

#[test]
fn forty_days_on_eight_labels_step_by_week() {
    let data = Dataset::from_texts(["2024-01-01", "2024-01-17", "2024-02-10"]);
    let scale = time_scale(ScaleKind::Time, TimeOptions::default(), &data, 800.0);
    assert_eq!(scale.time_unit(), Some(TimeUnit::Week));

    let adapter = ChronoAdapter::utc();
    let values: Vec<f64> = scale.ticks().iter().map(|t| t.value).collect();
    let expected: Vec<f64> = ["2024-01-07", "2024-01-14", "2024-01-21", "2024-01-28", "2024-02-04"]
        .into_iter()
        .map(|s| adapter.parse(s).unwrap())
        .collect();
    assert_eq!(values, expected);
    assert_eq!(scale.ticks()[0].label, "Jan 7, 2024");
}

#[test]
fn iso_weekday_moves_week_ticks_to_monday() {
    let data = Dataset::from_texts(["2024-01-01", "2024-02-10"]);
    let scale = time_scale(
        ScaleKind::Time,
        TimeOptions::default().with_iso_weekday(1),
        &data,
        800.0,
    );
    assert_eq!(scale.time_unit(), Some(TimeUnit::Week));
    assert_eq!(scale.ticks()[0].label, "Jan 1, 2024");
}

#[test]
fn forced_units_and_display_formats_apply() {
    let data = Dataset::from_texts(["2024-01-01", "2024-06-30"]);
    let scale = time_scale(
        ScaleKind::Time,
        TimeOptions::default()
            .with_unit(TimeUnit::Month)
            .with_display_format(TimeUnit::Month, "%m/%Y"),
        &data,
        800.0,
    );
    assert_eq!(scale.time_unit(), Some(TimeUnit::Month));
    let labels: Vec<&str> = scale.ticks().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["01/2024", "02/2024", "03/2024", "04/2024", "05/2024", "06/2024"]);
}

#[test]
fn time_series_spaces_irregular_data_evenly() {
    let data = Dataset::from_texts(["2024-01-01", "2024-01-02", "2024-01-10", "2024-03-01"]);
    let scale = time_scale(ScaleKind::TimeSeries, TimeOptions::default(), &data, 600.0);
    let adapter = ChronoAdapter::utc();
    let pixels: Vec<f64> = ["2024-01-01", "2024-01-02", "2024-01-10", "2024-03-01"]
        .into_iter()
        .map(|s| scale.pixel_for_value(adapter.parse(s).unwrap()).unwrap())
        .collect();
    let gap = pixels[1] - pixels[0];
    assert!(gap > 0.0);
    for w in pixels.windows(2) {
        assert_approx_eq!(f64, w[1] - w[0], gap, epsilon = 1e-6);
    }
}

#[test]
fn unparseable_strings_are_null() {
    let data = Dataset::from_texts(["2024-01-01", "2024-01-05"]);
    let mut scale = time_scale(ScaleKind::Time, TimeOptions::default(), &data, 400.0);
    assert!(scale.parse(&RawValue::from("yesterday")).is_null());
    assert_eq!(
        scale.parse(&RawValue::from("2024-01-01T12:00:00Z")).value(),
        ChronoAdapter::utc().parse("2024-01-01T12:00:00Z")
    );
}

#[test]
fn tooltip_labels_use_the_datetime_format() {
    let data = Dataset::from_texts(["2024-01-01", "2024-01-05"]);
    let scale = time_scale(ScaleKind::Time, TimeOptions::default(), &data, 400.0);
    let t = ChronoAdapter::utc().parse("2024-01-03T08:30:00Z").unwrap();
    assert_eq!(scale.label_for_value(t), "Jan 3, 2024, 08:30:00");
}

#[test]
fn millisecond_unit_over_millennia_still_covers_the_data() {
    let options = default_options(ScaleKind::Time)
        .with_bounds(Bounds::Ticks)
        .with_ticks(TickOptions::default().with_auto_skip(false))
        .with_time(TimeOptions::default().with_unit(TimeUnit::Millisecond));
    let mut scale =
        create_scale(ScaleKind::Time, options, Some(Arc::new(ChronoAdapter::utc()))).unwrap();
    let data = Dataset::from_numbers([0.0, 1e14]);
    let sources: [&dyn DataSource; 1] = [&data];
    scale.update(
        800.0,
        100.0,
        Insets::ZERO,
        &UpdateContext::new(&sources, &HeuristicTextMeasurer),
    );
    let (min, max) = scale.domain();
    assert!(min <= 0.0);
    assert!(max >= 1e14);
    assert!(scale.ticks().last().unwrap().value >= 1e14);
    assert!(scale.pixel_for_value(1e14).is_some());
}
