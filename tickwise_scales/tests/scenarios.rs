// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behaviour of the scale kinds that need no date adapter.

use float_cmp::assert_approx_eq;
use kurbo::{Insets, Rect};
use tickwise_scales::{
    DataSource, Dataset, MAX_TICKS, ParsedValue, Position, RawValue, Scale, ScaleKind,
    ScaleOptions, TickOptions, UpdateContext, create_scale, default_options,
};
use tickwise_text::HeuristicTextMeasurer;

fn update(scale: &mut Scale, data: &[&dyn DataSource], width: f64, height: f64) {
    let size = scale.update(
        width,
        height,
        Insets::ZERO,
        &UpdateContext::new(data, &HeuristicTextMeasurer),
    );
    let bounds = if scale.is_horizontal() {
        Rect::new(0.0, 0.0, width, size.height)
    } else {
        Rect::new(0.0, 0.0, size.width, height)
    };
    scale.place(bounds);
}

fn numbers(
    kind: ScaleKind,
    options: ScaleOptions,
    values: &[f64],
    width: f64,
    height: f64,
) -> Scale {
    let mut scale = create_scale(kind, options, None).unwrap();
    let ds = Dataset::from_numbers(values.iter().copied());
    update(&mut scale, &[&ds], width, height);
    scale
}

fn tick_values(scale: &Scale) -> Vec<f64> {
    scale.ticks().iter().map(|t| t.value).collect()
}

#[test]
fn linear_zero_to_hundred_in_five_intervals() {
    let options = default_options(ScaleKind::Linear)
        .with_ticks(TickOptions::default().with_max_ticks_limit(6));
    let scale = numbers(ScaleKind::Linear, options, &[0.0, 100.0], 100.0, 300.0);
    assert_eq!(tick_values(&scale), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    let labels: Vec<&str> = scale.ticks().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["0", "20", "40", "60", "80", "100"]);
    assert_eq!(scale.domain(), (0.0, 100.0));
}

#[test]
fn begin_at_zero_extends_the_domain_down_to_zero() {
    let options = default_options(ScaleKind::Linear).with_begin_at_zero(true);
    let scale = numbers(ScaleKind::Linear, options, &[20.0, 80.0], 100.0, 300.0);
    assert_eq!(scale.domain(), (0.0, 80.0));
    assert_eq!(scale.ticks()[0].value, 0.0);
}

#[test]
fn explicit_min_wins_over_begin_at_zero() {
    let options = default_options(ScaleKind::Linear)
        .with_begin_at_zero(true)
        .with_min(10.0);
    let scale = numbers(ScaleKind::Linear, options, &[20.0, 80.0], 100.0, 300.0);
    assert_eq!(scale.domain(), (10.0, 80.0));
    assert_eq!(scale.ticks()[0].value, 10.0);
}

#[test]
fn tiny_step_over_a_wide_range_is_capped() {
    let options = default_options(ScaleKind::Linear)
        .with_ticks(TickOptions::default().with_step_size(0.001));
    let scale = numbers(ScaleKind::Linear, options, &[0.0, 1.0e6], 100.0, 300.0);
    assert!(!scale.ticks().is_empty());
    assert!(scale.ticks().len() <= MAX_TICKS);
    let (min, max) = scale.domain();
    assert!(min <= 0.0 && max >= 1.0e6);
}

#[test]
fn tiny_step_keeps_the_data_range() {
    let options = default_options(ScaleKind::Linear)
        .with_ticks(TickOptions::default().with_step_size(1e-6));
    let scale = numbers(ScaleKind::Linear, options, &[20.0, 80.0], 100.0, 300.0);
    assert_eq!(scale.domain(), (20.0, 80.0));
}

#[test]
fn log_one_to_thousand_has_decade_majors() {
    let scale = numbers(
        ScaleKind::Logarithmic,
        default_options(ScaleKind::Logarithmic),
        &[1.0, 1000.0],
        100.0,
        300.0,
    );
    let majors: Vec<f64> = scale
        .ticks()
        .iter()
        .filter(|t| t.major)
        .map(|t| t.value)
        .collect();
    assert_eq!(majors, vec![1.0, 10.0, 100.0, 1000.0]);
    let bottom = scale.pixel_for_value(1.0).unwrap();
    let top = scale.pixel_for_value(1000.0).unwrap();
    let middle = scale.pixel_for_value(31.622_776_601_683_793).unwrap();
    assert_approx_eq!(f64, middle, (bottom + top) / 2.0, epsilon = 1e-6);
}

#[test]
fn log_rejects_non_positive_values() {
    let mut scale = create_scale(
        ScaleKind::Logarithmic,
        default_options(ScaleKind::Logarithmic),
        None,
    )
    .unwrap();
    assert_eq!(scale.parse(&RawValue::Number(-5.0)), ParsedValue::Null);
    assert_eq!(scale.parse(&RawValue::Number(0.0)), ParsedValue::Zero);
    assert_eq!(scale.parse(&RawValue::Number(f64::NAN)), ParsedValue::Null);
    assert_eq!(scale.parse(&RawValue::from("100")), ParsedValue::Value(100.0));
    assert_eq!(scale.pixel_for_value(-5.0), None);
}

#[test]
fn log_zero_pulls_the_minimum_down_a_decade() {
    let scale = numbers(
        ScaleKind::Logarithmic,
        default_options(ScaleKind::Logarithmic),
        &[0.0, 10.0, 1000.0],
        100.0,
        300.0,
    );
    assert!(scale.includes_zero());
    assert!(scale.domain().0 <= 1.0);
    assert!(scale.domain().0 > 0.0);
}

#[test]
fn category_labels_are_stable() {
    let mut scale = create_scale(
        ScaleKind::Category,
        default_options(ScaleKind::Category),
        None,
    )
    .unwrap();
    let ds = Dataset::from_texts(["Jan", "Feb", "Jan"]);
    update(&mut scale, &[&ds], 400.0, 100.0);

    assert_eq!(scale.category_map().unwrap().len(), 2);
    let parsed: Vec<ParsedValue> = ["Jan", "Feb", "Jan"]
        .into_iter()
        .map(|s| scale.parse(&RawValue::from(s)))
        .collect();
    assert_eq!(
        parsed,
        vec![
            ParsedValue::Value(0.0),
            ParsedValue::Value(1.0),
            ParsedValue::Value(0.0)
        ]
    );
    let labels: Vec<&str> = scale.ticks().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["Jan", "Feb"]);

    update(&mut scale, &[&ds], 400.0, 100.0);
    assert_eq!(scale.category_map().unwrap().len(), 2);
}

#[test]
fn category_pixels_round_to_the_nearest_index() {
    let mut scale = create_scale(
        ScaleKind::Category,
        default_options(ScaleKind::Category),
        None,
    )
    .unwrap();
    scale.set_labels(["a", "b", "c", "d", "e"]);
    update(&mut scale, &[], 400.0, 100.0);
    for i in 0..5 {
        let v = f64::from(i);
        let p = scale.pixel_for_value(v).unwrap();
        assert_eq!(scale.value_for_pixel(p), Some(v));
        assert_eq!(scale.value_for_pixel(p + 10.0), Some(v));
    }
}

#[test]
fn reversed_category_ticks_run_in_axis_order() {
    let mut scale = create_scale(
        ScaleKind::Category,
        default_options(ScaleKind::Category).with_reverse(true),
        None,
    )
    .unwrap();
    scale.set_labels(["a", "b", "c"]);
    update(&mut scale, &[], 400.0, 100.0);
    assert_eq!(tick_values(&scale), vec![2.0, 1.0, 0.0]);
    let labels: Vec<&str> = scale.ticks().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["c", "b", "a"]);
    let first = scale.pixel_for_tick(0).unwrap();
    let last = scale.pixel_for_tick(2).unwrap();
    assert!(first < last);
}

#[test]
fn values_round_trip_through_pixels() {
    let linear = numbers(
        ScaleKind::Linear,
        default_options(ScaleKind::Linear).with_position(Position::Bottom),
        &[-37.5, 912.25],
        640.0,
        100.0,
    );
    let log = numbers(
        ScaleKind::Logarithmic,
        default_options(ScaleKind::Logarithmic),
        &[0.02, 4.0e5],
        100.0,
        480.0,
    );
    for v in [-37.5, 0.0, 1.0, 123.456, 912.25] {
        let p = linear.pixel_for_value(v).unwrap();
        assert_approx_eq!(f64, linear.value_for_pixel(p).unwrap(), v, epsilon = 1e-9);
    }
    for v in [0.02, 1.0, 7.5, 4.0e5] {
        let p = log.pixel_for_value(v).unwrap();
        let back = log.value_for_pixel(p).unwrap();
        assert_approx_eq!(f64, back / v, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn pixels_are_monotonic_and_honour_reverse() {
    let values: Vec<f64> = (0..50).map(|i| f64::from(i) * 3.7 - 20.0).collect();
    for reverse in [false, true] {
        let scale = numbers(
            ScaleKind::Linear,
            default_options(ScaleKind::Linear)
                .with_position(Position::Bottom)
                .with_reverse(reverse),
            &[-20.0, 161.3],
            500.0,
            100.0,
        );
        let pixels: Vec<f64> = values
            .iter()
            .map(|v| scale.pixel_for_value(*v).unwrap())
            .collect();
        for w in pixels.windows(2) {
            if reverse {
                assert!(w[1] < w[0], "reversed axis must decrease");
            } else {
                assert!(w[1] > w[0], "axis must increase");
            }
        }
    }
}

#[test]
fn crowded_labels_are_skipped_without_overlap() {
    let mut scale = create_scale(
        ScaleKind::Category,
        default_options(ScaleKind::Category)
            .with_ticks(TickOptions::default().with_rotation(0.0, 0.0)),
        None,
    )
    .unwrap();
    let labels: Vec<String> = (0..100).map(|i| format!("Label {i}")).collect();
    scale.set_labels(labels.iter().map(String::as_str));
    update(&mut scale, &[], 300.0, 100.0);

    assert!(scale.auto_skip_step() > 1);
    assert_eq!(scale.ticks()[0].value, 0.0);
    assert!(scale.ticks().len() < 100);
    // "Label 99" at 12px with the heuristic measurer.
    let widest = 8.0 * 0.6 * 12.0;
    let pixels: Vec<f64> = (0..scale.ticks().len())
        .map(|i| scale.pixel_for_tick(i).unwrap())
        .collect();
    for w in pixels.windows(2) {
        assert!(w[1] - w[0] >= widest, "kept labels must not overlap");
    }
}

#[test]
fn empty_data_falls_back_to_the_unit_domain() {
    let scale = numbers(ScaleKind::Linear, default_options(ScaleKind::Linear), &[], 100.0, 300.0);
    assert_eq!(scale.domain(), (0.0, 1.0));
    assert!(!scale.ticks().is_empty());
}

#[test]
fn degenerate_domains_still_map() {
    let scale = numbers(
        ScaleKind::Linear,
        default_options(ScaleKind::Linear).with_min(5.0).with_max(5.0),
        &[5.0],
        100.0,
        300.0,
    );
    assert!(!scale.ticks().is_empty());
    assert!(scale.pixel_for_value(5.0).is_some());
}

#[test]
fn axis_thickness_never_exceeds_the_offer() {
    let scale = numbers(
        ScaleKind::Linear,
        default_options(ScaleKind::Linear).with_position(Position::Bottom),
        &[0.0, 1.0e9],
        120.0,
        20.0,
    );
    assert!(scale.size().height <= 20.0);
}
