// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Example binary printing axis layouts for every scale kind.
//!
//! Run with `RUST_LOG=debug` to see the engine's diagnostics.

use std::sync::Arc;

use kurbo::{Insets, Rect};
use log::info;
use tickwise_chrono::ChronoAdapter;
use tickwise_scales::{
    DataSource, Dataset, DateAdapter, Position, Scale, ScaleKind, ScaleOptions, TickOptions,
    UpdateContext, create_scale, default_options,
};
use tickwise_text::HeuristicTextMeasurer;

const CHART: Rect = Rect::new(60.0, 20.0, 620.0, 380.0);

fn main() {
    env_logger::init();

    let revenue = Dataset::from_numbers([12.0, 48.5, 31.25, 97.0, 3.5]);
    show(
        "linear",
        ScaleKind::Linear,
        default_options(ScaleKind::Linear).with_begin_at_zero(true),
        &[],
        &revenue,
    );

    let latency = Dataset::from_numbers([0.8, 3.0, 45.0, 720.0, 12_500.0]);
    show(
        "logarithmic",
        ScaleKind::Logarithmic,
        default_options(ScaleKind::Logarithmic),
        &[],
        &latency,
    );

    let months = Dataset::from_texts(["Jan", "Feb", "Mar", "Feb", "Apr", "May", "Jun", "Jul"]);
    show(
        "category",
        ScaleKind::Category,
        default_options(ScaleKind::Category).with_offset(true),
        &[],
        &months,
    );

    let days = Dataset::from_texts(["2024-01-01", "2024-01-09", "2024-01-23", "2024-02-10"]);
    show(
        "time",
        ScaleKind::Time,
        default_options(ScaleKind::Time)
            .with_ticks(TickOptions::default().with_rotation(0.0, 0.0)),
        &[],
        &days,
    );
    show("timeseries", ScaleKind::TimeSeries, default_options(ScaleKind::TimeSeries), &[], &days);

    let scores = Dataset::from_numbers([65.0, 59.0, 90.0, 81.0, 56.0, 55.0]);
    show(
        "radialLinear",
        ScaleKind::RadialLinear,
        default_options(ScaleKind::RadialLinear),
        &["Eating", "Drinking", "Sleeping", "Designing", "Coding", "Running"],
        &scores,
    );
}

fn show(title: &str, kind: ScaleKind, options: ScaleOptions, labels: &[&str], data: &Dataset) {
    let adapter: Option<Arc<dyn DateAdapter>> = kind
        .needs_date_adapter()
        .then(|| Arc::new(ChronoAdapter::utc()) as Arc<dyn DateAdapter>);
    let mut scale = match create_scale(kind, options, adapter) {
        Ok(scale) => scale,
        Err(err) => {
            eprintln!("{title}: {err}");
            return;
        }
    };
    if let Err(err) = scale.validate() {
        info!("{title}: {err}");
    }
    scale.set_labels(labels.iter().copied());

    let sources: [&dyn DataSource; 1] = [data];
    let ctx = UpdateContext::new(&sources, &HeuristicTextMeasurer);
    let size = scale.update(CHART.width(), CHART.height(), Insets::ZERO, &ctx);
    scale.place(bounds_for(&scale, size.width, size.height));

    println!("== {title} ({kind}) ==");
    println!(
        "domain {:?}, size {:.1}x{:.1}, rotation {:.0}°, skip every {}",
        scale.domain(),
        size.width,
        size.height,
        scale.label_rotation(),
        scale.auto_skip_step()
    );
    if let Some(unit) = scale.time_unit() {
        println!("unit {unit}");
    }
    for (i, tick) in scale.ticks().iter().enumerate() {
        let pixel = scale.pixel_for_tick(i).unwrap_or(f64::NAN);
        let mark = if tick.major { "*" } else { " " };
        println!("  {mark} {pixel:8.2}  {}", tick.label.replace('\n', " / "));
    }
    let items = scale.draw_items(CHART);
    println!(
        "  draw: {} lines, {} labels, {} rings",
        items.lines.len(),
        items.labels.len(),
        items.rings.len()
    );
    println!();
}

/// Where a simple host layout would put the axis next to [`CHART`].
fn bounds_for(scale: &Scale, width: f64, height: f64) -> Rect {
    match scale.options().position {
        Position::Bottom => Rect::new(CHART.x0, CHART.y1, CHART.x1, CHART.y1 + height),
        Position::Top => Rect::new(CHART.x0, CHART.y0 - height, CHART.x1, CHART.y0),
        Position::Left => Rect::new(CHART.x0 - width, CHART.y0, CHART.x0, CHART.y1),
        Position::Right => Rect::new(CHART.x1, CHART.y0, CHART.x1 + width, CHART.y1),
        Position::ChartArea => CHART,
    }
}
