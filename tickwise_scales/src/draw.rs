// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw descriptors.
//!
//! Scales do not render. [`Scale::draw_items`] describes tick marks, grid lines and labels as
//! positioned data that a renderer can paint however it likes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use tickwise_text::TextStyle;

use crate::options::{Position, TickAlign};
use crate::radial::RadialScale;
use crate::scale::{Scale, Tick};

/// A paint + width pair for stroked lines.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }

    /// The faint default for grid lines.
    pub fn grid() -> Self {
        Self::solid(css::BLACK.with_alpha(0.1), 1.0)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal alignment of a label relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The label starts at the position.
    Start,
    /// The label is centred on the position.
    Middle,
    /// The label ends at the position.
    End,
}

/// Vertical alignment of a label relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The top of the first line sits at the position.
    Hanging,
    /// The label is centred on the position.
    Middle,
    /// The baseline of the last line sits at the position.
    Alphabetic,
}

/// A tick mark and its grid line.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLineItem {
    /// Tick mark inside the axis box.
    pub tick: Option<Line>,
    /// Grid line across the chart area, or a radial spoke.
    pub grid: Option<Line>,
    /// Stroke for both lines.
    pub stroke: StrokeStyle,
    /// Whether the tick is major.
    pub major: bool,
}

/// A positioned label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelItem {
    /// Anchor point; rotation is around this point.
    pub position: Point,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Text lines, top to bottom.
    pub lines: Vec<String>,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Font to draw with.
    pub font: TextStyle,
}

/// One ring of a radial grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridRing {
    /// Centre of the ring.
    pub center: Point,
    /// Distance from the centre.
    pub radius: f64,
    /// Polygon corners, one per spoke. Empty for circular rings.
    pub vertices: Vec<Point>,
    /// Ring stroke.
    pub stroke: StrokeStyle,
}

/// Everything an axis asks to have drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisItems {
    /// Tick marks, grid lines and spokes.
    pub lines: Vec<TickLineItem>,
    /// Tick labels and point labels.
    pub labels: Vec<LabelItem>,
    /// Radial grid rings.
    pub rings: Vec<GridRing>,
    /// Axis title.
    pub title: Option<LabelItem>,
}

fn split_lines(label: &str) -> Vec<String> {
    label.split('\n').map(String::from).collect()
}

impl Scale {
    /// Describes tick marks, grid lines and labels for the kept ticks.
    ///
    /// `chart_area` is the plot rectangle the grid lines span. Call after [`Scale::place`].
    pub fn draw_items(&self, chart_area: Rect) -> AxisItems {
        if !self.core.options.display {
            return AxisItems::default();
        }
        match self.radial() {
            Some(radial) => self.radial_items(radial),
            None => self.cartesian_items(chart_area),
        }
    }

    fn stroke_for(&self, tick: &Tick) -> StrokeStyle {
        let grid = &self.core.options.grid;
        match &grid.major_stroke {
            Some(stroke) if tick.major => stroke.clone(),
            _ => grid.stroke.clone(),
        }
    }

    /// Where grid lines go: on the ticks, or between them with `grid.offset`.
    fn grid_positions(&self, pixels: &[f64]) -> Vec<f64> {
        if !self.core.options.grid.offset || pixels.len() < 2 {
            return pixels.to_vec();
        }
        let mut out: Vec<f64> = pixels.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
        let first = pixels[0] - (pixels[1] - pixels[0]) / 2.0;
        let n = pixels.len();
        let last = pixels[n - 1] + (pixels[n - 1] - pixels[n - 2]) / 2.0;
        out.insert(0, first);
        out.push(last);
        out
    }

    fn cartesian_items(&self, chart_area: Rect) -> AxisItems {
        let core = &self.core;
        let options = &core.options;
        let grid = &options.grid;
        let bounds = core.bounds;
        let position = options.position;
        let horizontal = core.is_horizontal();
        let tick_length = core.resolved.tick_length;
        let ticks = &core.ticks;
        let pixels: Vec<f64> = (0..ticks.len())
            .map(|i| self.pixel_for_tick(i).unwrap_or(f64::NAN))
            .collect();

        let mut items = AxisItems::default();
        if grid.display {
            let grid_pixels = self.grid_positions(&pixels);
            for (i, gp) in grid_pixels.iter().copied().enumerate() {
                let tick = ticks.get(i.min(ticks.len().saturating_sub(1)));
                let major = tick.is_some_and(|t| t.major);
                let draw_tick = grid.draw_ticks && tick_length > 0.0 && i < ticks.len();
                let tick_line = draw_tick.then(|| {
                    let p = pixels[i];
                    match position {
                        Position::Top => Line::new((p, bounds.y1), (p, bounds.y1 - tick_length)),
                        Position::Left | Position::ChartArea => {
                            Line::new((bounds.x1, p), (bounds.x1 - tick_length, p))
                        }
                        Position::Right => Line::new((bounds.x0, p), (bounds.x0 + tick_length, p)),
                        Position::Bottom => Line::new((p, bounds.y0), (p, bounds.y0 + tick_length)),
                    }
                });
                let grid_line = grid.draw_on_chart_area.then(|| {
                    if horizontal {
                        Line::new((gp, chart_area.y0), (gp, chart_area.y1))
                    } else {
                        Line::new((chart_area.x0, gp), (chart_area.x1, gp))
                    }
                });
                if tick_line.is_none() && grid_line.is_none() {
                    continue;
                }
                items.lines.push(TickLineItem {
                    tick: tick_line,
                    grid: grid_line,
                    stroke: tick.map_or_else(|| grid.stroke.clone(), |t| self.stroke_for(t)),
                    major,
                });
            }
        }

        if options.ticks.display {
            let padding = options.ticks.padding;
            let mirror = options.ticks.mirror;
            let rotation = if horizontal { -core.label_rotation } else { 0.0 };
            let last = ticks.len().saturating_sub(1);
            for (i, tick) in ticks.iter().enumerate() {
                if tick.label.is_empty() || !pixels[i].is_finite() {
                    continue;
                }
                let p = pixels[i];
                let aligned = match options.ticks.align {
                    TickAlign::Start => TextAnchor::Start,
                    TickAlign::End => TextAnchor::End,
                    TickAlign::Center => TextAnchor::Middle,
                    TickAlign::Inner if i == 0 => TextAnchor::Start,
                    TickAlign::Inner if i == last => TextAnchor::End,
                    TickAlign::Inner => TextAnchor::Middle,
                };
                let (point, anchor, baseline) = match (position, mirror) {
                    (Position::Bottom, false) => (
                        Point::new(p, bounds.y0 + tick_length + padding),
                        if rotation == 0.0 { aligned } else { TextAnchor::End },
                        TextBaseline::Hanging,
                    ),
                    (Position::Bottom, true) => (
                        Point::new(p, bounds.y0 - padding),
                        aligned,
                        TextBaseline::Alphabetic,
                    ),
                    (Position::Top, false) => (
                        Point::new(p, bounds.y1 - tick_length - padding),
                        if rotation == 0.0 { aligned } else { TextAnchor::Start },
                        TextBaseline::Alphabetic,
                    ),
                    (Position::Top, true) => (
                        Point::new(p, bounds.y1 + padding),
                        aligned,
                        TextBaseline::Hanging,
                    ),
                    (Position::Right, false) => (
                        Point::new(bounds.x0 + tick_length + padding, p),
                        TextAnchor::Start,
                        TextBaseline::Middle,
                    ),
                    (Position::Right, true) => (
                        Point::new(bounds.x0 - padding, p),
                        TextAnchor::End,
                        TextBaseline::Middle,
                    ),
                    (Position::Left | Position::ChartArea, false) => (
                        Point::new(bounds.x1 - tick_length - padding, p),
                        TextAnchor::End,
                        TextBaseline::Middle,
                    ),
                    (Position::Left | Position::ChartArea, true) => (
                        Point::new(bounds.x1 + padding, p),
                        TextAnchor::Start,
                        TextBaseline::Middle,
                    ),
                };
                items.labels.push(LabelItem {
                    position: point,
                    rotation,
                    lines: split_lines(&tick.label),
                    anchor,
                    baseline,
                    font: core.resolved.tick_font.clone(),
                });
            }
        }

        if let Some(title) = &options.title {
            let half = title.height() / 2.0;
            let center = bounds.center();
            let (point, rotation) = match position {
                Position::Top => (Point::new(center.x, bounds.y0 + half), 0.0),
                Position::Bottom => (Point::new(center.x, bounds.y1 - half), 0.0),
                Position::Left | Position::ChartArea => {
                    (Point::new(bounds.x0 + half, center.y), -90.0)
                }
                Position::Right => (Point::new(bounds.x1 - half, center.y), 90.0),
            };
            items.title = Some(LabelItem {
                position: point,
                rotation,
                lines: split_lines(&title.text),
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
                font: title.font.clone(),
            });
        }
        items
    }

    fn radial_items(&self, radial: &RadialScale) -> AxisItems {
        let core = &self.core;
        let options = &core.options;
        let grid = &options.grid;
        let center = radial.center();
        let count = radial.count();
        let mut items = AxisItems::default();

        if grid.display {
            for tick in &core.ticks {
                let radius = radial.distance_for_value(tick.value);
                if !(radius > 0.0) {
                    continue;
                }
                let vertices = if grid.circular {
                    Vec::new()
                } else {
                    (0..count).map(|i| radial.point_for_index(i, radius)).collect()
                };
                items.rings.push(GridRing {
                    center,
                    radius,
                    vertices,
                    stroke: self.stroke_for(tick),
                });
            }
            for i in 0..count {
                let outer = radial.point_for_index(i, radial.drawing_area());
                items.lines.push(TickLineItem {
                    tick: None,
                    grid: Some(Line::new(center, outer)),
                    stroke: grid.stroke.clone(),
                    major: false,
                });
            }
        }

        if options.ticks.display {
            for (i, tick) in core.ticks.iter().enumerate() {
                if tick.label.is_empty() || (i == 0 && core.min >= 0.0 && !options.reverse) {
                    continue;
                }
                let distance = radial.distance_for_value(tick.value);
                items.labels.push(LabelItem {
                    position: radial.point_for_distance(radial.start_angle(), distance),
                    rotation: 0.0,
                    lines: split_lines(&tick.label),
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Middle,
                    font: core.resolved.tick_font.clone(),
                });
            }
        }

        for label in radial.point_labels() {
            items.labels.push(LabelItem {
                position: Point::new(label.rect.x0, label.rect.y0),
                rotation: 0.0,
                lines: split_lines(&label.text),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Hanging,
                font: options.point_labels.font.clone(),
            });
        }
        items
    }
}
