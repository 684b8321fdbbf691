// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial linear scales: values become distances from a centre, label indices become angles.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Point, Rect, Size, Vec2};
use log::debug;
use tickwise_text::{BlockSize, TextMeasurer, measure_block};

use crate::data::DataSource;
use crate::linear::{LinearScale, build_numeric_ticks, handle_tick_range_options, tick_limit};
use crate::math::{normalize_angle, to_usize, usize_to_f64};
use crate::scale::{ScaleCore, Tick, min_max};

/// Fraction of the radius removed per shrink step when point labels collide.
const SHRINK_STEP: f64 = 0.05;

/// Angle of spoke `index` out of `count`, starting at `start_angle` radians, in `[0, 2π)`.
pub fn angle_for_index(index: usize, count: usize, start_angle: f64) -> f64 {
    let slice = TAU / usize_to_f64(count.max(1));
    normalize_angle(usize_to_f64(index) * slice + start_angle)
}

/// A point label placed around the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLabelItem {
    /// Index of the label.
    pub index: usize,
    /// Label text; `\n` separates lines.
    pub text: String,
    /// Angle of the spoke, clockwise from 12 o'clock, in radians.
    pub angle: f64,
    /// Box the label occupies.
    pub rect: Rect,
}

/// Radial geometry.
#[derive(Clone, Debug, Default)]
pub struct RadialScale {
    center: Point,
    center_offset: Vec2,
    drawing_area: f64,
    start_angle: f64,
    count: usize,
    min: f64,
    max: f64,
    reverse: bool,
    label_sizes: Vec<(String, BlockSize)>,
    point_labels: Vec<PointLabelItem>,
}

/// Room reserved around the rings for the tick label backdrop.
fn backdrop_height(core: &ScaleCore) -> f64 {
    let ticks = &core.options.ticks;
    if core.options.display && ticks.display {
        core.resolved.tick_font.font_size + 2.0 * ticks.backdrop_padding
    } else {
        0.0
    }
}

/// Extent of a label box along one axis, given the spoke angle in degrees clockwise from the top.
///
/// Labels on the `along` and `opposite` angles are centred on the anchor; past `opposite` (or
/// before `along`) they hang toward negative coordinates, otherwise toward positive ones.
fn label_extent(degrees: f64, pos: f64, size: f64, along: f64, opposite: f64) -> (f64, f64) {
    if degrees == along || degrees == opposite {
        (pos - size / 2.0, pos + size / 2.0)
    } else if degrees < along || degrees > opposite {
        (pos - size, pos)
    } else {
        (pos, pos + size)
    }
}

fn contains(outer: Rect, inner: Rect) -> bool {
    const EPS: f64 = 1e-6;
    inner.x0 >= outer.x0 - EPS
        && inner.y0 >= outer.y0 - EPS
        && inner.x1 <= outer.x1 + EPS
        && inner.y1 <= outer.y1 + EPS
}

fn overlapping(a: Rect, b: Rect) -> bool {
    a.intersect(b).area() > 0.0
}

impl RadialScale {
    /// Centre of the rings.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the outermost ring.
    pub fn drawing_area(&self) -> f64 {
        self.drawing_area
    }

    /// Angle of spoke 0, clockwise from 12 o'clock, in radians.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Number of spokes.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Angle of spoke `index`, clockwise from 12 o'clock.
    pub fn angle_for_index(&self, index: usize) -> f64 {
        angle_for_index(index, self.count, self.start_angle)
    }

    /// The point `distance` from the centre along a spoke at `angle`.
    pub fn point_for_distance(&self, angle: f64, distance: f64) -> Point {
        let a = angle - FRAC_PI_2;
        self.center + Vec2::new(a.cos(), a.sin()) * distance
    }

    /// The point `distance` from the centre along spoke `index`.
    pub fn point_for_index(&self, index: usize, distance: f64) -> Point {
        self.point_for_distance(self.angle_for_index(index), distance)
    }

    /// Distance of `value` from the centre.
    pub fn distance_for_value(&self, value: f64) -> f64 {
        self.distance_for_decimal(self.decimal_for_value(value).unwrap_or(0.0))
    }

    /// The value at `distance` from the centre.
    pub fn value_for_distance(&self, distance: f64) -> f64 {
        self.value_for_decimal(self.decimal_for_distance(distance))
            .unwrap_or(self.min)
    }

    /// Point labels placed by the last update.
    pub fn point_labels(&self) -> &[PointLabelItem] {
        &self.point_labels
    }

    pub(crate) fn distance_for_decimal(&self, decimal: f64) -> f64 {
        decimal * self.drawing_area
    }

    pub(crate) fn decimal_for_distance(&self, distance: f64) -> f64 {
        if self.drawing_area == 0.0 {
            0.0
        } else {
            distance / self.drawing_area
        }
    }

    pub(crate) fn decimal_for_value(&self, value: f64) -> Option<f64> {
        let range = self.max - self.min;
        if range == 0.0 {
            return Some(0.0);
        }
        Some(if self.reverse {
            (self.max - value) / range
        } else {
            (value - self.min) / range
        })
    }

    pub(crate) fn value_for_decimal(&self, decimal: f64) -> Option<f64> {
        let offset = decimal * (self.max - self.min);
        Some(if self.reverse {
            self.max - offset
        } else {
            self.min + offset
        })
    }

    pub(crate) fn determine_data_limits(&mut self, core: &mut ScaleCore, data: &[&dyn DataSource]) {
        let extent = min_max(core, data, false, LinearScale::parse);
        core.min = if extent.min.is_finite() { extent.min } else { 0.0 };
        core.max = if extent.max.is_finite() { extent.max } else { 0.0 };
        handle_tick_range_options(core);
    }

    /// Centres the rings in the offered space, leaving room for the tick backdrop.
    fn set_dimensions(&mut self, core: &ScaleCore) {
        let pad = backdrop_height(core) / 2.0;
        let w = (core.max_width - 2.0 * pad).max(0.0);
        let h = (core.max_height - 2.0 * pad).max(0.0);
        self.center_offset = Vec2::new((w / 2.0 + pad).floor(), (h / 2.0 + pad).floor());
        self.center = core.bounds.origin() + self.center_offset;
        self.drawing_area = (w.min(h) / 2.0).floor();
    }

    pub(crate) fn build_ticks(&mut self, core: &mut ScaleCore) -> Vec<Tick> {
        self.set_dimensions(core);
        self.count = core.labels.len();
        self.start_angle = core.options.start_angle.to_radians();
        let backdrop = backdrop_height(core);
        let capacity = if backdrop > 0.0 {
            to_usize((self.drawing_area / backdrop).ceil())
        } else {
            usize::MAX
        };
        let max_ticks = tick_limit(core, capacity);
        build_numeric_ticks(core, max_ticks)
    }

    pub(crate) fn configure(&mut self, core: &mut ScaleCore) {
        self.min = core.min;
        self.max = core.max;
        self.reverse = core.options.reverse;
        core.start_value = core.min;
        core.value_range = core.max - core.min;
        self.center = core.bounds.origin() + self.center_offset;
        let padding = core.options.point_labels.padding;
        let center_labels = core.options.point_labels.center_point_labels;
        self.point_labels = self.layout_point_labels(self.drawing_area, padding, center_labels);
    }

    /// Places every measured point label just outside a ring of `radius`.
    fn layout_point_labels(
        &self,
        radius: f64,
        padding: f64,
        center_labels: bool,
    ) -> Vec<PointLabelItem> {
        let extra = if center_labels && self.count > 0 {
            PI / usize_to_f64(self.count)
        } else {
            0.0
        };
        self.label_sizes
            .iter()
            .enumerate()
            .map(|(index, (text, size))| {
                let angle = normalize_angle(self.angle_for_index(index) + extra);
                let anchor = self.point_for_distance(angle, radius + padding);
                let degrees = angle.to_degrees().round() % 360.0;
                let (x0, x1) = label_extent(degrees, anchor.x, size.width, 0.0, 180.0);
                let (y0, y1) = label_extent(degrees, anchor.y, size.height, 90.0, 270.0);
                PointLabelItem {
                    index,
                    text: text.clone(),
                    angle,
                    rect: Rect::new(x0, y0, x1, y1),
                }
            })
            .collect()
    }

    /// Measures the point labels and shrinks the radius until they fit and do not collide.
    pub(crate) fn fit(&mut self, core: &ScaleCore, measurer: &dyn TextMeasurer) {
        let options = &core.options;
        if !options.display || !options.point_labels.display {
            self.label_sizes.clear();
            self.point_labels.clear();
            return;
        }
        let font = &options.point_labels.font;
        self.label_sizes = core
            .labels
            .iter()
            .map(|label| (String::from(&**label), measure_block(measurer, label, font)))
            .collect();

        let allowed = Rect::from_origin_size(
            core.bounds.origin(),
            Size::new(core.max_width, core.max_height),
        );
        let padding = options.point_labels.padding;
        let center_labels = options.point_labels.center_point_labels;
        let floor = self.drawing_area / 2.0;
        let mut radius = self.drawing_area;
        loop {
            let items = self.layout_point_labels(radius, padding, center_labels);
            let overflow = items.iter().any(|item| !contains(allowed, item.rect));
            let n = items.len();
            let collide = n > 1
                && (0..n).any(|i| {
                    let j = (i + 1) % n;
                    i != j && overlapping(items[i].rect, items[j].rect)
                });
            if !(overflow || collide) || radius <= floor {
                break;
            }
            radius = (radius * (1.0 - SHRINK_STEP)).max(floor);
        }
        if radius < self.drawing_area {
            debug!(
                "point labels shrink the radial drawing area from {} to {radius}",
                self.drawing_area
            );
        }
        self.drawing_area = radius;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::data::Dataset;
    use crate::factory::{ScaleKind, create_scale, default_options};
    use crate::scale::UpdateContext;
    use float_cmp::assert_approx_eq;
    use kurbo::Insets;
    use tickwise_text::HeuristicTextMeasurer;

    fn radial(labels: &[&str], values: &[f64], size: f64) -> crate::Scale {
        let mut scale = create_scale(
            ScaleKind::RadialLinear,
            default_options(ScaleKind::RadialLinear),
            None,
        )
        .unwrap();
        scale.set_labels(labels.iter().copied());
        let ds = Dataset::from_numbers(values.iter().copied());
        let data: [&dyn DataSource; 1] = [&ds];
        scale.update(size, size, Insets::ZERO, &UpdateContext::new(&data, &HeuristicTextMeasurer));
        scale
    }

    #[test]
    fn angles_are_normalized_slices() {
        assert_approx_eq!(f64, angle_for_index(0, 4, 0.0), 0.0);
        assert_approx_eq!(f64, angle_for_index(1, 4, 0.0), FRAC_PI_2);
        assert_approx_eq!(f64, angle_for_index(4, 4, 0.0), 0.0, epsilon = 1e-12);
        assert_approx_eq!(f64, angle_for_index(3, 4, PI), FRAC_PI_2, epsilon = 1e-12);
        assert_approx_eq!(f64, angle_for_index(0, 0, 1.0), 1.0);
    }

    #[test]
    fn spoke_zero_points_up() {
        let r = RadialScale {
            center: Point::new(100.0, 100.0),
            count: 4,
            ..RadialScale::default()
        };
        let top = r.point_for_index(0, 50.0);
        assert_approx_eq!(f64, top.x, 100.0, epsilon = 1e-9);
        assert_approx_eq!(f64, top.y, 50.0, epsilon = 1e-9);
        let right = r.point_for_index(1, 50.0);
        assert_approx_eq!(f64, right.x, 150.0, epsilon = 1e-9);
        assert_approx_eq!(f64, right.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn distances_round_trip() {
        let scale = radial(&["a", "b", "c"], &[0.0, 100.0], 400.0);
        let r = scale.radial().unwrap();
        let (min, max) = scale.domain();
        assert_approx_eq!(f64, r.distance_for_value(min), 0.0);
        assert_approx_eq!(f64, r.distance_for_value(max), r.drawing_area());
        let d = r.distance_for_value(37.0);
        assert_approx_eq!(f64, r.value_for_distance(d), 37.0, epsilon = 1e-9);
        assert_eq!(scale.pixel_for_value(max), Some(r.drawing_area()));
    }

    #[test]
    fn labels_stay_inside_or_hit_the_floor() {
        let scale = radial(&["north", "east", "south", "west"], &[1.0, 5.0], 300.0);
        let r = scale.radial().unwrap();
        let allowed = Rect::new(0.0, 0.0, 300.0, 300.0);
        assert_eq!(r.point_labels().len(), 4);
        for item in r.point_labels() {
            assert!(contains(allowed, item.rect), "{item:?}");
        }
        assert!(r.drawing_area() < 150.0);
    }

    #[test]
    fn shrinking_stops_at_half_the_radius() {
        let long = "a very long point label that cannot fit";
        let scale = radial(&[long, long, long], &[1.0, 5.0], 200.0);
        let r = scale.radial().unwrap();
        let full = ((200.0 - 2.0 * (12.0 + 4.0) / 2.0) / 2.0_f64).floor();
        assert_approx_eq!(f64, r.drawing_area(), full / 2.0);
    }

    #[test]
    fn tick_count_follows_the_backdrop() {
        let scale = radial(&["a", "b", "c"], &[0.0, 100.0], 400.0);
        assert!(scale.ticks().len() <= 11);
        assert!(scale.ticks().len() >= 2);
        let values: Vec<f64> = scale.ticks().iter().map(|t| t.value).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }
}
