// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scales and the nice-number tick generator.
//!
//! The generator is shared: radial scales use it for their rings, and it is exported for hosts
//! that need ticks for an arbitrary sub-range.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use log::{debug, warn};

use crate::data::{DataSource, ParsedValue, RawValue};
use crate::format::format_numeric;
use crate::math::{
    almost_equals, almost_whole, decimal_places, nice_num, to_i32, to_usize, usize_to_f64,
};
use crate::options::{Bounds, Grace};
use crate::scale::{ScaleCore, Tick, min_max};

/// Hard cap on generated ticks.
pub const MAX_TICKS: usize = 1000;

/// Default tick cap when nothing else limits the count.
const DEFAULT_MAX_TICKS: usize = 11;

/// Smallest spacing the generator treats as non-zero.
const MIN_SPACING: f64 = 1e-14;

/// Parameters of [`generate_linear_ticks`].
#[derive(Clone, Debug, PartialEq)]
pub struct LinearTickParams {
    /// Upper bound on the number of ticks (at least 2 is used).
    pub max_ticks: usize,
    /// Explicit minimum, included exactly when `include_bounds` is set.
    pub min: Option<f64>,
    /// Explicit maximum, included exactly when `include_bounds` is set.
    pub max: Option<f64>,
    /// Maximum decimals of the spacing.
    pub precision: Option<u8>,
    /// Fixed step between ticks.
    pub step: Option<f64>,
    /// Fixed tick count.
    pub count: Option<usize>,
    /// How many label rows fit along the axis, used to merge a nice tick into a nearby bound.
    pub max_digits: f64,
    /// Whether the axis is horizontal.
    pub horizontal: bool,
    /// Minimum label rotation in degrees.
    pub min_rotation: f64,
    /// Push explicit bounds as ticks.
    pub include_bounds: bool,
}

impl Default for LinearTickParams {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            min: None,
            max: None,
            precision: None,
            step: None,
            count: None,
            max_digits: 10.0,
            horizontal: true,
            min_rotation: 0.0,
            include_bounds: true,
        }
    }
}

impl LinearTickParams {
    /// Parameters for a target tick count.
    pub fn with_max_ticks(max_ticks: usize) -> Self {
        Self {
            max_ticks,
            ..Self::default()
        }
    }
}

/// `nice * unit`, rounded to the decimal places the two factors carry between them.
fn scaled(nice: f64, unit: f64) -> f64 {
    let spacing = nice * unit;
    let places = (decimal_places(nice) + decimal_places(unit)).min(20);
    let factor = 10_f64.powi(to_i32(f64::from(places)));
    let rounded = (spacing * factor).round() / factor;
    if rounded.is_finite() && rounded > 0.0 {
        rounded
    } else {
        spacing
    }
}

/// Rounds a quotient that is an integer up to float noise.
fn snap_whole(x: f64) -> f64 {
    if almost_whole(x, x.abs() * 1e-12) {
        x.round()
    } else {
        x
    }
}

/// Generates nice tick values covering `[min, max]`.
///
/// The spacing is a nice number (`1`, `2` or `5` times a power of ten) chosen so at most
/// `max_ticks` ticks are produced, and the first and last tick are the range snapped outward to
/// that spacing. A fixed `step` that divides explicit bounds evenly, or a fixed `count`, is taken
/// literally. Output never exceeds [`MAX_TICKS`] values.
pub fn generate_linear_ticks(params: &LinearTickParams, min: f64, max: f64) -> Vec<f64> {
    let step = params.step.filter(|s| *s > 0.0 && s.is_finite());
    let unit = step.unwrap_or(1.0);
    let max_ticks = params.max_ticks.max(2);
    let max_spaces = usize_to_f64(max_ticks - 1);
    let min_spacing = (max - min) / (params.max_digits.max(0.0) + 1.0);

    let mut spacing = scaled(nice_num((max - min) / max_spaces / unit), unit);
    if !(spacing >= MIN_SPACING) || !spacing.is_finite() {
        let lo = params.min.unwrap_or(min);
        let hi = params.max.unwrap_or(max);
        return if lo == hi {
            alloc::vec![lo]
        } else {
            alloc::vec![lo, hi]
        };
    }

    let mut num_spaces = snap_whole(max / spacing).ceil() - snap_whole(min / spacing).floor();
    if num_spaces > max_spaces {
        spacing = scaled(nice_num(num_spaces * spacing / max_spaces / unit), unit);
    }
    if let Some(precision) = params.precision {
        let factor = 10_f64.powi(i32::from(precision));
        spacing = (spacing * factor).ceil() / factor;
    }

    let mut nice_min = snap_whole(min / spacing).floor() * spacing;
    let mut nice_max = snap_whole(max / spacing).ceil() * spacing;

    let literal_step = match (params.min, params.max, step) {
        (Some(lo), Some(hi), Some(step)) => {
            almost_whole((hi - lo) / step, spacing / 1000.0).then_some((lo, hi))
        }
        _ => None,
    };
    if let Some((lo, hi)) = literal_step {
        num_spaces = ((hi - lo) / spacing).min(usize_to_f64(max_ticks)).round().max(1.0);
        spacing = (hi - lo) / num_spaces;
        nice_min = lo;
        nice_max = hi;
    } else if let Some(count) = params.count {
        nice_min = params.min.unwrap_or(nice_min);
        nice_max = params.max.unwrap_or(nice_max);
        num_spaces = usize_to_f64(count.max(2) - 1);
        spacing = (nice_max - nice_min) / num_spaces;
    } else {
        num_spaces = (nice_max - nice_min) / spacing;
        num_spaces = if almost_equals(num_spaces, num_spaces.round(), spacing / 1000.0) {
            num_spaces.round()
        } else {
            num_spaces.ceil()
        };
    }

    let places = decimal_places(spacing).max(decimal_places(nice_min));
    let places = params.precision.map_or(places, u32::from);
    let factor = 10_f64.powi(to_i32(f64::from(places.min(20))));
    let round = |v: f64| (v * factor).round() / factor;
    nice_min = round(nice_min);
    nice_max = round(nice_max);

    let mut spaces = to_usize(num_spaces);
    if spaces >= MAX_TICKS {
        warn!("tick generation capped at {MAX_TICKS} ticks ({spaces} requested)");
        spaces = MAX_TICKS - 1;
    }

    let mut ticks = Vec::with_capacity(spaces + 1);
    let mut j = 0_usize;
    if let Some(lo) = params.min {
        if params.include_bounds && nice_min != lo {
            ticks.push(lo);
            if nice_min < lo {
                j += 1;
            }
            let next = round(nice_min + usize_to_f64(j) * spacing);
            if almost_equals(next, lo, relative_label_size(lo, min_spacing, params)) {
                j += 1;
            }
        } else if nice_min < lo {
            j += 1;
        }
    }
    while j < spaces {
        let v = round(nice_min + usize_to_f64(j) * spacing);
        if let Some(hi) = params.max
            && v > hi
        {
            break;
        }
        ticks.push(v);
        j += 1;
    }

    match params.max {
        Some(hi) if params.include_bounds && nice_max != hi => {
            let merge = ticks.last().is_some_and(|last| {
                almost_equals(*last, hi, relative_label_size(hi, min_spacing, params))
            });
            if merge {
                if let Some(last) = ticks.last_mut() {
                    *last = hi;
                }
            } else {
                ticks.push(hi);
            }
        }
        Some(hi) if nice_max != hi => {}
        _ => ticks.push(nice_max),
    }
    ticks
}

/// How close a nice tick may come to an explicit bound before the two are merged.
fn relative_label_size(value: f64, min_spacing: f64, params: &LinearTickParams) -> f64 {
    let rad = params.min_rotation.to_radians();
    let ratio = if params.horizontal { rad.sin() } else { rad.cos() };
    let ratio = if ratio == 0.0 { 0.001 } else { ratio.abs() };
    let digits = alloc::format!("{value}").len();
    let length = 0.75 * min_spacing * usize_to_f64(digits);
    (min_spacing / ratio).min(length)
}

/// Linear scale state. Everything lives in the shared core.
#[derive(Clone, Debug, Default)]
pub(crate) struct LinearScale;

impl LinearScale {
    pub(crate) fn parse(raw: &RawValue) -> ParsedValue {
        raw.as_number().map_or(ParsedValue::Null, ParsedValue::Value)
    }

    pub(crate) fn determine_data_limits(&mut self, core: &mut ScaleCore, data: &[&dyn DataSource]) {
        let extent = min_max(core, data, true, Self::parse);
        core.min = if extent.min.is_finite() { extent.min } else { 0.0 };
        core.max = if extent.max.is_finite() { extent.max } else { 1.0 };
        handle_tick_range_options(core);
    }

    pub(crate) fn build_ticks(&mut self, core: &mut ScaleCore) -> Vec<Tick> {
        let max_ticks = tick_limit(core, linear_tick_capacity(core));
        build_numeric_ticks(core, max_ticks)
    }

    pub(crate) fn configure(&mut self, core: &mut ScaleCore) {
        configure_linear(core);
    }
}

/// Widens degenerate ranges and applies `begin_at_zero`, never moving an explicit bound.
pub(crate) fn handle_tick_range_options(core: &mut ScaleCore) {
    let min_defined = core.user_min.is_some();
    let max_defined = core.user_max.is_some();
    let begin_at_zero = core.options.begin_at_zero;
    let mut min = core.min;
    let mut max = core.max;

    let set_min = |v: f64, min: &mut f64| {
        if !min_defined {
            *min = v;
        }
    };
    let set_max = |v: f64, max: &mut f64| {
        if !max_defined {
            *max = v;
        }
    };

    if begin_at_zero {
        if min < 0.0 && max < 0.0 {
            if max_defined {
                debug!("explicit max {max} keeps begin_at_zero from extending the range");
            }
            set_max(0.0, &mut max);
        } else if min > 0.0 && max > 0.0 {
            if min_defined {
                debug!("explicit min {min} keeps begin_at_zero from extending the range");
            }
            set_min(0.0, &mut min);
        }
    }

    if min == max {
        let offset = if max == 0.0 { 1.0 } else { (max * 0.05).abs() };
        set_max(max + offset, &mut max);
        if !begin_at_zero {
            set_min(min - offset, &mut min);
        }
    }
    core.min = min;
    core.max = max;
}

/// The tick count a linear axis can hold, from its length and label height.
pub(crate) fn linear_tick_capacity(core: &ScaleCore) -> usize {
    let horizontal = core.is_horizontal();
    let length = core.axis_length();
    let rad = core.resolved.min_rotation.to_radians();
    let ratio = if horizontal { rad.sin() } else { rad.cos() };
    let ratio = if ratio == 0.0 { 0.001 } else { ratio.abs() };
    let line_height = core.resolved.tick_font.row_height();
    let spacing = 40_f64.min(line_height / ratio);
    if !(spacing > 0.0) {
        return DEFAULT_MAX_TICKS;
    }
    to_usize((length / spacing).ceil())
}

/// Resolves the tick count target from the step size, the tick cap and `capacity`.
pub(crate) fn tick_limit(core: &ScaleCore, capacity: usize) -> usize {
    let (mut max_ticks, limit) = match core.options.step_size() {
        Some(step) => {
            let count = (core.max / step).ceil() - (core.min / step).floor() + 1.0;
            let mut count = to_usize(count);
            if count > MAX_TICKS {
                warn!(
                    "step size {step} yields {count} ticks over [{}, {}]; capping at {MAX_TICKS}",
                    core.min, core.max
                );
                count = MAX_TICKS;
            }
            (count, core.resolved.max_ticks_limit)
        }
        None => (
            capacity,
            Some(core.resolved.max_ticks_limit.unwrap_or(DEFAULT_MAX_TICKS)),
        ),
    };
    if let Some(limit) = limit {
        max_ticks = max_ticks.min(limit);
    }
    max_ticks.max(2)
}

/// Extra room around `[min, max]`, keeping a zero bound at zero under `begin_at_zero`.
fn add_grace(min: f64, max: f64, grace: Option<Grace>, begin_at_zero: bool) -> (f64, f64) {
    let change = match grace {
        None => return (min, max),
        Some(Grace::Absolute(v)) => v,
        Some(Grace::Percent(p)) => p * (max - min) / 2.0,
    };
    let change = change.abs();
    let keep_zero = |value: f64, add: f64| {
        if begin_at_zero && value == 0.0 {
            0.0
        } else {
            value + add
        }
    };
    (keep_zero(min, -change), keep_zero(max, change))
}

/// Generates ticks for the core's domain and applies the bounds policy.
pub(crate) fn build_numeric_ticks(core: &mut ScaleCore, max_ticks: usize) -> Vec<Tick> {
    let (min, max) = add_grace(
        core.min,
        core.max,
        core.options.grace,
        core.options.begin_at_zero,
    );
    if core.options.grace.is_some() {
        if core.user_min.is_none() {
            core.min = min;
        }
        if core.user_max.is_none() {
            core.max = max;
        }
    }

    let row_height = core.resolved.tick_font.row_height();
    let params = LinearTickParams {
        max_ticks,
        min: core.user_min,
        max: core.user_max,
        precision: core.options.ticks.precision,
        step: core.options.step_size(),
        count: core.options.ticks.count.filter(|c| *c >= 2),
        max_digits: if row_height > 0.0 {
            core.axis_length() / row_height
        } else {
            10.0
        },
        horizontal: core.is_horizontal(),
        min_rotation: core.resolved.min_rotation,
        include_bounds: core.options.ticks.include_bounds,
    };
    let mut values = generate_linear_ticks(&params, core.min, core.max);

    match core.options.bounds {
        Bounds::Ticks => {
            if let (Some(first), Some(last)) = (
                values.iter().copied().reduce(f64::min),
                values.iter().copied().reduce(f64::max),
            ) {
                core.min = first;
                core.max = last;
            }
        }
        Bounds::Data => {
            let eps = (core.max - core.min).abs() * 1e-9;
            let (lo, hi) = (core.min, core.max);
            values.retain(|v| *v >= lo - eps && *v <= hi + eps);
            if values.is_empty() {
                values.push(lo);
            }
        }
    }

    if core.options.reverse {
        values.reverse();
    }
    values.into_iter().map(Tick::new).collect()
}

/// Maps the domain onto decimals, padding half a step on each end with `offset`.
pub(crate) fn configure_linear(core: &mut ScaleCore) {
    let mut start = core.min;
    let mut end = core.max;
    if core.options.offset && core.ticks.len() > 1 {
        let half_step = (end - start) / usize_to_f64(core.ticks.len() - 1) / 2.0;
        start -= half_step;
        end += half_step;
    }
    core.start_value = start;
    core.value_range = end - start;
}

/// Affine value-to-decimal map; a zero-width domain sends everything to the axis start.
pub(crate) fn decimal_for_value(core: &ScaleCore, value: f64) -> f64 {
    if core.value_range == 0.0 {
        return core.decimal_at_start();
    }
    (value - core.start_value) / core.value_range
}

/// Numeric labels with a precision shared across the axis.
pub(crate) fn generate_tick_labels(core: &ScaleCore, ticks: &mut [Tick]) {
    let magnitude = ticks
        .iter()
        .map(|t| t.value.abs())
        .fold(0.0_f64, f64::max);
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    for (i, tick) in ticks.iter_mut().enumerate() {
        let delta = tick_delta(&values, i);
        tick.label = format_numeric(tick.value, delta, magnitude, core.options.ticks.format);
    }
}

/// The step used to format `values[index]`.
///
/// Uses the regular spacing of the interior ticks, so an explicit bound like `0.37` does not
/// force extra decimals onto every label, but does get the decimals it needs itself.
fn tick_delta(values: &[f64], index: usize) -> f64 {
    let mut delta = match values.len() {
        0 | 1 => values.first().map_or(0.0, |v| v.abs()),
        2 | 3 => values[1] - values[0],
        _ => values[2] - values[1],
    };
    let value = values[index];
    if delta.abs() >= 1.0 && value != value.floor() {
        delta = value - value.floor();
    }
    delta
}

pub(crate) fn label_for_value(core: &ScaleCore, value: f64) -> String {
    let step = match core.ticks.len() {
        0 | 1 => value,
        _ => core.ticks[1].value - core.ticks[0].value,
    };
    let step = if value != value.floor() && step.abs() >= 1.0 {
        value - value.floor()
    } else {
        step
    };
    format_numeric(value, step, value, core.options.ticks.format)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    #[test]
    fn five_intervals_over_zero_to_hundred() {
        let ticks = generate_linear_ticks(&LinearTickParams::with_max_ticks(6), 0.0, 100.0);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn snaps_outward_to_the_spacing() {
        let ticks = generate_linear_ticks(&LinearTickParams::with_max_ticks(11), 3.0, 97.0);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&100.0));
        assert_eq!(ticks[1] - ticks[0], 10.0);
    }

    #[test]
    fn fractional_ranges_round_cleanly() {
        let ticks = generate_linear_ticks(&LinearTickParams::with_max_ticks(6), 0.0, 1.0);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn explicit_bounds_are_included() {
        let params = LinearTickParams {
            min: Some(0.5),
            max: Some(9.5),
            ..LinearTickParams::with_max_ticks(11)
        };
        let ticks = generate_linear_ticks(&params, 0.5, 9.5);
        assert_eq!(ticks.first(), Some(&0.5));
        assert_eq!(ticks.last(), Some(&9.5));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn step_dividing_explicit_bounds_is_literal() {
        let params = LinearTickParams {
            min: Some(0.0),
            max: Some(30.0),
            step: Some(7.5),
            ..LinearTickParams::with_max_ticks(5)
        };
        let ticks = generate_linear_ticks(&params, 0.0, 30.0);
        assert_eq!(ticks, vec![0.0, 7.5, 15.0, 22.5, 30.0]);
    }

    #[test]
    fn fixed_count_is_literal() {
        let params = LinearTickParams {
            count: Some(4),
            ..LinearTickParams::with_max_ticks(11)
        };
        let ticks = generate_linear_ticks(&params, 0.0, 90.0);
        assert_eq!(ticks, vec![0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn generation_is_capped() {
        let params = LinearTickParams {
            count: Some(5000),
            ..LinearTickParams::with_max_ticks(11)
        };
        let ticks = generate_linear_ticks(&params, 0.0, 1.0);
        assert!(ticks.len() <= MAX_TICKS);
    }

    #[test]
    fn tiny_steps_do_not_overshoot_the_range() {
        let params = LinearTickParams {
            step: Some(1e-6),
            ..LinearTickParams::with_max_ticks(MAX_TICKS)
        };
        let ticks = generate_linear_ticks(&params, 20.0, 80.0);
        assert_eq!(ticks.first(), Some(&20.0));
        assert_eq!(ticks.last(), Some(&80.0));
        assert!(ticks.len() <= MAX_TICKS);
    }

    #[test]
    fn degenerate_range_yields_a_tick() {
        let ticks = generate_linear_ticks(&LinearTickParams::default(), 4.0, 4.0);
        assert_eq!(ticks, vec![4.0]);
    }

    #[test]
    fn grace_pads_both_sides_but_keeps_zero() {
        assert_eq!(add_grace(0.0, 10.0, Some(Grace::Absolute(2.0)), false), (-2.0, 12.0));
        assert_eq!(add_grace(0.0, 10.0, Some(Grace::Percent(0.2)), true), (0.0, 11.0));
        assert_eq!(add_grace(1.0, 3.0, None, false), (1.0, 3.0));
    }

    #[test]
    fn delta_ignores_bound_ticks() {
        let values = [0.37, 1.0, 2.0, 3.0];
        assert_eq!(tick_delta(&values, 2), 1.0);
        assert!((tick_delta(&values, 0) - 0.37).abs() < 1e-12);
    }
}
