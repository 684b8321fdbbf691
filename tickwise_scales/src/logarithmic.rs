// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logarithmic scales.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use log::warn;

use crate::data::{DataSource, ParsedValue, RawValue};
use crate::format::{format_log, format_log_value};
use crate::linear::{MAX_TICKS, linear_tick_capacity, tick_limit};
use crate::math::{change_exponent, log10, to_i32};
use crate::options::Bounds;
use crate::scale::{ScaleCore, Tick, min_max};

/// Significand sets tried from densest to sparsest.
const SIGNIFICANDS: [&[u8]; 3] = [&[1, 2, 3, 4, 5, 6, 7, 8, 9], &[1, 2, 5], &[1]];

/// A tick produced by [`generate_log_ticks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogTick {
    /// Tick value.
    pub value: f64,
    /// `true` for powers of ten.
    pub major: bool,
}

/// `s × 10^e`, computed by division for negative exponents so `0.02` comes out exact.
fn significand_value(significand: u8, exponent: i32) -> f64 {
    let s = f64::from(significand);
    if exponent < 0 {
        s / 10_f64.powi(-exponent)
    } else {
        s * 10_f64.powi(exponent)
    }
}

fn is_power_of_ten(v: f64) -> bool {
    v > 0.0 && 10_f64.powi(to_i32(log10(v))) == v
}

/// Generates ticks for the positive range `[min, max]`.
///
/// Walks the decades from `floor(log10(min))` to `ceil(log10(max))` and picks the densest
/// significand set (`1..9`, then `{1, 2, 5}`, then `{1}`) that yields at most `max_ticks`
/// ticks. The first tick is at or below `min` and the last at or above `max`; explicit bounds
/// replace them exactly. When even whole decades are too many, every n-th decade is used.
pub fn generate_log_ticks(
    min: f64,
    max: f64,
    max_ticks: usize,
    explicit_min: Option<f64>,
    explicit_max: Option<f64>,
) -> Vec<LogTick> {
    if !(min > 0.0) || !max.is_finite() || max < min {
        let value = if min > 0.0 { min } else { 1.0 };
        return alloc::vec![LogTick {
            value,
            major: is_power_of_ten(value),
        }];
    }
    let max_ticks = max_ticks.max(2);
    let lo_exp = to_i32(log10(min).floor());
    let hi_exp = to_i32(log10(max).ceil()).max(lo_exp);
    let decades = usize::try_from(hi_exp - lo_exp).unwrap_or(usize::MAX);

    let mut ticks = Vec::new();
    if decades < MAX_TICKS {
        for set in SIGNIFICANDS {
            let candidates = covering_candidates(set, lo_exp, hi_exp, min, max);
            if candidates.len() <= max_ticks || set.len() == 1 {
                ticks = candidates;
                break;
            }
        }
    }
    if ticks.len() > max_ticks || ticks.is_empty() {
        let stride = decades.div_ceil(max_ticks - 1).max(1);
        let stride = i32::try_from(stride).unwrap_or(i32::MAX);
        let mut e = lo_exp;
        ticks.clear();
        loop {
            ticks.push(LogTick {
                value: significand_value(1, e),
                major: true,
            });
            if e >= hi_exp || ticks.len() >= MAX_TICKS {
                break;
            }
            e = e.saturating_add(stride);
        }
        if ticks.len() >= MAX_TICKS {
            warn!("log tick generation capped at {MAX_TICKS} ticks");
        }
    }

    if let (Some(lo), Some(first)) = (explicit_min, ticks.first_mut())
        && lo > 0.0
    {
        *first = LogTick {
            value: lo,
            major: is_power_of_ten(lo),
        };
    }
    if let (Some(hi), Some(last)) = (explicit_max, ticks.last_mut())
        && hi > 0.0
    {
        *last = LogTick {
            value: hi,
            major: is_power_of_ten(hi),
        };
    }
    ticks.dedup_by(|a, b| a.value == b.value);
    ticks
}

/// Candidates of one significand set from the last one at or below `min` to the first one at
/// or above `max`.
fn covering_candidates(set: &[u8], lo_exp: i32, hi_exp: i32, min: f64, max: f64) -> Vec<LogTick> {
    let mut out: Vec<LogTick> = Vec::new();
    for e in lo_exp..=hi_exp {
        for &s in set {
            let value = significand_value(s, e);
            if value <= min {
                out.clear();
            }
            out.push(LogTick {
                value,
                major: s == 1,
            });
            if value >= max {
                return out;
            }
        }
    }
    out
}

/// Logarithmic scale state.
#[derive(Clone, Debug, Default)]
pub(crate) struct LogScale {
    includes_zero: bool,
}

impl LogScale {
    pub(crate) fn includes_zero(&self) -> bool {
        self.includes_zero
    }

    pub(crate) fn begin_update(&mut self) {
        self.includes_zero = false;
    }

    /// Positive finite numbers are values; an exact zero is recorded; the rest is rejected.
    pub(crate) fn parse(&mut self, raw: &RawValue) -> ParsedValue {
        match raw.as_number() {
            Some(v) if v == 0.0 => {
                self.includes_zero = true;
                ParsedValue::Zero
            }
            Some(v) if v > 0.0 => ParsedValue::Value(v),
            _ => ParsedValue::Null,
        }
    }

    pub(crate) fn determine_data_limits(&mut self, core: &mut ScaleCore, data: &[&dyn DataSource]) {
        let extent = min_max(core, data, true, |raw| self.parse(raw));
        let mut min = if extent.min.is_finite() {
            extent.min.max(0.0)
        } else {
            0.0
        };
        let max = if extent.max.is_finite() {
            extent.max.max(0.0)
        } else {
            0.0
        };
        if core.options.begin_at_zero {
            self.includes_zero = true;
        }
        if self.includes_zero
            && core.user_min.is_none()
            && core.options.suggested_min.is_none()
            && min > 0.0
        {
            let decade = change_exponent(min, 0);
            min = if min == decade {
                change_exponent(min, -1)
            } else {
                decade
            };
        }
        core.min = min;
        core.max = max;
        handle_tick_range_options(core);
    }

    pub(crate) fn build_ticks(&mut self, core: &mut ScaleCore) -> Vec<Tick> {
        let max_ticks = tick_limit(core, linear_tick_capacity(core));
        let generated =
            generate_log_ticks(core.min, core.max, max_ticks, core.user_min, core.user_max);
        let mut ticks: Vec<Tick> = generated
            .into_iter()
            .map(|t| Tick::with_major(t.value, t.major))
            .collect();

        match core.options.bounds {
            Bounds::Ticks => {
                if let (Some(first), Some(last)) = (ticks.first(), ticks.last()) {
                    core.min = first.value;
                    core.max = last.value;
                }
            }
            Bounds::Data => {
                let (lo, hi) = (core.min, core.max);
                let eps = hi * 1e-12;
                ticks.retain(|t| t.value >= lo - eps && t.value <= hi + eps);
                if ticks.is_empty() {
                    ticks.push(Tick::with_major(lo, is_power_of_ten(lo)));
                }
            }
        }
        if core.options.reverse {
            ticks.reverse();
        }
        ticks
    }

    pub(crate) fn generate_tick_labels(&self, core: &ScaleCore, ticks: &mut [Tick]) {
        for tick in ticks {
            tick.label = format_log(tick.value, core.options.ticks.format);
        }
    }

    pub(crate) fn configure(&mut self, core: &mut ScaleCore) {
        let start = log10(core.min);
        core.start_value = start;
        core.value_range = log10(core.max) - start;
    }

    pub(crate) fn decimal_for_value(&self, core: &ScaleCore, value: f64) -> Option<f64> {
        if value == 0.0 || value == core.min {
            return Some(0.0);
        }
        if value < 0.0 {
            return None;
        }
        if core.value_range == 0.0 || !core.value_range.is_finite() {
            return Some(core.decimal_at_start());
        }
        Some((log10(value) - core.start_value) / core.value_range)
    }

    pub(crate) fn value_for_decimal(&self, core: &ScaleCore, decimal: f64) -> Option<f64> {
        Some(10_f64.powf(core.start_value + decimal * core.value_range))
    }

    pub(crate) fn label_for_value(&self, core: &ScaleCore, value: f64) -> String {
        if value <= 0.0 {
            return "0".into();
        }
        format_log_value(value, core.options.ticks.format)
    }
}

/// Widens degenerate or non-positive limits into a usable positive range.
fn handle_tick_range_options(core: &mut ScaleCore) {
    let min_defined = core.user_min.is_some();
    let max_defined = core.user_max.is_some();
    let mut min = core.min;
    let mut max = core.max;

    if min == max {
        if min <= 0.0 {
            if !min_defined {
                min = 1.0;
            }
            if !max_defined {
                max = 10.0;
            }
        } else {
            if !min_defined {
                min = change_exponent(min, -1);
            }
            if !max_defined {
                max = change_exponent(max, 1);
            }
        }
    }
    if min <= 0.0 && !min_defined && max > 0.0 {
        min = change_exponent(max, -1);
    }
    if max <= 0.0 && !max_defined && min > 0.0 {
        max = change_exponent(min, 1);
    }

    if !(min > 0.0) {
        warn!("logarithmic scale cannot start at {min}; using a decade below the maximum");
        min = if max > 0.0 { change_exponent(max, -1) } else { 1.0 };
    }
    if !(max > min) {
        warn!("logarithmic scale maximum {max} is not above minimum {min}; widening by a decade");
        max = change_exponent(min, 1);
        if max <= min {
            max = min * 10.0;
        }
    }
    core.min = min;
    core.max = max;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    fn major_share(ticks: &[LogTick]) -> f64 {
        let majors = ticks.iter().filter(|t| t.major).count();
        crate::math::usize_to_f64(majors) / crate::math::usize_to_f64(ticks.len().max(1))
    }

    fn values(ticks: &[LogTick]) -> Vec<f64> {
        ticks.iter().map(|t| t.value).collect()
    }

    #[test]
    fn one_to_thousand_uses_one_two_five() {
        let ticks = generate_log_ticks(1.0, 1000.0, 11, None, None);
        assert_eq!(
            values(&ticks),
            vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0]
        );
        let majors: Vec<f64> = ticks.iter().filter(|t| t.major).map(|t| t.value).collect();
        assert_eq!(majors, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn dense_set_when_room_allows() {
        let ticks = generate_log_ticks(1.0, 100.0, 30, None, None);
        assert_eq!(ticks.len(), 19);
        assert!(major_share(&ticks) < 0.2);
    }

    #[test]
    fn many_decades_fall_back_to_strided_powers() {
        let ticks = generate_log_ticks(1e-10, 1e10, 6, None, None);
        assert!(ticks.len() <= 6);
        assert!(ticks.iter().all(|t| t.major));
        assert_eq!(ticks.first().map(|t| t.value), Some(1e-10));
        assert!(ticks.last().map(|t| t.value).unwrap_or(0.0) >= 1e10);
    }

    #[test]
    fn explicit_bounds_are_exact() {
        let ticks = generate_log_ticks(3.0, 700.0, 11, Some(3.0), Some(700.0));
        assert_eq!(ticks.first().map(|t| t.value), Some(3.0));
        assert_eq!(ticks.last().map(|t| t.value), Some(700.0));
    }

    #[test]
    fn covers_the_range() {
        let ticks = generate_log_ticks(0.03, 42.0, 11, None, None);
        assert!(ticks[0].value <= 0.03);
        assert!(ticks[ticks.len() - 1].value >= 42.0);
        assert!(ticks.windows(2).all(|w| w[0].value < w[1].value));
    }

    #[test]
    fn parse_rejects_negative_and_flags_zero() {
        let mut s = LogScale::default();
        assert_eq!(s.parse(&RawValue::Number(-5.0)), ParsedValue::Null);
        assert!(!s.includes_zero());
        assert_eq!(s.parse(&RawValue::Number(0.0)), ParsedValue::Zero);
        assert!(s.includes_zero());
        assert_eq!(s.parse(&RawValue::Number(3.0)), ParsedValue::Value(3.0));
        assert_eq!(s.parse(&RawValue::Number(f64::INFINITY)), ParsedValue::Null);
        s.begin_update();
        assert!(!s.includes_zero());
    }
}
