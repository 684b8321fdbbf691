// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric helpers shared by the tick generators.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::TAU;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Returns the smallest "nice" number `f × 10^e` that is at least `range`, with `f` in
/// `{1, 2, 5, 10}`.
///
/// A range that is within `range / 1000` of an integer is snapped to that integer first, so
/// float noise such as `19.999999` does not push the result up to the next nice value.
/// Non-positive or non-finite inputs return `0.0`.
pub fn nice_num(range: f64) -> f64 {
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }
    let rounded = range.round();
    let range = if almost_equals(range, rounded, range / 1000.0) {
        rounded
    } else {
        range
    };
    if range <= 0.0 {
        return 0.0;
    }
    let magnitude = 10_f64.powi(to_i32(log10(range).floor()));
    let fraction = range / magnitude;
    let nice_fraction = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice_fraction * magnitude
}

/// Base-10 logarithm that returns exact integers for powers of ten.
///
/// `log10(1000.0)` is `3.0` rather than `2.9999999999999996`.
pub fn log10(x: f64) -> f64 {
    let power = x.log10();
    if !power.is_finite() {
        return power;
    }
    let rounded = power.round();
    if 10_f64.powi(to_i32(rounded)) == x {
        rounded
    } else {
        power
    }
}

/// Returns `true` when `x` and `y` differ by less than `epsilon`.
pub fn almost_equals(x: f64, y: f64, epsilon: f64) -> bool {
    (x - y).abs() < epsilon
}

/// Returns `true` when `x` is within `epsilon` of an integer.
pub fn almost_whole(x: f64, epsilon: f64) -> bool {
    let rounded = x.round();
    rounded - epsilon <= x && rounded + epsilon >= x
}

/// Number of decimal places needed to write `x` exactly (capped at 20).
pub fn decimal_places(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    let mut e = 1.0;
    let mut places = 0;
    while (x * e).round() / e != x && places < 20 {
        e *= 10.0;
        places += 1;
    }
    places
}

/// Returns `value` when it is finite, otherwise `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Normalizes an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = ((angle % TAU) + TAU) % TAU;
    // `-tiny % TAU + TAU` rounds to exactly TAU.
    if a >= TAU { 0.0 } else { a }
}

/// All factors of `value` in ascending order, excluding `value` itself.
pub fn factorize(value: usize) -> Vec<usize> {
    let mut result = Vec::new();
    let mut i = 1;
    while i * i <= value {
        if value % i == 0 {
            result.push(i);
            if i * i != value {
                result.push(value / i);
            }
        }
        i += 1;
    }
    result.sort_unstable();
    result.pop();
    result
}

/// Clamps `value` into `[min, max]`; `min` wins if the range is inverted.
pub fn limit_value(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Clamps a pixel coordinate into the signed 16-bit range.
///
/// Canvas backends misbehave with coordinates far outside this range.
pub fn int16_range(value: f64) -> f64 {
    limit_value(value, -32768.0, 32767.0)
}

/// `10^(floor(log10(value)) + delta)`.
pub(crate) fn change_exponent(value: f64, delta: i32) -> f64 {
    10_f64.powi(to_i32(log10(value).floor()).saturating_add(delta))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is rounded and clamped to the i32 range first"
)]
pub(crate) fn to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is rounded and clamped to the u32 range first"
)]
pub(crate) fn to_usize(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as usize
}

#[allow(
    clippy::cast_precision_loss,
    reason = "tick and label counts stay far below 2^52"
)]
pub(crate) fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn nice_num_picks_one_two_five() {
        assert_eq!(nice_num(20.0), 20.0);
        assert_eq!(nice_num(21.0), 50.0);
        assert_eq!(nice_num(0.3), 0.5);
        assert_eq!(nice_num(7.0), 10.0);
        assert_eq!(nice_num(1.0), 1.0);
        assert_eq!(nice_num(0.0), 0.0);
        assert_eq!(nice_num(f64::NAN), 0.0);
    }

    #[test]
    fn nice_num_snaps_near_integers() {
        assert_eq!(nice_num(19.999_999), 20.0);
    }

    #[test]
    fn nice_num_is_at_least_range_with_nice_significand() {
        let mut range = 0.0013;
        while range < 1.0e9 {
            let nice = nice_num(range);
            assert!(nice >= range * (1.0 - 1e-3), "{nice} < {range}");
            let magnitude = 10_f64.powi(to_i32(log10(nice).floor()));
            let significand = nice / magnitude;
            assert!(
                [1.0, 2.0, 5.0, 10.0]
                    .iter()
                    .any(|s| (s - significand).abs() < 1e-9),
                "{nice} has significand {significand}"
            );
            range *= 1.37;
        }
    }

    #[test]
    fn log10_is_exact_for_powers_of_ten() {
        assert_eq!(log10(1000.0), 3.0);
        assert_eq!(log10(1.0e-3), -3.0);
        assert_approx_eq!(f64, log10(2.0), 0.301_029_995_663_981_2, epsilon = 1e-12);
    }

    #[test]
    fn decimal_places_counts_fraction_digits() {
        assert_eq!(decimal_places(1.0), 0);
        assert_eq!(decimal_places(0.25), 2);
        assert_eq!(decimal_places(12.5), 1);
    }

    #[test]
    fn normalize_angle_wraps_both_directions() {
        let pi = core::f64::consts::PI;
        assert_approx_eq!(f64, normalize_angle(-core::f64::consts::FRAC_PI_2), 1.5 * pi);
        assert_approx_eq!(f64, normalize_angle(3.0 * core::f64::consts::PI), core::f64::consts::PI);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-20) < TAU);
    }

    #[test]
    fn factorize_excludes_value_itself() {
        assert_eq!(factorize(12), alloc::vec![1, 2, 3, 4, 6]);
        assert_eq!(factorize(9), alloc::vec![1, 3]);
        assert_eq!(factorize(7), alloc::vec![1]);
    }

    #[test]
    fn int16_range_clamps() {
        assert_eq!(int16_range(1.0e9), 32767.0);
        assert_eq!(int16_range(-1.0e9), -32768.0);
        assert_eq!(int16_range(12.5), 12.5);
    }

    #[test]
    fn almost_whole_tolerates_noise() {
        assert!(almost_whole(2.000_000_1, 1e-6));
        assert!(!almost_whole(2.1, 1e-6));
    }
}
