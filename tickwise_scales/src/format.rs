// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick formatting helpers.

extern crate alloc;

use alloc::string::String;
use alloc::string::ToString;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::math::{log10, to_i32};
use crate::options::NumberFormat;

/// Magnitudes below this (other than zero) are written in scientific notation.
const SCIENTIFIC_BELOW: f64 = 1e-4;
/// Magnitudes above this are written in scientific notation.
const SCIENTIFIC_ABOVE: f64 = 1e15;

/// Formats a numeric tick so that all ticks of one axis share the same precision.
///
/// `step` is the distance to the neighbouring tick; `magnitude` is the largest absolute tick
/// value on the axis and decides between fixed and scientific notation.
pub(crate) fn format_numeric(v: f64, step: f64, magnitude: f64, format: NumberFormat) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    match format {
        NumberFormat::Fixed(decimals) => format_fixed(v, usize::from(decimals)),
        NumberFormat::Scientific => format_scientific(v),
        NumberFormat::Auto => {
            let magnitude = magnitude.abs();
            if magnitude != 0.0 && (magnitude < SCIENTIFIC_BELOW || magnitude > SCIENTIFIC_ABOVE)
            {
                format_scientific(v)
            } else {
                format_tick_with_step(v, step)
            }
        }
    }
}

pub(crate) fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    format_fixed(v, decimals_for_step(step))
}

/// Formats a logarithmic tick.
///
/// Only ticks whose significand is 1, 2, 3 or 5 get a label; the rest stay as unlabeled minor
/// ticks so that dense decades remain readable.
pub(crate) fn format_log(v: f64, format: NumberFormat) -> String {
    if v == 0.0 {
        return "0".into();
    }
    if !v.is_finite() || v < 0.0 {
        return String::new();
    }
    let significand = v / 10_f64.powi(to_i32(log10(v).floor()));
    let significand = (significand * 1e6).round() / 1e6;
    if ![1.0, 2.0, 3.0, 5.0].contains(&significand) {
        return String::new();
    }
    format_log_value(v, format)
}

/// Formats a positive value from a logarithmic domain without the significand filter.
pub(crate) fn format_log_value(v: f64, format: NumberFormat) -> String {
    match format {
        NumberFormat::Auto if v < SCIENTIFIC_BELOW || v > SCIENTIFIC_ABOVE => format_scientific(v),
        NumberFormat::Auto => {
            let exponent = to_i32(log10(v).floor());
            let decimals = usize::try_from(-exponent).unwrap_or(0);
            format_fixed(v, decimals)
        }
        other => format_numeric(v, v, v, other),
    }
}

fn format_scientific(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    alloc::format!("{v:e}")
}

fn format_fixed(v: f64, decimals: usize) -> String {
    let v = round_to_decimals(v, decimals);
    let v = if v == 0.0 { 0.0 } else { v }; // normalize `-0.0`

    if decimals == 0 {
        alloc::format!("{v:.0}")
    } else {
        alloc::format!("{v:.decimals$}")
    }
}

fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }

    // Smallest precision that makes `step * 10^d` integral, robust to the usual float noise
    // in steps like 0.1 or 0.25.
    for decimals in 0..=10 {
        let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
        let scaled = step * factor;
        if is_approx_integer(scaled) {
            return decimals;
        }
    }

    10
}

fn is_approx_integer(x: f64) -> bool {
    if !x.is_finite() {
        return false;
    }
    let nearest = x.round();
    let err = (x - nearest).abs();
    err <= 1e-9 * x.abs().max(1.0)
}

fn round_to_decimals(x: f64, decimals: usize) -> f64 {
    if decimals == 0 {
        return x.round();
    }
    let factor = 10_f64.powi(i32::try_from(decimals.min(12)).unwrap_or(i32::MAX));
    if !factor.is_finite() || factor == 0.0 {
        return x;
    }
    (x * factor).round() / factor
}
