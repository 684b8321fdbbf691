// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

/// Errors reported at configuration seams.
///
/// Scales never fail while mapping or laying out: conflicting options are corrected silently
/// (and logged). These errors surface the same conflicts to hosts that ask for them through
/// [`ScaleOptions::validate`](crate::ScaleOptions::validate) or the factory.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScaleError {
    /// A scale id string did not match any registered kind.
    #[error("unknown scale kind `{0}`")]
    UnknownKind(String),
    /// Time scales need a date adapter to parse and step through calendar units.
    #[error("scale kind `{0}` requires a date adapter")]
    MissingDateAdapter(&'static str),
    /// Explicit `min` is greater than explicit `max`.
    #[error("explicit min {min} is greater than explicit max {max}")]
    InvertedBounds {
        /// Explicit minimum.
        min: f64,
        /// Explicit maximum.
        max: f64,
    },
    /// A configured tick step is zero, negative or not finite.
    #[error("tick step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),
    /// A configured tick count cannot produce a range.
    #[error("tick count must be at least 2, got {0}")]
    InvalidTickCount(usize),
    /// `min_rotation` exceeds `max_rotation`.
    #[error("min rotation {min}° exceeds max rotation {max}°")]
    InvertedRotation {
        /// Configured minimum rotation in degrees.
        min: f64,
        /// Configured maximum rotation in degrees.
        max: f64,
    },
    /// `begin_at_zero` has no effect because an explicit bound excludes zero.
    #[error("begin_at_zero is ignored: explicit {side} {value} excludes zero")]
    BeginAtZeroOverridden {
        /// `"min"` or `"max"`.
        side: &'static str,
        /// The explicit bound.
        value: f64,
    },
}
