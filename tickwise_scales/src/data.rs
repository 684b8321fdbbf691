// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data a scale reads its extent from.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// An unparsed value as supplied by the host.
///
/// Each scale kind decides how to interpret it: linear scales accept numbers and numeric
/// strings, category scales accept label strings, time scales accept timestamps and date strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RawValue {
    /// Missing value.
    #[default]
    Null,
    /// A number.
    Number(f64),
    /// A string.
    Text(Arc<str>),
}

impl RawValue {
    /// Returns the value as a finite number if it is one, or a string that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            Self::Null => return None,
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<Arc<str>> for RawValue {
    fn from(s: Arc<str>) -> Self {
        Self::Text(s)
    }
}

/// The result of parsing a [`RawValue`] through a scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParsedValue {
    /// A usable position in the scale's value space.
    Value(f64),
    /// Exactly zero in a logarithmic domain: not plottable, but it pulls the minimum down.
    Zero,
    /// Not representable on this scale.
    Null,
}

impl ParsedValue {
    /// Returns the plottable value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Zero | Self::Null => None,
        }
    }

    /// Returns `true` for [`ParsedValue::Null`].
    pub fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }
}

/// A running minimum and maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    /// Smallest value seen, `+∞` when empty.
    pub min: f64,
    /// Largest value seen, `-∞` when empty.
    pub max: f64,
}

impl MinMax {
    /// An extent that contains nothing.
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Creates an extent from explicit bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Extends the extent to include `v`; non-finite values are ignored.
    pub fn include(&mut self, v: f64) {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// Extends the extent to include `other`.
    pub fn merge(&mut self, other: Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns `true` when nothing has been included.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl Default for MinMax {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<f64> for MinMax {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut mm = Self::EMPTY;
        for v in iter {
            mm.include(v);
        }
        mm
    }
}

/// A series of values a scale can compute its extent from.
pub trait DataSource {
    /// The raw values, in data order.
    fn values(&self) -> &[RawValue];

    /// The extent of the series after stacking, when the host stacks it.
    ///
    /// Stacking itself is the host's concern; scales with `stacked` enabled use this instead of
    /// the raw values.
    fn stacked_min_max(&self) -> Option<MinMax> {
        None
    }

    /// A counter that changes whenever `values` changes.
    ///
    /// Scales cache derived data (such as sorted timestamps) keyed by this revision.
    fn revision(&self) -> u64 {
        0
    }
}

/// A `Vec`-backed [`DataSource`] that bumps its revision on every mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    values: Vec<RawValue>,
    stacked: Option<MinMax>,
    revision: u64,
}

impl Dataset {
    /// Creates a dataset from raw values.
    pub fn new(values: impl IntoIterator<Item = RawValue>) -> Self {
        Self {
            values: values.into_iter().collect(),
            stacked: None,
            revision: 1,
        }
    }

    /// Creates a dataset of plain numbers.
    pub fn from_numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(values.into_iter().map(RawValue::Number))
    }

    /// Creates a dataset of strings (category labels or date strings).
    pub fn from_texts<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(values.into_iter().map(RawValue::from))
    }

    /// Sets the stacked extent reported by [`DataSource::stacked_min_max`].
    #[must_use]
    pub fn with_stacked_extent(mut self, extent: MinMax) -> Self {
        self.stacked = Some(extent);
        self
    }

    /// Appends a value.
    pub fn push(&mut self, value: impl Into<RawValue>) {
        self.values.push(value.into());
        self.revision = self.revision.wrapping_add(1);
    }

    /// Replaces all values.
    pub fn set_values(&mut self, values: impl IntoIterator<Item = RawValue>) {
        self.values = values.into_iter().collect();
        self.revision = self.revision.wrapping_add(1);
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the dataset has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DataSource for Dataset {
    fn values(&self) -> &[RawValue] {
        &self.values
    }

    fn stacked_min_max(&self) -> Option<MinMax> {
        self.stacked
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(RawValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(RawValue::from("abc").as_number(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_number(), None);
        assert_eq!(RawValue::Null.as_number(), None);
    }

    #[test]
    fn min_max_ignores_non_finite() {
        let mm: MinMax = [3.0, f64::NAN, -1.0, f64::INFINITY].into_iter().collect();
        assert_eq!(mm, MinMax::new(-1.0, 3.0));
        assert!(MinMax::EMPTY.is_empty());
    }

    #[test]
    fn mutation_bumps_revision() {
        let mut ds = Dataset::from_numbers([1.0, 2.0]);
        let before = ds.revision();
        ds.push(3.0);
        assert_ne!(ds.revision(), before);
        assert_eq!(ds.len(), 3);
    }
}
