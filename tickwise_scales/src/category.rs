// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category scales.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;

use crate::data::{DataSource, ParsedValue, RawValue};
use crate::format::format_tick_with_step;
use crate::math::{to_usize, usize_to_f64};
use crate::options::Bounds;
use crate::scale::{ScaleCore, Tick, min_max};

/// Insertion-ordered category labels with a reverse index.
///
/// Labels set by the host come first. Parsing an unseen string appends it; appended labels are
/// kept until the host labels are replaced.
#[derive(Clone, Debug, Default)]
pub struct CategoryIndexMap {
    labels: Vec<Arc<str>>,
    index: HashMap<Arc<str>, usize>,
    host_len: usize,
}

impl CategoryIndexMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map whose host labels are `labels`.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let labels: Vec<Arc<str>> = labels.into_iter().map(Into::into).collect();
        let mut map = Self::new();
        map.reset(&labels);
        map
    }

    /// Number of categories, host and appended.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when there are no categories.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The label at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|l| &**l)
    }

    /// The first index of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// All labels in index order.
    pub fn labels(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// Labels appended by parsing, after the host labels.
    pub fn appended(&self) -> &[Arc<str>] {
        &self.labels[self.host_len..]
    }

    /// Returns the index of `label`, appending it when unseen.
    pub fn insert(&mut self, label: &str) -> usize {
        if let Some(i) = self.index_of(label) {
            return i;
        }
        let label: Arc<str> = label.into();
        let i = self.labels.len();
        self.labels.push(label.clone());
        self.index.insert(label, i);
        i
    }

    /// Maps a raw value to a category index.
    ///
    /// Strings map to their first index (appended when unseen), finite numbers are rounded and
    /// clamped to the existing indices, anything else is `None`.
    pub fn parse(&mut self, raw: &RawValue) -> Option<usize> {
        match raw {
            RawValue::Null => None,
            RawValue::Text(label) => Some(self.insert(label)),
            RawValue::Number(v) if v.is_finite() && !self.labels.is_empty() => {
                let last = usize_to_f64(self.labels.len() - 1);
                Some(to_usize(v.round().clamp(0.0, last)))
            }
            RawValue::Number(_) => None,
        }
    }

    /// Replaces the host labels and drops appended ones.
    pub(crate) fn reset(&mut self, labels: &[Arc<str>]) {
        self.labels.clear();
        self.index.clear();
        for label in labels {
            let i = self.labels.len();
            self.labels.push(label.clone());
            self.index.entry(label.clone()).or_insert(i);
        }
        self.host_len = self.labels.len();
    }
}

/// Category scale state.
#[derive(Clone, Debug, Default)]
pub(crate) struct CategoryScale {
    map: CategoryIndexMap,
    labels_revision: Option<u64>,
}

impl CategoryScale {
    pub(crate) fn map(&self) -> &CategoryIndexMap {
        &self.map
    }

    /// Adopts new host labels when they changed since the last update.
    pub(crate) fn sync_labels(&mut self, core: &ScaleCore) {
        if self.labels_revision != Some(core.labels_revision) {
            self.map.reset(&core.labels);
            self.labels_revision = Some(core.labels_revision);
        }
    }

    pub(crate) fn parse(&mut self, raw: &RawValue) -> ParsedValue {
        self.map
            .parse(raw)
            .map_or(ParsedValue::Null, |i| ParsedValue::Value(usize_to_f64(i)))
    }

    pub(crate) fn determine_data_limits(&mut self, core: &mut ScaleCore, data: &[&dyn DataSource]) {
        let extent = min_max(core, data, true, |raw| self.parse(raw));
        let mut min = extent.min;
        let mut max = extent.max;
        if core.options.bounds == Bounds::Ticks {
            if core.user_min.is_none() {
                min = 0.0;
            }
            if core.user_max.is_none() {
                max = usize_to_f64(self.map.len()) - 1.0;
            }
        }
        if !min.is_finite() {
            min = 0.0;
        }
        if !max.is_finite() || max < min {
            max = min;
        }
        core.min = min;
        core.max = max;
    }

    pub(crate) fn build_ticks(&mut self, core: &mut ScaleCore) -> Vec<Tick> {
        let min = core.min.round();
        let max = core.max.round().max(min);
        let offset = core.options.offset;
        let count = max - min + 1.0;
        core.value_range = (count - if offset { 0.0 } else { 1.0 }).max(1.0);
        core.start_value = min - if offset { 0.5 } else { 0.0 };

        let n = to_usize(count);
        let mut ticks: Vec<Tick> = (0..n).map(|i| Tick::new(min + usize_to_f64(i))).collect();
        if core.options.reverse {
            ticks.reverse();
        }
        ticks
    }

    pub(crate) fn generate_tick_labels(&self, ticks: &mut [Tick]) {
        for tick in ticks {
            tick.label = self.label_for_value(tick.value);
        }
    }

    /// Vertical category axes run top to bottom.
    pub(crate) fn configure(&mut self, core: &mut ScaleCore) {
        if !core.is_horizontal() {
            core.reverse_pixels = !core.reverse_pixels;
        }
    }

    pub(crate) fn value_for_decimal(&self, core: &ScaleCore, decimal: f64) -> Option<f64> {
        Some((core.start_value + decimal * core.value_range).round())
    }

    pub(crate) fn label_for_value(&self, value: f64) -> String {
        if value >= 0.0
            && let Some(label) = self.map.get(to_usize(value))
            && value == value.round()
        {
            return label.to_string();
        }
        format_tick_with_step(value, 1.0)
    }
}
