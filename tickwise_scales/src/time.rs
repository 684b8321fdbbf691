// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time scales.
//!
//! Calendar arithmetic is delegated to a [`DateAdapter`] supplied by the host. Timestamps are
//! milliseconds since the Unix epoch, as `f64`.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use log::warn;
use smallvec::SmallVec;
use tickwise_text::TextMeasurer;

use crate::data::{DataSource, ParsedValue, RawValue};
use crate::linear::MAX_TICKS;
use crate::math::{to_i32, to_usize, usize_to_f64};
use crate::options::{Bounds, TickSource};
use crate::scale::{ScaleCore, Tick};

/// Calendar units, finest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    /// Milliseconds.
    #[default]
    Millisecond,
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days.
    Day,
    /// Weeks.
    Week,
    /// Months.
    Month,
    /// Quarters.
    Quarter,
    /// Years.
    Year,
}

impl TimeUnit {
    /// Every unit, finest first.
    pub const ALL: [Self; 9] = [
        Self::Millisecond,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Approximate length in milliseconds, for capacity estimates.
    pub fn approx_millis(self) -> f64 {
        match self {
            Self::Millisecond => 1.0,
            Self::Second => 1_000.0,
            Self::Minute => 60_000.0,
            Self::Hour => 3_600_000.0,
            Self::Day => 86_400_000.0,
            Self::Week => 604_800_000.0,
            Self::Month => 2.628e9,
            Self::Quarter => 7.884e9,
            Self::Year => 3.154e10,
        }
    }

    /// Whether the unit is used for formatting and major ticks.
    ///
    /// Weeks and quarters do not nest evenly in the next unit, so they are only chosen as tick
    /// units.
    pub fn is_common(self) -> bool {
        !matches!(self, Self::Week | Self::Quarter)
    }

    /// Position in [`TimeUnit::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next coarser common unit.
    pub fn next_coarser(self) -> Option<Self> {
        Self::ALL[self.index() + 1..]
            .iter()
            .copied()
            .find(|unit| unit.is_common())
    }

    /// Lowercase unit name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Format patterns per unit, in the adapter's pattern language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayFormats {
    units: [String; 9],
    /// Pattern for full timestamps, used by tooltips.
    pub datetime: String,
}

impl DisplayFormats {
    /// Creates formats from one pattern per unit (finest first) and a full-timestamp pattern.
    pub fn new(units: [&str; 9], datetime: &str) -> Self {
        Self {
            units: units.map(String::from),
            datetime: datetime.into(),
        }
    }

    /// The pattern for `unit`.
    pub fn get(&self, unit: TimeUnit) -> &str {
        &self.units[unit.index()]
    }

    /// Replaces the pattern for `unit`.
    pub fn set(&mut self, unit: TimeUnit, pattern: impl Into<String>) {
        self.units[unit.index()] = pattern.into();
    }
}

/// Calendar arithmetic for time scales.
///
/// Implementations decide the time zone and week conventions. Every method works on epoch
/// milliseconds.
pub trait DateAdapter {
    /// Parses a timestamp string.
    fn parse(&self, input: &str) -> Option<f64>;

    /// Formats `timestamp` with `pattern`.
    fn format(&self, timestamp: f64, pattern: &str) -> String;

    /// Adds `amount` units. Month and year steps clamp the day of month.
    fn add(&self, timestamp: f64, amount: i32, unit: TimeUnit) -> f64;

    /// Whole units from `earlier` to `later`, truncated toward zero.
    fn diff(&self, later: f64, earlier: f64, unit: TimeUnit) -> f64;

    /// Start of the unit containing `timestamp`.
    ///
    /// For weeks, `iso_weekday` selects the first day (1 = Monday … 7 = Sunday).
    fn start_of(&self, timestamp: f64, unit: TimeUnit, iso_weekday: Option<u8>) -> f64;

    /// Last millisecond of the unit containing `timestamp`.
    fn end_of(&self, timestamp: f64, unit: TimeUnit) -> f64;

    /// Default display formats.
    fn formats(&self) -> DisplayFormats;

    /// The current time. Only used when a time scale has neither data nor bounds.
    fn now(&self) -> f64;
}

/// Picks the finest unit at or above `min_unit` whose step count over `[min, max]` fits
/// `capacity`.
pub fn determine_unit_for_auto_ticks(
    min_unit: TimeUnit,
    min: f64,
    max: f64,
    capacity: usize,
) -> TimeUnit {
    let capacity = usize_to_f64(capacity);
    TimeUnit::ALL[min_unit.index()..]
        .iter()
        .copied()
        .filter(|unit| *unit != TimeUnit::Year)
        .find(|unit| ((max - min) / unit.approx_millis()).ceil() <= capacity)
        .unwrap_or(TimeUnit::Year)
}

/// Picks the coarsest common unit that still tells `num_ticks` ticks over `[min, max]` apart.
pub fn determine_unit_for_formatting(
    adapter: &dyn DateAdapter,
    num_ticks: usize,
    min_unit: TimeUnit,
    min: f64,
    max: f64,
) -> TimeUnit {
    let needed = usize_to_f64(num_ticks.saturating_sub(1));
    TimeUnit::ALL[min_unit.index()..]
        .iter()
        .rev()
        .copied()
        .find(|unit| unit.is_common() && adapter.diff(max, min, *unit) >= needed)
        .unwrap_or(min_unit)
}

/// The unit of major ticks for a tick unit.
pub fn determine_major_unit(unit: TimeUnit) -> Option<TimeUnit> {
    unit.next_coarser()
}

/// Identifies the inputs a [`TimeSeriesCache`] was built from.
#[derive(Clone, Debug, PartialEq)]
struct CacheKey {
    data: SmallVec<[(u64, usize); 4]>,
    labels: u64,
    round: Option<TimeUnit>,
    iso_weekday: Option<u8>,
}

/// Sorted, deduplicated timestamps of the data and the labels.
#[derive(Clone, Debug, Default)]
struct TimeSeriesCache {
    key: Option<CacheKey>,
    data: Vec<f64>,
    labels: Vec<f64>,
    all: Vec<f64>,
}

impl TimeSeriesCache {
    fn new(key: CacheKey, mut data: Vec<f64>, mut labels: Vec<f64>) -> Self {
        normalize(&mut data);
        normalize(&mut labels);
        let mut all = data.clone();
        all.extend_from_slice(&labels);
        normalize(&mut all);
        Self {
            key: Some(key),
            data,
            labels,
            all,
        }
    }
}

fn normalize(values: &mut Vec<f64>) {
    values.sort_by(f64::total_cmp);
    values.dedup();
}

/// The sorted values in `[min, max]`.
fn filter_between(values: &[f64], min: f64, max: f64) -> &[f64] {
    let start = values.partition_point(|v| *v < min);
    let end = values.partition_point(|v| *v <= max).max(start);
    &values[start..end]
}

/// How timestamps are spread along the axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Distribution {
    /// Proportional to elapsed time.
    Linear,
    /// Consecutive data timestamps equally spaced.
    Series,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Offsets {
    start: f64,
    end: f64,
    factor: f64,
}

impl Default for Offsets {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            factor: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TableEntry {
    time: f64,
    pos: f64,
}

/// Interpolation table for series distribution.
///
/// An interior timestamp that sits exactly between its neighbours adds nothing, so evenly spaced
/// data collapses to its end points.
fn build_lookup_table(timestamps: &[f64], min: f64, max: f64) -> Vec<TableEntry> {
    let items = filter_between(timestamps, min, max);
    if items.len() < 2 {
        return alloc::vec![
            TableEntry { time: min, pos: 0.0 },
            TableEntry { time: max, pos: 1.0 },
        ];
    }
    let last = items.len() - 1;
    let mut table = Vec::new();
    for (i, curr) in items.iter().copied().enumerate() {
        let interior = i > 0 && i < last;
        if !interior || ((items[i - 1] + items[i + 1]) / 2.0).round() != curr {
            table.push(TableEntry {
                time: curr,
                pos: usize_to_f64(i) / usize_to_f64(last),
            });
        }
    }
    table
}

/// Piecewise-linear lookup; `reverse` maps positions back to times.
fn interpolate(table: &[TableEntry], value: f64, reverse: bool) -> f64 {
    let key = |e: &TableEntry| if reverse { e.pos } else { e.time };
    let target = |e: &TableEntry| if reverse { e.time } else { e.pos };
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return 0.0;
    };
    let (mut lo, mut hi) = (0, table.len() - 1);
    if value >= key(first) && value <= key(last) {
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if key(&table[mid]) < value {
                lo = mid;
            } else {
                hi = mid;
            }
        }
    }
    let (s0, t0) = (key(&table[lo]), target(&table[lo]));
    let (s1, t1) = (key(&table[hi]), target(&table[hi]));
    let span = s1 - s0;
    if span == 0.0 {
        t0
    } else {
        t0 + (t1 - t0) * (value - s0) / span
    }
}

/// Adds `time` to `ticks`, snapped up to the next data timestamp when `snap` is given.
fn add_tick(ticks: &mut Vec<f64>, time: f64, snap: Option<&[f64]>) {
    match snap {
        None => ticks.push(time),
        Some([]) => {}
        Some(timestamps) => {
            let i = timestamps.partition_point(|t| *t < time);
            ticks.push(timestamps[i.min(timestamps.len() - 1)]);
        }
    }
}

/// Time scale state.
#[derive(Clone)]
pub(crate) struct TimeScale {
    adapter: Arc<dyn DateAdapter>,
    distribution: Distribution,
    formats: DisplayFormats,
    cache: TimeSeriesCache,
    unit: TimeUnit,
    major_unit: Option<TimeUnit>,
    offsets: Offsets,
    table: Vec<TableEntry>,
    min_pos: f64,
    table_range: f64,
}

impl fmt::Debug for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeScale")
            .field("distribution", &self.distribution)
            .field("unit", &self.unit)
            .field("major_unit", &self.major_unit)
            .field("offsets", &self.offsets)
            .finish_non_exhaustive()
    }
}

impl TimeScale {
    pub(crate) fn new(adapter: Arc<dyn DateAdapter>, distribution: Distribution) -> Self {
        let formats = adapter.formats();
        Self {
            adapter,
            distribution,
            formats,
            cache: TimeSeriesCache::default(),
            unit: TimeUnit::Day,
            major_unit: None,
            offsets: Offsets::default(),
            table: Vec::new(),
            min_pos: 0.0,
            table_range: 1.0,
        }
    }

    pub(crate) fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub(crate) fn major_unit(&self) -> Option<TimeUnit> {
        self.major_unit
    }

    /// Numbers are epoch milliseconds; strings go through the adapter, falling back to numeric
    /// text. The `round` option snaps the result to the start of a unit.
    pub(crate) fn parse(&self, core: &ScaleCore, raw: &RawValue) -> ParsedValue {
        let value = match raw {
            RawValue::Null => None,
            RawValue::Number(v) => Some(*v),
            RawValue::Text(text) => self.adapter.parse(text).or_else(|| raw.as_number()),
        };
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return ParsedValue::Null;
        };
        let time = &core.options.time;
        let value = match time.round {
            Some(TimeUnit::Week) => self.adapter.start_of(value, TimeUnit::Week, time.iso_weekday),
            Some(unit) => self.adapter.start_of(value, unit, None),
            None => value,
        };
        ParsedValue::Value(value)
    }

    fn refresh_cache(&mut self, core: &ScaleCore, data: &[&dyn DataSource]) {
        let key = CacheKey {
            data: data
                .iter()
                .map(|source| (source.revision(), source.values().len()))
                .collect(),
            labels: core.labels_revision,
            round: core.options.time.round,
            iso_weekday: core.options.time.iso_weekday,
        };
        if self.cache.key.as_ref() == Some(&key) {
            return;
        }
        let data_ts = data
            .iter()
            .flat_map(|source| source.values())
            .filter_map(|raw| self.parse(core, raw).value())
            .collect();
        let label_ts = core
            .labels
            .iter()
            .filter_map(|label| self.parse(core, &RawValue::Text(label.clone())).value())
            .collect();
        self.cache = TimeSeriesCache::new(key, data_ts, label_ts);
    }

    pub(crate) fn determine_data_limits(&mut self, core: &mut ScaleCore, data: &[&dyn DataSource]) {
        self.refresh_cache(core, data);
        let options = &core.options;
        let unit = options.time.unit.unwrap_or(TimeUnit::Day);
        let min_defined = core.user_min.is_some();
        let max_defined = core.user_max.is_some();
        let mut min = core
            .user_min
            .or(options.suggested_min.filter(|v| v.is_finite()))
            .unwrap_or(f64::INFINITY);
        let mut max = core
            .user_max
            .or(options.suggested_max.filter(|v| v.is_finite()))
            .unwrap_or(f64::NEG_INFINITY);

        if !min_defined || !max_defined {
            let mut apply = |timestamps: &[f64]| {
                if let (Some(first), Some(last)) = (timestamps.first(), timestamps.last()) {
                    if !min_defined {
                        min = min.min(*first);
                    }
                    if !max_defined {
                        max = max.max(*last);
                    }
                }
            };
            apply(&self.cache.labels);
            if options.bounds != Bounds::Ticks || options.time.source != TickSource::Labels {
                apply(&self.cache.data);
            }
        }

        if !min.is_finite() || !max.is_finite() {
            let now = self.adapter.now();
            if !min.is_finite() {
                min = self.adapter.start_of(now, unit, None);
            }
            if !max.is_finite() {
                max = self.adapter.end_of(now, unit) + 1.0;
            }
        }
        core.min = min.min(max - 1.0);
        core.max = (min + 1.0).max(max);
    }

    /// How many example labels fit along the axis at the extreme rotation.
    fn label_capacity(
        &self,
        core: &mut ScaleCore,
        measurer: &dyn TextMeasurer,
        example: f64,
    ) -> usize {
        let unit = core.options.time.unit.unwrap_or(TimeUnit::Millisecond);
        let label = self.adapter.format(example, self.formats.get(unit));
        let width = core.measure_label(measurer, &label).width;
        let horizontal = core.is_horizontal();
        let angle = if horizontal {
            core.resolved.max_rotation
        } else {
            core.resolved.min_rotation
        }
        .to_radians();
        let (sin, cos) = (angle.sin().abs(), angle.cos().abs());
        let font_size = core.resolved.tick_font.font_size;
        let extent = if horizontal {
            width * cos + font_size * sin
        } else {
            width * sin + font_size * cos
        };
        if !(extent > 0.0) {
            return MAX_TICKS;
        }
        let capacity = (core.axis_length() / extent).floor() - 1.0;
        if capacity > 0.0 { to_usize(capacity) } else { 1 }
    }

    fn auto_unit(&self, core: &mut ScaleCore, measurer: &dyn TextMeasurer) -> TimeUnit {
        let (min, max) = (core.min, core.max);
        let capacity = self.label_capacity(core, measurer, min);
        determine_unit_for_auto_ticks(core.options.time.min_unit, min, max, capacity)
    }

    /// Unit-aligned timestamps from the start of the unit containing `min` up to `max`, with
    /// the unit they were stepped in.
    ///
    /// A unit too fine to cover the range within [`MAX_TICKS`] steps of `i32::MAX` units is
    /// replaced by the next coarser common unit.
    fn generate(&self, core: &mut ScaleCore, measurer: &dyn TextMeasurer) -> (Vec<f64>, TimeUnit) {
        let (min, max) = (core.min, core.max);
        if self.distribution == Distribution::Series {
            let mut timestamps = self.cache.data.clone();
            if timestamps.is_empty() || !timestamps.contains(&min) {
                timestamps.insert(0, min);
            }
            if !timestamps.contains(&max) || timestamps.len() == 1 {
                timestamps.push(max);
            }
            normalize(&mut timestamps);
            let unit = core.options.time.unit.unwrap_or(core.options.time.min_unit);
            return (timestamps, unit);
        }

        let requested = match core.options.time.unit {
            Some(unit) => unit,
            None => self.auto_unit(core, measurer),
        };
        let limit = usize_to_f64(MAX_TICKS - 1);
        let mut minor = requested;
        let mut span = self.adapter.diff(max, min, minor);
        while span / limit > f64::from(i32::MAX) {
            let Some(coarser) = minor.next_coarser() else {
                break;
            };
            minor = coarser;
            span = self.adapter.diff(max, min, minor);
        }
        if minor != requested {
            warn!("{requested} steps cannot span [{min}, {max}]; generating {minor} ticks instead");
        }
        let mut step = core
            .options
            .step_size()
            .map_or(1, |s| to_i32(s.round().max(1.0)));
        if span / f64::from(step) > limit {
            let widened = to_i32((span / limit).ceil());
            warn!("{span} {minor} steps exceed {MAX_TICKS} ticks; stepping by {widened} {minor}s");
            step = widened.max(step);
        }

        let weekday = if minor == TimeUnit::Week {
            core.options.time.iso_weekday
        } else {
            None
        };
        let first = match weekday {
            Some(day) => {
                let week = self.adapter.start_of(min, TimeUnit::Week, Some(day));
                self.adapter.start_of(week, TimeUnit::Day, None)
            }
            None => self.adapter.start_of(min, minor, None),
        };

        let snap = (core.options.time.source == TickSource::Data).then_some(&self.cache.data[..]);
        let mut ticks = Vec::new();
        let mut time = first;
        let mut count = 0_usize;
        while time < max && count < MAX_TICKS {
            add_tick(&mut ticks, time, snap);
            let next = self.adapter.add(time, step, minor);
            if !(next > time) {
                warn!("date adapter did not advance past {time} by {step} {minor}");
                break;
            }
            time = next;
            count += 1;
        }
        if time == max || core.options.bounds == Bounds::Ticks || count == 1 {
            add_tick(&mut ticks, time, snap);
        }
        normalize(&mut ticks);
        (ticks, minor)
    }

    pub(crate) fn build_ticks(
        &mut self,
        core: &mut ScaleCore,
        measurer: &dyn TextMeasurer,
    ) -> Vec<Tick> {
        let mut formats = self.adapter.formats();
        for (unit, pattern) in &core.options.time.display_formats {
            formats.set(*unit, pattern.clone());
        }
        self.formats = formats;

        let (timestamps, generated) = if core.options.time.source == TickSource::Labels {
            (self.cache.labels.clone(), None)
        } else {
            let (timestamps, unit) = self.generate(core, measurer);
            (timestamps, Some(unit))
        };
        // Tick bounds only ever widen the data range, even when generation was capped.
        if core.options.bounds == Bounds::Ticks
            && let (Some(first), Some(last)) = (timestamps.first(), timestamps.last())
        {
            core.min = core.user_min.unwrap_or(first.min(core.min));
            core.max = core.user_max.unwrap_or(last.max(core.max));
        }
        let (min, max) = (core.min, core.max);
        let mut values = filter_between(&timestamps, min, max).to_vec();
        if values.is_empty() {
            values.push(min);
        }

        let forced = core.options.time.unit;
        let min_unit = core.options.time.min_unit;
        self.unit = match forced {
            Some(unit) => generated.map_or(unit, |g| g.max(unit)),
            None if core.options.ticks.auto_skip => self.auto_unit(core, measurer),
            None => {
                determine_unit_for_formatting(&*self.adapter, values.len(), min_unit, min, max)
            }
        };
        self.major_unit = if core.options.ticks.major_enabled && self.unit != TimeUnit::Year {
            determine_major_unit(self.unit)
        } else {
            None
        };
        self.init_offsets(core, &timestamps);

        if core.options.reverse {
            values.reverse();
        }
        values
            .into_iter()
            .map(|v| Tick::with_major(v, self.is_major(v)))
            .collect()
    }

    fn is_major(&self, value: f64) -> bool {
        self.major_unit
            .is_some_and(|unit| self.adapter.start_of(value, unit, None) == value)
    }

    fn init_offsets(&mut self, core: &ScaleCore, timestamps: &[f64]) {
        if self.distribution == Distribution::Series {
            self.table = build_lookup_table(&self.cache.all, core.min, core.max);
            self.min_pos = interpolate(&self.table, core.min, false);
            self.table_range = interpolate(&self.table, core.max, false) - self.min_pos;
        }
        let timestamps = match self.distribution {
            Distribution::Series => &self.cache.all[..],
            Distribution::Linear => timestamps,
        };

        let (mut start, mut end) = (0.0, 0.0);
        let len = timestamps.len();
        if core.options.offset && len > 0 {
            let first = self.position(core, timestamps[0]);
            let last = self.position(core, timestamps[len - 1]);
            if len == 1 {
                start = 1.0 - first;
                end = last;
            } else {
                start = (self.position(core, timestamps[1]) - first) / 2.0;
                end = (last - self.position(core, timestamps[len - 2])) / 2.0;
            }
        }
        let limit = if len < 3 { 0.5 } else { 0.25 };
        let start = start.clamp(0.0, limit);
        let end = end.clamp(0.0, limit);
        self.offsets = Offsets {
            start,
            end,
            factor: 1.0 / (start + 1.0 + end),
        };
    }

    /// Fraction of `[min, max]` before offsets.
    fn position(&self, core: &ScaleCore, value: f64) -> f64 {
        match self.distribution {
            Distribution::Linear => (value - core.min) / (core.max - core.min),
            Distribution::Series if self.table_range == 0.0 => 0.0,
            Distribution::Series => {
                (interpolate(&self.table, value, false) - self.min_pos) / self.table_range
            }
        }
    }

    pub(crate) fn generate_tick_labels(&self, ticks: &mut [Tick]) {
        let minor = self.formats.get(self.unit);
        let major = self.major_unit.map(|unit| self.formats.get(unit));
        for tick in ticks {
            let pattern = match major {
                Some(pattern) if tick.major => pattern,
                _ => minor,
            };
            tick.label = self.adapter.format(tick.value, pattern);
        }
    }

    pub(crate) fn configure(&mut self, core: &mut ScaleCore) {
        core.start_value = core.min;
        core.value_range = core.max - core.min;
    }

    pub(crate) fn decimal_for_value(&self, core: &ScaleCore, value: f64) -> Option<f64> {
        let pos = self.position(core, value);
        Some((self.offsets.start + pos) * self.offsets.factor)
    }

    pub(crate) fn value_for_decimal(&self, core: &ScaleCore, decimal: f64) -> Option<f64> {
        let pos = decimal / self.offsets.factor - self.offsets.start;
        Some(match self.distribution {
            Distribution::Linear => core.min + pos * (core.max - core.min),
            Distribution::Series => {
                interpolate(&self.table, pos * self.table_range + self.min_pos, true)
            }
        })
    }

    pub(crate) fn label_for_value(&self, core: &ScaleCore, value: f64) -> String {
        let pattern = core
            .options
            .time
            .tooltip_format
            .as_deref()
            .unwrap_or(&self.formats.datetime);
        self.adapter.format(value, pattern)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::data::Dataset;
    use crate::factory::{ScaleKind, create_scale, default_options};
    use crate::options::{Position, TickOptions, TimeOptions};
    use crate::scale::UpdateContext;
    use alloc::format;
    use alloc::vec;
    use float_cmp::assert_approx_eq;
    use kurbo::Insets;
    use tickwise_text::HeuristicTextMeasurer;

    const DAY: f64 = 86_400_000.0;

    /// Every unit has a fixed length; months are 30 days.
    #[derive(Debug)]
    struct FixedAdapter;

    fn size(unit: TimeUnit) -> f64 {
        match unit {
            TimeUnit::Month => 30.0 * DAY,
            TimeUnit::Quarter => 90.0 * DAY,
            TimeUnit::Year => 360.0 * DAY,
            unit => unit.approx_millis(),
        }
    }

    impl DateAdapter for FixedAdapter {
        fn parse(&self, input: &str) -> Option<f64> {
            let days = input.strip_prefix("day ")?.parse::<f64>().ok()?;
            Some(days * DAY)
        }

        fn format(&self, timestamp: f64, pattern: &str) -> String {
            format!("{pattern} {timestamp}")
        }

        fn add(&self, timestamp: f64, amount: i32, unit: TimeUnit) -> f64 {
            timestamp + f64::from(amount) * size(unit)
        }

        fn diff(&self, later: f64, earlier: f64, unit: TimeUnit) -> f64 {
            ((later - earlier) / size(unit)).trunc()
        }

        fn start_of(&self, timestamp: f64, unit: TimeUnit, _iso_weekday: Option<u8>) -> f64 {
            (timestamp / size(unit)).floor() * size(unit)
        }

        fn end_of(&self, timestamp: f64, unit: TimeUnit) -> f64 {
            self.start_of(timestamp, unit, None) + size(unit) - 1.0
        }

        fn formats(&self) -> DisplayFormats {
            DisplayFormats::new(
                ["ms", "s", "min", "h", "d", "w", "mon", "q", "y"],
                "datetime",
            )
        }

        fn now(&self) -> f64 {
            0.0
        }
    }

    fn time_scale(kind: ScaleKind, time: TimeOptions, data: &Dataset, width: f64) -> crate::Scale {
        let options = default_options(kind)
            .with_position(Position::Bottom)
            .with_time(time);
        let mut scale = create_scale(kind, options, Some(Arc::new(FixedAdapter))).unwrap();
        let sources: [&dyn DataSource; 1] = [data];
        scale.update(
            width,
            100.0,
            Insets::ZERO,
            &UpdateContext::new(&sources, &HeuristicTextMeasurer),
        );
        scale
    }

    #[test]
    fn auto_unit_is_the_finest_that_fits() {
        assert_eq!(
            determine_unit_for_auto_ticks(TimeUnit::Millisecond, 0.0, 40.0 * DAY, 8),
            TimeUnit::Week
        );
        assert_eq!(
            determine_unit_for_auto_ticks(TimeUnit::Millisecond, 0.0, 40.0 * DAY, 50),
            TimeUnit::Day
        );
        assert_eq!(
            determine_unit_for_auto_ticks(TimeUnit::Month, 0.0, 40.0 * DAY, 50),
            TimeUnit::Month
        );
        assert_eq!(
            determine_unit_for_auto_ticks(TimeUnit::Millisecond, 0.0, 1e15, 3),
            TimeUnit::Year
        );
    }

    #[test]
    fn formatting_unit_distinguishes_ticks() {
        let ms = TimeUnit::Millisecond;
        let unit = determine_unit_for_formatting(&FixedAdapter, 11, ms, 0.0, 10.0 * DAY);
        assert_eq!(unit, TimeUnit::Day);
        let unit = determine_unit_for_formatting(&FixedAdapter, 3, ms, 0.0, 90.0 * DAY);
        assert_eq!(unit, TimeUnit::Month);
    }

    #[test]
    fn major_unit_skips_uncommon_units() {
        assert_eq!(determine_major_unit(TimeUnit::Day), Some(TimeUnit::Month));
        assert_eq!(determine_major_unit(TimeUnit::Month), Some(TimeUnit::Year));
        assert_eq!(determine_major_unit(TimeUnit::Year), None);
    }

    #[test]
    fn lookup_table_drops_evenly_spaced_points() {
        let table = build_lookup_table(&[0.0, 10.0, 20.0, 30.0], 0.0, 30.0);
        assert_eq!(table.len(), 2);
        let table = build_lookup_table(&[0.0, 1.0, 20.0, 30.0], 0.0, 30.0);
        assert_eq!(table.len(), 4);
        assert_approx_eq!(f64, interpolate(&table, 1.0, false), 1.0 / 3.0);
        assert_approx_eq!(f64, interpolate(&table, 2.0 / 3.0, true), 20.0);
    }

    #[test]
    fn forced_unit_generates_aligned_ticks() {
        let data = Dataset::from_numbers([0.0, 10.0 * DAY]);
        let scale = time_scale(
            ScaleKind::Time,
            TimeOptions::default().with_unit(TimeUnit::Day),
            &data,
            2000.0,
        );
        let values: Vec<f64> = scale.ticks().iter().map(|t| t.value).collect();
        let expected: Vec<f64> = (0..=10).map(|d| f64::from(d) * DAY).collect();
        assert_eq!(values, expected);
        assert_eq!(scale.ticks()[1].label, format!("d {DAY}"));
        assert_eq!(scale.time_unit(), Some(TimeUnit::Day));
    }

    fn long_span_scale(bounds: Bounds) -> crate::Scale {
        let options = default_options(ScaleKind::Time)
            .with_position(Position::Bottom)
            .with_bounds(bounds)
            .with_ticks(TickOptions::default().with_auto_skip(false))
            .with_time(TimeOptions::default().with_unit(TimeUnit::Millisecond));
        let mut scale =
            create_scale(ScaleKind::Time, options, Some(Arc::new(FixedAdapter))).unwrap();
        let data = Dataset::from_numbers([0.0, 1e14]);
        let sources: [&dyn DataSource; 1] = [&data];
        scale.update(
            800.0,
            100.0,
            Insets::ZERO,
            &UpdateContext::new(&sources, &HeuristicTextMeasurer),
        );
        scale
    }

    #[test]
    fn fine_forced_unit_over_long_span_steps_coarser() {
        let scale = long_span_scale(Bounds::Ticks);
        assert_eq!(scale.time_unit(), Some(TimeUnit::Second));
        let (min, max) = scale.domain();
        assert!(min <= 0.0);
        assert!(max >= 1e14);
        assert!(scale.ticks().last().unwrap().value >= 1e14);
        assert!(scale.ticks().len() <= MAX_TICKS);
    }

    #[test]
    fn data_bounds_ticks_reach_the_end_of_a_long_span() {
        let scale = long_span_scale(Bounds::Data);
        assert_eq!(scale.domain(), (0.0, 1e14));
        let last = scale.ticks().last().unwrap().value;
        assert!(last > 0.99e14 && last <= 1e14);
    }

    #[test]
    fn pixels_round_trip() {
        let data = Dataset::from_numbers([0.0, 10.0 * DAY]);
        let scale = time_scale(ScaleKind::Time, TimeOptions::default(), &data, 500.0);
        for v in [0.0, 2.5 * DAY, 10.0 * DAY] {
            let p = scale.pixel_for_value(v).unwrap();
            assert_approx_eq!(f64, scale.value_for_pixel(p).unwrap(), v, epsilon = 1e-3);
        }
    }

    #[test]
    fn series_distribution_spaces_data_evenly() {
        let data = Dataset::from_numbers([0.0, DAY, 10.0 * DAY]);
        let scale = time_scale(ScaleKind::TimeSeries, TimeOptions::default(), &data, 400.0);
        let a = scale.pixel_for_value(0.0).unwrap();
        let b = scale.pixel_for_value(DAY).unwrap();
        let c = scale.pixel_for_value(10.0 * DAY).unwrap();
        assert_approx_eq!(f64, b - a, c - b, epsilon = 1e-9);
        let back = scale.value_for_pixel(b).unwrap();
        assert_approx_eq!(f64, back, DAY, epsilon = 1e-3);
    }

    #[test]
    fn parse_reads_text_and_rounds() {
        let data = Dataset::new([RawValue::from("day 3"), RawValue::from("junk")]);
        let mut scale = time_scale(
            ScaleKind::Time,
            TimeOptions::default().with_round(TimeUnit::Week),
            &data,
            400.0,
        );
        assert_eq!(scale.parse(&RawValue::from("day 3")), ParsedValue::Value(0.0));
        assert_eq!(scale.parse(&RawValue::from("junk")), ParsedValue::Null);
        assert_eq!(scale.parse(&RawValue::Null), ParsedValue::Null);
    }

    #[test]
    fn label_ticks_come_from_labels() {
        let data = Dataset::from_numbers([]);
        let options = default_options(ScaleKind::Time)
            .with_position(Position::Bottom)
            .with_time(TimeOptions::default().with_source(TickSource::Labels));
        let mut scale =
            create_scale(ScaleKind::Time, options, Some(Arc::new(FixedAdapter))).unwrap();
        scale.set_labels(["day 1", "day 4", "day 2"]);
        let sources: [&dyn DataSource; 1] = [&data];
        scale.update(
            400.0,
            100.0,
            Insets::ZERO,
            &UpdateContext::new(&sources, &HeuristicTextMeasurer),
        );
        let values: Vec<f64> = scale.ticks().iter().map(|t| t.value).collect();
        assert_eq!(values, vec![DAY, 2.0 * DAY, 4.0 * DAY]);
        assert_eq!(scale.domain(), (DAY, 4.0 * DAY));
    }

    #[test]
    fn empty_time_scale_spans_the_current_unit() {
        let data = Dataset::from_numbers([]);
        let scale = time_scale(ScaleKind::Time, TimeOptions::default(), &data, 400.0);
        let (min, max) = scale.domain();
        assert_eq!(min, 0.0);
        assert_eq!(max, DAY);
    }

    #[test]
    fn tooltip_format_wins() {
        let data = Dataset::from_numbers([0.0, DAY]);
        let scale = time_scale(
            ScaleKind::Time,
            TimeOptions::default().with_tooltip_format("tip"),
            &data,
            400.0,
        );
        assert_eq!(scale.label_for_value(5.0), "tip 5");
    }
}
