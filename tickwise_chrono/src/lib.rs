// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`DateAdapter`] backed by `chrono`.
//!
//! [`ChronoAdapter`] works in UTC or in a fixed offset from it. Display formats are `strftime`
//! patterns, extended with `%q` for the quarter of the year (1 to 4).
//!
//! ```
//! use std::sync::Arc;
//! use tickwise_chrono::ChronoAdapter;
//! use tickwise_scales::{DateAdapter, ScaleKind, create_scale, default_options};
//!
//! let adapter = ChronoAdapter::utc();
//! assert_eq!(adapter.parse("1970-01-02"), Some(86_400_000.0));
//! let options = default_options(ScaleKind::Time);
//! let scale = create_scale(ScaleKind::Time, options, Some(Arc::new(adapter)));
//! assert!(scale.is_ok());
//! ```

use core::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Timelike, Utc, Weekday,
};
use log::debug;
use tickwise_scales::{DateAdapter, DisplayFormats, TimeUnit};

/// Errors building a [`ChronoAdapter`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChronoAdapterError {
    /// The offset is 24 hours or more away from UTC.
    #[error("UTC offset of {0} seconds is out of range")]
    OffsetOutOfRange(i32),
    /// The ISO weekday is not in `1..=7`.
    #[error("ISO weekday {0} is not in 1..=7")]
    InvalidWeekday(u8),
}

/// Calendar arithmetic in a fixed UTC offset.
#[derive(Clone, Debug)]
pub struct ChronoAdapter {
    offset: FixedOffset,
    week_start: Weekday,
    formats: DisplayFormats,
}

impl Default for ChronoAdapter {
    fn default() -> Self {
        Self::utc()
    }
}

/// Formats used when no unit-specific format is configured.
const FORMATS: [&str; 9] = [
    "%H:%M:%S%.3f",
    "%H:%M:%S",
    "%H:%M",
    "%H:00",
    "%b %-d",
    "%b %-d, %Y",
    "%b %Y",
    "Q%q %Y",
    "%Y",
];

const DATETIME_FORMAT: &str = "%b %-d, %Y, %H:%M:%S";

const PARSE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl ChronoAdapter {
    /// An adapter working in UTC with weeks starting on Sunday.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
            week_start: Weekday::Sun,
            formats: DisplayFormats::new(FORMATS, DATETIME_FORMAT),
        }
    }

    /// An adapter working `seconds` east of UTC.
    pub fn with_offset_seconds(seconds: i32) -> Result<Self, ChronoAdapterError> {
        let offset =
            FixedOffset::east_opt(seconds).ok_or(ChronoAdapterError::OffsetOutOfRange(seconds))?;
        Ok(Self {
            offset,
            ..Self::utc()
        })
    }

    /// Sets the first day of the week used when a scale does not pick one.
    ///
    /// `iso_weekday` is 1 for Monday through 7 for Sunday.
    pub fn with_week_start(mut self, iso_weekday: u8) -> Result<Self, ChronoAdapterError> {
        self.week_start =
            weekday_from_iso(iso_weekday).ok_or(ChronoAdapterError::InvalidWeekday(iso_weekday))?;
        Ok(self)
    }

    /// Replaces the default format for `unit`.
    #[must_use]
    pub fn with_format(mut self, unit: TimeUnit, pattern: impl Into<String>) -> Self {
        self.formats.set(unit, pattern);
        self
    }

    /// The offset this adapter works in.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn local(&self, timestamp: f64) -> Option<NaiveDateTime> {
        if !timestamp.is_finite() {
            return None;
        }
        let millis = to_millis(timestamp)?;
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(utc.with_timezone(&self.offset).naive_local())
    }

    fn timestamp(&self, local: NaiveDateTime) -> Option<f64> {
        let dt = self.offset.from_local_datetime(&local).single()?;
        Some(millis_to_f64(dt.timestamp_millis()))
    }

    fn week_start_for(&self, iso_weekday: Option<u8>) -> Weekday {
        iso_weekday
            .and_then(weekday_from_iso)
            .unwrap_or(self.week_start)
    }

    fn floor(local: NaiveDateTime, unit: TimeUnit, week_start: Weekday) -> Option<NaiveDateTime> {
        let date = local.date();
        let time = local.time();
        Some(match unit {
            TimeUnit::Millisecond => {
                let nanos = time.nanosecond() / 1_000_000 * 1_000_000;
                local.with_nanosecond(nanos)?
            }
            TimeUnit::Second => local.with_nanosecond(0)?,
            TimeUnit::Minute => date.and_hms_opt(time.hour(), time.minute(), 0)?,
            TimeUnit::Hour => date.and_hms_opt(time.hour(), 0, 0)?,
            TimeUnit::Day => date.and_time(NaiveTime::MIN),
            TimeUnit::Week => {
                let back = (date.weekday().num_days_from_monday() + 7
                    - week_start.num_days_from_monday())
                    % 7;
                (date - Duration::days(i64::from(back))).and_time(NaiveTime::MIN)
            }
            TimeUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
                .and_time(NaiveTime::MIN),
            TimeUnit::Quarter => {
                let month = (date.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), month, 1)?.and_time(NaiveTime::MIN)
            }
            TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_time(NaiveTime::MIN),
        })
    }

    fn shift(local: NaiveDateTime, amount: i32, unit: TimeUnit) -> Option<NaiveDateTime> {
        let amount = i64::from(amount);
        let fixed = |ms: i64| {
            local.checked_add_signed(Duration::try_milliseconds(ms.checked_mul(amount)?)?)
        };
        match unit {
            TimeUnit::Millisecond => fixed(1),
            TimeUnit::Second => fixed(1_000),
            TimeUnit::Minute => fixed(60_000),
            TimeUnit::Hour => fixed(3_600_000),
            TimeUnit::Day => fixed(86_400_000),
            TimeUnit::Week => fixed(604_800_000),
            TimeUnit::Month => add_months(local, amount),
            TimeUnit::Quarter => add_months(local, amount.checked_mul(3)?),
            TimeUnit::Year => add_months(local, amount.checked_mul(12)?),
        }
    }

    fn month_diff(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
        let months = |d: NaiveDateTime| i64::from(d.year()) * 12 + i64::from(d.month0());
        let mut diff = months(later) - months(earlier);
        // Whole months only: step back when the shifted start overshoots.
        if diff > 0 && add_months(earlier, diff).is_some_and(|t| t > later) {
            diff -= 1;
        } else if diff < 0 && add_months(earlier, diff).is_some_and(|t| t < later) {
            diff += 1;
        }
        diff
    }
}

impl DateAdapter for ChronoAdapter {
    fn parse(&self, input: &str) -> Option<f64> {
        let input = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(millis_to_f64(dt.timestamp_millis()));
        }
        for pattern in PARSE_FORMATS {
            if let Ok(local) = NaiveDateTime::parse_from_str(input, pattern) {
                return self.timestamp(local);
            }
        }
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
        self.timestamp(date.and_time(NaiveTime::MIN))
    }

    fn format(&self, timestamp: f64, pattern: &str) -> String {
        let Some(local) = self.local(timestamp) else {
            return String::new();
        };
        let quarter = local.month0() / 3 + 1;
        let pattern = pattern.replace("%q", &quarter.to_string());
        let items: Vec<Item<'_>> = StrftimeItems::new(&pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            debug!("invalid date pattern `{pattern}`; using the full timestamp");
            return local.format(DATETIME_FORMAT).to_string();
        }
        let mut out = String::new();
        if write!(out, "{}", local.format_with_items(items.iter())).is_err() {
            return local.format(DATETIME_FORMAT).to_string();
        }
        out
    }

    fn add(&self, timestamp: f64, amount: i32, unit: TimeUnit) -> f64 {
        self.local(timestamp)
            .and_then(|local| Self::shift(local, amount, unit))
            .and_then(|local| self.timestamp(local))
            .unwrap_or(timestamp)
    }

    fn diff(&self, later: f64, earlier: f64, unit: TimeUnit) -> f64 {
        let (Some(a), Some(b)) = (self.local(later), self.local(earlier)) else {
            return 0.0;
        };
        let whole = match unit {
            TimeUnit::Month => Self::month_diff(a, b),
            TimeUnit::Quarter => Self::month_diff(a, b) / 3,
            TimeUnit::Year => Self::month_diff(a, b) / 12,
            fixed => {
                return ((later - earlier) / fixed.approx_millis()).trunc();
            }
        };
        millis_to_f64(whole)
    }

    fn start_of(&self, timestamp: f64, unit: TimeUnit, iso_weekday: Option<u8>) -> f64 {
        let week_start = self.week_start_for(iso_weekday);
        self.local(timestamp)
            .and_then(|local| Self::floor(local, unit, week_start))
            .and_then(|local| self.timestamp(local))
            .unwrap_or(timestamp)
    }

    fn end_of(&self, timestamp: f64, unit: TimeUnit) -> f64 {
        let start = self.start_of(timestamp, unit, None);
        self.add(start, 1, unit) - 1.0
    }

    fn formats(&self) -> DisplayFormats {
        self.formats.clone()
    }

    fn now(&self) -> f64 {
        millis_to_f64(Utc::now().timestamp_millis())
    }
}

fn weekday_from_iso(iso_weekday: u8) -> Option<Weekday> {
    Some(match iso_weekday {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    })
}

/// Adds calendar months, clamping the day to the target month's length.
fn add_months(local: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let total = i64::from(local.year()) * 12 + i64::from(local.month0()) + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = first
        .checked_add_months(Months::new(1))?
        .pred_opt()?
        .day();
    let date = NaiveDate::from_ymd_opt(year, month, local.day().min(last_day))?;
    Some(date.and_time(local.time()))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is rounded and range checked first"
)]
fn to_millis(timestamp: f64) -> Option<i64> {
    let rounded = timestamp.round();
    // i64::MAX as f64 rounds up, so the bound is exclusive.
    (rounded >= -9.223_372_036_854_776e18 && rounded < 9.223_372_036_854_776e18)
        .then_some(rounded as i64)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "epoch milliseconds of representable dates fit in 2^53"
)]
fn millis_to_f64(millis: i64) -> f64 {
    millis as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const DAY: f64 = 86_400_000.0;

    fn ts(s: &str) -> f64 {
        ChronoAdapter::utc().parse(s).unwrap()
    }

    #[test]
    fn parses_dates_and_timestamps() {
        let adapter = ChronoAdapter::utc();
        assert_eq!(adapter.parse("1970-01-01"), Some(0.0));
        assert_eq!(adapter.parse("1970-01-01T00:00:01.500Z"), Some(1500.0));
        assert_eq!(adapter.parse("1970-01-01 01:00"), Some(3_600_000.0));
        assert_eq!(adapter.parse("not a date"), None);
    }

    #[test]
    fn fixed_offsets_shift_local_midnight() {
        let adapter = ChronoAdapter::with_offset_seconds(3600).unwrap();
        assert_eq!(adapter.parse("1970-01-02"), Some(DAY - 3_600_000.0));
        assert_eq!(adapter.start_of(DAY, TimeUnit::Day, None), DAY - 3_600_000.0);
        assert_eq!(
            ChronoAdapter::with_offset_seconds(90_000).unwrap_err(),
            ChronoAdapterError::OffsetOutOfRange(90_000)
        );
    }

    #[test]
    fn month_steps_clamp_the_day() {
        let adapter = ChronoAdapter::utc();
        let jan31 = ts("2024-01-31");
        assert_eq!(adapter.add(jan31, 1, TimeUnit::Month), ts("2024-02-29"));
        assert_eq!(adapter.add(jan31, 1, TimeUnit::Year), ts("2025-01-31"));
        assert_eq!(adapter.add(jan31, -2, TimeUnit::Quarter), ts("2023-07-31"));
    }

    #[test]
    fn diff_counts_whole_units() {
        let adapter = ChronoAdapter::utc();
        let a = ts("2024-01-31");
        let b = ts("2024-03-30");
        assert_eq!(adapter.diff(b, a, TimeUnit::Month), 1.0);
        assert_eq!(adapter.diff(b, a, TimeUnit::Day), 59.0);
        assert_eq!(adapter.diff(a, b, TimeUnit::Month), -1.0);
        assert_eq!(adapter.diff(ts("2026-01-01"), a, TimeUnit::Year), 1.0);
    }

    #[test]
    fn weeks_start_on_the_requested_day() {
        let adapter = ChronoAdapter::utc();
        // 2024-05-15 is a Wednesday.
        let wed = ts("2024-05-15T13:00:00Z");
        assert_eq!(adapter.start_of(wed, TimeUnit::Week, None), ts("2024-05-12"));
        assert_eq!(adapter.start_of(wed, TimeUnit::Week, Some(1)), ts("2024-05-13"));
        let monday = adapter.clone().with_week_start(1).unwrap();
        assert_eq!(monday.start_of(wed, TimeUnit::Week, None), ts("2024-05-13"));
        assert!(ChronoAdapter::utc().with_week_start(0).is_err());
    }

    #[test]
    fn start_and_end_bracket_the_unit() {
        let adapter = ChronoAdapter::utc();
        let t = ts("2024-05-15T13:45:12.345Z");
        assert_eq!(adapter.start_of(t, TimeUnit::Quarter, None), ts("2024-04-01"));
        assert_eq!(adapter.end_of(t, TimeUnit::Month), ts("2024-06-01") - 1.0);
        assert_eq!(adapter.start_of(t, TimeUnit::Minute, None), ts("2024-05-15T13:45:00Z"));
        assert_approx_eq!(f64, adapter.start_of(t, TimeUnit::Millisecond, None), t);
    }

    #[test]
    fn formats_with_quarters_and_survives_bad_patterns() {
        let adapter = ChronoAdapter::utc();
        let t = ts("2024-05-15");
        assert_eq!(adapter.format(t, "Q%q %Y"), "Q2 2024");
        assert_eq!(adapter.format(t, adapter.formats().get(TimeUnit::Day)), "May 15");
        assert_eq!(adapter.format(t, "%Q"), "May 15, 2024, 00:00:00");
        assert_eq!(adapter.format(f64::NAN, "%Y"), "");
    }
}
