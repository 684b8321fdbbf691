// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale configuration.
//!
//! Options are plain data with builder-style setters. A few values depend on how much room the
//! axis gets (font size, tick limit); those are [`Contextual`] and are resolved once per update
//! into [`ResolvedOptions`].

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

use log::warn;
use smallvec::SmallVec;
use tickwise_text::TextStyle;

use crate::data::RawValue;
use crate::draw::StrokeStyle;
use crate::error::ScaleError;
use crate::time::TimeUnit;

/// Where the axis sits relative to the chart area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Horizontal axis above the chart area.
    Top,
    /// Horizontal axis below the chart area.
    Bottom,
    /// Vertical axis left of the chart area.
    Left,
    /// Vertical axis right of the chart area.
    Right,
    /// Drawn over the chart area itself (radial scales).
    ChartArea,
}

impl Position {
    /// Returns `true` for `Top` and `Bottom`.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// How the final domain relates to the generated ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bounds {
    /// The domain is the data extent; ticks outside it are dropped.
    Data,
    /// The domain grows to the first and last tick.
    Ticks,
}

/// An explicit domain bound.
#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    /// A value in the scale's value space (a number, an epoch timestamp or a category index).
    Value(f64),
    /// A label, parsed by the scale (category name or date string).
    Label(Arc<str>),
}

impl Bound {
    pub(crate) fn to_raw(&self) -> RawValue {
        match self {
            Self::Value(v) => RawValue::Number(*v),
            Self::Label(s) => RawValue::Text(s.clone()),
        }
    }

    fn as_value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Label(_) => None,
        }
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<&str> for Bound {
    fn from(s: &str) -> Self {
        Self::Label(s.into())
    }
}

/// Extra room added around the data extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Grace {
    /// A fixed amount in value units on each side.
    Absolute(f64),
    /// A fraction (`0.05` for 5%) of the data range on each side.
    Percent(f64),
}

/// Label alignment along the axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickAlign {
    /// Label starts at the tick.
    Start,
    /// Label is centred on the tick.
    #[default]
    Center,
    /// Label ends at the tick.
    End,
    /// First and last labels are pulled inside the axis; the rest are centred.
    Inner,
}

/// How numeric tick labels are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    /// Decimals derived from the tick step; scientific notation for extreme magnitudes.
    #[default]
    Auto,
    /// Always this many decimals.
    Fixed(u8),
    /// Always scientific notation.
    Scientific,
}

/// Where time scale ticks come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickSource {
    /// Generated at calendar unit boundaries.
    #[default]
    Auto,
    /// Generated, then snapped onto data timestamps.
    Data,
    /// The label timestamps.
    Labels,
}

/// A value that may depend on the axis length.
///
/// `ByLength` holds `(max_length, value)` breakpoints in ascending order: the first breakpoint
/// whose `max_length` is at least the axis length wins, and the last one applies beyond.
#[derive(Clone, Debug, PartialEq)]
pub enum Contextual<T> {
    /// The same value everywhere.
    Fixed(T),
    /// Breakpoints keyed on axis length.
    ByLength(SmallVec<[(f64, T); 4]>),
}

impl<T: Clone> Contextual<T> {
    /// Creates a length-dependent value from breakpoints in any order.
    pub fn by_length(breakpoints: impl IntoIterator<Item = (f64, T)>) -> Self {
        let mut points: SmallVec<[(f64, T); 4]> = breakpoints.into_iter().collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self::ByLength(points)
    }

    /// Picks the value for an axis of `length`. Returns `None` for an empty breakpoint list.
    pub fn resolve(&self, length: f64) -> Option<T> {
        match self {
            Self::Fixed(v) => Some(v.clone()),
            Self::ByLength(points) => points
                .iter()
                .find(|(max_length, _)| length <= *max_length)
                .or_else(|| points.last())
                .map(|(_, v)| v.clone()),
        }
    }
}

impl<T> From<T> for Contextual<T> {
    fn from(v: T) -> Self {
        Self::Fixed(v)
    }
}

/// Tick generation and label options.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOptions {
    /// Whether tick labels are shown.
    pub display: bool,
    /// Label font.
    pub font: Contextual<TextStyle>,
    /// Gap between the tick mark and the label.
    pub padding: f64,
    /// Smallest label rotation in degrees.
    pub min_rotation: f64,
    /// Largest label rotation in degrees.
    pub max_rotation: f64,
    /// Skip labels that would overlap.
    pub auto_skip: bool,
    /// Extra space required between skipped labels.
    pub auto_skip_padding: f64,
    /// Upper bound on the number of ticks.
    pub max_ticks_limit: Contextual<Option<usize>>,
    /// Fixed distance between ticks.
    pub step_size: Option<f64>,
    /// Fixed number of ticks (linear scales).
    pub count: Option<usize>,
    /// Maximum decimals of the tick step.
    pub precision: Option<u8>,
    /// Add explicit `min`/`max` bounds as ticks.
    pub include_bounds: bool,
    /// Measure only this many evenly spaced labels when fitting.
    pub sample_size: Option<usize>,
    /// Label alignment along the axis.
    pub align: TickAlign,
    /// Draw labels on the chart-area side of the axis.
    pub mirror: bool,
    /// Mark and keep major ticks (decades on log axes, coarser units on time axes).
    pub major_enabled: bool,
    /// Numeric label format.
    pub format: NumberFormat,
    /// Reserve a backdrop behind radial tick labels.
    pub show_label_backdrop: bool,
    /// Padding inside the radial label backdrop.
    pub backdrop_padding: f64,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            display: true,
            font: Contextual::Fixed(TextStyle::new(12.0)),
            padding: 3.0,
            min_rotation: 0.0,
            max_rotation: 50.0,
            auto_skip: true,
            auto_skip_padding: 3.0,
            max_ticks_limit: Contextual::Fixed(None),
            step_size: None,
            count: None,
            precision: None,
            include_bounds: true,
            sample_size: None,
            align: TickAlign::Center,
            mirror: false,
            major_enabled: false,
            format: NumberFormat::Auto,
            show_label_backdrop: false,
            backdrop_padding: 2.0,
        }
    }
}

impl TickOptions {
    /// Caps the number of ticks.
    #[must_use]
    pub fn with_max_ticks_limit(mut self, limit: usize) -> Self {
        self.max_ticks_limit = Contextual::Fixed(Some(limit));
        self
    }

    /// Sets a fixed tick step.
    #[must_use]
    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = Some(step);
        self
    }

    /// Requests exactly `count` ticks.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Limits the decimals of the tick step.
    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the rotation range in degrees.
    #[must_use]
    pub fn with_rotation(mut self, min: f64, max: f64) -> Self {
        self.min_rotation = min;
        self.max_rotation = max;
        self
    }

    /// Enables or disables autoskip.
    #[must_use]
    pub fn with_auto_skip(mut self, auto_skip: bool) -> Self {
        self.auto_skip = auto_skip;
        self
    }

    /// Sets the label font.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<Contextual<TextStyle>>) -> Self {
        self.font = font.into();
        self
    }

    /// Enables or disables major ticks.
    #[must_use]
    pub fn with_major(mut self, enabled: bool) -> Self {
        self.major_enabled = enabled;
        self
    }

    /// Sets the numeric label format.
    #[must_use]
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the label alignment.
    #[must_use]
    pub fn with_align(mut self, align: TickAlign) -> Self {
        self.align = align;
        self
    }

    /// Measures only `sample_size` labels during fitting.
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }
}

/// Grid line and tick mark options.
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// Whether grid lines and tick marks are emitted.
    pub display: bool,
    /// Emit grid lines across the chart area.
    pub draw_on_chart_area: bool,
    /// Emit tick marks inside the axis box.
    pub draw_ticks: bool,
    /// Length of tick marks.
    pub tick_length: f64,
    /// Stroke for minor lines.
    pub stroke: StrokeStyle,
    /// Stroke for major lines; falls back to `stroke`.
    pub major_stroke: Option<StrokeStyle>,
    /// Draw lines between ticks instead of on them (category bands).
    pub offset: bool,
    /// Radial grid rings are circles instead of polygons.
    pub circular: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            display: true,
            draw_on_chart_area: true,
            draw_ticks: true,
            tick_length: 8.0,
            stroke: StrokeStyle::grid(),
            major_stroke: None,
            offset: false,
            circular: false,
        }
    }
}

/// Axis title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleOptions {
    /// Title text; `\n` separates lines.
    pub text: String,
    /// Title font.
    pub font: TextStyle,
    /// Space above and below the title.
    pub padding: f64,
}

impl TitleOptions {
    /// Creates a title with default font and padding.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: TextStyle::new(12.0),
            padding: 4.0,
        }
    }

    /// Height the title takes up across the axis.
    pub fn height(&self) -> f64 {
        let lines = self.text.split('\n').count();
        crate::math::usize_to_f64(lines) * self.font.row_height() + 2.0 * self.padding
    }
}

/// Time scale options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeOptions {
    /// Force a tick unit.
    pub unit: Option<TimeUnit>,
    /// Finest unit considered when the unit is picked automatically.
    pub min_unit: TimeUnit,
    /// Round parsed values to the start of this unit.
    pub round: Option<TimeUnit>,
    /// First day of week ticks (1 = Monday … 7 = Sunday).
    pub iso_weekday: Option<u8>,
    /// Per-unit overrides of the adapter's display formats.
    pub display_formats: SmallVec<[(TimeUnit, String); 2]>,
    /// Format used by `label_for_value`.
    pub tooltip_format: Option<String>,
    /// Where ticks come from.
    pub source: TickSource,
}

impl TimeOptions {
    /// Forces a tick unit.
    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the finest automatically chosen unit.
    #[must_use]
    pub fn with_min_unit(mut self, unit: TimeUnit) -> Self {
        self.min_unit = unit;
        self
    }

    /// Rounds parsed values down to `unit`.
    #[must_use]
    pub fn with_round(mut self, unit: TimeUnit) -> Self {
        self.round = Some(unit);
        self
    }

    /// Starts week ticks on `weekday` (1 = Monday).
    #[must_use]
    pub fn with_iso_weekday(mut self, weekday: u8) -> Self {
        self.iso_weekday = Some(weekday);
        self
    }

    /// Overrides the display format of one unit.
    #[must_use]
    pub fn with_display_format(mut self, unit: TimeUnit, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        match self.display_formats.iter_mut().find(|(u, _)| *u == unit) {
            Some(entry) => entry.1 = pattern,
            None => self.display_formats.push((unit, pattern)),
        }
        self
    }

    /// Sets the format used by `label_for_value`.
    #[must_use]
    pub fn with_tooltip_format(mut self, pattern: impl Into<String>) -> Self {
        self.tooltip_format = Some(pattern.into());
        self
    }

    /// Sets the tick source.
    #[must_use]
    pub fn with_source(mut self, source: TickSource) -> Self {
        self.source = source;
        self
    }
}

/// Radial point label options.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLabelOptions {
    /// Whether point labels are shown.
    pub display: bool,
    /// Label font.
    pub font: TextStyle,
    /// Gap between the outer ring and the labels.
    pub padding: f64,
    /// Rotate label angles by half a slice so labels sit between spokes.
    pub center_point_labels: bool,
}

impl Default for PointLabelOptions {
    fn default() -> Self {
        Self {
            display: true,
            font: TextStyle::new(10.0),
            padding: 5.0,
            center_point_labels: false,
        }
    }
}

/// All options of one scale.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOptions {
    /// Whether the axis takes up space and emits draw items.
    pub display: bool,
    /// Axis placement.
    pub position: Position,
    /// Reverse the value direction.
    pub reverse: bool,
    /// Pad half a step on both ends so ticks sit in band centres.
    pub offset: bool,
    /// Domain policy.
    pub bounds: Bounds,
    /// Explicit minimum.
    pub min: Option<Bound>,
    /// Explicit maximum.
    pub max: Option<Bound>,
    /// The domain includes this value, but data may extend it.
    pub suggested_min: Option<f64>,
    /// The domain includes this value, but data may extend it.
    pub suggested_max: Option<f64>,
    /// Extend the domain to include zero.
    pub begin_at_zero: bool,
    /// Extra room around the data extent.
    pub grace: Option<Grace>,
    /// Use the stacked extent of the data.
    pub stacked: bool,
    /// Angle of the first radial spoke in degrees, clockwise from 12 o'clock.
    pub start_angle: f64,
    /// Ticks.
    pub ticks: TickOptions,
    /// Grid lines.
    pub grid: GridOptions,
    /// Axis title.
    pub title: Option<TitleOptions>,
    /// Time scale options.
    pub time: TimeOptions,
    /// Radial point labels.
    pub point_labels: PointLabelOptions,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            display: true,
            position: Position::Left,
            reverse: false,
            offset: false,
            bounds: Bounds::Ticks,
            min: None,
            max: None,
            suggested_min: None,
            suggested_max: None,
            begin_at_zero: false,
            grace: None,
            stacked: false,
            start_angle: 0.0,
            ticks: TickOptions::default(),
            grid: GridOptions::default(),
            title: None,
            time: TimeOptions::default(),
            point_labels: PointLabelOptions::default(),
        }
    }
}

impl ScaleOptions {
    /// Sets the axis position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Reverses the value direction.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enables half-step padding.
    #[must_use]
    pub fn with_offset(mut self, offset: bool) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the domain policy.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the explicit minimum.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<Bound>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Sets the explicit maximum.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<Bound>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Sets the suggested minimum.
    #[must_use]
    pub fn with_suggested_min(mut self, min: f64) -> Self {
        self.suggested_min = Some(min);
        self
    }

    /// Sets the suggested maximum.
    #[must_use]
    pub fn with_suggested_max(mut self, max: f64) -> Self {
        self.suggested_max = Some(max);
        self
    }

    /// Extends the domain to zero.
    #[must_use]
    pub fn with_begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.begin_at_zero = begin_at_zero;
        self
    }

    /// Sets the grace around the data extent.
    #[must_use]
    pub fn with_grace(mut self, grace: Grace) -> Self {
        self.grace = Some(grace);
        self
    }

    /// Uses the stacked extent.
    #[must_use]
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    /// Sets the radial start angle in degrees.
    #[must_use]
    pub fn with_start_angle(mut self, degrees: f64) -> Self {
        self.start_angle = degrees;
        self
    }

    /// Sets the tick options.
    #[must_use]
    pub fn with_ticks(mut self, ticks: TickOptions) -> Self {
        self.ticks = ticks;
        self
    }

    /// Sets the grid options.
    #[must_use]
    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the axis title.
    #[must_use]
    pub fn with_title(mut self, title: TitleOptions) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the time options.
    #[must_use]
    pub fn with_time(mut self, time: TimeOptions) -> Self {
        self.time = time;
        self
    }

    /// Sets the point label options.
    #[must_use]
    pub fn with_point_labels(mut self, point_labels: PointLabelOptions) -> Self {
        self.point_labels = point_labels;
        self
    }

    /// Resolves length-dependent options for one update pass.
    ///
    /// An inverted rotation range is corrected by raising `max_rotation` to `min_rotation`.
    pub fn resolve(&self, ctx: &ResolveContext) -> ResolvedOptions {
        let tick_font = self
            .ticks
            .font
            .resolve(ctx.length)
            .unwrap_or_else(|| TextStyle::new(12.0));
        let max_ticks_limit = self
            .ticks
            .max_ticks_limit
            .resolve(ctx.length)
            .flatten()
            .filter(|limit| *limit > 0);
        let min_rotation = self.ticks.min_rotation;
        let mut max_rotation = self.ticks.max_rotation;
        if min_rotation > max_rotation {
            warn!(
                "min_rotation {min_rotation} exceeds max_rotation {max_rotation}; \
                 using {min_rotation} for both"
            );
            max_rotation = min_rotation;
        }
        let tick_length = if self.grid.display && self.grid.draw_ticks {
            self.grid.tick_length.max(0.0)
        } else {
            0.0
        };
        let title_height = self.title.as_ref().map_or(0.0, TitleOptions::height);
        ResolvedOptions {
            horizontal: ctx.horizontal,
            tick_font,
            max_ticks_limit,
            min_rotation,
            max_rotation,
            tick_length,
            title_height,
        }
    }

    /// Reports conflicting options.
    ///
    /// Scales accept conflicting options and correct them silently; this lets a host surface
    /// the conflict instead. Only the first conflict found is returned.
    pub fn validate(&self) -> Result<(), ScaleError> {
        let min = self.min.as_ref().and_then(Bound::as_value);
        let max = self.max.as_ref().and_then(Bound::as_value);
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(ScaleError::InvertedBounds { min, max });
        }
        if let Some(step) = self.ticks.step_size
            && !(step > 0.0 && step.is_finite())
        {
            return Err(ScaleError::InvalidStepSize(step));
        }
        if let Some(count) = self.ticks.count
            && count < 2
        {
            return Err(ScaleError::InvalidTickCount(count));
        }
        if self.ticks.min_rotation > self.ticks.max_rotation {
            return Err(ScaleError::InvertedRotation {
                min: self.ticks.min_rotation,
                max: self.ticks.max_rotation,
            });
        }
        if self.begin_at_zero {
            if let Some(min) = min
                && min > 0.0
            {
                return Err(ScaleError::BeginAtZeroOverridden {
                    side: "min",
                    value: min,
                });
            }
            if let Some(max) = max
                && max < 0.0
            {
                return Err(ScaleError::BeginAtZeroOverridden {
                    side: "max",
                    value: max,
                });
            }
        }
        Ok(())
    }

    /// The configured step size when it is usable.
    pub(crate) fn step_size(&self) -> Option<f64> {
        self.ticks.step_size.filter(|s| *s > 0.0 && s.is_finite())
    }
}

/// Inputs to [`ScaleOptions::resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveContext {
    /// Whether the axis runs horizontally.
    pub horizontal: bool,
    /// Length available along the axis.
    pub length: f64,
}

/// Options resolved for one update pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    /// Whether the axis runs horizontally.
    pub horizontal: bool,
    /// Tick label font.
    pub tick_font: TextStyle,
    /// Tick cap, if any.
    pub max_ticks_limit: Option<usize>,
    /// Smallest rotation in degrees.
    pub min_rotation: f64,
    /// Largest rotation in degrees, never below `min_rotation`.
    pub max_rotation: f64,
    /// Tick mark length, zero when tick marks are hidden.
    pub tick_length: f64,
    /// Title height, zero without a title.
    pub title_height: f64,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        ScaleOptions::default().resolve(&ResolveContext {
            horizontal: false,
            length: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contextual_picks_first_breakpoint_that_fits() {
        let c = Contextual::by_length([(600.0, 8_usize), (300.0, 4)]);
        assert_eq!(c.resolve(200.0), Some(4));
        assert_eq!(c.resolve(300.0), Some(4));
        assert_eq!(c.resolve(500.0), Some(8));
        assert_eq!(c.resolve(900.0), Some(8));
        assert_eq!(Contextual::Fixed(3).resolve(1.0), Some(3));
    }

    #[test]
    fn resolve_uses_contextual_font_and_limit() {
        let mut opts = ScaleOptions::default();
        opts.ticks.font = Contextual::by_length([
            (200.0, TextStyle::new(8.0)),
            (f64::MAX, TextStyle::new(14.0)),
        ]);
        opts.ticks.max_ticks_limit = Contextual::by_length([(200.0, Some(3)), (f64::MAX, None)]);
        let small = opts.resolve(&ResolveContext {
            horizontal: true,
            length: 150.0,
        });
        assert_eq!(small.tick_font.font_size, 8.0);
        assert_eq!(small.max_ticks_limit, Some(3));
        let large = opts.resolve(&ResolveContext {
            horizontal: true,
            length: 800.0,
        });
        assert_eq!(large.tick_font.font_size, 14.0);
        assert_eq!(large.max_ticks_limit, None);
    }

    #[test]
    fn resolve_corrects_inverted_rotation() {
        let opts =
            ScaleOptions::default().with_ticks(TickOptions::default().with_rotation(30.0, 10.0));
        let resolved = opts.resolve(&ResolveContext {
            horizontal: true,
            length: 100.0,
        });
        assert_eq!(resolved.max_rotation, 30.0);
        assert!(matches!(
            opts.validate(),
            Err(ScaleError::InvertedRotation { .. })
        ));
    }

    #[test]
    fn tick_length_is_zero_without_tick_marks() {
        let mut opts = ScaleOptions::default();
        opts.grid.draw_ticks = false;
        let resolved = opts.resolve(&ResolveContext {
            horizontal: false,
            length: 100.0,
        });
        assert_eq!(resolved.tick_length, 0.0);
    }

    #[test]
    fn validate_reports_conflicts() {
        assert_eq!(ScaleOptions::default().validate(), Ok(()));
        assert_eq!(
            ScaleOptions::default().with_min(5.0).with_max(1.0).validate(),
            Err(ScaleError::InvertedBounds { min: 5.0, max: 1.0 })
        );
        assert_eq!(
            ScaleOptions::default()
                .with_ticks(TickOptions::default().with_step_size(0.0))
                .validate(),
            Err(ScaleError::InvalidStepSize(0.0))
        );
        assert_eq!(
            ScaleOptions::default()
                .with_begin_at_zero(true)
                .with_min(10.0)
                .validate(),
            Err(ScaleError::BeginAtZeroOverridden {
                side: "min",
                value: 10.0
            })
        );
        assert_eq!(
            ScaleOptions::default()
                .with_ticks(TickOptions::default().with_count(1))
                .validate(),
            Err(ScaleError::InvalidTickCount(1))
        );
    }

    #[test]
    fn title_height_counts_lines_and_padding() {
        let title = TitleOptions::new("a\nb");
        assert!((title.height() - (2.0 * 14.4 + 8.0)).abs() < 1e-9);
    }
}
