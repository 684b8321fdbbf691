// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scale object shared by every kind.
//!
//! A [`Scale`] owns the generic state (options, domain, pixel range, ticks, fitted size) in a
//! `ScaleCore`, and the kind-specific state in a closed `ScaleVariant` enum. The update pipeline
//! lives here once; each variant only supplies parsing, data limits, tick building, label text
//! and the value/decimal mapping.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};
use log::warn;
use tickwise_text::{BlockSize, TextMeasurer};

use crate::autoskip::{self, SkipInput};
use crate::category::{CategoryIndexMap, CategoryScale};
use crate::data::{DataSource, MinMax, ParsedValue, RawValue};
use crate::error::ScaleError;
use crate::factory::ScaleKind;
use crate::fit::{LabelSizeCache, LabelSizes};
use crate::linear::LinearScale;
use crate::logarithmic::LogScale;
use crate::math::{finite_or, int16_range};
use crate::options::{Bound, Position, ResolveContext, ResolvedOptions, ScaleOptions};
use crate::radial::RadialScale;
use crate::time::{TimeScale, TimeUnit};

/// A tick: a value on the scale plus its formatted label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// The tick value in the scale's value space.
    pub value: f64,
    /// Formatted label; `\n` separates lines, empty for unlabeled minor ticks.
    pub label: String,
    /// Whether this is a major tick.
    pub major: bool,
}

impl Tick {
    pub(crate) fn new(value: f64) -> Self {
        Self {
            value,
            label: String::new(),
            major: false,
        }
    }

    pub(crate) fn with_major(value: f64, major: bool) -> Self {
        Self {
            value,
            label: String::new(),
            major,
        }
    }
}

/// The collaborators a scale reads during [`Scale::update`].
#[derive(Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Every data series plotted against this scale.
    pub data: &'a [&'a dyn DataSource],
    /// Measures tick labels.
    pub measurer: &'a dyn TextMeasurer,
}

impl<'a> UpdateContext<'a> {
    /// Bundles data and a text measurer.
    pub fn new(data: &'a [&'a dyn DataSource], measurer: &'a dyn TextMeasurer) -> Self {
        Self { data, measurer }
    }
}

impl core::fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("data", &self.data.len())
            .field("measurer", &"<dyn TextMeasurer>")
            .finish()
    }
}

/// Generic scale state.
#[derive(Clone, Debug)]
pub(crate) struct ScaleCore {
    pub(crate) kind: ScaleKind,
    pub(crate) options: ScaleOptions,
    pub(crate) resolved: ResolvedOptions,
    pub(crate) labels: Vec<Arc<str>>,
    pub(crate) labels_revision: u64,
    pub(crate) generation: u64,

    pub(crate) max_width: f64,
    pub(crate) max_height: f64,
    pub(crate) margins: Insets,
    pub(crate) max_length: f64,
    pub(crate) bounds: Rect,
    pub(crate) padding: Insets,
    pub(crate) size: Size,

    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) user_min: Option<f64>,
    pub(crate) user_max: Option<f64>,

    /// Value at decimal 0 for scales mapped affinely in value space.
    pub(crate) start_value: f64,
    /// Value span covered by decimals `0..1`.
    pub(crate) value_range: f64,

    pub(crate) start_pixel: f64,
    pub(crate) length: f64,
    pub(crate) reverse_pixels: bool,

    pub(crate) ticks: Vec<Tick>,
    pub(crate) label_rotation: f64,
    pub(crate) auto_skip_step: usize,
    pub(crate) label_sizes: Option<LabelSizes>,
    pub(crate) size_cache: LabelSizeCache,
}

impl ScaleCore {
    fn new(kind: ScaleKind, options: ScaleOptions) -> Self {
        Self {
            kind,
            options,
            resolved: ResolvedOptions::default(),
            labels: Vec::new(),
            labels_revision: 0,
            generation: 0,
            max_width: 0.0,
            max_height: 0.0,
            margins: Insets::ZERO,
            max_length: 0.0,
            bounds: Rect::ZERO,
            padding: Insets::ZERO,
            size: Size::ZERO,
            min: 0.0,
            max: 1.0,
            user_min: None,
            user_max: None,
            start_value: 0.0,
            value_range: 1.0,
            start_pixel: 0.0,
            length: 0.0,
            reverse_pixels: false,
            ticks: Vec::new(),
            label_rotation: 0.0,
            auto_skip_step: 1,
            label_sizes: None,
            size_cache: LabelSizeCache::default(),
        }
    }

    pub(crate) fn is_horizontal(&self) -> bool {
        self.options.position.is_horizontal()
    }

    /// Length along the axis before fitting.
    pub(crate) fn axis_length(&self) -> f64 {
        if self.is_horizontal() {
            self.bounds.width()
        } else {
            self.bounds.height()
        }
    }

    /// The decimal that `pixel_for_decimal` maps onto `start_pixel`.
    pub(crate) fn decimal_at_start(&self) -> f64 {
        if self.reverse_pixels { 1.0 } else { 0.0 }
    }

    pub(crate) fn pixel_for_decimal(&self, decimal: f64) -> f64 {
        let decimal = if self.reverse_pixels {
            1.0 - decimal
        } else {
            decimal
        };
        int16_range(self.start_pixel + decimal * self.length)
    }

    pub(crate) fn decimal_for_pixel(&self, pixel: f64) -> f64 {
        if self.length == 0.0 {
            return self.decimal_at_start();
        }
        let decimal = (pixel - self.start_pixel) / self.length;
        if self.reverse_pixels {
            1.0 - decimal
        } else {
            decimal
        }
    }

    /// Measures a tick label with the resolved tick font, memoized per update.
    pub(crate) fn measure_label(&mut self, measurer: &dyn TextMeasurer, text: &str) -> BlockSize {
        self.size_cache
            .measure(self.generation, measurer, text, &self.resolved.tick_font)
    }

    fn set_dimensions(&mut self) {
        self.bounds = match self.options.position {
            Position::Top | Position::Bottom => Rect::new(0.0, 0.0, self.max_width, 0.0),
            Position::Left | Position::Right => Rect::new(0.0, 0.0, 0.0, self.max_height),
            Position::ChartArea => Rect::new(0.0, 0.0, self.max_width, self.max_height),
        };
        self.max_length = if self.is_horizontal() {
            self.max_width + self.margins.x0 + self.margins.x1
        } else {
            self.max_height + self.margins.y0 + self.margins.y1
        };
    }

    /// Sets the pixel range from the bounds. Vertical axes run bottom to top.
    fn configure_pixels(&mut self) {
        let mut reverse = self.options.reverse;
        let (start, end) = if self.is_horizontal() {
            (self.bounds.x0, self.bounds.x1)
        } else {
            reverse = !reverse;
            (self.bounds.y0, self.bounds.y1)
        };
        self.start_pixel = start;
        self.length = end - start;
        self.reverse_pixels = reverse;
    }
}

/// Combines explicit bounds with the extent of every data series.
///
/// Explicit bounds win; suggested bounds extend the data extent; an explicit bound that would
/// invert the extent drags the other side along.
pub(crate) fn min_max(
    core: &ScaleCore,
    data: &[&dyn DataSource],
    can_stack: bool,
    mut parse: impl FnMut(&RawValue) -> ParsedValue,
) -> MinMax {
    let min_defined = core.user_min.is_some();
    let max_defined = core.user_max.is_some();
    let mut min = core
        .user_min
        .or(core.options.suggested_min.filter(|v| v.is_finite()))
        .unwrap_or(f64::INFINITY);
    let mut max = core
        .user_max
        .or(core.options.suggested_max.filter(|v| v.is_finite()))
        .unwrap_or(f64::NEG_INFINITY);
    if min_defined && max_defined {
        return MinMax::new(min, max);
    }

    for source in data {
        let stacked = if can_stack && core.options.stacked {
            source.stacked_min_max()
        } else {
            None
        };
        let extent = stacked.unwrap_or_else(|| {
            source
                .values()
                .iter()
                .filter_map(|raw| parse(raw).value())
                .collect()
        });
        if !min_defined {
            min = min.min(extent.min);
        }
        if !max_defined {
            max = max.max(extent.max);
        }
    }

    if max_defined && min > max {
        min = max;
    }
    if min_defined && min > max {
        max = min;
    }
    MinMax::new(
        finite_or(min, finite_or(max, min)),
        finite_or(max, finite_or(min, max)),
    )
}

/// Kind-specific state.
#[derive(Clone, Debug)]
pub(crate) enum ScaleVariant {
    Linear(LinearScale),
    Logarithmic(LogScale),
    Category(CategoryScale),
    Time(TimeScale),
    RadialLinear(RadialScale),
}

impl ScaleVariant {
    fn begin_update(&mut self, core: &ScaleCore) {
        match self {
            Self::Logarithmic(s) => s.begin_update(),
            Self::Category(s) => s.sync_labels(core),
            Self::Linear(_) | Self::Time(_) | Self::RadialLinear(_) => {}
        }
    }

    fn parse(&mut self, core: &ScaleCore, raw: &RawValue) -> ParsedValue {
        match self {
            Self::Linear(_) | Self::RadialLinear(_) => LinearScale::parse(raw),
            Self::Logarithmic(s) => s.parse(raw),
            Self::Category(s) => s.parse(raw),
            Self::Time(s) => s.parse(core, raw),
        }
    }

    fn determine_data_limits(&mut self, core: &mut ScaleCore, data: &[&dyn DataSource]) {
        match self {
            Self::Linear(s) => s.determine_data_limits(core, data),
            Self::Logarithmic(s) => s.determine_data_limits(core, data),
            Self::Category(s) => s.determine_data_limits(core, data),
            Self::Time(s) => s.determine_data_limits(core, data),
            Self::RadialLinear(s) => s.determine_data_limits(core, data),
        }
    }

    fn build_ticks(&mut self, core: &mut ScaleCore, measurer: &dyn TextMeasurer) -> Vec<Tick> {
        match self {
            Self::Linear(s) => s.build_ticks(core),
            Self::Logarithmic(s) => s.build_ticks(core),
            Self::Category(s) => s.build_ticks(core),
            Self::Time(s) => s.build_ticks(core, measurer),
            Self::RadialLinear(s) => s.build_ticks(core),
        }
    }

    fn generate_tick_labels(&self, core: &ScaleCore, ticks: &mut [Tick]) {
        match self {
            Self::Linear(_) | Self::RadialLinear(_) => {
                crate::linear::generate_tick_labels(core, ticks);
            }
            Self::Logarithmic(s) => s.generate_tick_labels(core, ticks),
            Self::Category(s) => s.generate_tick_labels(ticks),
            Self::Time(s) => s.generate_tick_labels(ticks),
        }
    }

    fn configure(&mut self, core: &mut ScaleCore) {
        match self {
            Self::Linear(s) => s.configure(core),
            Self::Logarithmic(s) => s.configure(core),
            Self::Category(s) => s.configure(core),
            Self::Time(s) => s.configure(core),
            Self::RadialLinear(s) => s.configure(core),
        }
    }

    fn decimal_for_value(&self, core: &ScaleCore, value: f64) -> Option<f64> {
        match self {
            Self::Linear(_) | Self::Category(_) => {
                Some(crate::linear::decimal_for_value(core, value))
            }
            Self::Logarithmic(s) => s.decimal_for_value(core, value),
            Self::Time(s) => s.decimal_for_value(core, value),
            Self::RadialLinear(s) => s.decimal_for_value(value),
        }
    }

    fn value_for_decimal(&self, core: &ScaleCore, decimal: f64) -> Option<f64> {
        match self {
            Self::Linear(_) => Some(core.start_value + decimal * core.value_range),
            Self::Category(s) => s.value_for_decimal(core, decimal),
            Self::Logarithmic(s) => s.value_for_decimal(core, decimal),
            Self::Time(s) => s.value_for_decimal(core, decimal),
            Self::RadialLinear(s) => s.value_for_decimal(decimal),
        }
    }

    fn label_for_value(&self, core: &ScaleCore, value: f64) -> String {
        match self {
            Self::Linear(_) | Self::RadialLinear(_) => crate::linear::label_for_value(core, value),
            Self::Logarithmic(s) => s.label_for_value(core, value),
            Self::Category(s) => s.label_for_value(value),
            Self::Time(s) => s.label_for_value(core, value),
        }
    }
}

/// An axis scale: maps values onto a pixel range and produces ticks and labels.
///
/// Create one with [`create_scale`](crate::create_scale), call [`Scale::update`] with the space
/// the host offers, then [`Scale::place`] with the final bounds. Mapping queries are valid after
/// `update` and reflect the placed bounds after `place`.
#[derive(Clone, Debug)]
pub struct Scale {
    pub(crate) core: ScaleCore,
    pub(crate) variant: ScaleVariant,
}

impl Scale {
    pub(crate) fn from_parts(
        kind: ScaleKind,
        options: ScaleOptions,
        variant: ScaleVariant,
    ) -> Self {
        Self {
            core: ScaleCore::new(kind, options),
            variant,
        }
    }

    /// The scale kind.
    pub fn kind(&self) -> ScaleKind {
        self.core.kind
    }

    /// The options this scale was built with.
    pub fn options(&self) -> &ScaleOptions {
        &self.core.options
    }

    /// Mutable access to the options; changes apply on the next [`Scale::update`].
    pub fn options_mut(&mut self) -> &mut ScaleOptions {
        &mut self.core.options
    }

    /// Options resolved by the last update.
    pub fn resolved_options(&self) -> &ResolvedOptions {
        &self.core.resolved
    }

    /// Reports conflicting options; see [`ScaleOptions::validate`].
    pub fn validate(&self) -> Result<(), ScaleError> {
        self.core.options.validate()
    }

    /// Sets the host labels.
    ///
    /// Category scales use them as categories (dropping labels appended by parsing), time scales
    /// parse them as timestamps and radial scales use them as point labels.
    pub fn set_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.core.labels = labels.into_iter().map(Into::into).collect();
        self.core.labels_revision = self.core.labels_revision.wrapping_add(1);
    }

    /// The host labels.
    pub fn labels(&self) -> &[Arc<str>] {
        &self.core.labels
    }

    /// Whether the axis runs horizontally.
    pub fn is_horizontal(&self) -> bool {
        self.core.is_horizontal()
    }

    /// The domain as `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.core.min, self.core.max)
    }

    /// Ticks kept after autoskip, in axis order.
    pub fn ticks(&self) -> &[Tick] {
        &self.core.ticks
    }

    /// Label rotation in degrees.
    pub fn label_rotation(&self) -> f64 {
        self.core.label_rotation
    }

    /// Every `auto_skip_step`-th generated tick was kept.
    pub fn auto_skip_step(&self) -> usize {
        self.core.auto_skip_step
    }

    /// The axis bounds: sized by the last update, positioned by [`Scale::place`].
    pub fn bounds(&self) -> Rect {
        self.core.bounds
    }

    /// How far the first and last labels overhang the axis ends.
    pub fn padding(&self) -> Insets {
        self.core.padding
    }

    /// Size requested by the last update.
    pub fn size(&self) -> Size {
        self.core.size
    }

    /// Pixel coordinate of decimal 0 (before reversal).
    pub fn pixel_start(&self) -> f64 {
        self.core.start_pixel
    }

    /// Pixel coordinate of decimal 1 (before reversal).
    pub fn pixel_end(&self) -> f64 {
        self.core.start_pixel + self.core.length
    }

    /// The active time unit of time scales.
    pub fn time_unit(&self) -> Option<TimeUnit> {
        match &self.variant {
            ScaleVariant::Time(s) => Some(s.unit()),
            _ => None,
        }
    }

    /// The unit of major ticks on time scales, when majors are enabled.
    pub fn major_unit(&self) -> Option<TimeUnit> {
        match &self.variant {
            ScaleVariant::Time(s) => s.major_unit(),
            _ => None,
        }
    }

    /// Whether a logarithmic scale saw an exact zero during the last update.
    pub fn includes_zero(&self) -> bool {
        match &self.variant {
            ScaleVariant::Logarithmic(s) => s.includes_zero(),
            _ => false,
        }
    }

    /// The label index of category scales.
    pub fn category_map(&self) -> Option<&CategoryIndexMap> {
        match &self.variant {
            ScaleVariant::Category(s) => Some(s.map()),
            _ => None,
        }
    }

    /// The radial geometry of radial scales.
    pub fn radial(&self) -> Option<&RadialScale> {
        match &self.variant {
            ScaleVariant::RadialLinear(s) => Some(s),
            _ => None,
        }
    }

    /// Parses a raw value the way this scale reads data.
    ///
    /// Category scales append unseen labels; logarithmic scales record exact zeros.
    pub fn parse(&mut self, raw: &RawValue) -> ParsedValue {
        self.variant.parse(&self.core, raw)
    }

    /// The extent of `data` combined with explicit and suggested bounds.
    pub fn min_max(&mut self, data: &[&dyn DataSource], can_stack: bool) -> MinMax {
        let Self { core, variant } = self;
        min_max(core, data, can_stack, |raw| variant.parse(core, raw))
    }

    /// Recomputes the domain, ticks, labels and fitted size.
    ///
    /// `max_width` and `max_height` are the space the host offers; `margins` is how far the
    /// axis may extend past its ends into neighbouring boxes. Returns the size the scale
    /// needs. Calling `update` again with the same inputs gives the same result.
    pub fn update(
        &mut self,
        max_width: f64,
        max_height: f64,
        margins: Insets,
        ctx: &UpdateContext<'_>,
    ) -> Size {
        {
            let core = &mut self.core;
            core.generation = core.generation.wrapping_add(1);
            core.max_width = finite_or(max_width, 0.0).max(0.0);
            core.max_height = finite_or(max_height, 0.0).max(0.0);
            core.margins = margins;
            core.ticks.clear();
            core.label_sizes = None;
            core.padding = Insets::ZERO;
            core.label_rotation = 0.0;
            core.auto_skip_step = 1;
            core.set_dimensions();
            let horizontal = core.is_horizontal();
            let length = match core.options.position {
                Position::ChartArea => core.max_width.min(core.max_height),
                _ if horizontal => core.max_width,
                _ => core.max_height,
            };
            core.resolved = core.options.resolve(&ResolveContext { horizontal, length });
        }

        self.variant.begin_update(&self.core);
        self.core.user_min = self.parse_bound(self.core.options.min.clone());
        self.core.user_max = self.parse_bound(self.core.options.max.clone());
        if let (Some(min), Some(max)) = (self.core.user_min, self.core.user_max)
            && min > max
        {
            warn!("explicit min {min} is greater than explicit max {max}; swapping");
            self.core.user_min = Some(max);
            self.core.user_max = Some(min);
        }

        self.variant
            .determine_data_limits(&mut self.core, ctx.data);
        let mut ticks = self.variant.build_ticks(&mut self.core, ctx.measurer);
        self.variant.generate_tick_labels(&self.core, &mut ticks);
        self.core.ticks = ticks;
        self.configure();

        if let ScaleVariant::RadialLinear(radial) = &mut self.variant {
            radial.fit(&self.core, ctx.measurer);
            self.core.size = Size::new(self.core.max_width, self.core.max_height);
            self.configure();
            return self.core.size;
        }

        self.core.compute_label_sizes(ctx.measurer);
        self.core.calculate_label_rotation();
        if self.core.options.display
            && self.core.options.ticks.display
            && self.core.options.ticks.auto_skip
        {
            self.auto_skip(ctx.measurer);
        }

        let (first, last) = self.edge_tick_offsets();
        self.core.fit(first, last);
        self.configure();
        self.core.size
    }

    /// Assigns the final bounds chosen by the host layout and reconfigures the pixel range.
    pub fn place(&mut self, bounds: Rect) {
        self.core.bounds = bounds;
        self.configure();
    }

    /// Maps a value to a pixel coordinate.
    ///
    /// Returns `None` for non-finite values and values outside the scale's value space (such as
    /// negative values on a logarithmic scale). On radial scales this is the distance from the
    /// centre.
    pub fn pixel_for_value(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let decimal = self.variant.decimal_for_value(&self.core, value)?;
        Some(self.pixel_for_decimal(decimal))
    }

    /// Maps a pixel coordinate back to a value.
    pub fn value_for_pixel(&self, pixel: f64) -> Option<f64> {
        if !pixel.is_finite() {
            return None;
        }
        let decimal = self.decimal_for_pixel(pixel);
        self.variant
            .value_for_decimal(&self.core, decimal)
            .filter(|v| v.is_finite())
    }

    /// Pixel coordinate of the tick at `index`.
    pub fn pixel_for_tick(&self, index: usize) -> Option<f64> {
        let tick = self.core.ticks.get(index)?;
        self.pixel_for_value(tick.value)
    }

    /// Maps a fraction of the axis (`0` at the start of the value range) to a pixel.
    pub fn pixel_for_decimal(&self, decimal: f64) -> f64 {
        match &self.variant {
            ScaleVariant::RadialLinear(s) => s.distance_for_decimal(decimal),
            _ => self.core.pixel_for_decimal(decimal),
        }
    }

    /// Maps a pixel to a fraction of the axis.
    pub fn decimal_for_pixel(&self, pixel: f64) -> f64 {
        match &self.variant {
            ScaleVariant::RadialLinear(s) => s.decimal_for_distance(pixel),
            _ => self.core.decimal_for_pixel(pixel),
        }
    }

    /// Formats a value for tooltips and legends.
    pub fn label_for_value(&self, value: f64) -> String {
        self.variant.label_for_value(&self.core, value)
    }

    /// The pixel at which the scale's base (zero, or the nearer end) sits.
    pub fn base_pixel(&self) -> Option<f64> {
        let (min, max) = self.domain();
        let base = if min > 0.0 {
            min
        } else if max < 0.0 {
            max
        } else {
            0.0
        };
        self.pixel_for_value(base)
    }

    /// Centre of the radial drawing area, for radial scales.
    pub fn center(&self) -> Option<Point> {
        self.radial().map(RadialScale::center)
    }

    fn parse_bound(&mut self, bound: Option<Bound>) -> Option<f64> {
        let raw = bound?.to_raw();
        self.variant
            .parse(&self.core, &raw)
            .value()
            .filter(|v| v.is_finite())
    }

    fn configure(&mut self) {
        self.core.configure_pixels();
        self.variant.configure(&mut self.core);
    }

    fn tick_positions(&self) -> Vec<f64> {
        self.core
            .ticks
            .iter()
            .map(|tick| self.pixel_for_value(tick.value).unwrap_or(f64::NAN))
            .collect()
    }

    fn auto_skip(&mut self, measurer: &dyn TextMeasurer) {
        if self.core.ticks.len() < 2 {
            return;
        }
        let positions = self.tick_positions();
        let majors: Vec<usize> = if self.core.options.ticks.major_enabled {
            self.core
                .ticks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.major)
                .map(|(i, _)| i)
                .collect()
        } else {
            Vec::new()
        };
        let input = SkipInput {
            positions: &positions,
            majors: &majors,
            footprint: self.core.tick_footprint(),
            max_ticks: self.core.resolved.max_ticks_limit,
            axis_length: self.core.length.abs(),
            max_length: self.core.max_length,
            offset: self.core.options.offset,
        };
        let skip = autoskip::auto_skip(&input);
        if skip.kept.len() == self.core.ticks.len() {
            return;
        }
        let mut kept = Vec::with_capacity(skip.kept.len());
        let mut old = core::mem::take(&mut self.core.ticks).into_iter().enumerate();
        for index in &skip.kept {
            for (i, tick) in old.by_ref() {
                if i == *index {
                    kept.push(tick);
                    break;
                }
            }
        }
        self.core.ticks = kept;
        self.core.auto_skip_step = skip.step;
        self.core.compute_label_sizes(measurer);
    }

    /// Distance of the first and last tick from the start and end of the axis, in axis order.
    fn edge_tick_offsets(&self) -> (f64, f64) {
        if self.core.ticks.is_empty() {
            return (0.0, 0.0);
        }
        let last_index = self.core.ticks.len() - 1;
        let first = self.pixel_for_tick(0).unwrap_or(self.core.start_pixel);
        let last = self.pixel_for_tick(last_index).unwrap_or(first);
        let (lo, hi) = if first <= last { (first, last) } else { (last, first) };
        if self.core.is_horizontal() {
            (lo - self.core.bounds.x0, self.core.bounds.x1 - hi)
        } else {
            (lo - self.core.bounds.y0, self.core.bounds.y1 - hi)
        }
    }
}
