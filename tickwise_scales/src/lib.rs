// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scales for charts.
//!
//! A [`Scale`] maps data values onto a one-dimensional pixel range and generates the ticks and
//! labels that annotate it:
//! - **Linear** and **logarithmic** scales pick "nice" tick steps.
//! - **Category** scales index string labels.
//! - **Time** and **time series** scales step through calendar units via a [`DateAdapter`].
//! - **Radial linear** scales place values by distance from a centre and lay out point labels.
//!
//! Scales fit themselves into the space a host layout offers: labels are measured through
//! [`tickwise_text::TextMeasurer`], rotated when they collide, and skipped when rotation is not
//! enough. Nothing is drawn here; [`Scale::draw_items`] returns positioned descriptors.
//!
//! ```
//! use kurbo::{Insets, Rect};
//! use tickwise_scales::{
//!     DataSource, Dataset, Position, ScaleKind, UpdateContext, create_scale, default_options,
//! };
//! use tickwise_text::HeuristicTextMeasurer;
//!
//! let options = default_options(ScaleKind::Linear).with_position(Position::Bottom);
//! let mut scale = create_scale(ScaleKind::Linear, options, None).unwrap();
//! let data = Dataset::from_numbers([0.0, 100.0]);
//! let sources: [&dyn DataSource; 1] = [&data];
//! let ctx = UpdateContext::new(&sources, &HeuristicTextMeasurer);
//! let size = scale.update(400.0, 100.0, Insets::ZERO, &ctx);
//! scale.place(Rect::new(0.0, 300.0, 400.0, 300.0 + size.height));
//! assert_eq!(scale.pixel_for_value(0.0), Some(0.0));
//! assert_eq!(scale.pixel_for_value(100.0), Some(400.0));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod autoskip;
mod category;
mod data;
mod draw;
mod error;
mod factory;
mod fit;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod linear;
mod logarithmic;
mod math;
mod options;
mod radial;
mod scale;
mod time;

pub use category::CategoryIndexMap;
pub use data::{DataSource, Dataset, MinMax, ParsedValue, RawValue};
pub use draw::{
    AxisItems, GridRing, LabelItem, StrokeStyle, TextAnchor, TextBaseline, TickLineItem,
};
pub use error::ScaleError;
pub use factory::{REGISTRY, ScaleEntry, ScaleKind, create_scale, default_options};
pub use linear::{LinearTickParams, MAX_TICKS, generate_linear_ticks};
pub use logarithmic::{LogTick, generate_log_ticks};
pub use math::{
    almost_equals, almost_whole, decimal_places, factorize, finite_or, int16_range, limit_value,
    log10, nice_num, normalize_angle,
};
pub use options::{
    Bound, Bounds, Contextual, Grace, GridOptions, NumberFormat, PointLabelOptions, Position,
    ResolveContext, ResolvedOptions, ScaleOptions, TickAlign, TickOptions, TickSource,
    TimeOptions, TitleOptions,
};
pub use radial::{PointLabelItem, RadialScale, angle_for_index};
pub use scale::{Scale, Tick, UpdateContext};
pub use time::{
    DateAdapter, DisplayFormats, TimeUnit, determine_major_unit, determine_unit_for_auto_ticks,
    determine_unit_for_formatting,
};
