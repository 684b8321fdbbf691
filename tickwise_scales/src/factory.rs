// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale kinds and their defaults.

extern crate alloc;

use alloc::string::ToString;
use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;

use crate::category::CategoryScale;
use crate::error::ScaleError;
use crate::linear::LinearScale;
use crate::logarithmic::LogScale;
use crate::options::{Bounds, Position, ScaleOptions};
use crate::radial::RadialScale;
use crate::scale::{Scale, ScaleVariant};
use crate::time::{DateAdapter, Distribution, TimeScale};

/// The registered scale kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Linear numeric axis.
    Linear,
    /// Base-10 logarithmic axis.
    Logarithmic,
    /// Discrete labels.
    Category,
    /// Calendar time, proportional to elapsed time.
    Time,
    /// Calendar time with data points spaced equally.
    TimeSeries,
    /// Linear distance from the centre of a radial chart.
    RadialLinear,
}

impl ScaleKind {
    /// Every kind, in registry order.
    pub const ALL: [Self; 6] = [
        Self::Linear,
        Self::Logarithmic,
        Self::Category,
        Self::Time,
        Self::TimeSeries,
        Self::RadialLinear,
    ];

    /// The id string hosts use to name this kind.
    pub fn id(self) -> &'static str {
        entry(self).id
    }

    /// The position used when options leave it at the default.
    pub fn default_position(self) -> Position {
        entry(self).position
    }

    /// Whether this kind needs a [`DateAdapter`].
    pub fn needs_date_adapter(self) -> bool {
        matches!(self, Self::Time | Self::TimeSeries)
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ScaleKind {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|e| e.id == s)
            .map(|e| e.kind)
            .ok_or_else(|| ScaleError::UnknownKind(s.to_string()))
    }
}

/// A row of the scale registry.
#[derive(Clone, Copy, Debug)]
pub struct ScaleEntry {
    /// The kind.
    pub kind: ScaleKind,
    /// Id string.
    pub id: &'static str,
    /// Builds the kind's default options.
    pub defaults: fn() -> ScaleOptions,
    /// Default axis position.
    pub position: Position,
}

/// The static scale registry, one entry per [`ScaleKind`] in [`ScaleKind::ALL`] order.
pub static REGISTRY: [ScaleEntry; 6] = [
    ScaleEntry {
        kind: ScaleKind::Linear,
        id: "linear",
        defaults: ScaleOptions::default,
        position: Position::Left,
    },
    ScaleEntry {
        kind: ScaleKind::Logarithmic,
        id: "logarithmic",
        defaults: log_defaults,
        position: Position::Left,
    },
    ScaleEntry {
        kind: ScaleKind::Category,
        id: "category",
        defaults: ScaleOptions::default,
        position: Position::Bottom,
    },
    ScaleEntry {
        kind: ScaleKind::Time,
        id: "time",
        defaults: time_defaults,
        position: Position::Bottom,
    },
    ScaleEntry {
        kind: ScaleKind::TimeSeries,
        id: "timeseries",
        defaults: time_defaults,
        position: Position::Bottom,
    },
    ScaleEntry {
        kind: ScaleKind::RadialLinear,
        id: "radialLinear",
        defaults: radial_defaults,
        position: Position::ChartArea,
    },
];

fn entry(kind: ScaleKind) -> &'static ScaleEntry {
    match kind {
        ScaleKind::Linear => &REGISTRY[0],
        ScaleKind::Logarithmic => &REGISTRY[1],
        ScaleKind::Category => &REGISTRY[2],
        ScaleKind::Time => &REGISTRY[3],
        ScaleKind::TimeSeries => &REGISTRY[4],
        ScaleKind::RadialLinear => &REGISTRY[5],
    }
}

fn log_defaults() -> ScaleOptions {
    let mut options = ScaleOptions::default();
    options.ticks.major_enabled = true;
    options
}

fn time_defaults() -> ScaleOptions {
    ScaleOptions::default().with_bounds(Bounds::Data)
}

fn radial_defaults() -> ScaleOptions {
    let mut options = ScaleOptions::default();
    options.ticks.show_label_backdrop = true;
    options
}

/// Default options for `kind`, including its default position.
pub fn default_options(kind: ScaleKind) -> ScaleOptions {
    let entry = entry(kind);
    (entry.defaults)().with_position(entry.position)
}

/// Creates a scale of `kind`.
///
/// Time kinds need a date adapter; other kinds ignore `adapter`.
pub fn create_scale(
    kind: ScaleKind,
    options: ScaleOptions,
    adapter: Option<Arc<dyn DateAdapter>>,
) -> Result<Scale, ScaleError> {
    let variant = match kind {
        ScaleKind::Linear => ScaleVariant::Linear(LinearScale),
        ScaleKind::Logarithmic => ScaleVariant::Logarithmic(LogScale::default()),
        ScaleKind::Category => ScaleVariant::Category(CategoryScale::default()),
        ScaleKind::Time | ScaleKind::TimeSeries => {
            let adapter = adapter.ok_or(ScaleError::MissingDateAdapter(kind.id()))?;
            let distribution = if kind == ScaleKind::TimeSeries {
                Distribution::Series
            } else {
                Distribution::Linear
            };
            ScaleVariant::Time(TimeScale::new(adapter, distribution))
        }
        ScaleKind::RadialLinear => ScaleVariant::RadialLinear(RadialScale::default()),
    };
    Ok(Scale::from_parts(kind, options, variant))
}
