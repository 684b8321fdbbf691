// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropping tick labels that would overlap.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::math::{factorize, to_usize, usize_to_f64};

/// Inputs to [`auto_skip`].
#[derive(Debug)]
pub(crate) struct SkipInput<'a> {
    /// Pixel position of every tick, in tick order.
    pub(crate) positions: &'a [f64],
    /// Indices of major ticks, ascending. Empty when majors are disabled.
    pub(crate) majors: &'a [usize],
    /// Space one label needs along the axis.
    pub(crate) footprint: f64,
    /// Configured tick cap.
    pub(crate) max_ticks: Option<usize>,
    /// Length of the axis.
    pub(crate) axis_length: f64,
    /// Length of the axis including the margins it may overhang into.
    pub(crate) max_length: f64,
    /// Whether the scale pads half a step at both ends.
    pub(crate) offset: bool,
}

/// Which ticks survive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Skip {
    /// Indices of kept ticks, ascending.
    pub(crate) kept: Vec<usize>,
    /// Every `step`-th tick was kept.
    pub(crate) step: usize,
}

/// Chooses the ticks to keep.
///
/// Without majors this keeps every `k`-th tick for the smallest `k` at which no two kept labels
/// overlap (and the tick cap holds), starting at the first tick. The last tick is kept too when
/// it fits, possibly in place of the kept tick just before it.
///
/// With majors, major ticks are kept preferentially and minor ticks are thinned evenly between
/// them.
pub(crate) fn auto_skip(input: &SkipInput<'_>) -> Skip {
    let n = input.positions.len();
    if n < 2 {
        return Skip {
            kept: (0..n).collect(),
            step: 1,
        };
    }
    let mut step = minimal_step(input.positions, input.footprint);
    if let Some(limit) = input.max_ticks.filter(|l| *l > 0) {
        step = step.max(n.div_ceil(limit));
    }

    if input.majors.is_empty() {
        return Skip {
            kept: skip_uniform(input.positions, step, input.footprint),
            step,
        };
    }

    let ticks_limit = ticks_limit(input).min(n.div_ceil(step)).max(1);
    let majors = input.majors;
    if majors.len() > ticks_limit {
        let spacing = majors.len().div_ceil(ticks_limit).max(1);
        return Skip {
            kept: majors.iter().copied().step_by(spacing).collect(),
            step: spacing,
        };
    }

    let spacing = calculate_spacing(majors, n, ticks_limit).max(usize_to_f64(step));
    let first = majors[0];
    let last = majors[majors.len() - 1];
    let avg_major_spacing = if majors.len() > 1 {
        Some(to_usize(usize_to_f64(last - first) / usize_to_f64(majors.len() - 1)))
    } else {
        None
    };
    let mut kept = Vec::new();
    let signed = |i: usize| i64::try_from(i).unwrap_or(i64::MAX);
    let lead = avg_major_spacing.map_or(0, |avg| signed(first) - signed(avg));
    skip_between(&mut kept, n, spacing, lead, first);
    for pair in majors.windows(2) {
        skip_between(&mut kept, n, spacing, signed(pair[0]), pair[1]);
    }
    let tail = avg_major_spacing.map_or(n, |avg| last + avg);
    skip_between(&mut kept, n, spacing, signed(last), tail.min(n));
    if !kept.contains(&last) {
        kept.push(last);
    }
    kept.sort_unstable();
    kept.dedup();
    Skip {
        kept,
        step: to_usize(spacing.ceil()).max(1),
    }
}

/// The smallest `k ≥ 1` for which ticks `0, k, 2k, …` are pairwise at least `footprint` apart.
pub(crate) fn minimal_step(positions: &[f64], footprint: f64) -> usize {
    let n = positions.len();
    if n < 2 || !(footprint > 0.0) {
        return 1;
    }
    'candidates: for k in 1..n {
        let mut i = 0;
        while i + k < n {
            let gap = (positions[i + k] - positions[i]).abs();
            if !(gap >= footprint) {
                continue 'candidates;
            }
            i += k;
        }
        return k;
    }
    n
}

fn skip_uniform(positions: &[f64], step: usize, footprint: f64) -> Vec<usize> {
    let n = positions.len();
    let mut kept: Vec<usize> = (0..n).step_by(step.max(1)).collect();
    let last = n - 1;
    let Some(&tail) = kept.last() else {
        return kept;
    };
    if tail == last {
        return kept;
    }
    let fits_after = |i: usize| (positions[last] - positions[i]).abs() >= footprint;
    if fits_after(tail) {
        kept.push(last);
    } else if kept.len() >= 2 && fits_after(kept[kept.len() - 2]) {
        let len = kept.len();
        kept[len - 1] = last;
    }
    kept
}

fn ticks_limit(input: &SkipInput<'_>) -> usize {
    if !(input.footprint > 0.0) {
        return input.positions.len();
    }
    let by_scale = input.axis_length / input.footprint + if input.offset { 0.0 } else { 1.0 };
    let by_chart = input.max_length / input.footprint;
    let determined = to_usize(by_scale.min(by_chart).floor());
    match input.max_ticks {
        Some(limit) if limit > 0 => limit.min(determined),
        _ => determined,
    }
}

/// Prefers a spacing that divides the (even) gap between majors.
fn calculate_spacing(majors: &[usize], len: usize, ticks_limit: usize) -> f64 {
    let spacing = usize_to_f64(len) / usize_to_f64(ticks_limit.max(1));
    let Some(even) = even_spacing(majors) else {
        return spacing.max(1.0);
    };
    let factors = factorize(even);
    factors
        .into_iter()
        .map(usize_to_f64)
        .find(|factor| *factor > spacing)
        .unwrap_or(spacing.max(1.0))
}

fn even_spacing(indices: &[usize]) -> Option<usize> {
    if indices.len() < 2 {
        return None;
    }
    let diff = indices[1] - indices[0];
    indices
        .windows(2)
        .all(|w| w[1] - w[0] == diff)
        .then_some(diff)
}

/// Keeps ticks in `[start, end)` at `spacing` intervals anchored at `start`.
///
/// `start` may be negative so that the lead-in before the first major keeps the same phase as
/// the segments between majors. The spacing is stretched so that it divides the segment evenly.
fn skip_between(kept: &mut Vec<usize>, len: usize, spacing: f64, start: i64, end: usize) {
    let end = end.min(len);
    #[allow(clippy::cast_precision_loss, reason = "tick indices stay far below 2^52")]
    let start = start as f64;
    let end_f = usize_to_f64(end);
    if start >= end_f {
        return;
    }
    let mut spacing = spacing.ceil().max(1.0);
    let segment = end_f - start;
    let slots = (segment / spacing).floor();
    if slots >= 1.0 {
        spacing = segment / slots;
    }
    let mut count = 0.0;
    loop {
        let next = (start + count * spacing).round();
        if next >= end_f {
            break;
        }
        if next >= 0.0 {
            kept.push(to_usize(next));
        }
        count += 1.0;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn evenly(n: usize, gap: f64) -> Vec<f64> {
        (0..n).map(|i| usize_to_f64(i) * gap).collect()
    }

    fn input<'a>(positions: &'a [f64], majors: &'a [usize], footprint: f64) -> SkipInput<'a> {
        SkipInput {
            positions,
            majors,
            footprint,
            max_ticks: None,
            axis_length: positions.last().copied().unwrap_or(0.0),
            max_length: positions.last().copied().unwrap_or(0.0),
            offset: false,
        }
    }

    #[test]
    fn keeps_everything_when_labels_fit() {
        let p = evenly(5, 50.0);
        let skip = auto_skip(&input(&p, &[], 40.0));
        assert_eq!(skip.step, 1);
        assert_eq!(skip.kept, alloc::vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn picks_the_smallest_non_overlapping_step() {
        let p = evenly(10, 10.0);
        let skip = auto_skip(&input(&p, &[], 25.0));
        assert_eq!(skip.step, 3);
        for pair in skip.kept.windows(2) {
            assert!(p[pair[1]] - p[pair[0]] >= 25.0);
        }
        // A smaller step would overlap.
        assert!(p[2] - p[0] < 25.0);
    }

    #[test]
    fn last_tick_replaces_a_crowding_neighbour() {
        // Step 3 keeps 0, 3, 6, 9 exactly for 10 ticks; with 9 ticks it keeps 0, 3, 6 and 8
        // does not fit after 6, so 8 replaces 6.
        let p = evenly(9, 10.0);
        let skip = auto_skip(&input(&p, &[], 25.0));
        assert_eq!(skip.kept, alloc::vec![0, 3, 8]);
    }

    #[test]
    fn tick_cap_forces_larger_steps() {
        let p = evenly(20, 100.0);
        let mut inp = input(&p, &[], 10.0);
        inp.max_ticks = Some(5);
        let skip = auto_skip(&inp);
        assert_eq!(skip.step, 4);
    }

    #[test]
    fn majors_are_kept() {
        // Majors every 6 ticks; labels need just over two tick gaps.
        let p = evenly(25, 10.0);
        let majors = [0, 6, 12, 18, 24];
        let skip = auto_skip(&input(&p, &majors, 21.0));
        for m in majors {
            assert!(skip.kept.contains(&m), "major {m} dropped: {:?}", skip.kept);
        }
        assert!(skip.kept.len() < p.len());
    }

    #[test]
    fn minimal_step_for_overlapping_everything() {
        let p = evenly(3, 1.0);
        assert_eq!(minimal_step(&p, 100.0), 3);
    }
}
