// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label measurement, rotation and axis thickness.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;
use kurbo::{Insets, Size};
use log::debug;
use tickwise_text::{BlockSize, TextMeasurer, TextStyle, measure_block};

use crate::math::{to_usize, usize_to_f64};
use crate::options::TickAlign;
use crate::scale::ScaleCore;

/// Extra room a horizontal label needs beyond its own width before rotation kicks in.
const MIN_LABEL_GAP: f64 = 6.0;

/// Label extents memoized for one update pass.
///
/// Entries are dropped when the generation counter or the font changes, so measurements never
/// outlive the update that made them.
#[derive(Clone, Debug, Default)]
pub(crate) struct LabelSizeCache {
    generation: u64,
    font: Option<TextStyle>,
    entries: HashMap<String, BlockSize>,
}

impl LabelSizeCache {
    pub(crate) fn measure(
        &mut self,
        generation: u64,
        measurer: &dyn TextMeasurer,
        text: &str,
        font: &TextStyle,
    ) -> BlockSize {
        if self.generation != generation || self.font.as_ref() != Some(font) {
            self.entries.clear();
            self.generation = generation;
            self.font = Some(font.clone());
        }
        if let Some(size) = self.entries.get(text) {
            return *size;
        }
        let size = measure_block(measurer, text, font);
        self.entries.insert(text.into(), size);
        size
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Extents of the current tick labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LabelSizes {
    pub(crate) first: BlockSize,
    pub(crate) last: BlockSize,
    pub(crate) widest: BlockSize,
    pub(crate) highest: BlockSize,
}

/// The length along the axis a label occupies when rotated by `radians`.
///
/// Along a horizontal axis a label of width `w` and height `h` needs `w / cos θ` until it is
/// steep enough that its height governs, `h / sin θ`. Vertical axes swap the roles.
pub(crate) fn label_footprint(width: f64, height: f64, radians: f64, horizontal: bool) -> f64 {
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let (along, across) = if horizontal {
        (width, height)
    } else {
        (height, width)
    };
    let by_along = if cos > 1e-9 { along / cos } else { f64::INFINITY };
    let by_across = if sin > 1e-9 { across / sin } else { f64::INFINITY };
    by_along.min(by_across)
}

/// Evenly spaced sample of `len` indices, always including the first and last.
fn sample_indices(len: usize, sample: usize) -> Vec<usize> {
    if sample >= len || sample < 2 {
        return (0..len).collect();
    }
    let step = usize_to_f64(len - 1) / usize_to_f64(sample - 1);
    let mut out: Vec<usize> = (0..sample)
        .map(|i| to_usize(usize_to_f64(i) * step).min(len - 1))
        .collect();
    out.dedup();
    out
}

impl ScaleCore {
    /// Measures the tick labels (or a sample of them) with the resolved tick font.
    pub(crate) fn compute_label_sizes(&mut self, measurer: &dyn TextMeasurer) {
        let len = self.ticks.len();
        if len == 0 {
            self.label_sizes = Some(LabelSizes::default());
            return;
        }
        let indices = match self.options.ticks.sample_size {
            Some(sample) if sample < len => {
                debug!("measuring {sample} of {len} tick labels");
                sample_indices(len, sample)
            }
            _ => (0..len).collect(),
        };
        let mut sizes = LabelSizes::default();
        let mut first = None;
        let mut last = BlockSize::default();
        for i in indices {
            let label = core::mem::take(&mut self.ticks[i].label);
            let size = self.measure_label(measurer, &label);
            self.ticks[i].label = label;
            if size.width > sizes.widest.width {
                sizes.widest = size;
            }
            if size.height > sizes.highest.height {
                sizes.highest = size;
            }
            first.get_or_insert(size);
            last = size;
        }
        sizes.first = first.unwrap_or_default();
        sizes.last = last;
        self.label_sizes = Some(sizes);
    }

    /// Finds the smallest rotation, in whole degrees from `min_rotation`, at which the widest
    /// label fits its share of the axis.
    ///
    /// Rotation stops early when tilting further would make the axis taller than allowed.
    pub(crate) fn calculate_label_rotation(&mut self) {
        let min_rotation = self.resolved.min_rotation;
        let max_rotation = self.resolved.max_rotation;
        let num_ticks = match self.resolved.max_ticks_limit {
            Some(limit) => limit.min(self.ticks.len()),
            None => self.ticks.len(),
        };
        self.label_rotation = min_rotation;
        if !self.options.display
            || !self.options.ticks.display
            || min_rotation >= max_rotation
            || num_ticks <= 1
            || !self.is_horizontal()
        {
            return;
        }
        let Some(sizes) = &self.label_sizes else {
            return;
        };
        let width = sizes.widest.width;
        let height = sizes.highest.height;
        let slots = if self.options.offset {
            num_ticks
        } else {
            num_ticks - 1
        };
        let tick_width = self.max_width / usize_to_f64(slots.max(1));
        let max_label_height = self.max_height
            - self.resolved.tick_length
            - 2.0 * self.options.ticks.padding
            - self.resolved.title_height;

        let mut rotation = min_rotation;
        while rotation < max_rotation {
            let footprint = label_footprint(width, height, rotation.to_radians(), true);
            if footprint + MIN_LABEL_GAP <= tick_width {
                break;
            }
            let next = (rotation + 1.0).min(max_rotation);
            let rad = next.to_radians();
            let rotated_height = width * rad.sin().abs() + height * rad.cos().abs();
            if rotated_height > max_label_height {
                break;
            }
            rotation = next;
        }
        self.label_rotation = rotation;
    }

    /// Space one label needs along the axis at the current rotation, plus skip padding.
    pub(crate) fn tick_footprint(&self) -> f64 {
        let Some(sizes) = &self.label_sizes else {
            return 0.0;
        };
        let padding = self.options.ticks.auto_skip_padding;
        label_footprint(
            sizes.widest.width + padding,
            sizes.highest.height + padding,
            self.label_rotation.to_radians(),
            self.is_horizontal(),
        )
    }

    /// Computes the axis thickness and the overhang padding of the outermost labels.
    ///
    /// `first_offset` and `last_offset` are how far the first and last ticks sit inside the
    /// axis ends.
    pub(crate) fn fit(&mut self, first_offset: f64, last_offset: f64) {
        let horizontal = self.is_horizontal();
        let mut size = if horizontal {
            Size::new(self.max_width, 0.0)
        } else {
            Size::new(0.0, self.max_height)
        };
        self.padding = Insets::ZERO;

        if self.options.display {
            let fixed = self.resolved.tick_length + self.resolved.title_height;
            if horizontal {
                size.height = fixed;
            } else {
                size.width = fixed;
            }
            if self.options.ticks.display && !self.ticks.is_empty() {
                let sizes = self.label_sizes.clone().unwrap_or_default();
                let tick_padding = 2.0 * self.options.ticks.padding;
                let rad = self.label_rotation.to_radians();
                let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
                let mirror = self.options.ticks.mirror;
                if horizontal {
                    let label_height = if mirror {
                        0.0
                    } else {
                        sin * sizes.widest.width + cos * sizes.highest.height
                    };
                    size.height = self.max_height.min(size.height + label_height + tick_padding);
                } else {
                    let label_width = if mirror {
                        0.0
                    } else {
                        cos * sizes.widest.width + sin * sizes.highest.height
                    };
                    size.width = self.max_width.min(size.width + label_width + tick_padding);
                }
                self.calculate_padding(&sizes, sin, cos, first_offset, last_offset);
            }
        }

        self.size = size;
        let origin = self.bounds.origin();
        self.bounds = kurbo::Rect::from_origin_size(origin, size);
    }

    fn calculate_padding(
        &mut self,
        sizes: &LabelSizes,
        sin: f64,
        cos: f64,
        first_offset: f64,
        last_offset: f64,
    ) {
        let align = self.options.ticks.align;
        let padding = self.options.ticks.padding;
        let rotated = self.label_rotation != 0.0;
        let labels_below = self.options.position != crate::options::Position::Top;

        if self.is_horizontal() {
            let (mut left, mut right) = if rotated {
                if labels_below {
                    (cos * sizes.first.width, sin * sizes.last.height)
                } else {
                    (sin * sizes.first.height, cos * sizes.last.width)
                }
            } else {
                match align {
                    TickAlign::Start => (0.0, sizes.last.width),
                    TickAlign::End => (sizes.first.width, 0.0),
                    TickAlign::Inner => (0.0, 0.0),
                    TickAlign::Center => (sizes.first.width / 2.0, sizes.last.width / 2.0),
                }
            };
            left = (left - first_offset + padding).max(0.0);
            right = (right - last_offset + padding).max(0.0);
            self.padding = Insets::new(left, 0.0, right, 0.0);
        } else {
            let (mut top, mut bottom) = match align {
                TickAlign::Start => (0.0, sizes.first.height),
                TickAlign::End => (sizes.last.height, 0.0),
                TickAlign::Inner => (0.0, 0.0),
                TickAlign::Center => (sizes.last.height / 2.0, sizes.first.height / 2.0),
            };
            // Vertical axes run bottom to top: the first label sits at the bottom edge.
            top = (top - first_offset + padding / 2.0).max(0.0);
            bottom = (bottom - last_offset + padding / 2.0).max(0.0);
            self.padding = Insets::new(0.0, top, 0.0, bottom);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use float_cmp::assert_approx_eq;
    use tickwise_text::FixedAdvanceMeasurer;

    #[test]
    fn footprint_at_zero_is_the_label_width() {
        assert_approx_eq!(f64, label_footprint(40.0, 12.0, 0.0, true), 40.0);
        assert_approx_eq!(f64, label_footprint(40.0, 12.0, 0.0, false), 12.0);
    }

    #[test]
    fn footprint_at_right_angle_is_the_label_height() {
        let rad = 90_f64.to_radians();
        assert_approx_eq!(f64, label_footprint(40.0, 12.0, rad, true), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn footprint_shrinks_with_rotation() {
        let a = label_footprint(60.0, 12.0, 0.0, true);
        let b = label_footprint(60.0, 12.0, 45_f64.to_radians(), true);
        assert!(b < a);
    }

    #[test]
    fn cache_reuses_measurements_within_a_generation() {
        let mut cache = LabelSizeCache::default();
        let m = FixedAdvanceMeasurer { glyph_advance: 5.0 };
        let font = TextStyle::new(10.0);
        let a = cache.measure(1, &m, "abc", &font);
        let b = cache.measure(1, &m, "abc", &font);
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        cache.measure(2, &m, "x", &font);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn sample_keeps_both_ends() {
        let s = sample_indices(101, 5);
        assert_eq!(s.first(), Some(&0));
        assert_eq!(s.last(), Some(&100));
        assert_eq!(s.len(), 5);
        assert_eq!(sample_indices(3, 10), alloc::vec![0, 1, 2]);
    }
}
