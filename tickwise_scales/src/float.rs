// Copyright 2025 the Tickwise Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `libm` stand-ins for the `f64` methods `core` lacks.
//!
//! Only the methods the scale code calls are provided. With `std` enabled this module is empty
//! and the inherent methods are used instead.

/// Rounding, logarithms and trigonometry for tick math in `no_std` builds.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn log10(self) -> Self;
    fn powf(self, n: Self) -> Self;
    fn powi(self, n: i32) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    #[inline]
    fn floor(self) -> Self {
        libm::floor(self)
    }

    #[inline]
    fn ceil(self) -> Self {
        libm::ceil(self)
    }

    #[inline]
    fn round(self) -> Self {
        libm::round(self)
    }

    #[inline]
    fn log10(self) -> Self {
        libm::log10(self)
    }

    #[inline]
    fn powf(self, n: Self) -> Self {
        libm::pow(self, n)
    }

    /// Powers of ten drive every tick spacing, so this goes through `pow` rather than repeated
    /// multiplication to keep `10^-k` within one ulp.
    #[inline]
    fn powi(self, n: i32) -> Self {
        libm::pow(self, f64::from(n))
    }

    #[inline]
    fn sin(self) -> Self {
        libm::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        libm::cos(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("tickwise_scales requires either the `std` or `libm` feature");
