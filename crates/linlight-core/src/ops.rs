//! Reductions and element-wise arithmetic.
//!
//! All mutators run row-parallel and validate their operands first, so an
//! error never leaves a half-updated buffer behind.
//!
//! # Plane Pairing
//!
//! Binary operations accept operands with the same plane layout (applied per
//! sample) and one special pair: an RGB receiver with a gray operand, where
//! the gray value at each pixel is broadcast onto all three channels.
//!
//! ```rust
//! use linlight_core::{LinearImageBuffer, Planes};
//!
//! let mut rgb = LinearImageBuffer::new(2, 2, Planes::Rgb).unwrap();
//! rgb.add_scalar(0.25);
//! let mut gray = LinearImageBuffer::new(2, 2, Planes::Gray).unwrap();
//! gray.add_scalar(0.5);
//!
//! rgb.for_each_with(&gray, |a, b| a + b).unwrap();
//! assert!(rgb.samples().iter().all(|&v| v == 0.75));
//! ```

use crate::{Error, LinearImageBuffer, Planes, Result};
use rayon::prelude::*;
use tracing::trace;

/// How the samples of two operands line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pairing {
    /// Same layout, sample `i` pairs with sample `i`.
    Matched,
    /// RGB receiver, gray operand: channel `c` of pixel `x` pairs with gray pixel `x`.
    Broadcast,
}

fn pairing(this: Planes, other: Planes) -> Result<Pairing> {
    match (this, other) {
        (Planes::Gray, Planes::Gray) | (Planes::Rgb, Planes::Rgb) | (Planes::Cmyk, Planes::Cmyk) => {
            Ok(Pairing::Matched)
        }
        (Planes::Rgb, Planes::Gray) => Ok(Pairing::Broadcast),
        (Planes::Gray, _) | (Planes::Rgb, Planes::Cmyk) | (Planes::Cmyk, _) => {
            Err(Error::incompatible_planes(this, other))
        }
    }
}

/// `min` that propagates NaN instead of skipping it.
#[inline]
fn nan_min(acc: f32, v: f32) -> f32 {
    if v < acc || v.is_nan() { v } else { acc }
}

/// `max` that propagates NaN instead of skipping it.
#[inline]
fn nan_max(acc: f32, v: f32) -> f32 {
    if v > acc || v.is_nan() { v } else { acc }
}

impl LinearImageBuffer {
    /// Smallest sample, or `+inf` for an empty buffer.
    ///
    /// A NaN sample makes the result NaN.
    pub fn min(&self) -> f32 {
        trace!(stride = self.stride(), height = self.height(), "min");
        self.samples().iter().copied().fold(f32::INFINITY, nan_min)
    }

    /// Smallest and largest sample in one pass.
    ///
    /// An empty buffer yields `(+inf, -inf)`. A NaN sample makes both
    /// results NaN.
    pub fn min_max(&self) -> (f32, f32) {
        trace!(stride = self.stride(), height = self.height(), "min_max");
        self.samples()
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (nan_min(lo, v), nan_max(hi, v)))
    }

    /// Overwrites every sample with `op(x, y)`, `x` being the column within
    /// the stride.
    pub fn for_each_position<F>(&mut self, op: F)
    where
        F: Fn(usize, usize) -> f32 + Sync,
    {
        trace!(stride = self.stride(), height = self.height(), "for_each_position");
        self.par_rows_mut().for_each(|(y, row)| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = op(x, y);
            }
        });
    }

    /// Overwrites every sample with `op(sample)`.
    pub fn for_each_value<F>(&mut self, op: F)
    where
        F: Fn(f32) -> f32 + Sync,
    {
        trace!(stride = self.stride(), height = self.height(), "for_each_value");
        self.par_rows_mut().for_each(|(_, row)| {
            for v in row.iter_mut() {
                *v = op(*v);
            }
        });
    }

    /// Overwrites every sample with `op(sample, other_sample)`.
    ///
    /// With equal plane layouts samples pair up one to one. With an RGB
    /// receiver and a gray `other`, each of the three channels of a pixel
    /// pairs with the gray value of the same pixel.
    ///
    /// # Errors
    ///
    /// - [`Error::IncompatiblePlanes`] for any other layout pair
    /// - [`Error::DimensionMismatch`] if the pixel grids differ
    pub fn for_each_with<F>(&mut self, other: &LinearImageBuffer, op: F) -> Result<()>
    where
        F: Fn(f32, f32) -> f32 + Sync,
    {
        trace!(this = %self.planes(), other = %other.planes(), width = self.width(), height = self.height(), "for_each_with");
        let pairing = pairing(self.planes(), other.planes())?;
        self.check_same_grid(other)?;

        let other_stride = other.stride().max(1);
        let rows = self.par_rows_mut().zip(other.samples().par_chunks(other_stride));
        match pairing {
            Pairing::Matched => rows.for_each(|((_, row), other_row)| {
                for (a, &b) in row.iter_mut().zip(other_row) {
                    *a = op(*a, b);
                }
            }),
            Pairing::Broadcast => rows.for_each(|((_, row), other_row)| {
                for (px, &b) in row.chunks_exact_mut(3).zip(other_row) {
                    px[0] = op(px[0], b);
                    px[1] = op(px[1], b);
                    px[2] = op(px[2], b);
                }
            }),
        }
        Ok(())
    }

    /// Adds `value` to every sample.
    pub fn add_scalar(&mut self, value: f32) {
        trace!(value, stride = self.stride(), height = self.height(), "add_scalar");
        self.par_rows_mut().for_each(|(_, row)| {
            for v in row.iter_mut() {
                *v += value;
            }
        });
    }

    /// Adds `other` sample by sample.
    ///
    /// # Errors
    ///
    /// - [`Error::IncompatiblePlanes`] unless both buffers have the same layout
    /// - [`Error::DimensionMismatch`] if the pixel grids differ
    pub fn add(&mut self, other: &LinearImageBuffer) -> Result<()> {
        trace!(this = %self.planes(), other = %other.planes(), "add");
        if self.planes() != other.planes() {
            return Err(Error::incompatible_planes(self.planes(), other.planes()));
        }
        self.check_same_grid(other)?;

        let stride = self.stride().max(1);
        self.par_rows_mut()
            .zip(other.samples().par_chunks(stride))
            .for_each(|((_, row), other_row)| {
                for (a, &b) in row.iter_mut().zip(other_row) {
                    *a += b;
                }
            });
        Ok(())
    }

    /// Computes `self = value - self` in place.
    ///
    /// This is a raw whole-buffer operation: only stride and height have to
    /// match, plane layouts are not consulted. Small buffers run on a single
    /// task (see [`PARALLEL_MIN_SAMPLES`](crate::PARALLEL_MIN_SAMPLES)); the
    /// result does not depend on how rows were split.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if stride or height differ.
    pub fn subtract_from(&mut self, value: &LinearImageBuffer) -> Result<()> {
        trace!(stride = self.stride(), height = self.height(), "subtract_from");
        if self.stride() != value.stride() || self.height() != value.height() {
            return Err(Error::dimension_mismatch(
                (self.stride(), self.height()),
                (value.stride(), value.height()),
            ));
        }

        let stride = self.stride().max(1);
        self.par_rows_mut()
            .zip(value.samples().par_chunks(stride))
            .for_each(|((_, row), value_row)| {
                for (a, &v) in row.iter_mut().zip(value_row) {
                    *a = v - *a;
                }
            });
        Ok(())
    }

    fn check_same_grid(&self, other: &LinearImageBuffer) -> Result<()> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::dimension_mismatch(
                (self.stride(), self.height()),
                (other.stride(), other.height()),
            ));
        }
        Ok(())
    }
}
