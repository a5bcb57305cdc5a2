//! The linear-light sample buffer.
//!
//! # Memory Layout
//!
//! Samples are `f32`, row-major, top-to-bottom, with planes interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0, stride = width * 3
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! Coordinates in this crate's sample-level APIs (`get`, `set`, indexing,
//! [`pixel_safe`](LinearImageBuffer::pixel_safe)) are `(column, row)` where the
//! column runs over the whole stride, not over pixels.
//!
//! # Parallelism
//!
//! Whole-buffer operations hand each rayon task one or more complete rows
//! (`par_chunks_mut(stride)`), so no two tasks ever borrow the same samples.
//! Rows are grouped so every task covers at least [`PARALLEL_MIN_SAMPLES`]
//! samples, which keeps small buffers on a single task.

use crate::{Error, Planes, Result};
use rayon::prelude::*;
use std::fmt;
use std::ops::{Index, IndexMut};
use tracing::trace;

/// Minimum number of samples one parallel task processes.
pub const PARALLEL_MIN_SAMPLES: usize = 10_000;

/// Row-major `f32` image in linear light.
///
/// Values are conventionally in `[0, 1]` but are never clamped except when
/// re-encoding to a device format.
///
/// # Example
///
/// ```rust
/// use linlight_core::{LinearImageBuffer, Planes};
///
/// let mut buf = LinearImageBuffer::new(4, 2, Planes::Rgb).unwrap();
/// assert_eq!(buf.stride(), 12);
/// buf.add_scalar(0.25);
/// assert_eq!(buf.get(11, 1), 0.25);
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct LinearImageBuffer {
    width: usize,
    height: usize,
    planes: Planes,
    samples: Vec<f32>,
}

impl LinearImageBuffer {
    /// Creates a zero-sized buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero.
    pub fn new(width: usize, height: usize, planes: Planes) -> Result<Self> {
        let mut buf = Self::empty();
        buf.resize(width, height, planes)?;
        Ok(buf)
    }

    /// Wraps existing samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] on zero size or if
    /// `samples.len() != width * planes * height`.
    pub fn from_samples(width: usize, height: usize, planes: Planes, samples: Vec<f32>) -> Result<Self> {
        let expected = checked_size(width, height, planes)?;
        if samples.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, samples.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            planes,
            samples,
        })
    }

    /// Re-shapes the buffer.
    ///
    /// Storage is reallocated (and zeroed) only when stride or height
    /// changes; otherwise existing samples are kept and only the
    /// width/plane bookkeeping is updated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero.
    pub fn resize(&mut self, width: usize, height: usize, planes: Planes) -> Result<()> {
        let size = checked_size(width, height, planes)?;
        let stride = width * planes.count();
        if self.samples.is_empty() || stride != self.stride() || height != self.height {
            self.samples = vec![0.0; size];
        }
        self.width = width;
        self.height = height;
        self.planes = planes;
        Ok(())
    }

    /// Makes this buffer a deep copy of `other`.
    pub fn assign_from(&mut self, other: &LinearImageBuffer) {
        trace!(width = other.width, height = other.height, planes = %other.planes, "assign_from");
        if other.samples.is_empty() {
            *self = Self::empty();
            return;
        }
        if self.stride() != other.stride() || self.height != other.height || self.samples.is_empty() {
            self.samples = vec![0.0; other.samples.len()];
        }
        self.width = other.width;
        self.height = other.height;
        self.planes = other.planes;
        self.samples.copy_from_slice(&other.samples);
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Plane layout.
    #[inline]
    pub fn planes(&self) -> Planes {
        self.planes
    }

    /// Samples per pixel.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.planes.count()
    }

    /// Samples per row (`width * plane_count`).
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * self.planes.count()
    }

    /// Total number of samples (`stride * height`).
    #[inline]
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` for a zero-sized buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples, row-major.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// All samples, mutable.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let stride = self.stride();
        &self.samples[y * stride..(y + 1) * stride]
    }

    /// Mutable samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let stride = self.stride();
        &mut self.samples[y * stride..(y + 1) * stride]
    }

    /// Sample at column `x` (within stride) of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if out of bounds; see [`pixel_safe`](Self::pixel_safe) for a
    /// clamping variant.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.row(y)[x]
    }

    /// Sets the sample at column `x` (within stride) of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.row_mut(y)[x] = value;
    }

    /// Minimum rows per parallel task for this shape.
    #[inline]
    pub(crate) fn rows_per_task(&self) -> usize {
        rows_per_task(self.stride())
    }

    /// Parallel iterator over `(y, row)` pairs.
    pub(crate) fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [f32])> + '_ {
        let stride = self.stride().max(1);
        let min_rows = self.rows_per_task();
        self.samples
            .par_chunks_mut(stride)
            .with_min_len(min_rows)
            .enumerate()
    }
}

/// Rows needed to reach [`PARALLEL_MIN_SAMPLES`] at the given stride.
#[inline]
pub(crate) fn rows_per_task(stride: usize) -> usize {
    PARALLEL_MIN_SAMPLES.div_ceil(stride.max(1)).max(1)
}

fn checked_size(width: usize, height: usize, planes: Planes) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    width
        .checked_mul(planes.count())
        .and_then(|stride| stride.checked_mul(height))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflow"))
}

impl Index<(usize, usize)> for LinearImageBuffer {
    type Output = f32;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &f32 {
        &self.row(y)[x]
    }
}

impl IndexMut<(usize, usize)> for LinearImageBuffer {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f32 {
        &mut self.row_mut(y)[x]
    }
}

impl fmt::Display for LinearImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.stride(), self.height)
    }
}

impl fmt::Debug for LinearImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("planes", &self.planes)
            .finish()
    }
}
