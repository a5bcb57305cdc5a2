//! Edge-clamped and bilinear sample lookup.
//!
//! Both lookups work in raw sample space: `x` is a column within the stride,
//! so for multi-plane buffers neighbouring columns belong to different
//! planes. Callers interpolating RGB or CMYK data have to pass per-plane
//! coordinates themselves.

use crate::LinearImageBuffer;

impl LinearImageBuffer {
    /// Sample at `(x, y)` with both coordinates clamped into the buffer.
    ///
    /// Reads outside the buffer replicate the nearest edge sample, which is
    /// what neighbourhood filters want at the borders.
    ///
    /// # Panics
    ///
    /// Panics on an empty buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linlight_core::{LinearImageBuffer, Planes};
    ///
    /// let mut buf = LinearImageBuffer::new(3, 3, Planes::Gray).unwrap();
    /// buf.set(0, 0, 1.0);
    /// assert_eq!(buf.pixel_safe(-4, -1), 1.0);
    /// ```
    #[inline]
    pub fn pixel_safe(&self, x: isize, y: isize) -> f32 {
        let x = x.clamp(0, self.stride() as isize - 1) as usize;
        let y = y.clamp(0, self.height() as isize - 1) as usize;
        self.samples()[y * self.stride() + x]
    }

    /// Bilinear interpolation between the four samples around `(x, y)`.
    ///
    /// Coordinates are clamped to `[0, stride]` x `[0, height]`. On the last
    /// column/row the cell is pulled back by one and the fractional weight
    /// set to 1, so `(stride, height)` returns the last sample without
    /// reading past the end. A one-sample-wide (or tall) buffer degenerates
    /// to its only column (or row).
    ///
    /// # Panics
    ///
    /// Panics on an empty buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linlight_core::{LinearImageBuffer, Planes};
    ///
    /// let buf = LinearImageBuffer::from_samples(2, 2, Planes::Gray, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(buf.pixel_interpolate(0.5, 0.5), 1.5);
    /// ```
    pub fn pixel_interpolate(&self, x: f32, y: f32) -> f32 {
        let width = self.stride();
        let height = self.height();
        let (ix, fx) = cell(x, width);
        let (iy, fy) = cell(y, height);
        let ix1 = (ix + 1).min(width - 1);
        let iy1 = (iy + 1).min(height - 1);

        let s = self.samples();
        let p00 = s[iy * width + ix];
        let p01 = s[iy * width + ix1];
        let p10 = s[iy1 * width + ix];
        let p11 = s[iy1 * width + ix1];
        (p00 * (1.0 - fx) + p01 * fx) * (1.0 - fy) + (p10 * (1.0 - fx) + p11 * fx) * fy
    }
}

/// Integer cell and fractional weight for one axis of length `len`.
#[inline]
fn cell(v: f32, len: usize) -> (usize, f32) {
    let v = v.clamp(0.0, len as f32);
    let i = v as usize;
    if i + 1 < len {
        (i, v - i as f32)
    } else {
        (len.saturating_sub(2), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{LinearImageBuffer, Planes};
    use approx::assert_relative_eq;

    fn ramp(width: usize, height: usize) -> LinearImageBuffer {
        let samples = (0..width * height).map(|i| i as f32).collect();
        LinearImageBuffer::from_samples(width, height, Planes::Gray, samples).unwrap()
    }

    #[test]
    fn test_pixel_safe_inside() {
        let buf = ramp(10, 10);
        assert_eq!(buf.pixel_safe(3, 4), 43.0);
    }

    #[test]
    fn test_pixel_safe_clamps() {
        let buf = ramp(10, 10);
        assert_eq!(buf.pixel_safe(-5, -5), buf.pixel_safe(0, 0));
        assert_eq!(buf.pixel_safe(15, 15), 99.0);
        assert_eq!(buf.pixel_safe(-1, 5), 50.0);
        assert_eq!(buf.pixel_safe(12, 0), 9.0);
    }

    #[test]
    fn test_pixel_safe_uses_stride() {
        let buf = LinearImageBuffer::from_samples(2, 1, Planes::Rgb, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(buf.pixel_safe(5, 0), 5.0);
        assert_eq!(buf.pixel_safe(100, 0), 5.0);
    }

    #[test]
    fn test_interpolate_grid_points() {
        let buf = ramp(4, 3);
        assert_eq!(buf.pixel_interpolate(0.0, 0.0), 0.0);
        assert_eq!(buf.pixel_interpolate(2.0, 1.0), 6.0);
    }

    #[test]
    fn test_interpolate_midpoint() {
        let buf = ramp(4, 3);
        // (1.5, 0.5): mean of 1, 2, 5, 6
        assert_relative_eq!(buf.pixel_interpolate(1.5, 0.5), 3.5);
    }

    #[test]
    fn test_interpolate_outer_bound() {
        let buf = ramp(10, 10);
        assert_eq!(buf.pixel_interpolate(10.0, 10.0), 99.0);
        assert_eq!(buf.pixel_interpolate(1e6, 1e6), 99.0);
        assert_eq!(buf.pixel_interpolate(-3.0, -3.0), 0.0);
    }

    #[test]
    fn test_interpolate_last_column() {
        let buf = ramp(4, 3);
        assert_eq!(buf.pixel_interpolate(3.0, 0.0), 3.0);
    }

    #[test]
    fn test_interpolate_single_row() {
        let buf = ramp(4, 1);
        assert_relative_eq!(buf.pixel_interpolate(1.25, 0.0), 1.25);
        assert_eq!(buf.pixel_interpolate(4.0, 1.0), 3.0);
    }

    #[test]
    fn test_interpolate_single_sample() {
        let buf = LinearImageBuffer::from_samples(1, 1, Planes::Gray, vec![0.7]).unwrap();
        assert_eq!(buf.pixel_interpolate(0.3, 0.9), 0.7);
    }
}
