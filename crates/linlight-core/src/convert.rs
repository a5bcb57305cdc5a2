//! Conversion between device surfaces and linear buffers.
//!
//! Ingestion decodes every sample through a [`DegammaLut`] and moves
//! BGR-ordered formats into canonical R,G,B plane order. Emission applies the
//! inverse power and quantizes, writing BGR order back out where the target
//! format asks for it.
//!
//! # Example
//!
//! ```rust
//! use linlight_core::{DeviceFormat, DeviceSurface, LinearImageBuffer, SampleData};
//!
//! let surface = DeviceSurface::new(
//!     DeviceFormat::Bgr24,
//!     1,
//!     1,
//!     SampleData::U8(vec![0, 0, 255]), // pure red, stored B,G,R
//! )
//! .unwrap();
//! let buf = LinearImageBuffer::from_device_surface(&surface, 2.2).unwrap();
//! assert_eq!(buf.samples(), &[1.0, 0.0, 0.0]);
//! ```

use crate::gamma::encode;
use crate::{DegammaLut, DeviceFormat, DeviceSurface, Error, LinearImageBuffer, Result, SampleData};
use rayon::prelude::*;
use tracing::{debug, trace};

impl LinearImageBuffer {
    /// Creates a buffer from a device surface. See [`assign_from_surface`](Self::assign_from_surface).
    pub fn from_device_surface(surface: &DeviceSurface, gamma: f64) -> Result<Self> {
        let mut buf = Self::empty();
        buf.assign_from_surface(surface, gamma)?;
        Ok(buf)
    }

    /// Replaces the contents with a decoded, de-gamma'd copy of `surface`.
    ///
    /// Each device code `c` becomes `(c / max)^gamma`. The buffer is re-shaped
    /// to the surface's width/height and the format's plane layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the surface format has no
    /// plane mapping. The buffer is left untouched in that case.
    pub fn assign_from_surface(&mut self, surface: &DeviceSurface, gamma: f64) -> Result<()> {
        let format = surface.format();
        trace!(format = %format, width = surface.width(), height = surface.height(), gamma, "assign_from_surface");
        let planes = format
            .planes()
            .ok_or_else(|| Error::unsupported_format(format.name()))?;
        if surface.samples().bit_depth() != format.bit_depth() {
            return Err(Error::invalid_dimensions(
                surface.width(),
                surface.height(),
                format!("{} surface holds {}-bit samples", format, surface.samples().bit_depth()),
            ));
        }
        debug!(format = %format, width = surface.width(), height = surface.height(), gamma, "Decoding device surface");

        let lut = DegammaLut::new(gamma, format.bit_depth())?;
        self.resize(surface.width(), surface.height(), planes)?;
        let bgr = matches!(format, DeviceFormat::Bgr24 | DeviceFormat::Bgr32);
        let src_row_len = surface.row_len();
        let src_step = format.channels();
        match surface.samples() {
            SampleData::U8(src) => self.decode_rows(src, src_row_len, src_step, &lut, bgr),
            SampleData::U16(src) => self.decode_rows(src, src_row_len, src_step, &lut, bgr),
        }
        Ok(())
    }

    fn decode_rows<T>(&mut self, src: &[T], src_row_len: usize, src_step: usize, lut: &DegammaLut, bgr: bool)
    where
        T: Copy + Into<usize> + Sync,
    {
        let planes = self.plane_count();
        self.par_rows_mut().for_each(|(y, row)| {
            let src_row = &src[y * src_row_len..(y + 1) * src_row_len];
            if bgr {
                for (dst, px) in row.chunks_exact_mut(planes).zip(src_row.chunks_exact(src_step)) {
                    dst[0] = lut.get(px[2].into());
                    dst[1] = lut.get(px[1].into());
                    dst[2] = lut.get(px[0].into());
                }
            } else {
                for (dst, &code) in row.iter_mut().zip(src_row) {
                    *dst = lut.get(code.into());
                }
            }
        });
    }

    /// Replaces the contents with a single gray plane built from signed
    /// 16-bit samples passed through `remap`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] on zero size or if
    /// `samples.len() != width * height`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linlight_core::LinearImageBuffer;
    ///
    /// let mut buf = LinearImageBuffer::empty();
    /// buf.assign_from_i16_plane(2, 1, &[-100, 300], |v| v as f32 / 1000.0).unwrap();
    /// assert_eq!(buf.samples(), &[-0.1, 0.3]);
    /// ```
    pub fn assign_from_i16_plane<F>(&mut self, width: usize, height: usize, samples: &[i16], remap: F) -> Result<()>
    where
        F: Fn(i16) -> f32 + Sync,
    {
        trace!(width, height, "assign_from_i16_plane");
        if width.checked_mul(height) != Some(samples.len()) {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", width.saturating_mul(height), samples.len()),
            ));
        }
        self.resize(width, height, crate::Planes::Gray)?;
        self.par_rows_mut().for_each(|(y, row)| {
            let src_row = &samples[y * width..(y + 1) * width];
            for (dst, &v) in row.iter_mut().zip(src_row) {
                *dst = remap(v);
            }
        });
        Ok(())
    }

    /// Re-encodes the buffer into an integer device surface.
    ///
    /// Every sample becomes `round(clamp(sample^(1/gamma) * max, 0, max))`
    /// with `max` = 255 for 8-bit and 65535 for 16-bit formats. Without an
    /// explicit `format` the 8-bit format matching the plane layout is used
    /// (gray -> `Gray8`, RGB -> `Rgb24`, CMYK -> `Cmyk32`). The padding byte
    /// of `Bgr32` is written as `0xFF`. `dpi_x`/`dpi_y` are carried into the
    /// surface unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `format` is unsupported or its
    /// plane layout differs from the buffer's, and
    /// [`Error::InvalidDimensions`] for an empty buffer.
    pub fn to_device_surface(
        &self,
        dpi_x: f64,
        dpi_y: f64,
        gamma: f64,
        format: Option<DeviceFormat>,
    ) -> Result<DeviceSurface> {
        let format = format.unwrap_or(DeviceFormat::for_planes(self.planes()));
        trace!(format = %format, width = self.width(), height = self.height(), gamma, "to_device_surface");
        if format.planes() != Some(self.planes()) {
            return Err(Error::unsupported_format(format!(
                "{} for {} buffer",
                format,
                self.planes()
            )));
        }
        if self.is_empty() {
            return Err(Error::invalid_dimensions(self.width(), self.height(), "buffer is empty"));
        }
        debug!(format = %format, width = self.width(), height = self.height(), gamma, "Encoding device surface");

        let inv_gamma = 1.0 / gamma;
        let samples = if format.bit_depth() == 16 {
            SampleData::U16(self.encode_rows(format, inv_gamma, u16::MAX, |v| v as u16))
        } else {
            SampleData::U8(self.encode_rows(format, inv_gamma, u8::MAX, |v| v as u8))
        };
        Ok(DeviceSurface::new(format, self.width(), self.height(), samples)?.with_dpi(dpi_x, dpi_y))
    }

    fn encode_rows<T, F>(&self, format: DeviceFormat, inv_gamma: f64, max: T, cast: F) -> Vec<T>
    where
        T: Copy + Default + Into<f64> + Send + Sync,
        F: Fn(f64) -> T + Sync,
    {
        let step = format.channels();
        let planes = self.plane_count();
        let dst_row_len = self.width() * step;
        let max_f = max.into();
        let bgr = matches!(format, DeviceFormat::Bgr24 | DeviceFormat::Bgr32);

        let mut dst = vec![T::default(); dst_row_len * self.height()];
        dst.par_chunks_mut(dst_row_len)
            .with_min_len(self.rows_per_task())
            .enumerate()
            .for_each(|(y, dst_row)| {
                let row = self.row(y);
                if bgr {
                    for (px, src) in dst_row.chunks_exact_mut(step).zip(row.chunks_exact(planes)) {
                        px[0] = cast(encode(src[2], inv_gamma, max_f));
                        px[1] = cast(encode(src[1], inv_gamma, max_f));
                        px[2] = cast(encode(src[0], inv_gamma, max_f));
                        if step == 4 {
                            px[3] = max;
                        }
                    }
                } else {
                    for (d, &s) in dst_row.iter_mut().zip(row) {
                        *d = cast(encode(s, inv_gamma, max_f));
                    }
                }
            });
        dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Planes, DEFAULT_MONITOR_GAMMA};
    use approx::assert_relative_eq;

    fn gray8(width: usize, height: usize, data: Vec<u8>) -> DeviceSurface {
        DeviceSurface::new(DeviceFormat::Gray8, width, height, SampleData::U8(data)).unwrap()
    }

    #[test]
    fn test_ingest_gray8() {
        let buf = LinearImageBuffer::from_device_surface(&gray8(2, 1, vec![0, 255]), 2.2).unwrap();
        assert_eq!(buf.planes(), Planes::Gray);
        assert_eq!(buf.samples(), &[0.0, 1.0]);
    }

    #[test]
    fn test_ingest_applies_gamma() {
        let buf = LinearImageBuffer::from_device_surface(&gray8(1, 1, vec![128]), 2.2).unwrap();
        assert_relative_eq!(buf.get(0, 0), (128.0f64 / 255.0).powf(2.2) as f32);
    }

    #[test]
    fn test_ingest_bgr32_reorders_and_drops_padding() {
        let surface = DeviceSurface::new(
            DeviceFormat::Bgr32,
            2,
            1,
            SampleData::U8(vec![255, 0, 0, 17, 0, 255, 0, 99]),
        )
        .unwrap();
        let buf = LinearImageBuffer::from_device_surface(&surface, 1.0).unwrap();
        assert_eq!(buf.stride(), 6);
        assert_eq!(buf.samples(), &[0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_ingest_rgb48() {
        let surface = DeviceSurface::new(
            DeviceFormat::Rgb48,
            1,
            1,
            SampleData::U16(vec![0, 65535, 32768]),
        )
        .unwrap();
        let buf = LinearImageBuffer::from_device_surface(&surface, 1.0).unwrap();
        assert_eq!(buf.get(0, 0), 0.0);
        assert_eq!(buf.get(1, 0), 1.0);
        assert_relative_eq!(buf.get(2, 0), 32768.0 / 65535.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ingest_unsupported_leaves_buffer() {
        let mut buf = LinearImageBuffer::new(1, 1, Planes::Rgb).unwrap();
        buf.set(0, 0, 0.5);
        let surface =
            DeviceSurface::new(DeviceFormat::Indexed8, 2, 2, SampleData::U8(vec![0; 4])).unwrap();
        let err = buf.assign_from_surface(&surface, 2.2).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref format } if format == "Indexed8"));
        assert_eq!(buf.width(), 1);
        assert_eq!(buf.get(0, 0), 0.5);
    }

    #[test]
    fn test_emit_infers_format() {
        let cases = [
            (Planes::Gray, DeviceFormat::Gray8),
            (Planes::Rgb, DeviceFormat::Rgb24),
            (Planes::Cmyk, DeviceFormat::Cmyk32),
        ];
        for (planes, format) in cases {
            let buf = LinearImageBuffer::new(3, 2, planes).unwrap();
            let surface = buf.to_device_surface(72.0, 72.0, 2.2, None).unwrap();
            assert_eq!(surface.format(), format);
            assert_eq!(surface.samples().len(), 3 * 2 * planes.count());
        }
    }

    #[test]
    fn test_emit_carries_dpi() {
        let buf = LinearImageBuffer::new(1, 1, Planes::Gray).unwrap();
        let surface = buf.to_device_surface(300.0, 200.0, 2.2, None).unwrap();
        assert_eq!(surface.dpi_x(), 300.0);
        assert_eq!(surface.dpi_y(), 200.0);
    }

    #[test]
    fn test_emit_clamps_and_rounds() {
        let buf = LinearImageBuffer::from_samples(4, 1, Planes::Gray, vec![-1.0, 0.0, 0.5, 3.0]).unwrap();
        let surface = buf.to_device_surface(96.0, 96.0, 1.0, None).unwrap();
        assert_eq!(surface.samples(), &SampleData::U8(vec![0, 0, 128, 255]));
    }

    #[test]
    fn test_emit_bgr32_padding() {
        let buf = LinearImageBuffer::from_samples(1, 1, Planes::Rgb, vec![1.0, 0.0, 0.0]).unwrap();
        let surface = buf
            .to_device_surface(96.0, 96.0, DEFAULT_MONITOR_GAMMA, Some(DeviceFormat::Bgr32))
            .unwrap();
        assert_eq!(surface.samples(), &SampleData::U8(vec![0, 0, 255, 255]));
    }

    #[test]
    fn test_emit_plane_mismatch() {
        let buf = LinearImageBuffer::new(2, 2, Planes::Gray).unwrap();
        let err = buf
            .to_device_surface(96.0, 96.0, 2.2, Some(DeviceFormat::Rgb24))
            .unwrap_err();
        assert!(err.is_format_error());
        let err = buf
            .to_device_surface(96.0, 96.0, 2.2, Some(DeviceFormat::Bgra32))
            .unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_emit_empty() {
        let buf = LinearImageBuffer::empty();
        assert!(buf.to_device_surface(96.0, 96.0, 2.2, None).is_err());
    }

    #[test]
    fn test_i16_plane() {
        let mut buf = LinearImageBuffer::new(5, 5, Planes::Rgb).unwrap();
        buf.assign_from_i16_plane(3, 2, &[0, 1, 2, 3, 4, 5], |v| v as f32 * 2.0)
            .unwrap();
        assert_eq!(buf.planes(), Planes::Gray);
        assert_eq!(buf.samples(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_i16_plane_len_mismatch() {
        let mut buf = LinearImageBuffer::empty();
        assert!(buf.assign_from_i16_plane(3, 2, &[0; 5], |v| v as f32).is_err());
    }
}
