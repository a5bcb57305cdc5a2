//! Device pixel surfaces.
//!
//! A [`DeviceSurface`] is the hand-off type between a decoder/encoder and
//! the linear engine: a format tag, geometry, resolution metadata and tightly
//! packed row-major samples at the format's native bit depth.
//!
//! # Example
//!
//! ```rust
//! use linlight_core::{DeviceFormat, DeviceSurface, SampleData};
//!
//! let surface = DeviceSurface::new(
//!     DeviceFormat::Gray8,
//!     2,
//!     2,
//!     SampleData::U8(vec![0, 64, 128, 255]),
//! )
//! .unwrap();
//! assert_eq!(surface.row_len(), 2);
//! ```

use crate::{DeviceFormat, Error, Result};

/// Default surface resolution in dots per inch.
pub const DEFAULT_DPI: f64 = 96.0;

/// Packed sample storage of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleData {
    /// 8-bit samples.
    U8(Vec<u8>),
    /// 16-bit samples.
    U16(Vec<u16>),
}

impl SampleData {
    /// Number of stored samples.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            SampleData::U8(v) => v.len(),
            SampleData::U16(v) => v.len(),
        }
    }

    /// Returns `true` if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bits per sample of this storage.
    #[inline]
    pub fn bit_depth(&self) -> u32 {
        match self {
            SampleData::U8(_) => 8,
            SampleData::U16(_) => 16,
        }
    }
}

/// Integer pixel surface consumed and produced by the engine.
///
/// Fields are private: a surface returned by
/// [`LinearImageBuffer::to_device_surface`](crate::LinearImageBuffer::to_device_surface)
/// cannot be mutated, only read or taken apart with [`into_samples`](Self::into_samples).
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSurface {
    format: DeviceFormat,
    width: usize,
    height: usize,
    dpi_x: f64,
    dpi_y: f64,
    samples: SampleData,
}

impl DeviceSurface {
    /// Creates a surface at [`DEFAULT_DPI`].
    ///
    /// For supported formats the sample storage is checked against the
    /// format: 16-bit formats need [`SampleData::U16`], 8-bit formats
    /// [`SampleData::U8`], and the length must be exactly
    /// `width * height * format.channels()`. Surfaces of unsupported formats
    /// are accepted unchecked; the engine rejects them on conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] on zero size, wrong sample depth
    /// or wrong sample count.
    pub fn new(format: DeviceFormat, width: usize, height: usize, samples: SampleData) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "surface must not be empty"));
        }
        if format.is_supported() {
            if samples.bit_depth() != format.bit_depth() {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    format!(
                        "{} needs {}-bit samples, got {}-bit",
                        format,
                        format.bit_depth(),
                        samples.bit_depth()
                    ),
                ));
            }
            let expected = width
                .checked_mul(height)
                .and_then(|v| v.checked_mul(format.channels()))
                .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflow"))?;
            if samples.len() != expected {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    format!("expected {} samples, got {}", expected, samples.len()),
                ));
            }
        }
        Ok(Self {
            format,
            width,
            height,
            dpi_x: DEFAULT_DPI,
            dpi_y: DEFAULT_DPI,
            samples,
        })
    }

    /// Sets the resolution metadata.
    pub fn with_dpi(mut self, dpi_x: f64, dpi_y: f64) -> Self {
        self.dpi_x = dpi_x;
        self.dpi_y = dpi_y;
        self
    }

    /// Pixel format tag.
    #[inline]
    pub fn format(&self) -> DeviceFormat {
        self.format
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

    /// Horizontal resolution (DPI).
    #[inline]
    pub fn dpi_x(&self) -> f64 {
        self.dpi_x
    }

    /// Vertical resolution (DPI).
    #[inline]
    pub fn dpi_y(&self) -> f64 {
        self.dpi_y
    }

    /// Stored samples per row, padding channels included.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width * self.format.channels()
    }

    /// Packed samples.
    #[inline]
    pub fn samples(&self) -> &SampleData {
        &self.samples
    }

    /// Consumes the surface, returning its samples.
    pub fn into_samples(self) -> SampleData {
        self.samples
    }
}
