//! # linlight-core
//!
//! Linear-light floating-point image buffer.
//!
//! [`LinearImageBuffer`] is the common currency between integer device
//! pixel formats (8/16-bit, gray/RGB/CMYK, BGR byte orders) and numeric
//! image processing. Samples are `f32` in linear light, so accumulation,
//! averaging and local-contrast filters do not pile up quantization error
//! across repeated transforms; quantization happens once, on the way back
//! out to a device surface.
//!
//! - [`LinearImageBuffer`] - Row-major `f32` buffer with 1, 3 or 4 planes
//! - [`DeviceSurface`], [`DeviceFormat`] - Integer pixel surfaces in and out
//! - [`DegammaLut`] - Device code to linear lookup table
//! - [`Error`] - Unsupported formats, incompatible planes, bad dimensions
//!
//! ## Usage
//!
//! ```rust
//! use linlight_core::{DeviceFormat, DeviceSurface, LinearImageBuffer, SampleData, DEFAULT_MONITOR_GAMMA};
//!
//! let surface = DeviceSurface::new(
//!     DeviceFormat::Rgb24,
//!     2,
//!     1,
//!     SampleData::U8(vec![255, 128, 0, 10, 20, 30]),
//! )?;
//! let mut buf = LinearImageBuffer::from_device_surface(&surface, DEFAULT_MONITOR_GAMMA)?;
//!
//! // Halve the light, then encode back to 8 bits
//! buf.for_each_value(|v| v * 0.5);
//! let out = buf.to_device_surface(surface.dpi_x(), surface.dpi_y(), DEFAULT_MONITOR_GAMMA, None)?;
//! assert_eq!(out.format(), DeviceFormat::Rgb24);
//! # Ok::<(), linlight_core::Error>(())
//! ```
//!
//! ## Threading
//!
//! Whole-buffer operations block until done and run row-parallel on the
//! global rayon pool. The engine holds no locks and no global state; a
//! buffer must not be mutated from two threads at once.
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/deserialize [`Planes`] and [`DeviceFormat`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
mod convert;
pub mod error;
pub mod format;
pub mod gamma;
mod ops;
mod sample;
pub mod surface;

pub use buffer::{LinearImageBuffer, PARALLEL_MIN_SAMPLES};
pub use error::{Error, Result};
pub use format::{DeviceFormat, Planes};
pub use gamma::{DegammaLut, DEFAULT_MONITOR_GAMMA};
pub use surface::{DeviceSurface, SampleData, DEFAULT_DPI};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use linlight_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::LinearImageBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::format::{DeviceFormat, Planes};
    pub use crate::gamma::DEFAULT_MONITOR_GAMMA;
    pub use crate::surface::{DeviceSurface, SampleData};
}
