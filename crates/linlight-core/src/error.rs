//! Error types for linlight-core operations.
//!
//! Every public operation validates its preconditions before touching the
//! buffer, so an `Err` always leaves the receiver unchanged.
//!
//! # Usage
//!
//! ```rust
//! use linlight_core::{Error, Planes, Result};
//!
//! fn require_rgb(planes: Planes) -> Result<()> {
//!     if planes != Planes::Rgb {
//!         return Err(Error::incompatible_planes(Planes::Rgb, planes));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_rgb(Planes::Gray).is_err());
//! ```

use crate::Planes;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the linear image engine.
///
/// # Categories
///
/// - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat)
/// - **Plane errors**: [`IncompatiblePlanes`](Error::IncompatiblePlanes)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DimensionMismatch`](Error::DimensionMismatch)
#[derive(Debug, Error)]
pub enum Error {
    /// The device pixel format (or inferred plane count) has no mapping to
    /// or from the linear representation.
    #[error("unsupported pixel format: {format}")]
    UnsupportedFormat {
        /// Format name or description
        format: String,
    },

    /// A binary operation was given operands whose plane counts are neither
    /// equal nor the RGB/gray broadcast pair.
    #[error("incompatible planes: {this} vs {other}")]
    IncompatiblePlanes {
        /// Planes of the buffer being mutated
        this: Planes,
        /// Planes of the second operand
        other: Planes,
    },

    /// Invalid buffer or surface dimensions.
    ///
    /// Returned when width or height is zero, or when a surface's sample
    /// storage does not match its declared geometry.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Operands of a binary operation have different sample layouts.
    ///
    /// Sizes are reported as `stride x height`.
    #[error("dimension mismatch: {a_stride}x{a_height} vs {b_stride}x{b_height}")]
    DimensionMismatch {
        /// First operand stride
        a_stride: usize,
        /// First operand height
        a_height: usize,
        /// Second operand stride
        b_stride: usize,
        /// Second operand height
        b_height: usize,
    },
}

impl Error {
    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an [`Error::IncompatiblePlanes`] error.
    #[inline]
    pub fn incompatible_planes(this: Planes, other: Planes) -> Self {
        Self::IncompatiblePlanes { this, other }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error from `(stride, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            a_stride: a.0,
            a_height: a.1,
            b_stride: b.0,
            b_height: b.1,
        }
    }

    /// Returns `true` if this is a format error.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Returns `true` if this is a plane-compatibility error.
    #[inline]
    pub fn is_plane_error(&self) -> bool {
        matches!(self, Self::IncompatiblePlanes { .. })
    }

    /// Returns `true` if this is a dimension-related error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::DimensionMismatch { .. }
        )
    }
}
