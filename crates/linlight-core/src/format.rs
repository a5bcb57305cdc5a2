//! Plane layouts and device pixel formats.
//!
//! [`Planes`] is the closed set of layouts a [`LinearImageBuffer`](crate::LinearImageBuffer)
//! can hold. [`DeviceFormat`] names the integer pixel formats a decoder may
//! hand over; only some of them map onto a plane layout.
//!
//! # Supported Device Formats
//!
//! | Format | Planes | Bits | Device order |
//! |--------|--------|------|--------------|
//! | [`Rgb48`](DeviceFormat::Rgb48) | 3 | 16 | R,G,B |
//! | [`Gray16`](DeviceFormat::Gray16) | 1 | 16 | Y |
//! | [`Bgr24`](DeviceFormat::Bgr24) | 3 | 8 | B,G,R |
//! | [`Bgr32`](DeviceFormat::Bgr32) | 3 | 8 | B,G,R,X |
//! | [`Gray8`](DeviceFormat::Gray8) | 1 | 8 | Y |
//! | [`Rgb24`](DeviceFormat::Rgb24) | 3 | 8 | R,G,B |
//! | [`Cmyk32`](DeviceFormat::Cmyk32) | 4 | 8 | C,M,Y,K |

use std::fmt;

/// Plane layout of a linear buffer.
///
/// Canonical plane order is always the natural one (R,G,B or C,M,Y,K),
/// whatever the storage order of the device surface it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Planes {
    /// Single luminance plane.
    #[default]
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Cyan, magenta, yellow, black.
    Cmyk,
}

impl Planes {
    /// Number of samples per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Planes::Gray => 1,
            Planes::Rgb => 3,
            Planes::Cmyk => 4,
        }
    }

    /// Maps a raw plane count back to a layout.
    pub const fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Planes::Gray),
            3 => Some(Planes::Rgb),
            4 => Some(Planes::Cmyk),
            _ => None,
        }
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Planes::Gray => "gray",
            Planes::Rgb => "RGB",
            Planes::Cmyk => "CMYK",
        }
    }
}

impl fmt::Display for Planes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer pixel format of a device surface.
///
/// Includes formats the engine cannot convert so that a decoder's format tag
/// can be passed through as-is; those are rejected with
/// [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceFormat {
    /// 16 bits per channel RGB.
    Rgb48,
    /// 16-bit gray.
    Gray16,
    /// 8 bits per channel, stored B,G,R.
    Bgr24,
    /// 8 bits per channel, stored B,G,R plus an unused byte.
    Bgr32,
    /// 8-bit gray.
    Gray8,
    /// 8 bits per channel RGB.
    Rgb24,
    /// 8 bits per channel CMYK.
    Cmyk32,
    /// 8 bits per channel BGR with alpha (not supported).
    Bgra32,
    /// 16 bits per channel RGBA (not supported).
    Rgba64,
    /// 8-bit palette indices (not supported).
    Indexed8,
    /// 1 bit per pixel (not supported).
    BlackWhite,
}

impl DeviceFormat {
    /// Plane layout this format converts to, or `None` if unsupported.
    pub const fn planes(self) -> Option<Planes> {
        match self {
            DeviceFormat::Rgb48
            | DeviceFormat::Bgr24
            | DeviceFormat::Bgr32
            | DeviceFormat::Rgb24 => Some(Planes::Rgb),
            DeviceFormat::Gray16 | DeviceFormat::Gray8 => Some(Planes::Gray),
            DeviceFormat::Cmyk32 => Some(Planes::Cmyk),
            DeviceFormat::Bgra32
            | DeviceFormat::Rgba64
            | DeviceFormat::Indexed8
            | DeviceFormat::BlackWhite => None,
        }
    }

    /// Returns `true` if the engine can ingest and emit this format.
    #[inline]
    pub const fn is_supported(self) -> bool {
        self.planes().is_some()
    }

    /// Bits per stored channel.
    pub const fn bit_depth(self) -> u32 {
        match self {
            DeviceFormat::Rgb48 | DeviceFormat::Gray16 | DeviceFormat::Rgba64 => 16,
            DeviceFormat::BlackWhite => 1,
            _ => 8,
        }
    }

    /// Stored channels per pixel, padding included.
    pub const fn channels(self) -> usize {
        match self {
            DeviceFormat::Gray8
            | DeviceFormat::Gray16
            | DeviceFormat::Indexed8
            | DeviceFormat::BlackWhite => 1,
            DeviceFormat::Rgb48 | DeviceFormat::Bgr24 | DeviceFormat::Rgb24 => 3,
            DeviceFormat::Bgr32
            | DeviceFormat::Cmyk32
            | DeviceFormat::Bgra32
            | DeviceFormat::Rgba64 => 4,
        }
    }

    /// Default 8-bit emission format for a plane layout.
    pub const fn for_planes(planes: Planes) -> Self {
        match planes {
            Planes::Gray => DeviceFormat::Gray8,
            Planes::Rgb => DeviceFormat::Rgb24,
            Planes::Cmyk => DeviceFormat::Cmyk32,
        }
    }

    /// Format name.
    pub const fn name(self) -> &'static str {
        match self {
            DeviceFormat::Rgb48 => "Rgb48",
            DeviceFormat::Gray16 => "Gray16",
            DeviceFormat::Bgr24 => "Bgr24",
            DeviceFormat::Bgr32 => "Bgr32",
            DeviceFormat::Gray8 => "Gray8",
            DeviceFormat::Rgb24 => "Rgb24",
            DeviceFormat::Cmyk32 => "Cmyk32",
            DeviceFormat::Bgra32 => "Bgra32",
            DeviceFormat::Rgba64 => "Rgba64",
            DeviceFormat::Indexed8 => "Indexed8",
            DeviceFormat::BlackWhite => "BlackWhite",
        }
    }

    /// All formats with a plane mapping.
    pub const SUPPORTED: [DeviceFormat; 7] = [
        DeviceFormat::Rgb48,
        DeviceFormat::Gray16,
        DeviceFormat::Bgr24,
        DeviceFormat::Bgr32,
        DeviceFormat::Gray8,
        DeviceFormat::Rgb24,
        DeviceFormat::Cmyk32,
    ];
}

impl fmt::Display for DeviceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        assert_eq!(Planes::Gray.count(), 1);
        assert_eq!(Planes::Rgb.count(), 3);
        assert_eq!(Planes::Cmyk.count(), 4);
        assert_eq!(Planes::from_count(3), Some(Planes::Rgb));
        assert_eq!(Planes::from_count(2), None);
    }

    #[test]
    fn test_supported_mapping() {
        assert_eq!(DeviceFormat::Bgr32.planes(), Some(Planes::Rgb));
        assert_eq!(DeviceFormat::Gray16.planes(), Some(Planes::Gray));
        assert_eq!(DeviceFormat::Cmyk32.planes(), Some(Planes::Cmyk));
        assert!(!DeviceFormat::Indexed8.is_supported());
        assert!(DeviceFormat::SUPPORTED.iter().all(|f| f.is_supported()));
    }

    #[test]
    fn test_for_planes_roundtrip() {
        for planes in [Planes::Gray, Planes::Rgb, Planes::Cmyk] {
            let format = DeviceFormat::for_planes(planes);
            assert_eq!(format.planes(), Some(planes));
            assert_eq!(format.bit_depth(), 8);
        }
    }

    #[test]
    fn test_bgr32_has_padding_channel() {
        assert_eq!(DeviceFormat::Bgr32.channels(), 4);
        assert_eq!(DeviceFormat::Bgr32.planes().map(Planes::count), Some(3));
    }
}
