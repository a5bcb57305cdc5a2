//! Pure power-law gamma tables.
//!
//! Device values are related to linear light by `linear = encoded^gamma`.
//! Decoding goes through a [`DegammaLut`] built once per conversion so the
//! power function runs `2^bits` times instead of once per sample. Encoding
//! evaluates the power function directly; see [`encode`].

use crate::{Error, Result};

/// Display gamma assumed for monitors when nothing better is known.
pub const DEFAULT_MONITOR_GAMMA: f64 = 2.2;

/// Code widths a [`DegammaLut`] can be built for.
pub const SUPPORTED_BIT_DEPTHS: [u32; 2] = [8, 16];

/// Lookup table mapping every device code to its linear value.
///
/// `table[i] = (i / (len - 1))^gamma`, evaluated in `f64` and stored as `f32`.
#[derive(Debug, Clone)]
pub struct DegammaLut {
    table: Box<[f32]>,
}

impl DegammaLut {
    /// Builds a table for `bit_depth`-bit codes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] unless `bit_depth` is 8 or 16.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linlight_core::DegammaLut;
    ///
    /// let lut = DegammaLut::new(2.2, 8).unwrap();
    /// assert_eq!(lut.len(), 256);
    /// assert_eq!(lut.get(0), 0.0);
    /// assert_eq!(lut.get(255), 1.0);
    /// ```
    pub fn new(gamma: f64, bit_depth: u32) -> Result<Self> {
        if !SUPPORTED_BIT_DEPTHS.contains(&bit_depth) {
            return Err(Error::unsupported_format(format!("{bit_depth}-bit codes")));
        }
        let range = 1usize << bit_depth;
        let scale = 1.0 / (range - 1) as f64;
        let table = (0..range)
            .map(|i| (i as f64 * scale).powf(gamma) as f32)
            .collect();
        Ok(Self { table })
    }

    /// Linear value for a device code.
    #[inline]
    pub fn get(&self, code: usize) -> f32 {
        self.table[code]
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`; a table has at least two entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Table entries.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.table
    }
}

/// Re-encodes a linear sample to a device code in `0..=max`.
///
/// `round(clamp(sample^inv_gamma * max, 0, max))`. Negative and NaN samples
/// map to 0.
#[inline]
pub fn encode(sample: f32, inv_gamma: f64, max: f64) -> f64 {
    let v = (sample as f64).powf(inv_gamma) * max;
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, max).round()
    }
}
