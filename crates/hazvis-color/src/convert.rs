//! Device-independent color conversions.
//!
//! Conversions among linear sRGB, CIE XYZ, and CIE xyY, plus the two
//! out-of-range policies used when collapsing linear values to 8 bits.
//!
//! # Scale convention
//!
//! XYZ values here are at the same scale as the linear RGB they came
//! from: an all-ones RGB triple maps to the D65 white point with
//! Y = 1.0. Nothing is renormalized to a reference white.
//!
//! # Out-of-range policies
//!
//! Two distinct "cannot exceed 1.0" policies exist and must not be
//! conflated:
//!
//! - **Absolute clamp** (scalar path, [`crate::transfer::encode_gamma`]):
//!   each value is clamped to [0, 1] independently.
//! - **Relative clip** (triple path, [`encode_rgb_gamma`]): the whole
//!   triple is divided by `max(1.0, max(R, G, B))` first, so channel
//!   ratios survive. Clamping channels independently instead would shift
//!   hue in bright regions.

use crate::mat::Mat3;
use crate::transfer;

// ============================================================================
// Matrix constants (sRGB primaries, D65 white)
// ============================================================================

/// Linear sRGB to CIE XYZ (D65).
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// CIE XYZ to linear sRGB (D65).
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
]);

// ============================================================================
// Value types
// ============================================================================

/// CIE tristimulus triple.
///
/// Same scale as the linear RGB it was derived from; see the module
/// documentation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    /// X tristimulus value
    pub x: f32,
    /// Y tristimulus value (luminance)
    pub y: f32,
    /// Z tristimulus value
    pub z: f32,
}

impl Xyz {
    /// Creates a tristimulus triple.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// CIE chromaticity pair plus luminance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XyY {
    /// x chromaticity in [0, 1]
    pub x: f32,
    /// y chromaticity in [0, 1]
    pub y: f32,
    /// Luminance (the Y of XYZ)
    pub luminance: f32,
}

impl XyY {
    /// Creates a chromaticity/luminance value.
    #[inline]
    pub const fn new(x: f32, y: f32, luminance: f32) -> Self {
        Self { x, y, luminance }
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Converts linear sRGB to CIE XYZ.
#[inline]
pub fn rgb_to_xyz(rgb: [f32; 3]) -> Xyz {
    let [x, y, z] = SRGB_TO_XYZ.transform(rgb);
    Xyz::new(x, y, z)
}

/// Converts CIE XYZ to linear sRGB.
///
/// Out-of-gamut XYZ can produce negative channels; downstream encoders
/// handle the clipping.
#[inline]
pub fn xyz_to_rgb(xyz: Xyz) -> [f32; 3] {
    XYZ_TO_SRGB.transform([xyz.x, xyz.y, xyz.z])
}

/// Luminance of a linear sRGB triple.
///
/// Applies only the middle (Y) row of [`SRGB_TO_XYZ`]; the X and Z
/// components are never computed.
#[inline]
pub fn rgb_to_y(rgb: [f32; 3]) -> f32 {
    let [yr, yg, yb] = SRGB_TO_XYZ.row(1);
    yr * rgb[0] + yg * rgb[1] + yb * rgb[2]
}

/// Converts CIE XYZ to xyY chromaticity plus luminance.
///
/// A degenerate input (X + Y + Z <= 0, e.g. black) has no chromaticity;
/// the achromatic fallback `(1/3, 1/3, 0)` is returned so downstream
/// consumers always see in-range chromaticities.
///
/// # Example
///
/// ```rust
/// use hazvis_color::convert::{xyz_to_xyy, Xyz};
///
/// let c = xyz_to_xyy(Xyz::new(0.0, 0.0, 0.0));
/// assert_eq!(c.x, 1.0 / 3.0);
/// assert_eq!(c.y, 1.0 / 3.0);
/// assert_eq!(c.luminance, 0.0);
/// ```
pub fn xyz_to_xyy(xyz: Xyz) -> XyY {
    let sum = xyz.x + xyz.y + xyz.z;
    if sum <= 0.0 {
        return XyY::new(1.0 / 3.0, 1.0 / 3.0, 0.0);
    }
    XyY::new(xyz.x / sum, xyz.y / sum, xyz.y)
}

/// Converts xyY back to CIE XYZ.
///
/// A degenerate chromaticity (y <= 0) carries no recoverable color;
/// all-zero XYZ is returned.
pub fn xyy_to_xyz(c: XyY) -> Xyz {
    if c.y <= 0.0 {
        return Xyz::new(0.0, 0.0, 0.0);
    }
    let scale = c.luminance / c.y;
    Xyz::new(c.x * scale, c.luminance, (1.0 - c.x - c.y) * scale)
}

// ============================================================================
// Triple codecs (relative clip)
// ============================================================================

/// Encodes a linear RGB triple to gamma bytes with ratio-preserving clipping.
///
/// The triple is divided by `max(1.0, max(R, G, B))` before per-channel
/// encoding, so a triple brighter than display range darkens uniformly
/// instead of clipping channel by channel. Negative channels still clamp
/// to zero inside the scalar encoder.
///
/// # Example
///
/// ```rust
/// use hazvis_color::convert::encode_rgb_gamma;
///
/// // 2:1 red:green, twice display range: ratios survive the clip.
/// let bright = encode_rgb_gamma([2.0, 1.0, 0.0]);
/// let flat = encode_rgb_gamma([1.0, 1.0, 0.0]);
/// assert_ne!(bright, flat);
/// assert_eq!(bright[0], 255);
/// ```
#[inline]
pub fn encode_rgb_gamma(rgb: [f32; 3]) -> [u8; 3] {
    let norm = 1.0f32.max(rgb[0]).max(rgb[1]).max(rgb[2]);
    [
        transfer::encode_gamma(rgb[0] / norm),
        transfer::encode_gamma(rgb[1] / norm),
        transfer::encode_gamma(rgb[2] / norm),
    ]
}

/// Linear-encoding analog of [`encode_rgb_gamma`].
#[inline]
pub fn encode_rgb_linear(rgb: [f32; 3]) -> [u8; 3] {
    let norm = 1.0f32.max(rgb[0]).max(rgb[1]).max(rgb[2]);
    [
        transfer::encode_linear(rgb[0] / norm),
        transfer::encode_linear(rgb[1] / norm),
        transfer::encode_linear(rgb[2] / norm),
    ]
}

/// Decodes gamma-encoded RGB bytes to a linear triple.
#[inline]
pub fn decode_rgb_gamma(rgb: [u8; 3]) -> [f32; 3] {
    [
        transfer::decode_gamma(rgb[0]),
        transfer::decode_gamma(rgb[1]),
        transfer::decode_gamma(rgb[2]),
    ]
}

/// Decodes linearly-encoded RGB bytes to a linear triple.
#[inline]
pub fn decode_rgb_linear(rgb: [u8; 3]) -> [f32; 3] {
    [
        transfer::decode_linear(rgb[0]),
        transfer::decode_linear(rgb[1]),
        transfer::decode_linear(rgb[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_white_maps_to_d65() {
        let white = rgb_to_xyz([1.0, 1.0, 1.0]);
        assert_relative_eq!(white.x, 0.9505, epsilon = 1e-3);
        assert_relative_eq!(white.y, 1.0, epsilon = 1e-3);
        assert_relative_eq!(white.z, 1.0890, epsilon = 1e-3);

        let back = xyz_to_rgb(white);
        for ch in back {
            assert_relative_eq!(ch, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_rgb_to_y_matches_matrix_row() {
        let rgb = [0.3, 0.6, 0.1];
        assert_relative_eq!(rgb_to_y(rgb), rgb_to_xyz(rgb).y, epsilon = 1e-6);
    }

    #[test]
    fn test_xyy_roundtrip() {
        let samples = [
            XyY::new(0.3127, 0.3290, 1.0),
            XyY::new(0.64, 0.33, 0.2126),
            XyY::new(0.15, 0.06, 0.0722),
        ];
        for c in samples {
            let back = xyz_to_xyy(xyy_to_xyz(c));
            assert_relative_eq!(back.x, c.x, epsilon = 1e-5);
            assert_relative_eq!(back.y, c.y, epsilon = 1e-5);
            assert_relative_eq!(back.luminance, c.luminance, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_xyy_black_fallback_is_exact() {
        let c = xyz_to_xyy(Xyz::new(0.0, 0.0, 0.0));
        assert_eq!(c.x, 1.0 / 3.0);
        assert_eq!(c.y, 1.0 / 3.0);
        assert_eq!(c.luminance, 0.0);
    }

    #[test]
    fn test_xyy_to_xyz_degenerate() {
        let xyz = xyy_to_xyz(XyY::new(0.5, 0.0, 1.0));
        assert_eq!(xyz, Xyz::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_relative_clip_preserves_ratios() {
        let out = encode_rgb_gamma([2.0, 1.0, 0.0]);
        let back = decode_rgb_gamma(out);
        // Red:green stays ~2:1 in linear terms after the clip.
        assert!((back[0] / back[1] - 2.0).abs() < 0.05);
        assert_eq!(out[2], 0);
    }

    #[test]
    fn test_relative_clip_distinct_from_absolute_clamp() {
        // Per-channel clamping would collapse both triples to the same
        // bytes; the relative clip keeps them distinct.
        let bright = encode_rgb_gamma([2.0, 1.0, 0.0]);
        let flat = encode_rgb_gamma([1.0, 1.0, 0.0]);
        assert_ne!(bright, flat);
    }

    #[test]
    fn test_in_range_triple_unscaled() {
        // max channel below 1.0: the divide is by 1.0 and the scalar
        // encoders see the raw values.
        let out = encode_rgb_gamma([0.5, 0.25, 0.0]);
        assert_eq!(out[0], transfer::encode_gamma(0.5));
        assert_eq!(out[1], transfer::encode_gamma(0.25));
        assert_eq!(out[2], 0);
    }

    #[test]
    fn test_decode_rgb() {
        let linear = decode_rgb_gamma([255, 0, 255]);
        assert_relative_eq!(linear[0], 1.0, epsilon = 1e-6);
        assert_eq!(linear[1], 0.0);
        assert_relative_eq!(linear[2], 1.0, epsilon = 1e-6);

        let linear = decode_rgb_linear([51, 102, 204]);
        assert_relative_eq!(linear[0], 0.2, epsilon = 1e-6);
        assert_relative_eq!(linear[1], 0.4, epsilon = 1e-6);
        assert_relative_eq!(linear[2], 0.8, epsilon = 1e-6);
    }
}
