//! sRGB transfer functions and 8-bit codecs.
//!
//! The sRGB standard uses a piecewise function combining a linear segment
//! near black with a power curve (approximately gamma 2.2) for the rest.
//! The 8-bit codecs wrap the normalized functions with the fixed
//! scale/round/clamp policy used throughout the pipeline.
//!
//! # Range
//!
//! - Normalized functions: input/output [0, 1]
//! - Codecs: [0, 255] on the encoded side; decoders accept every code,
//!   encoders clamp before encoding
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// Converts gamma-encoded sRGB [0, 1] to linear [0, 1].
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use hazvis_color::transfer::eotf;
///
/// let linear = eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: Encodes linear light to sRGB.
///
/// Converts linear [0, 1] to gamma-encoded sRGB [0, 1].
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
///
/// # Example
///
/// ```rust
/// use hazvis_color::transfer::oetf;
///
/// let encoded = oetf(0.214);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes an 8-bit gamma-encoded value to linear light.
///
/// No clamping: every code in [0, 255] is in range by construction.
#[inline]
pub fn decode_gamma(g: u8) -> f32 {
    eotf(g as f32 / 255.0)
}

/// Decodes an 8-bit linearly-encoded value to linear light.
#[inline]
pub fn decode_linear(g: u8) -> f32 {
    g as f32 / 255.0
}

/// Encodes linear light to an 8-bit gamma code.
///
/// The input is clamped to [0, 1] *before* the transfer curve, so HDR
/// values above 1.0 saturate at code 255 and negatives at 0; then the
/// result is scaled by 255 and rounded to nearest.
///
/// For RGB triples use [`crate::convert::encode_rgb_gamma`], which
/// applies the ratio-preserving clip instead of this absolute clamp.
///
/// # Example
///
/// ```rust
/// use hazvis_color::transfer::encode_gamma;
///
/// assert_eq!(encode_gamma(1.5), encode_gamma(1.0));
/// assert_eq!(encode_gamma(0.0), 0);
/// assert_eq!(encode_gamma(1.0), 255);
/// ```
#[inline]
pub fn encode_gamma(l: f32) -> u8 {
    (oetf(l.clamp(0.0, 1.0)) * 255.0).round() as u8
}

/// Encodes linear light to an 8-bit linear code.
///
/// Clamps to [0, 1], scales by 255, rounds to nearest.
#[inline]
pub fn encode_linear(l: f32) -> u8 {
    (l.clamp(0.0, 1.0) * 255.0).round() as u8
}
