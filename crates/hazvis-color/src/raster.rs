//! Raster-level photometric conversions.
//!
//! Whole-image wrappers over the pointwise conversions in
//! [`crate::convert`]: 8-bit decode/encode and luminance extraction.
//! Metadata (field of view, description) travels with the output.

use crate::convert;
use hazvis_core::{Raster, Result};

/// Encoding applied to 8-bit image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelEncoding {
    /// sRGB piecewise gamma curve
    #[default]
    Gamma,
    /// Straight division by 255
    Linear,
}

/// Decodes an 8-bit RGB raster to linear RGB.
///
/// # Example
///
/// ```rust
/// use hazvis_color::{decode_image, PixelEncoding};
/// use hazvis_core::Raster;
///
/// let image = Raster::filled(4, 4, [255u8, 0, 0]).unwrap();
/// let linear = decode_image(&image, PixelEncoding::Gamma).unwrap();
/// assert!((linear.pixel(0, 0)[0] - 1.0).abs() < 1e-6);
/// ```
pub fn decode_image(
    src: &Raster<[u8; 3]>,
    encoding: PixelEncoding,
) -> Result<Raster<[f32; 3]>> {
    match encoding {
        PixelEncoding::Gamma => src.map(convert::decode_rgb_gamma),
        PixelEncoding::Linear => src.map(convert::decode_rgb_linear),
    }
}

/// Encodes a linear RGB raster to 8 bits with the ratio-preserving clip.
pub fn encode_image(
    src: &Raster<[f32; 3]>,
    encoding: PixelEncoding,
) -> Result<Raster<[u8; 3]>> {
    match encoding {
        PixelEncoding::Gamma => src.map(convert::encode_rgb_gamma),
        PixelEncoding::Linear => src.map(convert::encode_rgb_linear),
    }
}

/// Extracts the luminance channel of a linear RGB raster.
pub fn luminance(src: &Raster<[f32; 3]>) -> Result<Raster<f32>> {
    src.map(convert::rgb_to_y)
}
