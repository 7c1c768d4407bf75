//! CLI command implementations

pub mod analyze;
pub mod edges;

use anyhow::{Context, Result};
use hazvis_color::PixelEncoding;
use hazvis_core::Raster;
use std::path::Path;

/// Loads a PNG photograph and decodes it to linear RGB.
pub fn load_image(path: &Path, encoding: PixelEncoding) -> Result<Raster<[f32; 3]>> {
    let rgb = hazvis_io::png::read_rgb8(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    hazvis_color::decode_image(&rgb, encoding)
        .with_context(|| format!("Failed to decode: {}", path.display()))
}

/// Loads a PNG mask or region-of-interest image as a boolean raster.
pub fn load_boundary(path: &Path) -> Result<Raster<bool>> {
    hazvis_io::png::read_boundary(path)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Saves an 8-bit rendering as PNG.
pub fn save_image(path: &Path, image: &Raster<[u8; 3]>) -> Result<()> {
    hazvis_io::png::write_rgb8(path, image)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Saves a boundary map as a black-and-white PNG.
pub fn save_boundary(path: &Path, boundary: &Raster<bool>) -> Result<()> {
    hazvis_io::png::write_boundary(path, boundary)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Picks the decode curve for input images.
pub fn encoding_for(linear_input: bool) -> PixelEncoding {
    if linear_input {
        PixelEncoding::Linear
    } else {
        PixelEncoding::Gamma
    }
}
