//! PNG reading and writing.
//!
//! # Overview
//!
//! Input photographs arrive as PNG in whatever layout the capture pipeline
//! produced; [`read_rgb8`] folds the common layouts down to 8-bit RGB.
//! Output renderings and boundary maps are always written as 8-bit, with an
//! sRGB chunk so viewers apply the right transfer curve.
//!
//! Supported input layouts:
//!
//! - 8-bit RGB, RGBA (alpha dropped), grayscale, grayscale+alpha
//! - 16-bit RGB and RGBA, truncated to the high byte

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use hazvis_core::Raster;
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Reads a PNG file as 8-bit RGB pixels.
///
/// # Errors
/// [`IoError::Unsupported`] for palette images and bit depths below 8;
/// [`IoError::Decode`] for malformed files.
pub fn read_rgb8<P: AsRef<Path>>(path: P) -> IoResult<Raster<[u8; 3]>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::Decode(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::Decode(e.to_string()))?;

    let data = &buf[..info.buffer_size()];
    let pixels: Vec<[u8; 3]> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            data.chunks_exact(3).map(|px| [px[0], px[1], px[2]]).collect()
        }
        (png::ColorType::Rgba, png::BitDepth::Eight) => {
            data.chunks_exact(4).map(|px| [px[0], px[1], px[2]]).collect()
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            data.iter().map(|&g| [g, g, g]).collect()
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            data.chunks_exact(2).map(|ga| [ga[0], ga[0], ga[0]]).collect()
        }
        // 16-bit samples are big-endian; the high byte is a rounding-free
        // 8-bit approximation.
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => {
            data.chunks_exact(6).map(|px| [px[0], px[2], px[4]]).collect()
        }
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => {
            data.chunks_exact(8).map(|px| [px[0], px[2], px[4]]).collect()
        }
        (color_type, bit_depth) => {
            return Err(IoError::Unsupported(format!(
                "PNG layout {color_type:?} at {bit_depth:?}"
            )));
        }
    };

    debug!(
        path = %path.display(),
        width = info.width,
        height = info.height,
        "read PNG image"
    );
    Ok(Raster::from_data(info.height, info.width, pixels)?)
}

/// Reads a PNG file as a boundary map.
///
/// A pixel is a boundary where its first channel exceeds 127, so both
/// binary masks and antialiased edge renderings threshold sensibly.
pub fn read_boundary<P: AsRef<Path>>(path: P) -> IoResult<Raster<bool>> {
    let rgb = read_rgb8(path)?;
    Ok(rgb.map(|px| px[0] > 127)?)
}

/// Writes 8-bit RGB pixels as a PNG file with an sRGB chunk.
pub fn write_rgb8<P: AsRef<Path>>(path: P, image: &Raster<[u8; 3]>) -> IoResult<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(writer, image.cols(), image.rows());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .write_image_data(image.data().as_flattened())
        .map_err(|e| IoError::Encode(e.to_string()))?;

    debug!(path = %path.display(), "wrote PNG image");
    Ok(())
}

/// Writes a single-channel 8-bit PNG file.
pub fn write_gray8<P: AsRef<Path>>(path: P, image: &Raster<u8>) -> IoResult<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);

    let mut encoder = png::Encoder::new(writer, image.cols(), image.rows());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::Encode(e.to_string()))?;
    Ok(())
}

/// Writes a boundary map as a black-and-white PNG file.
pub fn write_boundary<P: AsRef<Path>>(path: P, boundary: &Raster<bool>) -> IoResult<()> {
    let gray = boundary.map(|b| if b { 255u8 } else { 0 })?;
    write_gray8(path, &gray)
}
