//! Edges command
//!
//! Runs luminance edge detection alone, for tuning the sigma before a full
//! analysis or for inspecting what the detector sees.

use crate::EdgesArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use hazvis_edge::detect_edges;

pub fn run(args: EdgesArgs, verbose: u8) -> Result<()> {
    trace!(image = %args.image.display(), sigma = args.sigma, "edges::run");

    let image = super::load_image(&args.image, super::encoding_for(args.linear_input))?;
    let luminance = hazvis_color::luminance(&image)?;
    let detection = detect_edges(&luminance, args.sigma)?;

    super::save_boundary(&args.output, &detection.boundary)?;

    if let Some(path) = &args.magnitude {
        let peak = detection
            .magnitude
            .data()
            .iter()
            .fold(0.0f32, |acc, &m| acc.max(m));
        let gray = if peak > 0.0 {
            detection.magnitude.map(|m| (m / peak * 255.0).round() as u8)?
        } else {
            detection.magnitude.map(|_| 0u8)?
        };
        hazvis_io::png::write_gray8(path, &gray)
            .with_context(|| format!("Failed to save: {}", path.display()))?;
    }

    if verbose > 0 {
        let edge_pixels = detection.boundary.data().iter().filter(|&&b| b).count();
        println!(
            "Found {} edge pixels, wrote {}",
            edge_pixels,
            args.output.display()
        );
    }

    Ok(())
}
