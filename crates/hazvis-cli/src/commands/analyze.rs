//! Analyze command
//!
//! Runs the full visibility pipeline: load image and geometry, detect both
//! boundary kinds, compute the hazard field, and write the rendering plus
//! any requested intermediate maps.

use crate::{AnalyzeArgs, MeasurementKind, PaletteKind};
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use hazvis_field::{
    compute_visibility, visualize, Measurement, Palette, VisibilityOutputs, VisibilityParams,
    VisualizeOptions,
};
use hazvis_geom::DiscontinuityParams;

pub fn run(args: AnalyzeArgs, verbose: u8) -> Result<()> {
    trace!(image = %args.image.display(), output = %args.output.display(), "analyze::run");

    let image = super::load_image(&args.image, super::encoding_for(args.linear_input))?;
    let geometry = hazvis_io::geom::load_scene_geometry(
        &args.coordinates,
        &args.positions,
        &args.distances,
        &args.normals,
    )
    .context("Failed to load scene geometry")?;

    let mask = args.mask.as_deref().map(super::load_boundary).transpose()?;
    let roi = args.roi.as_deref().map(super::load_boundary).transpose()?;

    let measurement = measurement(&args);
    let palette = palette(args.palette);
    let params = VisibilityParams {
        edge_sigma: args.edge_sigma,
        discontinuity: DiscontinuityParams {
            position_patch_size: args.position_patch,
            orientation_patch_size: args.orientation_patch,
            position_threshold: args.position_threshold,
            orientation_threshold: args.orientation_threshold,
        },
        false_positives: args.false_positives.is_some(),
    };

    if verbose > 0 {
        println!(
            "Analyzing {} against geometry in {}",
            args.image.display(),
            args.positions.display()
        );
    }

    let mut observer = |outputs: &VisibilityOutputs| {
        let edge_pixels = outputs.edges.boundary.data().iter().filter(|&&b| b).count();
        let boundary_pixels = outputs
            .geometry_boundary
            .data()
            .iter()
            .filter(|&&b| b)
            .count();
        info!(
            degrees_per_pixel = outputs.degrees_per_pixel,
            edge_pixels, boundary_pixels, "visibility analysis complete"
        );
    };
    let outputs = compute_visibility(&image, &geometry, &params, Some(&mut observer))?;

    if let Some(path) = &args.luminance_edges {
        super::save_boundary(path, &outputs.edges.boundary)?;
    }
    if let Some(path) = &args.geometry_edges {
        super::save_boundary(path, &outputs.geometry_boundary)?;
    }

    let viz = visualize(
        &outputs.hazard,
        &measurement,
        palette,
        &VisualizeOptions {
            mask: mask.as_ref(),
            roi: roi.as_ref(),
            geometry_boundary: Some(&outputs.geometry_boundary),
            with_score: args.score,
        },
    )?;
    super::save_image(&args.output, &viz.image)?;

    // The false-positive field reads against the luminance edges, so those
    // are its boundary overlay; the distinct palette keeps the two
    // renderings apart at a glance.
    if let (Some(path), Some(field)) = (&args.false_positives, &outputs.false_positive_hazard) {
        let fp_viz = visualize(
            field,
            &measurement,
            Palette::GrayCyan,
            &VisualizeOptions {
                mask: mask.as_ref(),
                roi: roi.as_ref(),
                geometry_boundary: Some(&outputs.edges.boundary),
                with_score: false,
            },
        )?;
        super::save_image(path, &fp_viz.image)?;
    }

    if args.score {
        match viz.average_score {
            Some(score) if score.is_nan() => {
                println!("visibility score: undefined (no boundary pixels)")
            }
            Some(score) => println!("visibility score: {score:.4}"),
            None => {}
        }
    }

    if verbose > 0 {
        println!("Wrote {}", args.output.display());
    }

    Ok(())
}

fn measurement(args: &AnalyzeArgs) -> Measurement {
    match args.measurement {
        MeasurementKind::Reciprocal => Measurement::Reciprocal { scale: args.scale },
        MeasurementKind::Linear => Measurement::Linear {
            max_hazard: args.max_hazard,
        },
        MeasurementKind::Gaussian => Measurement::Gaussian {
            sigma: args.sigma_deg,
        },
    }
}

fn palette(kind: PaletteKind) -> Palette {
    match kind {
        PaletteKind::RedGray => Palette::RedGray,
        PaletteKind::RedGreen => Palette::RedGreen,
        PaletteKind::GrayCyan => Palette::GrayCyan,
    }
}
