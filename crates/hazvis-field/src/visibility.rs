//! End-to-end visibility analysis.
//!
//! # Overview
//!
//! [`compute_visibility`] runs the full pipeline over one registered
//! image/geometry pair:
//!
//! 1. luminance from the linear RGB image
//! 2. luminance edge detection ([`hazvis_edge::detect_edges`])
//! 3. geometric discontinuity detection
//!    ([`hazvis_geom::detect_discontinuities`])
//! 4. squared distance transform of the luminance edge map
//! 5. hazard field over the geometric boundaries, scaled to degrees of
//!    visual angle by the geometry's field of view
//!
//! Every intermediate is returned in [`VisibilityOutputs`] so callers can
//! render, score, or write any of them. An optional observer callback
//! receives the finished outputs once before they are returned, which is
//! where a frontend hooks in progress reporting or diagnostic dumps
//! without the pipeline knowing about either.
//!
//! The optional false-positive pass swaps the two boundary roles: it
//! measures, for every luminance edge, the distance to the nearest
//! geometric boundary. Large values there are contrast cues with no
//! physical cause, which can be as misleading as missing cues.

use hazvis_color::luminance;
use hazvis_core::{Raster, Result};
use hazvis_edge::{detect_edges, squared_distance_transform, EdgeDetection};
use hazvis_geom::{detect_discontinuities, DiscontinuityParams, SceneGeometry};
use tracing::{debug, trace};

use crate::hazard::compute_hazard_field;

/// Parameters for [`compute_visibility`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityParams {
    /// Gaussian sigma for luminance edge detection, in pixels.
    pub edge_sigma: f32,
    /// Geometric discontinuity detection parameters.
    pub discontinuity: DiscontinuityParams,
    /// Also compute the false-positive field (luminance edges measured
    /// against geometric boundaries).
    pub false_positives: bool,
}

impl Default for VisibilityParams {
    fn default() -> Self {
        Self {
            edge_sigma: 1.4,
            discontinuity: DiscontinuityParams::default(),
            false_positives: false,
        }
    }
}

/// Everything one visibility analysis produces.
#[derive(Debug, Clone)]
pub struct VisibilityOutputs {
    /// Linear luminance of the input image.
    pub luminance: Raster<f32>,
    /// Luminance edge detection results.
    pub edges: EdgeDetection,
    /// Geometric boundary map.
    pub geometry_boundary: Raster<bool>,
    /// Invisibility distance per geometric boundary pixel, in degrees.
    pub hazard: Raster<f32>,
    /// Distance from each luminance edge to the nearest geometric
    /// boundary, when requested.
    pub false_positive_hazard: Option<Raster<f32>>,
    /// Visual angle of one pixel, in degrees.
    pub degrees_per_pixel: f32,
}

/// Observer callback invoked with the finished [`VisibilityOutputs`].
pub type VisibilityObserver<'a> = &'a mut dyn FnMut(&VisibilityOutputs);

/// Runs the visibility pipeline over a registered image/geometry pair.
///
/// `image` holds linear RGB; decode gamma-encoded input with
/// [`hazvis_color::decode_image`] first. The image and geometry rasters
/// must conform, and the geometry's field of view must be set, since it
/// scales pixel distances to visual angle.
///
/// The observer, when given, is called exactly once, after the outputs are
/// complete and before they are returned.
///
/// # Errors
/// - [`hazvis_core::Error::ShapeMismatch`] when image and geometry disagree
/// - [`hazvis_core::Error::InvalidParameter`] for a bad sigma, bad
///   discontinuity parameters, or an unset field of view
pub fn compute_visibility(
    image: &Raster<[f32; 3]>,
    geometry: &SceneGeometry,
    params: &VisibilityParams,
    observer: Option<VisibilityObserver<'_>>,
) -> Result<VisibilityOutputs> {
    image.require_conformant(&geometry.position)?;

    let (rows, cols) = image.dimensions();
    let degrees_per_pixel = geometry.fov().degrees_per_pixel(rows, cols)?;
    debug!(rows, cols, degrees_per_pixel, "starting visibility analysis");

    let mut lum = luminance(image)?;
    lum.set_fov(geometry.fov());

    let edges = detect_edges(&lum, params.edge_sigma)?;
    trace!(
        edge_pixels = edges.boundary.data().iter().filter(|&&b| b).count(),
        "luminance edges detected"
    );

    let geometry_boundary = detect_discontinuities(geometry, &params.discontinuity)?;
    trace!(
        boundary_pixels = geometry_boundary.data().iter().filter(|&&b| b).count(),
        "geometric boundaries detected"
    );

    let distance_sq = squared_distance_transform(&edges.boundary)?;
    let hazard = compute_hazard_field(&geometry_boundary, &distance_sq, degrees_per_pixel)?;

    let false_positive_hazard = if params.false_positives {
        let to_boundary_sq = squared_distance_transform(&geometry_boundary)?;
        Some(compute_hazard_field(
            &edges.boundary,
            &to_boundary_sq,
            degrees_per_pixel,
        )?)
    } else {
        None
    };

    let outputs = VisibilityOutputs {
        luminance: lum,
        edges,
        geometry_boundary,
        hazard,
        false_positive_hazard,
        degrees_per_pixel,
    };
    if let Some(observe) = observer {
        observe(&outputs);
    }
    Ok(outputs)
}
