//! The hazard field: invisibility distance per boundary pixel.
//!
//! # Overview
//!
//! A physical boundary is visually detectable when a luminance edge lies on
//! or near it. The hazard field quantifies this per pixel: for every pixel
//! on a geometric boundary it holds the visual distance, in degrees of
//! visual angle, to the nearest luminance edge. Zero means the boundary is
//! marked by contrast exactly where it is; larger values mean the nearest
//! contrast cue is displaced, and the boundary is easy to miss.
//!
//! Pixels not on any geometric boundary have no hazard reading and hold the
//! [`NO_EDGE`] sentinel.

use hazvis_core::{Error, Raster, Result};
use tracing::trace;

use crate::rows::for_each_row;

/// Sentinel for pixels that lie on no geometric boundary.
///
/// Every valid hazard reading is a distance and therefore non-negative, so
/// any negative value is unambiguous. Consumers test with `value == NO_EDGE`.
pub const NO_EDGE: f32 = -1.0;

/// Computes the hazard field from a geometric boundary map and the squared
/// distance transform of the luminance edge map.
///
/// `degrees_per_pixel` converts pixel distances to visual angle; it comes
/// from [`hazvis_core::Fov::degrees_per_pixel`]. The output carries the
/// boundary raster's field of view.
///
/// # Errors
/// - [`Error::ShapeMismatch`] when the inputs do not conform
/// - [`Error::InvalidParameter`] when `degrees_per_pixel` is not positive
///   and finite
///
/// # Example
/// ```
/// use hazvis_core::Raster;
/// use hazvis_edge::squared_distance_transform;
/// use hazvis_field::{compute_hazard_field, NO_EDGE};
///
/// // Luminance edge down column 0, geometric boundary down column 2.
/// let mut edges = Raster::filled(3, 4, false).unwrap();
/// let mut boundary = Raster::filled(3, 4, false).unwrap();
/// for r in 0..3 {
///     edges.set_pixel(r, 0, true);
///     boundary.set_pixel(r, 2, true);
/// }
///
/// let distance_sq = squared_distance_transform(&edges).unwrap();
/// let hazard = compute_hazard_field(&boundary, &distance_sq, 0.1).unwrap();
///
/// // The boundary sits two pixels from its nearest edge: 0.2 degrees.
/// assert!((hazard.pixel(1, 2) - 0.2).abs() < 1e-6);
/// assert_eq!(hazard.pixel(1, 1), NO_EDGE);
/// ```
pub fn compute_hazard_field(
    boundary: &Raster<bool>,
    distance_sq: &Raster<f32>,
    degrees_per_pixel: f32,
) -> Result<Raster<f32>> {
    boundary.require_conformant(distance_sq)?;
    if !(degrees_per_pixel > 0.0 && degrees_per_pixel.is_finite()) {
        return Err(Error::invalid_parameter(format!(
            "degrees per pixel must be positive and finite, got {degrees_per_pixel}"
        )));
    }

    let (rows, cols) = boundary.dimensions();
    trace!(rows, cols, degrees_per_pixel, "computing hazard field");

    let flags = boundary.data();
    let squared = distance_sq.data();
    let mut field = vec![NO_EDGE; rows as usize * cols as usize];
    for_each_row(&mut field, cols as usize, |r, row| {
        let offset = r * cols as usize;
        for (c, cell) in row.iter_mut().enumerate() {
            if flags[offset + c] {
                *cell = degrees_per_pixel * squared[offset + c].sqrt();
            }
        }
    });

    Ok(Raster::from_data(rows, cols, field)?.with_fov(boundary.fov()))
}
