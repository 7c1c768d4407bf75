//! Geometric discontinuity detection.
//!
//! # Overview
//!
//! Marks pixels where the rendered surface is discontinuous, in either of two
//! senses:
//!
//! - **Position breaks** (occlusion boundaries, depth steps): the surface
//!   point behind a pixel deviates from the midpoint of the surface points a
//!   few pixels away on either side. A continuous, locally planar surface
//!   lands on that midpoint regardless of slant, so smooth slopes are not
//!   flagged. The scalar viewpoint distance is checked the same way as a
//!   second depth cue.
//! - **Orientation breaks** (creases, folds): the surface normals on either
//!   side of the pixel differ by more than a threshold angle, even when the
//!   surface itself is continuous.
//!
//! Both tests run along four principal directions through the pixel
//! (horizontal, vertical, both diagonals); any single direction exceeding its
//! threshold marks the pixel. Directions whose endpoints fall outside the
//! raster are skipped, so border pixels are judged only by the directions
//! that fit.
//!
//! Position deviations are measured in the geometry's own unit and converted
//! to centimeters before comparison, so thresholds keep their meaning across
//! scenes modeled in millimeters, centimeters, or meters.

use glam::Vec3;
use hazvis_core::{Raster, Result};
use tracing::trace;

use crate::scene::SceneGeometry;

/// Endpoint offsets for the four principal directions, as `(d_row, d_col)`.
const DIRECTIONS: [(i64, i64); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Parameters for [`detect_discontinuities`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscontinuityParams {
    /// Diameter of the position comparison span, in pixels. Odd, at least 3.
    pub position_patch_size: u32,
    /// Diameter of the orientation comparison span, in pixels. Odd, at least 3.
    pub orientation_patch_size: u32,
    /// Position deviation that marks a break, in centimeters.
    pub position_threshold: f32,
    /// Normal angle difference that marks a break, in degrees.
    pub orientation_threshold: f32,
}

impl Default for DiscontinuityParams {
    fn default() -> Self {
        Self {
            position_patch_size: 3,
            orientation_patch_size: 3,
            position_threshold: 2.0,
            orientation_threshold: 20.0,
        }
    }
}

impl DiscontinuityParams {
    /// Checks the parameters for internal consistency.
    ///
    /// # Errors
    /// Returns [`hazvis_core::Error::InvalidParameter`] when a patch size is
    /// even or below 3, or a threshold is not positive and finite.
    pub fn validate(&self) -> Result<()> {
        validate_patch_size("position patch size", self.position_patch_size)?;
        validate_patch_size("orientation patch size", self.orientation_patch_size)?;
        validate_threshold("position threshold", self.position_threshold)?;
        validate_threshold("orientation threshold", self.orientation_threshold)?;
        Ok(())
    }
}

fn validate_patch_size(name: &str, size: u32) -> Result<()> {
    if size < 3 || size % 2 == 0 {
        return Err(hazvis_core::Error::invalid_parameter(format!(
            "{name} must be odd and at least 3, got {size}"
        )));
    }
    Ok(())
}

fn validate_threshold(name: &str, value: f32) -> Result<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(hazvis_core::Error::invalid_parameter(format!(
            "{name} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}

/// Marks pixels lying on geometric discontinuities.
///
/// Returns a boolean raster conformant with the geometry, `true` where a
/// position or orientation break was found. The result carries the
/// geometry's field of view.
///
/// # Errors
/// Returns an error when the parameters fail [`DiscontinuityParams::validate`].
pub fn detect_discontinuities(
    geometry: &SceneGeometry,
    params: &DiscontinuityParams,
) -> Result<Raster<bool>> {
    params.validate()?;

    let (rows, cols) = geometry.dimensions();
    trace!(
        rows,
        cols,
        position_patch = params.position_patch_size,
        orientation_patch = params.orientation_patch_size,
        "detecting geometric discontinuities"
    );

    let unit_scale = geometry.coordinates.unit.to_centimeters();
    let position_half = (params.position_patch_size / 2) as i64;
    let orientation_half = (params.orientation_patch_size / 2) as i64;

    let mut flags = vec![false; rows as usize * cols as usize];
    for r in 0..rows {
        for c in 0..cols {
            let broken = position_break(
                geometry,
                r,
                c,
                position_half,
                unit_scale,
                params.position_threshold,
            ) || orientation_break(geometry, r, c, orientation_half, params.orientation_threshold);
            if broken {
                flags[(r * cols + c) as usize] = true;
            }
        }
    }

    Ok(Raster::from_data(rows, cols, flags)?.with_fov(geometry.fov()))
}

/// Tests whether the surface position at `(r, c)` breaks away from the
/// straight-line prediction of its neighbors along any principal direction.
fn position_break(
    geometry: &SceneGeometry,
    r: u32,
    c: u32,
    half: i64,
    unit_scale: f32,
    threshold: f32,
) -> bool {
    let center_position = geometry.position.pixel(r, c);
    let center_distance = geometry.distance.pixel(r, c);

    for (dr, dc) in DIRECTIONS {
        let (ar, ac) = (r as i64 - dr * half, c as i64 - dc * half);
        let (br, bc) = (r as i64 + dr * half, c as i64 + dc * half);

        let (Some(pos_a), Some(pos_b)) = (
            sample(&geometry.position, ar, ac),
            sample(&geometry.position, br, bc),
        ) else {
            continue;
        };

        // On a plane the center sits on the endpoint midpoint exactly.
        let midpoint = (pos_a + pos_b) * 0.5;
        if (center_position - midpoint).length() * unit_scale > threshold {
            return true;
        }

        let (Some(dst_a), Some(dst_b)) = (
            sample(&geometry.distance, ar, ac),
            sample(&geometry.distance, br, bc),
        ) else {
            continue;
        };
        if (center_distance - 0.5 * (dst_a + dst_b)).abs() * unit_scale > threshold {
            return true;
        }
    }
    false
}

/// Tests whether the surface normals astride `(r, c)` disagree by more than
/// `threshold_deg` along any principal direction.
fn orientation_break(
    geometry: &SceneGeometry,
    r: u32,
    c: u32,
    half: i64,
    threshold_deg: f32,
) -> bool {
    for (dr, dc) in DIRECTIONS {
        let (Some(normal_a), Some(normal_b)) = (
            sample(&geometry.normal, r as i64 - dr * half, c as i64 - dc * half),
            sample(&geometry.normal, r as i64 + dr * half, c as i64 + dc * half),
        ) else {
            continue;
        };

        let normal_a = normal_a.normalize_or_zero();
        let normal_b = normal_b.normalize_or_zero();
        if normal_a == Vec3::ZERO || normal_b == Vec3::ZERO {
            // Degenerate normals carry no orientation.
            continue;
        }

        let angle = normal_a.dot(normal_b).clamp(-1.0, 1.0).acos().to_degrees();
        if angle > threshold_deg {
            return true;
        }
    }
    false
}

/// Bounds-checked raster access with signed indices.
fn sample<T: Copy>(raster: &Raster<T>, r: i64, c: i64) -> Option<T> {
    if r < 0 || c < 0 {
        return None;
    }
    raster.get_pixel(r as u32, c as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Coordinates, LengthUnit};
    use hazvis_core::Fov;

    /// Builds a geometry from closures mapping `(row, col)` to each field.
    fn build_geometry(
        rows: u32,
        cols: u32,
        unit: LengthUnit,
        position: impl Fn(u32, u32) -> Vec3,
        distance: impl Fn(u32, u32) -> f32,
        normal: impl Fn(u32, u32) -> Vec3,
    ) -> SceneGeometry {
        let mut pos = Vec::new();
        let mut dst = Vec::new();
        let mut nrm = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                pos.push(position(r, c));
                dst.push(distance(r, c));
                nrm.push(normal(r, c));
            }
        }
        SceneGeometry::new(
            Coordinates::new(unit, Fov::new(40.0, 60.0)),
            Raster::from_data(rows, cols, pos).unwrap(),
            Raster::from_data(rows, cols, dst).unwrap(),
            Raster::from_data(rows, cols, nrm).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_flat_plane_unflagged() {
        let geometry = build_geometry(
            8,
            8,
            LengthUnit::Centimeters,
            |r, c| Vec3::new(c as f32, r as f32, 50.0),
            |_, _| 50.0,
            |_, _| Vec3::Z,
        );
        let flags = detect_discontinuities(&geometry, &DiscontinuityParams::default()).unwrap();
        assert!(flags.pixels().all(|(_, _, flag)| !flag));
    }

    #[test]
    fn test_slanted_plane_unflagged() {
        // A steep but smooth slope: position and distance vary linearly, so
        // every center sits exactly on its endpoint midpoint.
        let geometry = build_geometry(
            8,
            8,
            LengthUnit::Centimeters,
            |r, c| Vec3::new(c as f32, r as f32, 40.0 + 3.0 * c as f32),
            |_, c| 40.0 + 3.0 * c as f32,
            |_, _| Vec3::new(-0.6, 0.0, 0.8),
        );
        let flags = detect_discontinuities(&geometry, &DiscontinuityParams::default()).unwrap();
        assert!(flags.pixels().all(|(_, _, flag)| !flag));
    }

    #[test]
    fn test_depth_step_flagged() {
        // Two parallel planes with a 10 cm gap between columns 4 and 5.
        let step = |c: u32| if c < 5 { 50.0 } else { 60.0 };
        let geometry = build_geometry(
            10,
            10,
            LengthUnit::Centimeters,
            |r, c| Vec3::new(c as f32, r as f32, step(c)),
            |_, c| step(c),
            |_, _| Vec3::Z,
        );
        let flags = detect_discontinuities(&geometry, &DiscontinuityParams::default()).unwrap();

        for r in 0..10 {
            assert!(flags.pixel(r, 4), "step edge missed at row {r}");
            assert!(flags.pixel(r, 5), "step edge missed at row {r}");
            assert!(!flags.pixel(r, 1), "false positive at row {r}");
            assert!(!flags.pixel(r, 8), "false positive at row {r}");
        }
    }

    #[test]
    fn test_crease_flagged_by_orientation() {
        // Two planes meeting in a shallow crease at column 5: the position
        // kink stays under the threshold, only the normals disagree.
        let height = |c: u32| if c <= 5 { 0.0 } else { (c - 5) as f32 };
        let tilted = Vec3::new(1.0, 0.0, 1.0).normalize();
        let geometry = build_geometry(
            8,
            12,
            LengthUnit::Centimeters,
            |r, c| Vec3::new(c as f32, r as f32, height(c)),
            |_, _| 80.0,
            move |_, c| if c <= 5 { Vec3::Z } else { tilted },
        );
        let flags = detect_discontinuities(&geometry, &DiscontinuityParams::default()).unwrap();

        for r in 0..8 {
            assert!(flags.pixel(r, 5) || flags.pixel(r, 6), "crease missed at row {r}");
            assert!(!flags.pixel(r, 2), "false positive at row {r}");
            assert!(!flags.pixel(r, 10), "false positive at row {r}");
        }
    }

    #[test]
    fn test_unit_scaling() {
        // A 0.05-unit step reads as 5 cm in meters but 0.05 cm in centimeters.
        let step = |c: u32| if c < 5 { 1.0 } else { 1.05 };
        let position = |r: u32, c: u32| Vec3::new(c as f32 * 0.01, r as f32 * 0.01, step(c));
        let in_meters = build_geometry(
            8,
            10,
            LengthUnit::Meters,
            position,
            |_, _| 2.0,
            |_, _| Vec3::Z,
        );
        let in_centimeters = build_geometry(
            8,
            10,
            LengthUnit::Centimeters,
            position,
            |_, _| 2.0,
            |_, _| Vec3::Z,
        );

        let params = DiscontinuityParams::default();
        let meter_flags = detect_discontinuities(&in_meters, &params).unwrap();
        let centimeter_flags = detect_discontinuities(&in_centimeters, &params).unwrap();

        assert!(meter_flags.pixel(4, 4));
        assert!(centimeter_flags.pixels().all(|(_, _, flag)| !flag));
    }

    #[test]
    fn test_degenerate_normals_skipped() {
        let geometry = build_geometry(
            6,
            6,
            LengthUnit::Centimeters,
            |r, c| Vec3::new(c as f32, r as f32, 20.0),
            |_, _| 20.0,
            |_, _| Vec3::ZERO,
        );
        let flags = detect_discontinuities(&geometry, &DiscontinuityParams::default()).unwrap();
        assert!(flags.pixels().all(|(_, _, flag)| !flag));
    }

    #[test]
    fn test_param_validation() {
        let geometry = build_geometry(
            4,
            4,
            LengthUnit::Centimeters,
            |_, _| Vec3::ZERO,
            |_, _| 1.0,
            |_, _| Vec3::Z,
        );

        let even_patch = DiscontinuityParams {
            position_patch_size: 4,
            ..Default::default()
        };
        assert!(detect_discontinuities(&geometry, &even_patch).is_err());

        let tiny_patch = DiscontinuityParams {
            orientation_patch_size: 1,
            ..Default::default()
        };
        assert!(detect_discontinuities(&geometry, &tiny_patch).is_err());

        let bad_threshold = DiscontinuityParams {
            position_threshold: 0.0,
            ..Default::default()
        };
        assert!(detect_discontinuities(&geometry, &bad_threshold).is_err());
    }

    #[test]
    fn test_output_carries_fov() {
        let geometry = build_geometry(
            5,
            5,
            LengthUnit::Centimeters,
            |_, _| Vec3::ZERO,
            |_, _| 1.0,
            |_, _| Vec3::Z,
        );
        let flags = detect_discontinuities(&geometry, &DiscontinuityParams::default()).unwrap();
        assert_eq!(flags.fov(), Fov::new(40.0, 60.0));
        assert_eq!(flags.dimensions(), (5, 5));
    }
}
