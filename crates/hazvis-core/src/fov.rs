//! Field-of-view metadata for rasters.
//!
//! A [`Fov`] records the vertical and horizontal angular extent, in
//! degrees, of the optical projection a raster was produced under. The
//! hazard pipeline uses it to convert pixel distances into visual-angle
//! distances via [`Fov::degrees_per_pixel`].

use crate::{Error, Result};

/// Vertical and horizontal field of view in degrees.
///
/// Rasters produced without projection metadata carry [`Fov::ZERO`];
/// operations that need angular conversion reject a zero field of view.
///
/// # Example
///
/// ```rust
/// use hazvis_core::Fov;
///
/// let fov = Fov::new(60.0, 75.0);
/// let dpp = fov.degrees_per_pixel(480, 640).unwrap();
/// assert!((dpp - 75.0 / 640.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fov {
    /// Vertical field of view in degrees
    pub vertical: f32,
    /// Horizontal field of view in degrees
    pub horizontal: f32,
}

impl Fov {
    /// Absent field of view (both angles zero).
    pub const ZERO: Fov = Fov {
        vertical: 0.0,
        horizontal: 0.0,
    };

    /// Creates a field of view from vertical and horizontal angles in degrees.
    #[inline]
    pub fn new(vertical: f32, horizontal: f32) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Angular extent of one pixel step, in degrees.
    ///
    /// Computed as `max(vertical, horizontal) / max(rows, cols)`: a single
    /// isotropic factor that assumes pixels subtend roughly equal angles
    /// along both axes. For strongly anisotropic projections this
    /// overstates the short axis; per-axis factors would change the hazard
    /// metric and are deliberately not provided here.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if the larger angle is not positive
    ///   and finite
    /// - [`Error::InvalidDimensions`] if `rows` or `cols` is zero
    pub fn degrees_per_pixel(&self, rows: u32, cols: u32) -> Result<f32> {
        let max_fov = self.vertical.max(self.horizontal);
        if !max_fov.is_finite() || max_fov <= 0.0 {
            return Err(Error::invalid_parameter(format!(
                "field of view must be positive, got {}x{} degrees",
                self.vertical, self.horizontal
            )));
        }
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                "degrees-per-pixel requires non-zero dimensions",
            ));
        }
        Ok(max_fov / rows.max(cols) as f32)
    }
}
