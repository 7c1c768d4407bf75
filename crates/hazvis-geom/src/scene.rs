//! Per-pixel scene geometry rendered from the viewpoint of the image.

use glam::Vec3;
use hazvis_core::{Fov, Raster, Result};

use crate::coords::Coordinates;

/// Per-pixel 3D geometry registered to an image.
///
/// All three rasters must share the image's dimensions. Positions are world
/// coordinates of the surface point seen through each pixel, distances are
/// scalar lengths from the viewpoint to that point, and normals are surface
/// orientation vectors (not required to be unit length).
///
/// # Example
/// ```
/// use glam::Vec3;
/// use hazvis_core::{Fov, Raster};
/// use hazvis_geom::{Coordinates, LengthUnit, SceneGeometry};
///
/// let coords = Coordinates::new(LengthUnit::Centimeters, Fov::new(40.0, 60.0));
/// let position = Raster::filled(120, 160, Vec3::ZERO).unwrap();
/// let distance = Raster::filled(120, 160, 100.0f32).unwrap();
/// let normal = Raster::filled(120, 160, Vec3::Z).unwrap();
///
/// let geometry = SceneGeometry::new(coords, position, distance, normal).unwrap();
/// assert_eq!(geometry.dimensions(), (120, 160));
/// ```
#[derive(Debug, Clone)]
pub struct SceneGeometry {
    /// Unit and field of view the rasters were rendered with.
    pub coordinates: Coordinates,
    /// World-space position of the surface point behind each pixel.
    pub position: Raster<Vec3>,
    /// Scalar distance from the viewpoint to each surface point.
    pub distance: Raster<f32>,
    /// Surface normal at each surface point.
    pub normal: Raster<Vec3>,
}

impl SceneGeometry {
    /// Assembles a scene geometry, checking that the rasters conform.
    ///
    /// # Errors
    /// Returns [`hazvis_core::Error::ShapeMismatch`] when the rasters disagree
    /// on dimensions.
    pub fn new(
        coordinates: Coordinates,
        position: Raster<Vec3>,
        distance: Raster<f32>,
        normal: Raster<Vec3>,
    ) -> Result<Self> {
        position.require_conformant(&distance)?;
        position.require_conformant(&normal)?;
        Ok(Self {
            coordinates,
            position,
            distance,
            normal,
        })
    }

    /// Shared dimensions of the geometry rasters as `(rows, cols)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.position.dimensions()
    }

    /// Field of view recorded in the coordinate descriptor.
    pub fn fov(&self) -> Fov {
        self.coordinates.fov
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::LengthUnit;

    #[test]
    fn test_scene_geometry_new() {
        let coords = Coordinates::new(LengthUnit::Meters, Fov::new(30.0, 40.0));
        let geometry = SceneGeometry::new(
            coords,
            Raster::filled(4, 6, Vec3::ONE).unwrap(),
            Raster::filled(4, 6, 2.0f32).unwrap(),
            Raster::filled(4, 6, Vec3::Z).unwrap(),
        )
        .unwrap();

        assert_eq!(geometry.dimensions(), (4, 6));
        assert_eq!(geometry.fov(), Fov::new(30.0, 40.0));
        assert_eq!(geometry.coordinates.unit, LengthUnit::Meters);
    }

    #[test]
    fn test_scene_geometry_shape_mismatch() {
        let coords = Coordinates::default();
        let result = SceneGeometry::new(
            coords,
            Raster::filled(4, 6, Vec3::ZERO).unwrap(),
            Raster::filled(4, 5, 0.0f32).unwrap(),
            Raster::filled(4, 6, Vec3::Z).unwrap(),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().is_shape_error());
    }
}
