//! Coordinate descriptors for scene geometry.
//!
//! # Overview
//!
//! A [`Coordinates`] value describes how the numbers in a set of geometry
//! rasters should be read: the [`LengthUnit`] the positions and distances are
//! expressed in, and the camera [`Fov`] the rasters were rendered with.
//! Discontinuity thresholds are fixed in centimeters, so the unit's
//! centimeter scale is applied to measured deviations before comparison.
//!
//! # Used By
//!
//! - `hazvis-geom` scene types and the discontinuity detector
//! - `hazvis-io` coordinate file parsing

use std::fmt;
use std::str::FromStr;

use hazvis_core::{Error, Fov, Result};

/// Unit of length for geometry positions and viewpoint distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Millimeters (0.1 cm).
    Millimeters,
    /// Centimeters.
    #[default]
    Centimeters,
    /// Meters (100 cm).
    Meters,
}

impl LengthUnit {
    /// Scale factor converting a length in this unit to centimeters.
    ///
    /// # Example
    /// ```
    /// use hazvis_geom::LengthUnit;
    ///
    /// assert_eq!(LengthUnit::Meters.to_centimeters(), 100.0);
    /// assert_eq!(LengthUnit::Millimeters.to_centimeters(), 0.1);
    /// ```
    pub fn to_centimeters(&self) -> f32 {
        match self {
            Self::Millimeters => 0.1,
            Self::Centimeters => 1.0,
            Self::Meters => 100.0,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeters),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "m" | "meter" | "meters" => Ok(Self::Meters),
            other => Err(Error::invalid_parameter(format!(
                "unknown length unit: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Millimeters => "millimeters",
            Self::Centimeters => "centimeters",
            Self::Meters => "meters",
        };
        write!(f, "{name}")
    }
}

/// Interpretation context for a set of geometry rasters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    /// Unit the position and distance values are expressed in.
    pub unit: LengthUnit,
    /// Field of view the rasters were rendered with, in degrees.
    pub fov: Fov,
}

impl Coordinates {
    /// Creates a coordinate descriptor from a unit and field of view.
    pub fn new(unit: LengthUnit, fov: Fov) -> Self {
        Self { unit, fov }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing() {
        assert_eq!("cm".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeters);
        assert_eq!(
            "Meters".parse::<LengthUnit>().unwrap(),
            LengthUnit::Meters
        );
        assert_eq!(
            " mm ".parse::<LengthUnit>().unwrap(),
            LengthUnit::Millimeters
        );
        assert!("furlongs".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_unit_scale() {
        assert_eq!(LengthUnit::Millimeters.to_centimeters(), 0.1);
        assert_eq!(LengthUnit::Centimeters.to_centimeters(), 1.0);
        assert_eq!(LengthUnit::Meters.to_centimeters(), 100.0);
    }

    #[test]
    fn test_unit_display_roundtrip() {
        for unit in [
            LengthUnit::Millimeters,
            LengthUnit::Centimeters,
            LengthUnit::Meters,
        ] {
            assert_eq!(unit.to_string().parse::<LengthUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_coordinates_default() {
        let coords = Coordinates::default();
        assert_eq!(coords.unit, LengthUnit::Centimeters);
        assert_eq!(coords.fov, Fov::ZERO);
    }
}
