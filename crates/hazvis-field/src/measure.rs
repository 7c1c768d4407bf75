//! Measurement functions mapping invisibility distance to hazard level.
//!
//! # Overview
//!
//! A hazard field value is a distance in degrees of visual angle. A
//! [`Measurement`] folds that open-ended distance into a hazard level in
//! `[0, 1]`: 0 at distance zero (the boundary is marked by contrast exactly
//! where it is) rising toward 1 as the nearest contrast cue moves away. The
//! complement, [`Measurement::goodness`], is what the scalar visibility
//! score averages.
//!
//! All three shapes agree at the endpoints; they differ in how quickly they
//! saturate:
//!
//! | Shape | Level at distance `d` |
//! |-------|-----------------------|
//! | `Reciprocal { scale }` | `1 - scale / (d + scale)` |
//! | `Linear { max_hazard }` | `min(d, max_hazard) / max_hazard` |
//! | `Gaussian { sigma }` | `1 - exp(-0.5 * (d / sigma)^2)` |

use hazvis_core::{Error, Result};

/// Maps an invisibility distance in degrees to a hazard level in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Hyperbolic saturation. `scale` is the distance at which the level
    /// reaches 0.5; sensitive near zero, never quite saturates.
    Reciprocal {
        /// Half-level distance in degrees.
        scale: f32,
    },
    /// Linear ramp clipped at `max_hazard`; distances beyond it all read 1.
    Linear {
        /// Distance in degrees at which the level saturates.
        max_hazard: f32,
    },
    /// Inverted Gaussian. Flat near zero, so small edge displacements are
    /// forgiven; `sigma` sets where the level starts climbing.
    Gaussian {
        /// Gaussian width in degrees.
        sigma: f32,
    },
}

impl Default for Measurement {
    fn default() -> Self {
        Self::Reciprocal { scale: 0.5 }
    }
}

impl Measurement {
    /// Checks that the shape parameter is positive and finite.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let (name, value) = match *self {
            Self::Reciprocal { scale } => ("measurement scale", scale),
            Self::Linear { max_hazard } => ("measurement max hazard", max_hazard),
            Self::Gaussian { sigma } => ("measurement sigma", sigma),
        };
        if !(value > 0.0 && value.is_finite()) {
            return Err(Error::invalid_parameter(format!(
                "{name} must be positive and finite, got {value}"
            )));
        }
        Ok(())
    }

    /// Hazard level in `[0, 1]` for an invisibility distance in degrees.
    ///
    /// # Example
    /// ```
    /// use hazvis_field::Measurement;
    ///
    /// let linear = Measurement::Linear { max_hazard: 2.0 };
    /// assert_eq!(linear.hazard_level(0.0), 0.0);
    /// assert_eq!(linear.hazard_level(1.0), 0.5);
    /// assert_eq!(linear.hazard_level(5.0), 1.0);
    /// ```
    pub fn hazard_level(&self, distance: f32) -> f32 {
        match *self {
            Self::Reciprocal { scale } => 1.0 - scale / (distance + scale),
            Self::Linear { max_hazard } => distance.min(max_hazard) / max_hazard,
            Self::Gaussian { sigma } => {
                let t = distance / sigma;
                1.0 - (-0.5 * t * t).exp()
            }
        }
    }

    /// Visibility goodness, the complement of [`Self::hazard_level`].
    pub fn goodness(&self, distance: f32) -> f32 {
        1.0 - self.hazard_level(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SHAPES: [Measurement; 3] = [
        Measurement::Reciprocal { scale: 0.5 },
        Measurement::Linear { max_hazard: 2.0 },
        Measurement::Gaussian { sigma: 0.75 },
    ];

    #[test]
    fn test_zero_distance_is_fully_visible() {
        for shape in SHAPES {
            assert_eq!(shape.hazard_level(0.0), 0.0);
            assert_eq!(shape.goodness(0.0), 1.0);
        }
    }

    #[test]
    fn test_levels_bounded_and_monotonic() {
        for shape in SHAPES {
            let mut previous = -1.0f32;
            for step in 0..200 {
                let distance = step as f32 * 0.1;
                let level = shape.hazard_level(distance);
                assert!((0.0..=1.0).contains(&level), "{shape:?} at {distance}");
                assert!(level >= previous, "{shape:?} not monotonic at {distance}");
                previous = level;
            }
        }
    }

    #[test]
    fn test_reciprocal_half_level_at_scale() {
        let shape = Measurement::Reciprocal { scale: 0.5 };
        assert_relative_eq!(shape.hazard_level(0.5), 0.5);
    }

    #[test]
    fn test_linear_saturates() {
        let shape = Measurement::Linear { max_hazard: 2.0 };
        assert_eq!(shape.hazard_level(2.0), 1.0);
        assert_eq!(shape.hazard_level(100.0), 1.0);
    }

    #[test]
    fn test_gaussian_sigma_level() {
        let shape = Measurement::Gaussian { sigma: 0.75 };
        assert_relative_eq!(shape.hazard_level(0.75), 1.0 - (-0.5f32).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        for bad in [
            Measurement::Reciprocal { scale: 0.0 },
            Measurement::Linear { max_hazard: -1.0 },
            Measurement::Gaussian { sigma: f32::NAN },
        ] {
            assert!(bad.validate().is_err());
        }
        for shape in SHAPES {
            assert!(shape.validate().is_ok());
        }
    }
}
