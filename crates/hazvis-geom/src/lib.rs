//! Scene geometry and geometric discontinuity detection.
//!
//! # Overview
//!
//! This crate pairs an image with per-pixel 3D geometry rendered from the
//! same viewpoint and finds the pixels where that geometry is discontinuous.
//! Those pixels are physical boundaries (steps, edges of obstacles, creases)
//! and are fused with luminance edges downstream to decide which hazards are
//! visually detectable.
//!
//! - [`Coordinates`] / [`LengthUnit`]: how to read the geometry numbers
//! - [`SceneGeometry`]: position, viewpoint distance, and normal rasters
//! - [`detect_discontinuities`]: position and orientation break detection
//!
//! # Dependencies
//!
//! - `hazvis-core`: rasters, field of view, errors
//! - `glam`: 3D vector math

#![warn(missing_docs)]

pub mod coords;
pub mod detect;
pub mod scene;

pub use coords::{Coordinates, LengthUnit};
pub use detect::{detect_discontinuities, DiscontinuityParams};
pub use scene::SceneGeometry;
