//! # hazvis-edge
//!
//! Luminance edge detection and the distance transform backing the
//! hazard field.
//!
//! Two operations:
//!
//! - [`detect_edges`] - Canny-style detector: Gaussian smoothing, Sobel
//!   gradients, interpolated non-maximum suppression, hysteresis with
//!   histogram-derived thresholds
//! - [`squared_distance_transform`] - exact squared Euclidean distance
//!   to the nearest boundary cell, two-pass parabola envelope
//!
//! Both operate on [`hazvis_core::Raster`] values and propagate the
//! source field of view.
//!
//! # Usage
//!
//! ```rust
//! use hazvis_core::Raster;
//! use hazvis_edge::{detect_edges, squared_distance_transform};
//!
//! let luminance = Raster::filled(32, 32, 0.5f32).unwrap();
//! let detection = detect_edges(&luminance, 1.4).unwrap();
//! let dist_sq = squared_distance_transform(&detection.boundary).unwrap();
//! assert_eq!(dist_sq.dimensions(), (32, 32));
//! ```
//!
//! # Dependencies
//!
//! - [`hazvis_core`] - Raster container and error types
//! - [`tracing`] - Operation entry tracing
//!
//! # Used By
//!
//! - `hazvis-field` - boundary maps and distance fields for the hazard
//!   computation
//! - `hazvis-cli` - the standalone `edges` command

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod canny;
pub mod dt;

pub use canny::{detect_edges, EdgeDetection, LOW_FRACTION, PERCENT_NOT_EDGES};
pub use dt::{squared_distance_transform, FAR};
