//! File I/O for hazard visibility analysis.
//!
//! # Overview
//!
//! Two kinds of input cross this crate's boundary: PNG photographs of the
//! scene and plain-text geometry rasters rendered from the same viewpoint.
//! Outputs are PNG renderings and boundary maps.
//!
//! - [`png`]: image and boundary map reading and writing
//! - [`geom`]: coordinates files, ASCII rasters, [`geom::load_scene_geometry`]
//!
//! All functions return [`IoResult`]; raster construction errors from
//! `hazvis-core` pass through as [`IoError::Core`].

#![warn(missing_docs)]

pub mod error;
pub mod geom;
pub mod png;

pub use error::{IoError, IoResult};
