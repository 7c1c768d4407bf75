//! # hazvis-core
//!
//! Core types for hazard visibility analysis.
//!
//! This crate provides the foundational types used throughout the hazvis
//! workspace:
//!
//! - [`Raster`] - Row-major 2D grid with copy-on-write storage and
//!   field-of-view metadata
//! - [`Fov`] - Angular extent of the optical projection, with the
//!   degrees-per-pixel derivation
//! - [`Error`], [`Result`] - Unified error handling for the pipeline
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies. All other hazvis crates depend on `hazvis-core`:
//!
//! ```text
//! hazvis-core (this crate)
//!    ^
//!    |
//!    +-- hazvis-color (photometric conversions)
//!    +-- hazvis-edge (edge detection, distance transform)
//!    +-- hazvis-geom (geometry discontinuities)
//!    +-- hazvis-field (hazard field, visualization)
//!    +-- hazvis-io (file I/O)
//! ```
//!
//! ## Error Philosophy
//!
//! Shape mismatches, bad parameters, and allocation failures are caller
//! errors, reported through [`Result`] with enough context to identify
//! the offending dimensions or value. Nothing in this workspace
//! terminates the process on bad input.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod fov;
pub mod raster;

// Re-exports for convenience
pub use error::{Error, Result};
pub use fov::Fov;
pub use raster::Raster;
