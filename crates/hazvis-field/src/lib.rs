//! Hazard field computation, scoring, and visualization.
//!
//! # Overview
//!
//! This crate fuses the two boundary maps produced upstream into the
//! quantities the tool reports:
//!
//! ```text
//! luminance edges ──> distance transform ──┐
//!                                          ├──> hazard field ──> score
//! geometric boundaries ────────────────────┘            │
//!                                                       └──> rendering
//! ```
//!
//! - [`compute_hazard_field`]: per boundary pixel, the visual distance in
//!   degrees to the nearest luminance edge ([`NO_EDGE`] elsewhere)
//! - [`Measurement`]: maps that distance to a hazard level in `[0, 1]`
//! - [`average_score`] / [`visualize`]: the scalar score and the color
//!   rendering, with mask and region-of-interest overlays
//! - [`compute_visibility`]: the whole pipeline over one image/geometry
//!   pair, with an optional observer callback
//!
//! # Features
//!
//! - `parallel` (default): row-parallel passes via rayon
//!
//! # Dependencies
//!
//! - `hazvis-core`: rasters and errors
//! - `hazvis-color`: luminance and output encoding
//! - `hazvis-edge`: edge detection and the distance transform
//! - `hazvis-geom`: scene geometry and discontinuity detection

#![warn(missing_docs)]

pub mod hazard;
pub mod measure;
pub mod palette;
pub mod visibility;
pub mod viz;

mod rows;

pub use hazard::{compute_hazard_field, NO_EDGE};
pub use measure::Measurement;
pub use palette::{Color, Palette, BACKGROUND_COLOR, MASK_BOUNDARY_COLOR, MASK_COLOR};
pub use visibility::{
    compute_visibility, VisibilityObserver, VisibilityOutputs, VisibilityParams,
};
pub use viz::{average_score, dilate3x3, visualize, Visualization, VisualizeOptions};
