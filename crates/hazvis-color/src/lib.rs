//! # hazvis-color
//!
//! Photometric conversions for hazard visibility analysis.
//!
//! Bidirectional, stateless conversions among the four representations
//! the pipeline moves through. Every conversion is a pure function; there
//! is no global color state.
//!
//! # Representations
//!
//! | Representation | Type | Notes |
//! |----------------|------|-------|
//! | 8-bit gamma | `u8` / `[u8; 3]` | sRGB piecewise curve |
//! | 8-bit linear | `u8` / `[u8; 3]` | straight 255 scaling |
//! | Linear light | `f32` / `[f32; 3]` | nominally [0, 1], unbounded for HDR producers |
//! | CIE XYZ / xyY | [`Xyz`] / [`XyY`] | same scale as the linear RGB source |
//!
//! # Out-of-range policies
//!
//! Scalar encoders clamp each value to [0, 1] (absolute clamp). Triple
//! encoders renormalize by `max(1.0, max(R, G, B))` first (relative,
//! ratio-preserving clip). The two policies are deliberately distinct;
//! see [`convert`] for why.
//!
//! # Usage
//!
//! ```rust
//! use hazvis_color::{decode_gamma, rgb_to_y};
//!
//! let linear = decode_gamma(128);
//! let y = rgb_to_y([linear, linear, linear]);
//! assert!((y - linear).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`hazvis_core`] - Raster container for the whole-image helpers
//!
//! # Used By
//!
//! - `hazvis-field` - luminance extraction and visualization encoding
//! - `hazvis-cli` - image decode on load

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod mat;
pub mod raster;
pub mod transfer;

// Re-exports for convenience
pub use convert::{
    decode_rgb_gamma, decode_rgb_linear, encode_rgb_gamma, encode_rgb_linear, rgb_to_xyz,
    rgb_to_y, xyy_to_xyz, xyz_to_rgb, xyz_to_xyy, XyY, Xyz, SRGB_TO_XYZ, XYZ_TO_SRGB,
};
pub use mat::Mat3;
pub use raster::{decode_image, encode_image, luminance, PixelEncoding};
pub use transfer::{decode_gamma, decode_linear, encode_gamma, encode_linear};
