//! Error types for hazvis-core operations.
//!
//! This module provides the unified error handling system for the hazard
//! visibility pipeline.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes that can occur during:
//! - Raster buffer operations (allocation, dimension validation)
//! - Combining rasters (conformance checking)
//! - Parameter validation (fields of view, detector thresholds, scoring
//!   function parameters)
//!
//! Every failure is a precondition violation on the caller's side, not a
//! transient condition, so there is no retry machinery: operations report
//! with enough context to identify the offending dimensions or value and
//! return.
//!
//! # Usage
//!
//! ```rust
//! use hazvis_core::{Error, Result};
//!
//! fn check_scale(scale: f32) -> Result<()> {
//!     if !scale.is_finite() || scale <= 0.0 {
//!         return Err(Error::invalid_parameter(format!(
//!             "scale must be positive, got {scale}"
//!         )));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::raster::Raster`] - Buffer and conformance checks
//! - `hazvis-color`, `hazvis-edge`, `hazvis-geom`, `hazvis-field` -
//!   pipeline operations
//! - `hazvis-io` - wrapped into its `IoError`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during hazard visibility processing.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
///
/// # Categories
///
/// - **Shape errors**: [`ShapeMismatch`](Error::ShapeMismatch),
///   [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Parameter errors**: [`InvalidParameter`](Error::InvalidParameter)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
#[derive(Debug, Error)]
pub enum Error {
    /// Two rasters combined in one operation have different dimensions.
    ///
    /// Nearly every pipeline operation requires all of its raster inputs
    /// to be conformant (equal row and column counts).
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Error;
    ///
    /// let err = Error::shape_mismatch((480, 640), (480, 639));
    /// assert!(err.to_string().contains("480x640"));
    /// assert!(err.to_string().contains("480x639"));
    /// ```
    #[error("shape mismatch: {a_rows}x{a_cols} vs {b_rows}x{b_cols}")]
    ShapeMismatch {
        /// First raster row count
        a_rows: u32,
        /// First raster column count
        a_cols: u32,
        /// Second raster row count
        b_rows: u32,
        /// Second raster column count
        b_cols: u32,
    },

    /// Requested raster dimensions are unusable.
    ///
    /// Returned when rows or cols is zero, or the cell count would
    /// overflow buffer size calculations.
    #[error("invalid dimensions: {rows}x{cols} ({reason})")]
    InvalidDimensions {
        /// Requested row count
        rows: u32,
        /// Requested column count
        cols: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A numeric or structural parameter is outside its valid domain.
    ///
    /// Covers non-positive degrees-per-pixel factors, non-positive
    /// scoring-function parameters, bad smoothing sigmas, even or
    /// undersized patch sizes, and similar caller mistakes.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed.
    ///
    /// Returned when a raster buffer cannot be allocated. This typically
    /// happens with very large rasters; it is reported instead of
    /// aborting the process.
    ///
    /// # Fields
    ///
    /// - `requested` - Number of bytes requested
    /// - `reason` - Description of why allocation failed
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::ShapeMismatch`] error.
    ///
    /// # Arguments
    ///
    /// * `a` - First raster dimensions as (rows, cols)
    /// * `b` - Second raster dimensions as (rows, cols)
    #[inline]
    pub fn shape_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::ShapeMismatch {
            a_rows: a.0,
            a_cols: a.1,
            b_rows: b.0,
            b_cols: b.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(rows: u32, cols: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            rows,
            cols,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a shape or dimension error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. } | Self::InvalidDimensions { .. }
        )
    }

    /// Returns `true` if this is a parameter-domain error.
    #[inline]
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
