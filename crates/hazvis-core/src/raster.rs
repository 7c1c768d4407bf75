//! Raster container for the hazard visibility pipeline.
//!
//! This module provides [`Raster<T>`], the 2D grid every pipeline stage
//! consumes and produces: luminance images (`Raster<f32>`), boundary maps
//! (`Raster<bool>`), hazard fields (`Raster<f32>`), color images
//! (`Raster<[u8; 3]>` / `Raster<[f32; 3]>`), and 3D geometry buffers.
//!
//! # Memory Layout
//!
//! Cells are stored in **row-major** order, top row first:
//!
//! ```text
//! Memory: [c c c c ...]  <- Row 0
//!         [c c c c ...]  <- Row 1
//!         ...
//! ```
//!
//! Indexing is `(row, col)` throughout; `row` selects the scanline.
//!
//! # Metadata
//!
//! Each raster carries a [`Fov`] (angular extent of the projection it was
//! produced under, [`Fov::ZERO`] when unknown) and an optional free-text
//! description. Metadata travels with the raster through [`map`]
//! conversions.
//!
//! # Conformance
//!
//! Two rasters are *conformant* when their row and column counts match;
//! cell types may differ. Operations that combine rasters require
//! conformance of all inputs and return [`Error::ShapeMismatch`]
//! otherwise, see [`Raster::require_conformant`].
//!
//! # Usage
//!
//! ```rust
//! use hazvis_core::Raster;
//!
//! let mut field: Raster<f32> = Raster::new(480, 640).unwrap();
//! field.set_pixel(100, 200, 1.5);
//! assert_eq!(field.pixel(100, 200), 1.5);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::error::Error`] - Error types
//! - [`crate::fov::Fov`] - Projection metadata
//!
//! # Used By
//!
//! - `hazvis-color` - image decoding and luminance extraction
//! - `hazvis-edge` - boundary maps and distance fields
//! - `hazvis-geom` - position/distance/normal buffers
//! - `hazvis-field` - hazard fields and visualizations
//! - `hazvis-io` - file loading/saving
//!
//! [`map`]: Raster::map

use crate::{Error, Fov, Result};
use std::sync::Arc;

/// Owned 2D grid of cells with field-of-view metadata.
///
/// # Memory Management
///
/// The cell buffer is stored in an [`Arc<Vec<T>>`], enabling:
/// - Zero-copy cloning (shares underlying data)
/// - Thread-safe sharing for parallel processing
/// - Cheap aggregation of pipeline outputs
///
/// Mutation goes through [`Arc::make_mut`], so a shared buffer is cloned
/// on first write (copy-on-write).
///
/// # Example
///
/// ```rust
/// use hazvis_core::{Fov, Raster};
///
/// let mut boundary: Raster<bool> = Raster::new(480, 640)
///     .unwrap()
///     .with_fov(Fov::new(60.0, 75.0));
/// boundary.set_pixel(240, 320, true);
/// assert_eq!(boundary.pixel(240, 320), true);
/// assert_eq!(boundary.pixel(0, 0), false);
/// ```
#[derive(Clone)]
pub struct Raster<T> {
    /// Cell data buffer (Arc for cheap cloning)
    data: Arc<Vec<T>>,
    /// Number of rows
    rows: u32,
    /// Number of columns
    cols: u32,
    /// Angular extent of the projection, degrees
    fov: Fov,
    /// Optional free-text description
    description: Option<String>,
}

impl<T> Raster<T> {
    /// Validates dimensions and returns the cell count.
    ///
    /// Zero rows or cols are rejected so every downstream operation can
    /// divide by the dimensions without checking.
    fn checked_len(rows: u32, cols: u32) -> Result<usize> {
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                "rows and cols must be non-zero",
            ));
        }
        (rows as usize)
            .checked_mul(cols as usize)
            .ok_or_else(|| Error::invalid_dimensions(rows, cols, "cell count overflows usize"))
    }

    /// Creates a raster from existing cell data.
    ///
    /// # Arguments
    ///
    /// * `rows` - Row count
    /// * `cols` - Column count
    /// * `data` - Row-major cell data (must have exactly rows * cols elements)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length doesn't
    /// match or the dimensions are unusable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let cells = vec![0.0f32; 100 * 100];
    /// let raster = Raster::from_data(100, 100, cells).unwrap();
    /// assert_eq!(raster.dimensions(), (100, 100));
    /// ```
    pub fn from_data(rows: u32, cols: u32, data: Vec<T>) -> Result<Self> {
        let expected = Self::checked_len(rows, cols)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                format!("expected {} cells, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            rows,
            cols,
            fov: Fov::ZERO,
            description: None,
        })
    }

    /// Returns the row count.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the column count.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Returns the dimensions as (rows, cols).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Returns the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the field-of-view metadata.
    #[inline]
    pub fn fov(&self) -> Fov {
        self.fov
    }

    /// Replaces the field-of-view metadata.
    #[inline]
    pub fn set_fov(&mut self, fov: Fov) {
        self.fov = fov;
    }

    /// Builder-style variant of [`set_fov`](Self::set_fov).
    #[inline]
    pub fn with_fov(mut self, fov: Fov) -> Self {
        self.fov = fov;
        self
    }

    /// Returns the optional description.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replaces the description.
    #[inline]
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Builder-style variant of [`set_description`](Self::set_description).
    #[inline]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns a reference to the raw row-major cell data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the buffer offset of cell (row, col).
    #[inline]
    fn cell_offset(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    /// Returns a row of cells as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: u32) -> &[T] {
        debug_assert!(row < self.rows, "row out of bounds");
        let start = row as usize * self.cols as usize;
        &self.data[start..start + self.cols as usize]
    }

    /// Returns `true` if `other` has the same dimensions.
    ///
    /// Cell types may differ; conformance is about shape only.
    #[inline]
    pub fn conformant<U>(&self, other: &Raster<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Returns [`Error::ShapeMismatch`] unless `other` is conformant.
    #[inline]
    pub fn require_conformant<U>(&self, other: &Raster<U>) -> Result<()> {
        if self.conformant(other) {
            Ok(())
        } else {
            Err(Error::shape_mismatch(
                self.dimensions(),
                other.dimensions(),
            ))
        }
    }
}

impl<T: Clone + Default> Raster<T> {
    /// Creates a raster filled with the default cell value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero dimensions and
    /// [`Error::AllocationFailed`] when the buffer cannot be allocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let raster: Raster<f32> = Raster::new(480, 640).unwrap();
    /// assert_eq!(raster.rows(), 480);
    /// assert_eq!(raster.cols(), 640);
    /// ```
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        Self::filled(rows, cols, T::default())
    }
}

impl<T: Clone> Raster<T> {
    /// Creates a raster filled with a specific cell value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let no_edge = Raster::filled(100, 100, -1.0f32).unwrap();
    /// assert_eq!(no_edge.pixel(50, 50), -1.0);
    /// ```
    pub fn filled(rows: u32, cols: u32, value: T) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| {
            Error::allocation_failed(
                len * std::mem::size_of::<T>(),
                "raster buffer allocation failed",
            )
        })?;
        data.resize(len, value);
        Ok(Self {
            data: Arc::new(data),
            rows,
            cols,
            fov: Fov::ZERO,
            description: None,
        })
    }

    /// Returns a mutable reference to the cell data.
    ///
    /// If the data is shared (Arc refcount > 1), this clones the buffer
    /// first to ensure exclusive access (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Ensures this raster has exclusive ownership of its data.
    ///
    /// Call before extensive cell-by-cell mutation to avoid repeated CoW
    /// checks.
    #[inline]
    pub fn make_mut(&mut self) {
        let _ = Arc::make_mut(&mut self.data);
    }

    /// Sets the cell at (row, col).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (row, col) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, row: u32, col: u32, value: T) {
        debug_assert!(row < self.rows && col < self.cols, "cell out of bounds");
        let offset = self.cell_offset(row, col);
        Arc::make_mut(&mut self.data)[offset] = value;
    }

    /// Fills every cell with a value.
    pub fn fill(&mut self, value: T) {
        Arc::make_mut(&mut self.data).fill(value);
    }

    /// Returns a mutable row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row_mut(&mut self, row: u32) -> &mut [T] {
        debug_assert!(row < self.rows, "row out of bounds");
        let start = row as usize * self.cols as usize;
        let end = start + self.cols as usize;
        &mut self.data_mut()[start..end]
    }
}

impl<T: Copy> Raster<T> {
    /// Returns the cell at (row, col).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (row, col) is out of bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let raster = Raster::filled(10, 10, 0.25f32).unwrap();
    /// assert_eq!(raster.pixel(5, 5), 0.25);
    /// ```
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> T {
        debug_assert!(row < self.rows && col < self.cols, "cell out of bounds");
        self.data[self.cell_offset(row, col)]
    }

    /// Returns the cell at (row, col), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, row: u32, col: u32) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.pixel(row, col))
        } else {
            None
        }
    }

    /// Iterates over all cells with their coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let raster = Raster::filled(10, 10, 1.0f32).unwrap();
    /// for (row, col, value) in raster.pixels() {
    ///     assert!(row < 10 && col < 10);
    ///     assert_eq!(value, 1.0);
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, T)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col, self.pixel(row, col))))
    }

    /// Applies a function to each cell in place.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let mut raster = Raster::filled(10, 10, 0.5f32).unwrap();
    /// raster.map_pixels(|v| v * 2.0);
    /// assert_eq!(raster.pixel(0, 0), 1.0);
    /// ```
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(T) -> T,
    {
        let data = Arc::make_mut(&mut self.data);
        for cell in data.iter_mut() {
            *cell = f(*cell);
        }
    }

    /// Converts every cell to a new type, preserving metadata.
    ///
    /// The output carries the same dimensions, field of view, and
    /// description as the source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] when the output buffer cannot
    /// be allocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hazvis_core::Raster;
    ///
    /// let boundary = Raster::filled(10, 10, true).unwrap();
    /// let field = boundary.map(|b| if b { 0.0f32 } else { -1.0 }).unwrap();
    /// assert_eq!(field.pixel(0, 0), 0.0);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Result<Raster<U>>
    where
        F: Fn(T) -> U,
    {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len()).map_err(|_| {
            Error::allocation_failed(
                self.data.len() * std::mem::size_of::<U>(),
                "raster buffer allocation failed",
            )
        })?;
        data.extend(self.data.iter().map(|&cell| f(cell)));
        Ok(Raster {
            data: Arc::new(data),
            rows: self.rows,
            cols: self.cols,
            fov: self.fov,
            description: self.description.clone(),
        })
    }
}

impl<T> std::fmt::Debug for Raster<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("fov", &self.fov)
            .field("cell", &std::any::type_name::<T>())
            .finish()
    }
}
