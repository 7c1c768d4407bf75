//! ASCII geometry and coordinates files.
//!
//! # Overview
//!
//! Scene geometry arrives as plain-text rasters, one file per field, plus a
//! small coordinates file describing how to read them. The text formats:
//!
//! Coordinates file:
//!
//! ```text
//! # viewpoint descriptor
//! units meters
//! fov 40.0 60.0
//! ```
//!
//! `units` takes a length unit name (`mm`, `cm`, `m` and long forms);
//! `fov` takes the vertical and horizontal field of view in degrees. Both
//! lines are required.
//!
//! Raster files:
//!
//! ```text
//! # distances, one value per pixel
//! -Y 480 +X 640
//! 1.04 1.04 1.05 ...
//! ```
//!
//! The resolution line gives rows then columns; after it the values follow
//! in row-major order, separated by any whitespace. Vector rasters store
//! three values per pixel. `#` starts a comment anywhere; blank lines are
//! ignored.
//!
//! [`load_scene_geometry`] reads all four files and installs the
//! coordinates' field of view on every raster.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::Vec3;
use hazvis_core::{Fov, Raster};
use hazvis_geom::{Coordinates, LengthUnit, SceneGeometry};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Reads a coordinates file.
///
/// # Errors
/// [`IoError::Parse`] for unrecognized lines, bad numbers, or a missing
/// `units` or `fov` line.
pub fn read_coordinates<P: AsRef<Path>>(path: P) -> IoResult<Coordinates> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut unit: Option<LengthUnit> = None;
    let mut fov: Option<Fov> = None;
    let mut line_number = 0;

    for line in reader.lines() {
        let line = line?;
        line_number += 1;
        let Some(content) = significant_content(&line) else {
            continue;
        };

        let tokens: Vec<&str> = content.split_whitespace().collect();
        match tokens.as_slice() {
            ["units", value] => {
                unit = Some(
                    value
                        .parse()
                        .map_err(|e: hazvis_core::Error| {
                            IoError::parse(path, line_number, e.to_string())
                        })?,
                );
            }
            ["fov", vertical, horizontal] => {
                fov = Some(Fov::new(
                    parse_number(path, line_number, vertical)?,
                    parse_number(path, line_number, horizontal)?,
                ));
            }
            _ => {
                return Err(IoError::parse(
                    path,
                    line_number,
                    format!("unrecognized line '{content}'"),
                ));
            }
        }
    }

    let unit =
        unit.ok_or_else(|| IoError::parse(path, line_number, "missing 'units' line"))?;
    let fov = fov.ok_or_else(|| IoError::parse(path, line_number, "missing 'fov' line"))?;
    Ok(Coordinates::new(unit, fov))
}

/// Reads a one-value-per-pixel ASCII raster.
pub fn read_scalar_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster<f32>> {
    let (rows, cols, values) = read_raster_values(path.as_ref(), 1)?;
    Ok(Raster::from_data(rows, cols, values)?)
}

/// Reads a three-values-per-pixel ASCII raster.
pub fn read_vector_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster<Vec3>> {
    let (rows, cols, values) = read_raster_values(path.as_ref(), 3)?;
    let vectors = values
        .chunks_exact(3)
        .map(|v| Vec3::new(v[0], v[1], v[2]))
        .collect();
    Ok(Raster::from_data(rows, cols, vectors)?)
}

/// Reads the four geometry files and assembles a [`SceneGeometry`].
///
/// The coordinates' field of view is installed on every raster so
/// downstream consumers can read it from whichever raster they hold.
pub fn load_scene_geometry<P: AsRef<Path>>(
    coordinates: P,
    positions: P,
    distances: P,
    normals: P,
) -> IoResult<SceneGeometry> {
    let coordinates = read_coordinates(coordinates)?;
    let position = read_vector_raster(positions)?.with_fov(coordinates.fov);
    let distance = read_scalar_raster(distances)?.with_fov(coordinates.fov);
    let normal = read_vector_raster(normals)?.with_fov(coordinates.fov);

    debug!(
        rows = position.rows(),
        cols = position.cols(),
        unit = %coordinates.unit,
        "loaded scene geometry"
    );
    Ok(SceneGeometry::new(coordinates, position, distance, normal)?)
}

/// Strips comments and surrounding whitespace; `None` for blank lines.
fn significant_content(line: &str) -> Option<&str> {
    let content = line.split('#').next().unwrap_or("").trim();
    (!content.is_empty()).then_some(content)
}

fn parse_number(path: &Path, line_number: usize, token: &str) -> IoResult<f32> {
    token
        .parse()
        .map_err(|_| IoError::parse(path, line_number, format!("invalid number '{token}'")))
}

fn read_raster_values(path: &Path, channels: usize) -> IoResult<(u32, u32, Vec<f32>)> {
    let reader = BufReader::new(File::open(path)?);

    let mut dimensions: Option<(u32, u32)> = None;
    let mut values: Vec<f32> = Vec::new();
    let mut line_number = 0;

    for line in reader.lines() {
        let line = line?;
        line_number += 1;
        let Some(content) = significant_content(&line) else {
            continue;
        };

        if dimensions.is_none() {
            dimensions = Some(parse_resolution(path, line_number, content)?);
            continue;
        }

        for token in content.split_whitespace() {
            values.push(parse_number(path, line_number, token)?);
        }
    }

    let (rows, cols) = dimensions
        .ok_or_else(|| IoError::parse(path, line_number, "missing resolution line"))?;
    let expected = (rows as usize)
        .checked_mul(cols as usize)
        .and_then(|cells| cells.checked_mul(channels))
        .ok_or_else(|| IoError::parse(path, line_number, "raster dimensions overflow"))?;
    if values.len() != expected {
        return Err(IoError::parse(
            path,
            line_number,
            format!("expected {expected} values, found {}", values.len()),
        ));
    }
    Ok((rows, cols, values))
}

fn parse_resolution(path: &Path, line_number: usize, content: &str) -> IoResult<(u32, u32)> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let ["-Y", rows, "+X", cols] = tokens.as_slice() else {
        return Err(IoError::parse(
            path,
            line_number,
            format!("expected '-Y <rows> +X <cols>', got '{content}'"),
        ));
    };
    let rows = rows
        .parse()
        .map_err(|_| IoError::parse(path, line_number, format!("invalid row count '{rows}'")))?;
    let cols = cols
        .parse()
        .map_err(|_| IoError::parse(path, line_number, format!("invalid column count '{cols}'")))?;
    Ok((rows, cols))
}
