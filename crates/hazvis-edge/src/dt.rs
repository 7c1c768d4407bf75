//! Exact squared Euclidean distance transform.
//!
//! Computes, for every cell, the squared distance to the nearest true
//! cell of a boundary map. The transform is separable: a 1D
//! lower-envelope-of-parabolas pass down each column, then the same pass
//! along each row of the intermediate result. Exact, O(cells).
//!
//! Cells with no boundary anywhere saturate at [`FAR`] (plus the squared
//! in-raster distance) rather than infinity, so downstream arithmetic on
//! the field stays finite.

use hazvis_core::{Raster, Result};
use tracing::trace;

/// Effectively-infinite squared distance seeded at non-boundary cells.
///
/// Finite so the parabola intersection arithmetic never produces NaN;
/// any value at or above this means "no boundary in reach."
pub const FAR: f32 = 1e20;

/// Squared Euclidean distance to the nearest true cell.
///
/// The output is conformant with the input and carries its field of
/// view.
///
/// # Example
///
/// ```rust
/// use hazvis_core::Raster;
/// use hazvis_edge::squared_distance_transform;
///
/// let mut boundary = Raster::filled(5, 5, false).unwrap();
/// boundary.set_pixel(2, 2, true);
/// let dist_sq = squared_distance_transform(&boundary).unwrap();
/// assert_eq!(dist_sq.pixel(2, 2), 0.0);
/// assert_eq!(dist_sq.pixel(2, 4), 4.0);
/// assert_eq!(dist_sq.pixel(0, 0), 8.0);
/// ```
pub fn squared_distance_transform(boundary: &Raster<bool>) -> Result<Raster<f32>> {
    let (out_rows, out_cols) = boundary.dimensions();
    trace!(rows = out_rows, cols = out_cols, "squared_distance_transform");

    let rows = out_rows as usize;
    let cols = out_cols as usize;

    let mut field: Vec<f32> = boundary
        .data()
        .iter()
        .map(|&b| if b { 0.0 } else { FAR })
        .collect();

    // Shared scratch sized for the longer axis.
    let n = rows.max(cols);
    let mut f = vec![0.0f32; n];
    let mut d = vec![0.0f32; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0.0f32; n + 1];

    // Columns first, then rows of the intermediate result.
    for c in 0..cols {
        for r in 0..rows {
            f[r] = field[r * cols + c];
        }
        transform_1d(&f[..rows], &mut d[..rows], &mut v[..rows], &mut z[..rows + 1]);
        for r in 0..rows {
            field[r * cols + c] = d[r];
        }
    }
    for r in 0..rows {
        f[..cols].copy_from_slice(&field[r * cols..(r + 1) * cols]);
        transform_1d(&f[..cols], &mut d[..cols], &mut v[..cols], &mut z[..cols + 1]);
        field[r * cols..(r + 1) * cols].copy_from_slice(&d[..cols]);
    }

    Ok(Raster::from_data(out_rows, out_cols, field)?.with_fov(boundary.fov()))
}

/// 1D squared distance transform of the sampled function `f` into `d`.
///
/// `v` holds the parabola vertices of the lower envelope, `z` the
/// boundaries between them; both are caller-provided scratch.
fn transform_1d(f: &[f32], d: &mut [f32], v: &mut [usize], z: &mut [f32]) {
    let n = f.len();
    let mut k = 0usize;
    v[0] = 0;
    z[0] = f32::NEG_INFINITY;
    z[1] = f32::INFINITY;

    for q in 1..n {
        let mut s = intersect(f, q, v[k]);
        // Parabolas made obsolete by q are popped; k cannot underflow
        // because z[0] is -inf and s is finite.
        while s <= z[k] {
            k -= 1;
            s = intersect(f, q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f32::INFINITY;
    }

    k = 0;
    for (q, dq) in d.iter_mut().enumerate() {
        while z[k + 1] < q as f32 {
            k += 1;
        }
        let dx = q as f32 - v[k] as f32;
        *dq = dx * dx + f[v[k]];
    }
}

/// Horizontal position where the parabolas rooted at `q` and `p` intersect.
#[inline]
fn intersect(f: &[f32], q: usize, p: usize) -> f32 {
    let qf = q as f32;
    let pf = p as f32;
    ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
}
