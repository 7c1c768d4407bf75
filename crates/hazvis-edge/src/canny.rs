//! Canny-style luminance edge detection.
//!
//! Four stages over a luminance raster:
//!
//! 1. Separable Gaussian smoothing (kernel radius `floor(4*sigma + 0.5)`,
//!    borders clamped to the edge pixel)
//! 2. Sobel gradients, magnitude and orientation
//! 3. Non-maximum suppression with bilinear interpolation of the two
//!    magnitude samples along the gradient direction
//! 4. Hysteresis: strong pixels seed an 8-connected flood through weak
//!    pixels
//!
//! Hysteresis thresholds are estimated per call from the magnitude
//! histogram rather than taken as parameters: the high threshold sits at
//! the histogram point below which [`PERCENT_NOT_EDGES`] of all
//! magnitudes fall, and the low threshold is [`LOW_FRACTION`] of the
//! high one.

use hazvis_core::{Error, Raster, Result};
use tracing::trace;

/// Fraction of gradient magnitudes assumed to be non-edges when
/// estimating the high hysteresis threshold.
pub const PERCENT_NOT_EDGES: f32 = 0.7;

/// Low hysteresis threshold as a fraction of the high threshold.
pub const LOW_FRACTION: f32 = 0.4;

/// Histogram resolution for threshold estimation.
const HISTOGRAM_BINS: usize = 256;

/// Row-gradient Sobel kernel; the column kernel is its transpose.
const SOBEL_ROW: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
const SOBEL_COL: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Everything the detector produces for one luminance raster.
///
/// The boundary map is the binary result after hysteresis; magnitude and
/// orientation are kept for diagnostics and downstream consumers that
/// want the raw gradient field.
#[derive(Debug, Clone)]
pub struct EdgeDetection {
    /// Binary boundary map
    pub boundary: Raster<bool>,
    /// Gradient magnitude at every pixel
    pub magnitude: Raster<f32>,
    /// Gradient orientation in radians, `atan2(row gradient, col gradient)`
    pub orientation: Raster<f32>,
}

/// Detects luminance edges.
///
/// # Arguments
///
/// * `luminance` - Linear luminance raster
/// * `sigma` - Gaussian smoothing sigma in pixels
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] unless `sigma` is positive and
/// finite.
///
/// # Example
///
/// ```rust
/// use hazvis_core::Raster;
/// use hazvis_edge::detect_edges;
///
/// let flat = Raster::filled(16, 16, 0.5f32).unwrap();
/// let detection = detect_edges(&flat, 1.0).unwrap();
/// assert!(detection.boundary.pixels().all(|(_, _, b)| !b));
/// ```
pub fn detect_edges(luminance: &Raster<f32>, sigma: f32) -> Result<EdgeDetection> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::invalid_parameter(format!(
            "smoothing sigma must be positive, got {sigma}"
        )));
    }
    let (out_rows, out_cols) = luminance.dimensions();
    trace!(rows = out_rows, cols = out_cols, sigma, "detect_edges");

    let rows = out_rows as usize;
    let cols = out_cols as usize;

    let kernel = gaussian_kernel(sigma);
    let smoothed = blur_vertical(
        &blur_horizontal(luminance.data(), rows, cols, &kernel),
        rows,
        cols,
        &kernel,
    );

    let (grad_r, grad_c, magnitude) = sobel_gradients(&smoothed, rows, cols);
    let orientation: Vec<f32> = grad_r
        .iter()
        .zip(&grad_c)
        .map(|(&gr, &gc)| gr.atan2(gc))
        .collect();

    let (low, high) = estimate_thresholds(&magnitude);
    trace!(low, high, "hysteresis thresholds");

    let boundary = if high > 0.0 {
        let maxima = suppress_nonmaxima(&grad_r, &grad_c, &magnitude, rows, cols, low);
        hysteresis(&maxima, &magnitude, rows, cols, low, high)
    } else {
        // Uniform raster: no gradient anywhere, nothing to trace.
        vec![false; rows * cols]
    };

    Ok(EdgeDetection {
        boundary: Raster::from_data(out_rows, out_cols, boundary)?.with_fov(luminance.fov()),
        magnitude: Raster::from_data(out_rows, out_cols, magnitude)?.with_fov(luminance.fov()),
        orientation: Raster::from_data(out_rows, out_cols, orientation)?
            .with_fov(luminance.fov()),
    })
}

/// Normalized 1D Gaussian kernel, radius `floor(4*sigma + 0.5)`.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = ((4.0 * sigma + 0.5).floor() as i32).max(1);
    let size = (2 * radius + 1) as usize;
    let mut kernel = vec![0.0f32; size];
    let mut sum = 0.0f32;
    for (i, k) in kernel.iter_mut().enumerate() {
        let x = (i as i32 - radius) as f32;
        *k = (-x * x / (2.0 * sigma * sigma)).exp();
        sum += *k;
    }
    for k in kernel.iter_mut() {
        *k /= sum;
    }
    kernel
}

fn blur_horizontal(src: &[f32], rows: usize, cols: usize, kernel: &[f32]) -> Vec<f32> {
    let radius = kernel.len() / 2;
    let mut dst = vec![0.0f32; src.len()];
    for r in 0..rows {
        let row = &src[r * cols..(r + 1) * cols];
        for c in 0..cols {
            let mut acc = 0.0f32;
            for (i, &k) in kernel.iter().enumerate() {
                let cc = (c as isize + i as isize - radius as isize)
                    .max(0)
                    .min(cols as isize - 1) as usize;
                acc += row[cc] * k;
            }
            dst[r * cols + c] = acc;
        }
    }
    dst
}

fn blur_vertical(src: &[f32], rows: usize, cols: usize, kernel: &[f32]) -> Vec<f32> {
    let radius = kernel.len() / 2;
    let mut dst = vec![0.0f32; src.len()];
    for r in 0..rows {
        for c in 0..cols {
            let mut acc = 0.0f32;
            for (i, &k) in kernel.iter().enumerate() {
                let rr = (r as isize + i as isize - radius as isize)
                    .max(0)
                    .min(rows as isize - 1) as usize;
                acc += src[rr * cols + c] * k;
            }
            dst[r * cols + c] = acc;
        }
    }
    dst
}

/// Sobel row/column gradients and their magnitude, borders clamped.
fn sobel_gradients(src: &[f32], rows: usize, cols: usize) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let mut grad_r = vec![0.0f32; rows * cols];
    let mut grad_c = vec![0.0f32; rows * cols];
    let mut magnitude = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            let mut gr = 0.0f32;
            let mut gc = 0.0f32;
            for kr in 0..3usize {
                for kc in 0..3usize {
                    let rr = (r as isize + kr as isize - 1).max(0).min(rows as isize - 1) as usize;
                    let cc = (c as isize + kc as isize - 1).max(0).min(cols as isize - 1) as usize;
                    let v = src[rr * cols + cc];
                    gr += v * SOBEL_ROW[kr][kc];
                    gc += v * SOBEL_COL[kr][kc];
                }
            }
            let idx = r * cols + c;
            grad_r[idx] = gr;
            grad_c[idx] = gc;
            magnitude[idx] = gr.hypot(gc);
        }
    }
    (grad_r, grad_c, magnitude)
}

/// Estimates (low, high) hysteresis thresholds from the magnitude histogram.
///
/// Returns (0, 0) when the raster has no gradient at all.
fn estimate_thresholds(magnitude: &[f32]) -> (f32, f32) {
    let max_mag = magnitude.iter().fold(0.0f32, |a, &b| a.max(b));
    if max_mag <= 0.0 {
        return (0.0, 0.0);
    }

    let mut histogram = [0usize; HISTOGRAM_BINS];
    for &m in magnitude {
        let bin = ((m / max_mag) * (HISTOGRAM_BINS - 1) as f32) as usize;
        histogram[bin.min(HISTOGRAM_BINS - 1)] += 1;
    }

    let target = (PERCENT_NOT_EDGES * magnitude.len() as f32) as usize;
    let mut cumulative = 0usize;
    let mut cutoff = HISTOGRAM_BINS - 1;
    for (bin, &count) in histogram.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            cutoff = bin;
            break;
        }
    }

    let high = (cutoff as f32 + 1.0) / HISTOGRAM_BINS as f32 * max_mag;
    (LOW_FRACTION * high, high)
}

/// Marks pixels whose magnitude is a local maximum along the gradient.
///
/// The two comparison samples are bilinearly interpolated between the
/// neighbors bracketing the gradient direction. Border pixels are never
/// maxima.
fn suppress_nonmaxima(
    grad_r: &[f32],
    grad_c: &[f32],
    magnitude: &[f32],
    rows: usize,
    cols: usize,
    low: f32,
) -> Vec<bool> {
    let mut maxima = vec![false; rows * cols];
    if rows < 3 || cols < 3 {
        return maxima;
    }
    let at = |r: usize, c: usize| magnitude[r * cols + c];
    for r in 1..rows - 1 {
        for c in 1..cols - 1 {
            let idx = r * cols + c;
            let m = magnitude[idx];
            if m < low {
                continue;
            }

            let gr = grad_r[idx];
            let gc = grad_c[idx];

            let is_down = gr <= 0.0;
            let is_up = gr >= 0.0;
            let is_left = gc <= 0.0;
            let is_right = gc >= 0.0;

            let cond1 = (is_up && is_right) || (is_down && is_left);
            let cond2 = (is_down && is_right) || (is_up && is_left);
            if !cond1 && !cond2 {
                continue;
            }

            let abs_r = gr.abs();
            let abs_c = gc.abs();

            let (near1, far1, near2, far2, w) = if cond1 {
                if abs_r > abs_c {
                    let w = abs_c / abs_r;
                    (at(r + 1, c), at(r + 1, c + 1), at(r - 1, c), at(r - 1, c - 1), w)
                } else if abs_c > 0.0 {
                    let w = abs_r / abs_c;
                    (at(r, c + 1), at(r + 1, c + 1), at(r, c - 1), at(r - 1, c - 1), w)
                } else {
                    // Zero gradient vector: direction undefined.
                    continue;
                }
            } else if abs_r < abs_c {
                let w = abs_r / abs_c;
                (at(r, c + 1), at(r - 1, c + 1), at(r, c - 1), at(r + 1, c - 1), w)
            } else if abs_r > 0.0 {
                let w = abs_c / abs_r;
                (at(r - 1, c), at(r - 1, c + 1), at(r + 1, c), at(r + 1, c - 1), w)
            } else {
                continue;
            };

            let forward = far1 * w + near1 * (1.0 - w);
            let backward = far2 * w + near2 * (1.0 - w);
            if forward <= m && backward <= m {
                maxima[idx] = true;
            }
        }
    }
    maxima
}

/// Traces edges from strong seeds through connected weak maxima.
fn hysteresis(
    maxima: &[bool],
    magnitude: &[f32],
    rows: usize,
    cols: usize,
    low: f32,
    high: f32,
) -> Vec<bool> {
    let mut edges = vec![false; rows * cols];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            let idx = r * cols + c;
            if maxima[idx] && magnitude[idx] >= high {
                edges[idx] = true;
                stack.push((r, c));
            }
        }
    }

    while let Some((r, c)) = stack.pop() {
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = r as isize + dr;
                let nc = c as isize + dc;
                if nr < 0 || nr >= rows as isize || nc < 0 || nc >= cols as isize {
                    continue;
                }
                let nidx = nr as usize * cols + nc as usize;
                if !edges[nidx] && maxima[nidx] && magnitude[nidx] >= low {
                    edges[nidx] = true;
                    stack.push((nr as usize, nc as usize));
                }
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_raster(rows: u32, cols: u32, split: u32) -> Raster<f32> {
        let mut raster = Raster::filled(rows, cols, 0.1f32).unwrap();
        for r in 0..rows {
            for c in split..cols {
                raster.set_pixel(r, c, 0.9);
            }
        }
        raster
    }

    #[test]
    fn test_vertical_step_detected() {
        let raster = step_raster(32, 32, 16);
        let detection = detect_edges(&raster, 1.0).unwrap();

        // A boundary runs near the step in every interior row.
        for r in 4..28 {
            let hits = (12..20)
                .filter(|&c| detection.boundary.pixel(r, c))
                .count();
            assert!(hits >= 1, "no boundary near the step in row {r}");
        }
        // Flat regions stay clean.
        for r in 0..32 {
            for c in [2u32, 3, 29, 30] {
                assert!(!detection.boundary.pixel(r, c), "spurious edge at ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_nms_thins_the_step() {
        let raster = step_raster(32, 32, 16);
        let detection = detect_edges(&raster, 1.0).unwrap();
        // Non-maximum suppression leaves at most a couple of columns per row.
        for r in 4..28 {
            let hits = (0..32).filter(|&c| detection.boundary.pixel(r, c)).count();
            assert!(hits <= 3, "row {r} has {hits} edge pixels");
        }
    }

    #[test]
    fn test_constant_raster_no_edges() {
        let raster = Raster::filled(16, 16, 0.5f32).unwrap();
        let detection = detect_edges(&raster, 1.4).unwrap();
        assert!(detection.boundary.pixels().all(|(_, _, b)| !b));
        assert!(detection.magnitude.pixels().all(|(_, _, m)| m == 0.0));
    }

    #[test]
    fn test_magnitude_peaks_at_step() {
        let raster = step_raster(16, 16, 8);
        let detection = detect_edges(&raster, 1.0).unwrap();
        let at_step = detection.magnitude.pixel(8, 8);
        let far_away = detection.magnitude.pixel(8, 2);
        assert!(at_step > far_away * 10.0);
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let raster = Raster::filled(8, 8, 0.5f32).unwrap();
        assert!(detect_edges(&raster, 0.0).unwrap_err().is_parameter_error());
        assert!(detect_edges(&raster, -1.0).unwrap_err().is_parameter_error());
        assert!(
            detect_edges(&raster, f32::NAN)
                .unwrap_err()
                .is_parameter_error()
        );
    }

    #[test]
    fn test_metadata_preserved() {
        use hazvis_core::Fov;
        let raster = step_raster(16, 16, 8).with_fov(Fov::new(60.0, 75.0));
        let detection = detect_edges(&raster, 1.0).unwrap();
        assert_eq!(detection.boundary.fov(), Fov::new(60.0, 75.0));
    }
}
