//! Hazard field rendering and the scalar visibility score.
//!
//! # Overview
//!
//! The hazard field is sparse: readings exist only on geometric boundary
//! pixels, usually thin one-pixel curves. Rendering thickens the field with
//! a 3x3 dilation so those curves survive display scaling, then paints each
//! reading with a [`Palette`] ramp. Overlays come in a fixed priority
//! order per pixel:
//!
//! 1. outside the region of interest: background
//! 2. masked: [`MASK_COLOR`], or [`MASK_BOUNDARY_COLOR`] where the mask is
//!    suppressing a nearby geometric boundary
//! 3. no hazard reading: background
//! 4. otherwise: palette ramp at the measured hazard level
//!
//! The scalar score is the mean visibility goodness over the raw,
//! undilated field, so it is independent of presentation choices. Masked
//! and out-of-interest readings are excluded from the mean.

use hazvis_color::encode_rgb_gamma;
use hazvis_core::{Raster, Result};
use tracing::trace;

use crate::hazard::NO_EDGE;
use crate::measure::Measurement;
use crate::palette::{Palette, BACKGROUND_COLOR, MASK_BOUNDARY_COLOR, MASK_COLOR};
use crate::rows::for_each_row;

/// Grows each cell to the maximum of its 3x3 neighborhood.
///
/// Border neighborhoods clamp to the raster edge. For boolean rasters this
/// is a one-pixel morphological dilation; for the hazard field it spreads
/// readings over the adjacent sentinel cells, since every reading is
/// greater than [`NO_EDGE`].
pub fn dilate3x3<T>(src: &Raster<T>) -> Result<Raster<T>>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let (rows, cols) = src.dimensions();
    let data = src.data();
    let mut out = data.to_vec();

    for_each_row(&mut out, cols as usize, |r, row| {
        for (c, cell) in row.iter_mut().enumerate() {
            let mut best = data[r * cols as usize + c];
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    let rr = (r as i64 + dr).max(0).min(rows as i64 - 1) as usize;
                    let cc = (c as i64 + dc).max(0).min(cols as i64 - 1) as usize;
                    let value = data[rr * cols as usize + cc];
                    if value > best {
                        best = value;
                    }
                }
            }
            *cell = best;
        }
    });

    Ok(Raster::from_data(rows, cols, out)?.with_fov(src.fov()))
}

/// Optional inputs for [`visualize`].
///
/// All rasters must conform to the hazard field. `mask` marks pixels to
/// suppress (painted flat, excluded from the score); `roi` restricts
/// rendering and scoring to where it is `true`. `geometry_boundary` is the
/// raw boundary map the field was computed from; when present, masked
/// boundary pixels are flagged with [`MASK_BOUNDARY_COLOR`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualizeOptions<'a> {
    /// Pixels to suppress.
    pub mask: Option<&'a Raster<bool>>,
    /// Region of interest; pixels outside it are background.
    pub roi: Option<&'a Raster<bool>>,
    /// Geometric boundary map, for the masked-boundary overlay.
    pub geometry_boundary: Option<&'a Raster<bool>>,
    /// Compute the scalar visibility score alongside the rendering.
    pub with_score: bool,
}

/// A rendered hazard field and, optionally, its scalar score.
#[derive(Debug, Clone)]
pub struct Visualization {
    /// Gamma-encoded 8-bit rendering.
    pub image: Raster<[u8; 3]>,
    /// Mean visibility goodness, when requested. NaN when no pixel
    /// qualified for the mean.
    pub average_score: Option<f32>,
}

/// Renders a hazard field to an 8-bit color image.
///
/// Colors are blended in linear light and gamma-encoded once at the end.
/// The output carries the hazard field's field of view.
///
/// # Errors
/// Returns an error when the measurement parameter is invalid or any
/// option raster does not conform to the hazard field.
pub fn visualize(
    hazard: &Raster<f32>,
    measurement: &Measurement,
    palette: Palette,
    options: &VisualizeOptions<'_>,
) -> Result<Visualization> {
    measurement.validate()?;
    if let Some(mask) = options.mask {
        hazard.require_conformant(mask)?;
    }
    if let Some(roi) = options.roi {
        hazard.require_conformant(roi)?;
    }
    if let Some(boundary) = options.geometry_boundary {
        hazard.require_conformant(boundary)?;
    }

    let (rows, cols) = hazard.dimensions();
    trace!(rows, cols, ?palette, "rendering hazard field");

    let dilated = dilate3x3(hazard)?;
    let boundary_halo = match options.geometry_boundary {
        Some(boundary) => Some(dilate3x3(boundary)?),
        None => None,
    };

    let thick = dilated.data();
    let mask = options.mask.map(Raster::data);
    let roi = options.roi.map(Raster::data);
    let halo = boundary_halo.as_ref().map(Raster::data);

    let mut image = vec![[0u8; 3]; rows as usize * cols as usize];
    for_each_row(&mut image, cols as usize, |r, row| {
        let offset = r * cols as usize;
        for (c, px) in row.iter_mut().enumerate() {
            let i = offset + c;
            let linear = if roi.is_some_and(|roi| !roi[i]) {
                BACKGROUND_COLOR
            } else if mask.is_some_and(|mask| mask[i]) {
                if halo.is_some_and(|halo| halo[i]) {
                    MASK_BOUNDARY_COLOR
                } else {
                    MASK_COLOR
                }
            } else if thick[i] == NO_EDGE {
                BACKGROUND_COLOR
            } else {
                palette.blend(measurement.hazard_level(thick[i]))
            };
            *px = encode_rgb_gamma(linear);
        }
    });

    let average_score = if options.with_score {
        Some(average_score(hazard, measurement, options.mask, options.roi)?)
    } else {
        None
    };

    Ok(Visualization {
        image: Raster::from_data(rows, cols, image)?.with_fov(hazard.fov()),
        average_score,
    })
}

/// Mean visibility goodness over the raw hazard field.
///
/// Sentinel cells, masked cells, and cells outside the region of interest
/// are excluded. Returns NaN when nothing qualifies, which callers should
/// report as an undefined score rather than zero.
///
/// # Errors
/// Returns an error when the measurement parameter is invalid or a raster
/// does not conform to the hazard field.
pub fn average_score(
    hazard: &Raster<f32>,
    measurement: &Measurement,
    mask: Option<&Raster<bool>>,
    roi: Option<&Raster<bool>>,
) -> Result<f32> {
    measurement.validate()?;
    if let Some(mask) = mask {
        hazard.require_conformant(mask)?;
    }
    if let Some(roi) = roi {
        hazard.require_conformant(roi)?;
    }

    let mask = mask.map(Raster::data);
    let roi = roi.map(Raster::data);

    let mut sum = 0.0f64;
    let mut count = 0u64;
    for (i, &distance) in hazard.data().iter().enumerate() {
        if distance == NO_EDGE {
            continue;
        }
        if mask.is_some_and(|mask| mask[i]) {
            continue;
        }
        if roi.is_some_and(|roi| !roi[i]) {
            continue;
        }
        sum += measurement.goodness(distance) as f64;
        count += 1;
    }
    // Zero qualifying cells divides 0 by 0: NaN, deliberately.
    Ok((sum / count as f64) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GREEN: [u8; 3] = [0, 255, 0];
    const RED: [u8; 3] = [255, 0, 0];
    const BLACK: [u8; 3] = [0, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const YELLOW: [u8; 3] = [255, 255, 0];

    fn single_reading(rows: u32, cols: u32, r: u32, c: u32, value: f32) -> Raster<f32> {
        let mut field = Raster::filled(rows, cols, NO_EDGE).unwrap();
        field.set_pixel(r, c, value);
        field
    }

    #[test]
    fn test_dilate_spreads_maximum() {
        let field = single_reading(3, 3, 1, 1, 5.0);
        let thick = dilate3x3(&field).unwrap();
        assert!(thick.pixels().all(|(_, _, v)| v == 5.0));
    }

    #[test]
    fn test_dilate_bool_one_pixel() {
        let mut flags = Raster::filled(5, 5, false).unwrap();
        flags.set_pixel(2, 2, true);
        let thick = dilate3x3(&flags).unwrap();
        for (r, c, flag) in thick.pixels() {
            let near = r.abs_diff(2) <= 1 && c.abs_diff(2) <= 1;
            assert_eq!(flag, near, "at ({r}, {c})");
        }
    }

    #[test]
    fn test_all_sentinel_renders_black() {
        let field = Raster::filled(4, 4, NO_EDGE).unwrap();
        let viz = visualize(
            &field,
            &Measurement::default(),
            Palette::RedGreen,
            &VisualizeOptions::default(),
        )
        .unwrap();
        assert!(viz.image.pixels().all(|(_, _, px)| px == BLACK));
        assert!(viz.average_score.is_none());
    }

    #[test]
    fn test_visible_boundary_paints_low_color() {
        let field = single_reading(5, 5, 2, 2, 0.0);
        let viz = visualize(
            &field,
            &Measurement::Linear { max_hazard: 2.0 },
            Palette::RedGreen,
            &VisualizeOptions::default(),
        )
        .unwrap();
        // The reading dilates over its 3x3 neighborhood.
        assert_eq!(viz.image.pixel(2, 2), GREEN);
        assert_eq!(viz.image.pixel(1, 1), GREEN);
        assert_eq!(viz.image.pixel(0, 0), BLACK);
    }

    #[test]
    fn test_invisible_boundary_paints_red() {
        let field = single_reading(5, 5, 2, 2, 10.0);
        let viz = visualize(
            &field,
            &Measurement::Linear { max_hazard: 2.0 },
            Palette::RedGray,
            &VisualizeOptions::default(),
        )
        .unwrap();
        assert_eq!(viz.image.pixel(2, 2), RED);
    }

    #[test]
    fn test_mask_and_boundary_overlay() {
        let field = single_reading(7, 7, 3, 3, 0.5);
        let mut mask = Raster::filled(7, 7, false).unwrap();
        mask.set_pixel(3, 4, true); // next to the boundary pixel
        mask.set_pixel(0, 0, true); // far from it
        let mut boundary = Raster::filled(7, 7, false).unwrap();
        boundary.set_pixel(3, 3, true);

        let viz = visualize(
            &field,
            &Measurement::default(),
            Palette::RedGray,
            &VisualizeOptions {
                mask: Some(&mask),
                geometry_boundary: Some(&boundary),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(viz.image.pixel(3, 4), YELLOW);
        assert_eq!(viz.image.pixel(0, 0), BLUE);
    }

    #[test]
    fn test_roi_blanks_outside() {
        let field = Raster::filled(4, 4, 0.0f32).unwrap();
        let mut roi = Raster::filled(4, 4, false).unwrap();
        roi.set_pixel(1, 1, true);

        let viz = visualize(
            &field,
            &Measurement::default(),
            Palette::RedGreen,
            &VisualizeOptions {
                roi: Some(&roi),
                with_score: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(viz.image.pixel(1, 1), GREEN);
        assert_eq!(viz.image.pixel(0, 0), BLACK);
        assert_eq!(viz.image.pixel(3, 3), BLACK);
        // Only the one in-interest pixel scores, at distance zero.
        assert_eq!(viz.average_score, Some(1.0));
    }

    #[test]
    fn test_score_ignores_dilation() {
        let field = single_reading(5, 5, 2, 2, 1.0);
        let measurement = Measurement::Linear { max_hazard: 2.0 };
        let score = average_score(&field, &measurement, None, None).unwrap();
        assert_relative_eq!(score, 0.5);
    }

    #[test]
    fn test_score_excludes_masked() {
        let mut field = Raster::filled(3, 3, NO_EDGE).unwrap();
        field.set_pixel(0, 0, 0.0); // goodness 1.0
        field.set_pixel(2, 2, 2.0); // goodness 0.0 under Linear{2}
        let mut mask = Raster::filled(3, 3, false).unwrap();
        mask.set_pixel(2, 2, true);

        let measurement = Measurement::Linear { max_hazard: 2.0 };
        let all = average_score(&field, &measurement, None, None).unwrap();
        let masked = average_score(&field, &measurement, Some(&mask), None).unwrap();
        assert_relative_eq!(all, 0.5);
        assert_relative_eq!(masked, 1.0);
    }

    #[test]
    fn test_score_monotonic_in_distance() {
        let measurement = Measurement::Linear { max_hazard: 2.0 };
        let near = Raster::filled(4, 4, 0.2f32).unwrap();
        let far = Raster::filled(4, 4, 1.5f32).unwrap();
        let near_score = average_score(&near, &measurement, None, None).unwrap();
        let far_score = average_score(&far, &measurement, None, None).unwrap();
        assert!(near_score > far_score);
    }

    #[test]
    fn test_score_empty_is_nan() {
        let field = Raster::filled(3, 3, NO_EDGE).unwrap();
        let score = average_score(&field, &Measurement::default(), None, None).unwrap();
        assert!(score.is_nan());
    }

    #[test]
    fn test_mismatched_option_raster_rejected() {
        let field = Raster::filled(3, 3, NO_EDGE).unwrap();
        let mask = Raster::filled(2, 2, false).unwrap();
        let err = visualize(
            &field,
            &Measurement::default(),
            Palette::RedGray,
            &VisualizeOptions {
                mask: Some(&mask),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(err.is_shape_error());
    }
}
