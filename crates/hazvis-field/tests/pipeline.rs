//! End-to-end scenarios: synthetic scenes through the whole pipeline.

use glam::Vec3;
use hazvis_core::{Fov, Raster};
use hazvis_field::{
    compute_visibility, visualize, Measurement, Palette, VisibilityParams, VisualizeOptions,
    NO_EDGE,
};
use hazvis_geom::{Coordinates, LengthUnit, SceneGeometry};

const ROWS: u32 = 32;
const COLS: u32 = 32;

/// Two fronto-parallel planes with a depth step between columns 15 and 16,
/// seen under a field of view that makes one pixel one degree.
fn stepped_geometry() -> SceneGeometry {
    let mut position = Vec::new();
    let mut distance = Vec::new();
    let mut normal = Vec::new();
    for r in 0..ROWS {
        for c in 0..COLS {
            let depth = if c < 16 { 80.0 } else { 95.0 };
            position.push(Vec3::new(c as f32, r as f32, depth));
            distance.push(depth);
            normal.push(Vec3::Z);
        }
    }
    SceneGeometry::new(
        Coordinates::new(
            LengthUnit::Centimeters,
            Fov::new(ROWS as f32, COLS as f32),
        ),
        Raster::from_data(ROWS, COLS, position).unwrap(),
        Raster::from_data(ROWS, COLS, distance).unwrap(),
        Raster::from_data(ROWS, COLS, normal).unwrap(),
    )
    .unwrap()
}

/// A linear RGB image with a luminance step between `step - 1` and `step`,
/// or a uniform image when `step` is `None`.
fn step_image(step: Option<u32>) -> Raster<[f32; 3]> {
    let mut rgb = Vec::new();
    for _r in 0..ROWS {
        for c in 0..COLS {
            let value = match step {
                Some(step) if c >= step => 0.85,
                Some(_) => 0.15,
                None => 0.5,
            };
            rgb.push([value, value, value]);
        }
    }
    Raster::from_data(ROWS, COLS, rgb).unwrap()
}

fn score_of(image: &Raster<[f32; 3]>, geometry: &SceneGeometry) -> f32 {
    let params = VisibilityParams {
        edge_sigma: 1.0,
        ..Default::default()
    };
    let outputs = compute_visibility(image, geometry, &params, None).unwrap();
    let viz = visualize(
        &outputs.hazard,
        &Measurement::default(),
        Palette::RedGreen,
        &VisualizeOptions {
            with_score: true,
            ..Default::default()
        },
    )
    .unwrap();
    viz.average_score.unwrap()
}

#[test]
fn scores_rank_scenarios_by_edge_placement() {
    let geometry = stepped_geometry();

    // Contrast right on the step, contrast eight pixels away, no contrast.
    let marked = score_of(&step_image(Some(16)), &geometry);
    let displaced = score_of(&step_image(Some(24)), &geometry);
    let unmarked = score_of(&step_image(None), &geometry);

    assert!(
        marked > displaced && displaced > unmarked,
        "expected {marked} > {displaced} > {unmarked}"
    );
    assert!(marked > 0.3, "marked step scored too low: {marked}");
    assert!(unmarked < 1e-6, "unmarked step scored too high: {unmarked}");
}

#[test]
fn marked_step_renders_safe_and_displaced_step_renders_hazardous() {
    let geometry = stepped_geometry();
    let params = VisibilityParams {
        edge_sigma: 1.0,
        ..Default::default()
    };

    let probe = |image_step| {
        let outputs =
            compute_visibility(&step_image(image_step), &geometry, &params, None).unwrap();
        let viz = visualize(
            &outputs.hazard,
            &Measurement::default(),
            Palette::RedGreen,
            &VisualizeOptions::default(),
        )
        .unwrap();
        viz.image.pixel(16, 15)
    };

    let [r, g, _] = probe(Some(16));
    assert!(g > r, "marked boundary should lean green, got rgb({r}, {g}, ..)");

    let [r, g, _] = probe(None);
    assert!(r > g, "unmarked boundary should lean red, got rgb({r}, {g}, ..)");
}

#[test]
fn background_stays_black_away_from_boundaries() {
    let geometry = stepped_geometry();
    let outputs = compute_visibility(
        &step_image(Some(16)),
        &geometry,
        &VisibilityParams {
            edge_sigma: 1.0,
            ..Default::default()
        },
        None,
    )
    .unwrap();

    let viz = visualize(
        &outputs.hazard,
        &Measurement::default(),
        Palette::RedGreen,
        &VisualizeOptions::default(),
    )
    .unwrap();

    // The geometric boundary occupies columns 15 and 16 plus one pixel of
    // dilation on either side; everything else carries no reading.
    for r in 0..ROWS {
        for c in [0, 5, 25, 31] {
            assert_eq!(viz.image.pixel(r, c), [0, 0, 0], "at ({r}, {c})");
        }
    }
}

#[test]
fn intermediates_are_conformant_and_sentinel_off_boundary() {
    let geometry = stepped_geometry();
    let outputs = compute_visibility(
        &step_image(Some(16)),
        &geometry,
        &VisibilityParams {
            edge_sigma: 1.0,
            false_positives: true,
            ..Default::default()
        },
        None,
    )
    .unwrap();

    assert_eq!(outputs.luminance.dimensions(), (ROWS, COLS));
    assert_eq!(outputs.edges.boundary.dimensions(), (ROWS, COLS));
    assert_eq!(outputs.geometry_boundary.dimensions(), (ROWS, COLS));
    assert_eq!(outputs.hazard.dimensions(), (ROWS, COLS));
    assert_eq!(outputs.degrees_per_pixel, 1.0);

    for (r, c, flagged) in outputs.geometry_boundary.pixels() {
        assert_eq!(
            outputs.hazard.pixel(r, c) == NO_EDGE,
            !flagged,
            "sentinel disagreement at ({r}, {c})"
        );
    }
    assert!(outputs.false_positive_hazard.is_some());
}
