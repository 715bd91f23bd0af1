#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_finite() {
    assert!(Point::new(0.0, -5.0).is_finite());
}

#[test]
fn point_nan_is_not_finite() {
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::NAN).is_finite());
}

#[test]
fn point_infinity_is_not_finite() {
    assert!(!Point::new(f64::INFINITY, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::NEG_INFINITY).is_finite());
}

// --- SurfaceSize ---

#[test]
fn surface_accepts_positive_dimensions() {
    let s = SurfaceSize::new(800.0, 600.0).unwrap();
    assert_eq!(s.width, 800.0);
    assert_eq!(s.height, 600.0);
    assert!(!s.is_degenerate());
}

#[test]
fn surface_accepts_zero_dimensions() {
    let s = SurfaceSize::new(0.0, 600.0).unwrap();
    assert!(s.is_degenerate());
}

#[test]
fn surface_rejects_negative_width() {
    let err = SurfaceSize::new(-1.0, 600.0).unwrap_err();
    assert_eq!(err, GeometryError::InvalidSurface { width: -1.0, height: 600.0 });
}

#[test]
fn surface_rejects_non_finite_dimensions() {
    assert!(SurfaceSize::new(f64::NAN, 600.0).is_err());
    assert!(SurfaceSize::new(800.0, f64::INFINITY).is_err());
}

#[test]
fn surface_default_is_degenerate() {
    assert!(SurfaceSize::default().is_degenerate());
}

#[test]
fn geometry_error_display() {
    let err = GeometryError::InvalidImage { width: -3.0, height: 2.0 };
    assert_eq!(err.to_string(), "image dimensions must be finite and non-negative, got -3x2");
}

// --- clamp_axis ---

#[test]
fn clamp_axis_inside_range_is_unchanged() {
    assert_eq!(clamp_axis(250.0, 100.0, 800.0), 250.0);
}

#[test]
fn clamp_axis_below_range_goes_to_zero() {
    assert_eq!(clamp_axis(-40.0, 100.0, 800.0), 0.0);
}

#[test]
fn clamp_axis_above_range_goes_to_far_edge() {
    assert_eq!(clamp_axis(900.0, 100.0, 800.0), 700.0);
}

#[test]
fn clamp_axis_boundary_values_are_kept() {
    assert_eq!(clamp_axis(0.0, 100.0, 800.0), 0.0);
    assert_eq!(clamp_axis(700.0, 100.0, 800.0), 700.0);
}

#[test]
fn clamp_axis_oversized_extent_collapses_to_zero() {
    assert_eq!(clamp_axis(50.0, 900.0, 800.0), 0.0);
    assert_eq!(clamp_axis(-50.0, 900.0, 800.0), 0.0);
}

#[test]
fn clamp_axis_nan_candidate_lands_in_range() {
    let clamped = clamp_axis(f64::NAN, 100.0, 800.0);
    assert!((0.0..=700.0).contains(&clamped));
}
