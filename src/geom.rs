//! Geometry primitives: points, surface dimensions, and validation.
//!
//! All coordinates are in CSS pixels of the display surface, top-left origin.
//! Values stay `f64` end to end; the engine never quantizes. Clamping uses
//! `f64::min`/`f64::max`, whose NaN handling (a NaN operand yields the other
//! operand) means a corrupt pointer coordinate collapses to a bound instead
//! of poisoning stored state.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A pointer or entry position on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Dimensions of the display surface.
///
/// A zero dimension is valid (surface hidden or collapsed); negative or
/// non-finite dimensions are not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    /// Validate host-supplied dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSurface`] if either dimension is
    /// negative or non-finite.
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(GeometryError::InvalidSurface { width, height });
        }
        Ok(Self { width, height })
    }

    /// Whether the surface has no drawable area. Ratios must never be
    /// derived by dividing by a degenerate dimension.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Invalid geometry supplied by the host.
///
/// The only recoverable failure in this crate: the offending operation is a
/// no-op and the engine's state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("surface dimensions must be finite and non-negative, got {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },
    #[error("image dimensions must be finite and non-negative, got {width}x{height}")]
    InvalidImage { width: f64, height: f64 },
}

/// Clamp a position along one axis so an extent-sized image stays inside a
/// surface of the given span. The admissible range `[0, span - extent]`
/// collapses to the single point `0` when the image does not fit.
#[must_use]
pub fn clamp_axis(candidate: f64, extent: f64, span: f64) -> f64 {
    candidate.min((span - extent).max(0.0)).max(0.0)
}
