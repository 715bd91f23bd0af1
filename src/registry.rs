//! Image registry: the set of managed images and their placement state.
//!
//! Each loaded image is one [`ImageEntry`] holding absolute geometry (surface
//! pixels), ratio geometry (fractions of the surface captured when the entry
//! settled), and the drag anchor. The registry owns the entries in insertion
//! order — the renderer and the host's overlay layer both key off that order,
//! so it must stay stable across every operation.
//!
//! The per-entry position math lives here too: initial placement, clamped
//! drag movement, drag-end settling, and the resize rescale pass. The engine
//! drives these; nothing in this module decides *when* they happen.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::geom::{Point, SurfaceSize, clamp_axis};

/// Unique identifier for a managed image: its asset source identifier.
pub type ImageId = String;

/// One managed draggable image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageEntry {
    /// Asset source identifier; unique among entries.
    pub id: ImageId,
    /// Rendered width in surface pixels.
    pub width: f64,
    /// Rendered height in surface pixels.
    pub height: f64,
    /// Left edge in surface pixels.
    pub x: f64,
    /// Top edge in surface pixels.
    pub y: f64,
    /// Width as a fraction of the surface width at load time.
    pub width_ratio: f64,
    /// Height as a fraction of the surface height at load time.
    pub height_ratio: f64,
    /// Left edge as a fraction of the surface width, captured at settle time.
    pub x_ratio: f64,
    /// Top edge as a fraction of the surface height, captured at settle time.
    pub y_ratio: f64,
    /// Position at the start of the current drag (or last settled position).
    pub x_anchor: f64,
    /// Position at the start of the current drag (or last settled position).
    pub y_anchor: f64,
}

impl ImageEntry {
    /// Move to `candidate`, clamped per axis so the entry stays inside the
    /// surface. Anchor and ratio fields are untouched; they update only when
    /// the drag ends.
    pub fn move_to(&mut self, candidate: Point, surface: SurfaceSize) {
        self.x = clamp_axis(candidate.x, self.width, surface.width);
        self.y = clamp_axis(candidate.y, self.height, surface.height);
    }

    /// Commit the current position as the new anchor and, when the surface is
    /// non-degenerate, recapture the position ratios. Called at drag end.
    pub fn settle(&mut self, surface: SurfaceSize) {
        self.x_anchor = self.x;
        self.y_anchor = self.y;
        if !surface.is_degenerate() {
            self.x_ratio = self.x / surface.width;
            self.y_ratio = self.y / surface.height;
        }
    }

    /// Recompute absolute geometry from the ratio fields against a new
    /// surface size, and resynchronize the anchor so an in-flight drag
    /// continues from the rescaled position. Ratios are never rewritten
    /// here; a zero-area surface collapses the absolute fields to zero and
    /// the ratios survive for the next real resize.
    pub fn rescale(&mut self, surface: SurfaceSize) {
        self.width = self.width_ratio * surface.width;
        self.height = self.height_ratio * surface.height;
        self.x = self.x_ratio * surface.width;
        self.y = self.y_ratio * surface.height;
        self.x_anchor = self.x;
        self.y_anchor = self.y;
    }
}

/// Insertion-ordered store of image entries.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    entries: Vec<ImageEntry>,
}

impl ImageRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly loaded image, placing it uniformly at random so it
    /// fits entirely inside the surface. Each axis range collapses to `0`
    /// when the image is at least as large as the surface. Returns `None`
    /// without touching anything if `id` is already registered.
    pub fn register<R: Rng>(
        &mut self,
        id: &str,
        width: f64,
        height: f64,
        surface: SurfaceSize,
        rng: &mut R,
    ) -> Option<&ImageEntry> {
        if self.contains(id) {
            return None;
        }

        let x = random_coord(rng, surface.width - width);
        let y = random_coord(rng, surface.height - height);

        let entry = ImageEntry {
            id: id.to_owned(),
            width,
            height,
            x,
            y,
            width_ratio: ratio(width, surface.width),
            height_ratio: ratio(height, surface.height),
            x_ratio: ratio(x, surface.width),
            y_ratio: ratio(y, surface.height),
            x_anchor: x,
            y_anchor: y,
        };
        debug!(id, x, y, width, height, "image registered");
        self.entries.push(entry);
        self.entries.last()
    }

    /// Whether an entry with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ImageEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up an entry by id for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ImageEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Read-only view of all entries in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Run the resize pass over every entry.
    pub fn rescale(&mut self, surface: SurfaceSize) {
        for entry in &mut self.entries {
            entry.rescale(surface);
        }
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Uniform coordinate in `[0, max_offset]`, degenerating to `0` when the
/// admissible range is empty.
fn random_coord<R: Rng>(rng: &mut R, max_offset: f64) -> f64 {
    if max_offset > 0.0 {
        rng.random_range(0.0..=max_offset)
    } else {
        0.0
    }
}

/// Fraction of a surface dimension, `0.0` when the dimension is degenerate.
fn ratio(value: f64, dimension: f64) -> f64 {
    if dimension > 0.0 { value / dimension } else { 0.0 }
}
