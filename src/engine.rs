//! Top-level placement engine.
//!
//! [`EngineCore`] is the whole state model — image registry, drag tracker,
//! surface size, and the placement RNG — with no browser dependencies, so
//! every operation is testable on the host. [`Engine`] wraps it for the
//! wasm build: it owns the canvas element, the 2d context, and the decoded
//! image elements, and translates DOM-level events into core operations.
//!
//! Every operation runs to completion synchronously; the caller's event
//! delivery order is the serialization order. There is no internal queue,
//! no locking, and no background work.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::drag::DragTracker;
use crate::geom::{GeometryError, Point, SurfaceSize};
use crate::registry::{ImageEntry, ImageId, ImageRegistry};
use crate::render;

/// Seed used when the host does not supply one.
const DEFAULT_SEED: u64 = 0x00D7_A6B0;

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
#[derive(Debug)]
pub struct EngineCore {
    registry: ImageRegistry,
    tracker: DragTracker,
    surface: SurfaceSize,
    rng: SmallRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose random placement is driven by `seed`.
    /// The same seed and call sequence reproduce the same placements.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            registry: ImageRegistry::new(),
            tracker: DragTracker::new(),
            surface: SurfaceSize::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // --- Resize adapter ---

    /// Adopt new surface dimensions and rescale every entry from its ratio
    /// fields. Must be called once with the initial dimensions before any
    /// registration, and again on every surface-size change. Anchors are
    /// resynchronized so an in-flight drag continues from the rescaled
    /// position instead of jumping on the next move.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSurface`] for negative or non-finite
    /// dimensions; state is unchanged.
    pub fn set_surface_size(&mut self, width: f64, height: f64) -> Result<(), GeometryError> {
        let surface = SurfaceSize::new(width, height).inspect_err(|e| warn!(%e, "surface resize rejected"))?;
        self.surface = surface;
        self.registry.rescale(surface);
        debug!(width, height, entries = self.registry.len(), "surface resized");
        Ok(())
    }

    // --- Image registry ---

    /// Register a loaded image. Placement is uniform over the positions at
    /// which the image fits entirely inside the current surface. Returns
    /// `Ok(None)` if `id` is already registered (the existing entry is
    /// untouched).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidImage`] for negative or non-finite
    /// pixel dimensions; nothing is registered.
    pub fn register(&mut self, id: &str, width: f64, height: f64) -> Result<Option<&ImageEntry>, GeometryError> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            warn!(id, width, height, "image registration rejected");
            return Err(GeometryError::InvalidImage { width, height });
        }
        Ok(self.registry.register(id, width, height, self.surface, &mut self.rng))
    }

    // --- Drag tracker ---

    /// Begin dragging `id` from the given pointer position. The entry's
    /// current position becomes its drag anchor. No-op for unknown ids,
    /// non-finite pointers, and ids already being dragged (a duplicate
    /// pointer-down must not reset the session). Returns whether a session
    /// was opened.
    pub fn begin_drag(&mut self, id: &str, pointer: Point) -> bool {
        if !pointer.is_finite() || self.tracker.is_active(id) {
            return false;
        }
        let Some(entry) = self.registry.get_mut(id) else {
            return false;
        };
        entry.x_anchor = entry.x;
        entry.y_anchor = entry.y;
        self.tracker.begin(id, pointer)
    }

    /// Apply a pointer move to every active session: each dragged entry goes
    /// to anchor + (pointer - pointer_start), clamped per axis to stay on
    /// the surface. Returns whether any session was active.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        if self.tracker.is_empty() || !pointer.is_finite() {
            return false;
        }
        for (id, session) in self.tracker.sessions() {
            if let Some(entry) = self.registry.get_mut(id) {
                let candidate = Point::new(
                    entry.x_anchor + (pointer.x - session.pointer_start.x),
                    entry.y_anchor + (pointer.y - session.pointer_start.y),
                );
                entry.move_to(candidate, self.surface);
            }
        }
        true
    }

    /// End the drag on `id`: the entry settles (anchor and ratio fields
    /// resynchronized to its current position) and the session is dropped.
    /// A pointer-up or pointer-exit without a matching begin is a no-op.
    /// Returns whether a session was closed.
    pub fn end_drag(&mut self, id: &str) -> bool {
        if !self.tracker.end(id) {
            return false;
        }
        if let Some(entry) = self.registry.get_mut(id) {
            entry.settle(self.surface);
            debug!(id, x = entry.x, y = entry.y, "drag settled");
        }
        true
    }

    // --- Queries ---

    /// Read-only view of all entries in insertion order, for rendering and
    /// overlay positioning.
    #[must_use]
    pub fn snapshot(&self) -> &[ImageEntry] {
        self.registry.snapshot()
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&ImageEntry> {
        self.registry.get(id)
    }

    /// Whether `id` is currently being dragged.
    #[must_use]
    pub fn is_dragging(&self, id: &str) -> bool {
        self.tracker.is_active(id)
    }

    /// Number of drags in progress.
    #[must_use]
    pub fn drag_count(&self) -> usize {
        self.tracker.len()
    }

    /// The current surface dimensions.
    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }
}

/// The full engine for the browser build. Wraps [`EngineCore`] and owns the
/// canvas element, its 2d context, and the decoded images.
///
/// The context is acquired once at construction and held for the engine's
/// lifetime; rendering never reaches for ambient state.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageId, HtmlImageElement>,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the given canvas element, seeding placement
    /// from the clock.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot provide a 2d context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        Self::with_seed(canvas, js_sys::Date::now().to_bits())
    }

    /// Create an engine with a caller-controlled placement seed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot provide a 2d context.
    pub fn with_seed(canvas: HtmlCanvasElement, seed: u64) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
            dpr: 1.0,
            core: EngineCore::with_seed(seed),
        })
    }

    // --- Viewport ---

    /// Adopt new CSS dimensions and device pixel ratio: resizes the canvas
    /// backing store and runs the core resize pass. Call once at startup and
    /// on every host resize signal. Returns whether a redraw is needed.
    ///
    /// # Errors
    ///
    /// Returns `Err` for invalid dimensions; state is unchanged.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Result<bool, JsValue> {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.core
            .set_surface_size(width_css, height_css)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.dpr = dpr;
        self.canvas.set_width(to_backing(width_css * dpr));
        self.canvas.set_height(to_backing(height_css * dpr));
        Ok(true)
    }

    // --- Asset loader input ---

    /// Register a decoded image element under `id`, placing it at random on
    /// the surface. Duplicate ids keep the first element and the first
    /// placement. Returns whether a redraw is needed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element reports invalid dimensions.
    pub fn register_image(&mut self, id: &str, element: HtmlImageElement) -> Result<bool, JsValue> {
        let width = f64::from(element.natural_width());
        let height = f64::from(element.natural_height());
        let added = self
            .core
            .register(id, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .is_some();
        if added {
            self.images.insert(id.to_owned(), element);
        }
        Ok(added)
    }

    // --- Pointer input ---

    /// Pointer pressed on the overlay element for `id`. Returns whether a
    /// redraw is needed.
    pub fn on_pointer_down(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.core.begin_drag(id, Point::new(x, y))
    }

    /// Pointer moved anywhere on the surface. Returns whether a redraw is
    /// needed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.core.update_drag(Point::new(x, y))
    }

    /// Pointer released over `id`. Returns whether a redraw is needed.
    pub fn on_pointer_up(&mut self, id: &str) -> bool {
        self.core.end_drag(id)
    }

    /// Pointer left the overlay element for `id`; treated as a release so
    /// the drag settles instead of sticking to a departed pointer.
    pub fn on_pointer_leave(&mut self, id: &str) -> bool {
        self.core.end_drag(id)
    }

    // --- Render / host queries ---

    /// Redraw the whole surface from the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        render::draw(&self.ctx, &self.core, &self.images, self.dpr)
    }

    /// Current entries as JSON, in insertion order, for the host's overlay
    /// hit-target elements.
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.core.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// CSS-to-backing-store pixel conversion for the canvas attributes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_backing(px: f64) -> u32 {
    px.round().max(0.0) as u32
}
