//! Rendering: draws every image entry to the 2d context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of
//! engine state and produces pixels; it does not mutate any placement state.
//! Entry coordinates stay `f64` all the way into the draw calls, so any
//! sub-pixel rounding is the rasterizer's and never feeds back into the
//! engine.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the
//! result.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::engine::EngineCore;
use crate::registry::{ImageEntry, ImageId};

/// Outline color for an entry that is being dragged.
const DRAG_OUTLINE_COLOR: &str = "#1E90FF";

/// Outline width in CSS pixels.
const DRAG_OUTLINE_WIDTH: f64 = 2.0;

/// Draw the full scene: every registered image at its current rect, bottom
/// of the insertion order first, with an outline around actively dragged
/// entries.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    images: &HashMap<ImageId, HtmlImageElement>,
    dpr: f64,
) -> Result<(), JsValue> {
    let surface = core.surface();

    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, surface.width, surface.height);

    for entry in core.snapshot() {
        let Some(image) = images.get(&entry.id) else {
            continue;
        };
        draw_entry(ctx, entry, image)?;
        if core.is_dragging(&entry.id) {
            draw_drag_outline(ctx, entry);
        }
    }

    Ok(())
}

fn draw_entry(ctx: &CanvasRenderingContext2d, entry: &ImageEntry, image: &HtmlImageElement) -> Result<(), JsValue> {
    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, entry.x, entry.y, entry.width, entry.height)
}

fn draw_drag_outline(ctx: &CanvasRenderingContext2d, entry: &ImageEntry) {
    ctx.set_stroke_style_str(DRAG_OUTLINE_COLOR);
    ctx.set_line_width(DRAG_OUTLINE_WIDTH);
    ctx.stroke_rect(entry.x, entry.y, entry.width, entry.height);
}
