//! Drag tracking: the set of active drag sessions.
//!
//! A session pins the pointer position at drag start; the dragged entry's
//! anchor pins where the entry was. Every subsequent pointer move recomputes
//! the position as anchor + (pointer - pointer_start), so rounding never
//! accumulates across move events and an interrupted drag resumes cleanly
//! from the last committed position.
//!
//! Distinct ids may drag concurrently (independent pointers); one id has at
//! most one session.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::collections::HashMap;

use crate::geom::Point;
use crate::registry::ImageId;

/// One active drag, immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position when the drag began.
    pub pointer_start: Point,
}

/// All active drag sessions, keyed by the dragged entry's id.
#[derive(Debug, Default)]
pub struct DragTracker {
    sessions: HashMap<ImageId, DragSession>,
}

impl DragTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `id`. Returns `false` without touching the
    /// existing session if one is already active (duplicate pointer-down
    /// delivery is expected and must not reset the start position).
    pub fn begin(&mut self, id: &str, pointer: Point) -> bool {
        if self.sessions.contains_key(id) {
            return false;
        }
        self.sessions.insert(id.to_owned(), DragSession { pointer_start: pointer });
        true
    }

    /// Close the session for `id`, if any. Returns whether one was active;
    /// a stray pointer-up without a matching begin is tolerated.
    pub fn end(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Whether `id` is currently being dragged.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// The session for `id`, if active.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DragSession> {
        self.sessions.get(id)
    }

    /// Iterate over all active sessions. Order is unspecified; every session
    /// receives every pointer move independently.
    pub fn sessions(&self) -> impl Iterator<Item = (&ImageId, &DragSession)> {
        self.sessions.iter()
    }

    /// Number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no drags are in progress.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
