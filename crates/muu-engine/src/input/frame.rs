use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{InputEvent, Key};

/// Per-frame input deltas.
///
/// `InputState` holds the current state; `InputFrame` holds what happened
/// since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame (auto-repeat excluded).
    pub keys_pressed: HashSet<Key>,

    /// Primary-button clicks completed this frame, at the release position.
    pub clicks: Vec<Vec2>,

    /// Scroll accumulated this frame, logical pixels.
    pub scroll: Vec2,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.clicks.clear();
        self.scroll = Vec2::zero();
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
