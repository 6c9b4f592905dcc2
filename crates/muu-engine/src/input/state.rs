use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<Vec2>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,

    /// Where the primary button went down; a click needs press and release.
    press_origin: Option<Vec2>,
}

impl InputState {
    /// Applies an event to the current state and records deltas into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    self.press_origin = None;
                }
            }

            InputEvent::PointerMoved(p) => {
                self.pointer_pos = Some(*p);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                self.press_origin = None;
            }

            InputEvent::Scroll(delta) => {
                frame.scroll = frame.scroll + *delta;
            }

            InputEvent::Key { key, state, repeat } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(*button);
                    if *button == MouseButton::Left {
                        self.press_origin = self.pointer_pos;
                    }
                }
                ButtonState::Released => {
                    self.buttons_down.remove(button);
                    if *button == MouseButton::Left
                        && self.press_origin.take().is_some()
                        && let Some(p) = self.pointer_pos
                    {
                        frame.clicks.push(p);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
