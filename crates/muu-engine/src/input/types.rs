use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Only the keys the page reacts to get their own variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    /// Number row `0`..`9`.
    Digit(u8),
    /// Anything else, with the platform key code when one exists.
    Other(u32),
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input event. Positions are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    PointerLeft,
    PointerButton { button: MouseButton, state: ButtonState },
    /// Scroll distance in logical pixels; positive `y` moves further down the page.
    Scroll(Vec2),
    Key { key: Key, state: ButtonState, repeat: bool },
    Focused(bool),
}
