//! Window-system independent input events

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    F1,
    F2,
    F3,
    P,
    N,
    /// Number row key `0`-`9`
    Digit(u8),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Input consumed by the [`Controller`](crate::Controller)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed { key: Key, shift: bool },
    MouseButton { button: MouseButton, state: ButtonState },
    /// Cursor position in physical pixels, origin at the top-left corner
    CursorMoved { x: f64, y: f64 },
    /// Vertical wheel offset in lines; positive scrolls up
    Scroll { delta: f64 },
    Resized { width: u32, height: u32 },
}
