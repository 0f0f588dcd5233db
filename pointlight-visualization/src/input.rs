//! Translation of winit window events into [`InputEvent`]s

use pointlight_core::{ButtonState, InputEvent, Key, MouseButton};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of trackpad travel counted as one wheel line
const PIXELS_PER_LINE: f64 = 100.0;

/// Tracks modifier state and maps window events for the controller
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    shift: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map one window event. Events the controller does not consume, key
    /// releases and key repeats yield `None`.
    pub fn map(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => map_key(code),
                    PhysicalKey::Unidentified(_) => Key::Other,
                };
                Some(InputEvent::KeyPressed { key, shift: self.shift })
            }
            WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::MouseButton {
                button: map_mouse_button(*button),
                state: map_button_state(*state),
            }),
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
                x: position.x,
                y: position.y,
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll {
                delta: scroll_delta(*delta),
            }),
            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}

/// Map a physical key to the keys the viewer binds
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyN => Key::N,
        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit(0),
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit(9),
        _ => Key::Other,
    }
}

pub fn map_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

pub fn map_button_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Vertical wheel offset in lines
pub fn scroll_delta(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Escape), Key::Escape);
        assert_eq!(map_key(KeyCode::F2), Key::F2);
        assert_eq!(map_key(KeyCode::KeyP), Key::P);
        assert_eq!(map_key(KeyCode::Digit7), Key::Digit(7));
        assert_eq!(map_key(KeyCode::Numpad3), Key::Digit(3));
        assert_eq!(map_key(KeyCode::KeyQ), Key::Other);
    }

    #[test]
    fn test_scroll_delta() {
        assert_relative_eq!(scroll_delta(MouseScrollDelta::LineDelta(0.5, -1.0)), -1.0);
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 250.0));
        assert_relative_eq!(scroll_delta(pixels), 2.5);
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(map_mouse_button(winit::event::MouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(winit::event::MouseButton::Other(9)), MouseButton::Other);
        assert_eq!(map_button_state(ElementState::Released), ButtonState::Released);
    }

    #[test]
    fn test_resize_event() {
        let mut mapper = InputMapper::new();
        let event = WindowEvent::Resized(PhysicalSize::new(800, 600));
        assert_eq!(
            mapper.map(&event),
            Some(InputEvent::Resized { width: 800, height: 600 })
        );
        assert_eq!(mapper.map(&WindowEvent::Focused(true)), None);
    }
}
