use crate::types::Point;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Space,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Function keys, 1-based.
    F(u8),
}

/// Snapshot of the input devices for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub mouse_position: Option<Point>,
    pub pressed_mouse_buttons: FxHashSet<MouseButton>,
    pub pressed_keys: FxHashSet<Key>,
}

impl InputState {
    pub fn with_mouse_position(mut self, position: Point) -> Self {
        self.mouse_position = Some(position);
        self
    }

    pub fn set_key_pressed(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.pressed_keys.insert(key);
        } else {
            self.pressed_keys.remove(&key);
        }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn set_mouse_button_pressed(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.pressed_mouse_buttons.insert(button);
        } else {
            self.pressed_mouse_buttons.remove(&button);
        }
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_mouse_buttons.contains(&button)
    }

    /// Keys down now that were up in `previous`.
    pub fn newly_pressed<'a>(&'a self, previous: &'a InputState) -> impl Iterator<Item = Key> + 'a {
        self.pressed_keys
            .iter()
            .filter(|key| !previous.pressed_keys.contains(key))
            .copied()
    }
}

pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Input source that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self) -> InputState {
        InputState::default()
    }
}
