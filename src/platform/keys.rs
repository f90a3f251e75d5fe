//! Keyboard state tracking
//!
//! Backends feed raw key-down/key-up events in; the frame loop takes one
//! [`FrameInput`] snapshot out per frame. "Pressed" edges are consumed by the
//! snapshot, "held" levels persist until key-up.

use crate::sim::FrameInput;

/// The keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "Enter" => Some(Key::Enter),
            " " | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Key::Up => 1,
            Key::Down => 1 << 1,
            Key::Enter => 1 << 2,
            Key::Space => 1 << 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: u8,
    pressed: u8,
}

impl KeyState {
    /// Key went down. Auto-repeat events do not count as fresh presses.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        if !repeat && self.held & key.bit() == 0 {
            self.pressed |= key.bit();
        }
        self.held |= key.bit();
    }

    pub fn key_up(&mut self, key: Key) {
        self.held &= !key.bit();
    }

    /// Forget everything held (focus lost, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held = 0;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }

    /// Snapshot for the next frame; clears the pressed edges
    pub fn take_frame_input(&mut self) -> FrameInput {
        let pressed = |key: Key| self.pressed & key.bit() != 0;
        let input = FrameInput {
            up_held: self.is_held(Key::Up),
            down_held: self.is_held(Key::Down),
            up_pressed: pressed(Key::Up),
            down_pressed: pressed(Key::Down),
            enter_pressed: pressed(Key::Enter),
            space_pressed: pressed(Key::Space),
        };
        self.pressed = 0;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_one_frame_held_persists() {
        let mut keys = KeyState::default();
        keys.key_down(Key::Up, false);

        let first = keys.take_frame_input();
        assert!(first.up_pressed && first.up_held);

        let second = keys.take_frame_input();
        assert!(!second.up_pressed && second.up_held);

        keys.key_up(Key::Up);
        assert_eq!(keys.take_frame_input(), FrameInput::default());
    }

    #[test]
    fn test_auto_repeat_is_not_a_press() {
        let mut keys = KeyState::default();
        keys.key_down(Key::Space, false);
        keys.take_frame_input();
        keys.key_down(Key::Space, true);
        assert!(!keys.take_frame_input().space_pressed);
    }

    #[test]
    fn test_tap_between_frames_still_registers() {
        let mut keys = KeyState::default();
        keys.key_down(Key::Enter, false);
        keys.key_up(Key::Enter);
        let input = keys.take_frame_input();
        assert!(input.enter_pressed);
        assert!(!keys.is_held(Key::Enter));
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState::default();
        keys.key_down(Key::Up, false);
        keys.key_down(Key::Down, false);
        keys.release_all();
        let input = keys.take_frame_input();
        assert!(!input.up_held && !input.down_held);
    }

    #[test]
    fn test_dom_key_names() {
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom(" "), Some(Key::Space));
        assert_eq!(Key::from_dom("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_dom("a"), None);
    }
}
