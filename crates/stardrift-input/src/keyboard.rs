//! Frame-coherent keyboard state tracker.
//!
//! Accumulates winit key events during a frame and answers, for any physical
//! key: is it currently held, and did it transition to pressed this frame.
//! Physical key codes are used so WASD flight works identically regardless
//! of keyboard layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Tracks held and freshly-pressed physical keys across a frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// A `KeyboardState` with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit [`KeyEvent`]. Repeat events are ignored so a held key
    /// registers `just_pressed` only on its initial transition.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => self.press(event.physical_key),
            ElementState::Released => self.release(event.physical_key),
        }
    }

    /// Record a key press directly (test-friendly entry point).
    pub fn press(&mut self, key: PhysicalKey) {
        self.held.insert(key);
        self.just_pressed.insert(key);
    }

    /// Record a key release directly (test-friendly entry point).
    pub fn release(&mut self, key: PhysicalKey) {
        self.held.remove(&key);
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.held.contains(&key)
    }

    /// Returns `true` only during the frame the key transitioned to pressed.
    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Clear the `just_pressed` set. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_initial_state_no_keys_held() {
        let kb = KeyboardState::new();
        assert!(!kb.is_pressed(key(KeyCode::KeyW)));
        assert!(!kb.just_pressed(key(KeyCode::Escape)));
    }

    #[test]
    fn test_press_and_release() {
        let mut kb = KeyboardState::new();
        kb.press(key(KeyCode::KeyW));
        assert!(kb.is_pressed(key(KeyCode::KeyW)));
        kb.release(key(KeyCode::KeyW));
        assert!(!kb.is_pressed(key(KeyCode::KeyW)));
    }

    #[test]
    fn test_just_pressed_lasts_one_frame() {
        let mut kb = KeyboardState::new();
        kb.press(key(KeyCode::Escape));
        assert!(kb.just_pressed(key(KeyCode::Escape)));
        kb.clear_transients();
        assert!(!kb.just_pressed(key(KeyCode::Escape)));
        assert!(kb.is_pressed(key(KeyCode::Escape)));
    }

    #[test]
    fn test_multiple_keys_tracked_independently() {
        let mut kb = KeyboardState::new();
        kb.press(key(KeyCode::KeyW));
        kb.press(key(KeyCode::KeyD));
        kb.release(key(KeyCode::KeyW));
        assert!(!kb.is_pressed(key(KeyCode::KeyW)));
        assert!(kb.is_pressed(key(KeyCode::KeyD)));
    }
}
