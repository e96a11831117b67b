//! Flight action bindings: maps physical keys to abstract flight actions.
//!
//! [`FlightBindings`] holds the key map (arrow keys for attitude, WASD for
//! thrust/strafe, R/F for vertical, Escape to quit) and resolves the current
//! [`KeyboardState`] into an [`ActionState`] once per frame.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::keyboard::KeyboardState;

/// Semantic flight actions the ship controller responds to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum FlightAction {
    /// Rotate the ship left around its Y axis.
    YawLeft,
    /// Rotate the ship right around its Y axis.
    YawRight,
    /// Tilt the nose up.
    PitchUp,
    /// Tilt the nose down.
    PitchDown,
    /// Thrust along -Z.
    ThrustForward,
    /// Thrust along +Z.
    ThrustBackward,
    /// Slide along -X.
    StrafeLeft,
    /// Slide along +X.
    StrafeRight,
    /// Climb along +Y.
    Ascend,
    /// Descend along -Y.
    Descend,
    /// Leave the flythrough.
    Quit,
}

impl FlightAction {
    /// Parse an action from its config-file name (the Debug representation).
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "YawLeft" => Self::YawLeft,
            "YawRight" => Self::YawRight,
            "PitchUp" => Self::PitchUp,
            "PitchDown" => Self::PitchDown,
            "ThrustForward" => Self::ThrustForward,
            "ThrustBackward" => Self::ThrustBackward,
            "StrafeLeft" => Self::StrafeLeft,
            "StrafeRight" => Self::StrafeRight,
            "Ascend" => Self::Ascend,
            "Descend" => Self::Descend,
            "Quit" => Self::Quit,
            _ => return None,
        })
    }
}

/// Parse a key from its config-file name (the Debug output of `KeyCode`).
fn keycode_from_name(name: &str) -> Option<KeyCode> {
    Some(match name {
        "KeyA" => KeyCode::KeyA,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyZ" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

/// The set of flight actions active this frame.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    active: HashSet<FlightAction>,
}

impl ActionState {
    /// An `ActionState` with nothing active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action active (test constructor and resolver entry point).
    pub fn activate(&mut self, action: FlightAction) {
        self.active.insert(action);
    }

    /// Returns `true` if the action is active this frame.
    #[must_use]
    pub fn is_active(&self, action: FlightAction) -> bool {
        self.active.contains(&action)
    }

    /// Returns `true` if no actions are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<FlightAction> for ActionState {
    fn from_iter<I: IntoIterator<Item = FlightAction>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

/// Key-to-action map with config-driven overrides.
#[derive(Debug, Clone)]
pub struct FlightBindings {
    bindings: HashMap<KeyCode, FlightAction>,
}

impl Default for FlightBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyCode::ArrowLeft, FlightAction::YawLeft),
            (KeyCode::ArrowRight, FlightAction::YawRight),
            (KeyCode::ArrowUp, FlightAction::PitchUp),
            (KeyCode::ArrowDown, FlightAction::PitchDown),
            (KeyCode::KeyW, FlightAction::ThrustForward),
            (KeyCode::KeyS, FlightAction::ThrustBackward),
            (KeyCode::KeyA, FlightAction::StrafeLeft),
            (KeyCode::KeyD, FlightAction::StrafeRight),
            (KeyCode::KeyR, FlightAction::Ascend),
            (KeyCode::KeyF, FlightAction::Descend),
            (KeyCode::Escape, FlightAction::Quit),
        ]);
        Self { bindings }
    }
}

impl FlightBindings {
    /// Rebind actions from a config map of action name to key name.
    /// Unknown names are ignored with a warning rather than failing startup.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) {
        for (action_name, key_name) in overrides {
            let Some(action) = FlightAction::from_name(action_name) else {
                warn!("Unknown action in keybindings: {action_name}");
                continue;
            };
            let Some(key) = keycode_from_name(key_name) else {
                warn!("Unknown key in keybindings: {key_name}");
                continue;
            };
            // Drop the action's previous binding, then claim the new key.
            self.bindings.retain(|_, bound| *bound != action);
            self.bindings.insert(key, action);
        }
    }

    /// Resolve the keyboard state into the set of active actions.
    /// Quit triggers on the press edge; everything else while held.
    #[must_use]
    pub fn resolve(&self, keyboard: &KeyboardState) -> ActionState {
        let mut state = ActionState::new();
        for (key, action) in &self.bindings {
            let physical = PhysicalKey::Code(*key);
            let active = match action {
                FlightAction::Quit => keyboard.just_pressed(physical),
                _ => keyboard.is_pressed(physical),
            };
            if active {
                state.activate(*action);
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(kb: &mut KeyboardState, code: KeyCode) {
        kb.press(PhysicalKey::Code(code));
    }

    #[test]
    fn test_default_bindings_cover_all_flight_keys() {
        let bindings = FlightBindings::default();
        let mut kb = KeyboardState::new();
        for code in [
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyR,
            KeyCode::KeyF,
        ] {
            press(&mut kb, code);
        }
        let actions = bindings.resolve(&kb);
        for action in [
            FlightAction::YawLeft,
            FlightAction::YawRight,
            FlightAction::PitchUp,
            FlightAction::PitchDown,
            FlightAction::ThrustForward,
            FlightAction::ThrustBackward,
            FlightAction::StrafeLeft,
            FlightAction::StrafeRight,
            FlightAction::Ascend,
            FlightAction::Descend,
        ] {
            assert!(actions.is_active(action), "{action:?} should be active");
        }
        assert!(!actions.is_active(FlightAction::Quit));
    }

    #[test]
    fn test_no_keys_resolves_to_empty() {
        let bindings = FlightBindings::default();
        let actions = bindings.resolve(&KeyboardState::new());
        assert!(actions.is_empty());
    }

    #[test]
    fn test_quit_triggers_on_press_edge_only() {
        let bindings = FlightBindings::default();
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::Escape);
        assert!(bindings.resolve(&kb).is_active(FlightAction::Quit));

        // Still held on the next frame, but no longer a fresh press.
        kb.clear_transients();
        assert!(!bindings.resolve(&kb).is_active(FlightAction::Quit));
    }

    #[test]
    fn test_override_rebinds_action() {
        let mut bindings = FlightBindings::default();
        let overrides = HashMap::from([("Quit".to_string(), "KeyQ".to_string())]);
        bindings.apply_overrides(&overrides);

        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyQ);
        assert!(bindings.resolve(&kb).is_active(FlightAction::Quit));

        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::Escape);
        assert!(!bindings.resolve(&kb).is_active(FlightAction::Quit));
    }

    #[test]
    fn test_unknown_override_names_are_ignored() {
        let mut bindings = FlightBindings::default();
        let overrides = HashMap::from([
            ("Hyperdrive".to_string(), "KeyW".to_string()),
            ("Quit".to_string(), "NoSuchKey".to_string()),
        ]);
        bindings.apply_overrides(&overrides);

        // Defaults intact.
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::Escape);
        assert!(bindings.resolve(&kb).is_active(FlightAction::Quit));
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        assert!(bindings.resolve(&kb).is_active(FlightAction::ThrustForward));
    }

    #[test]
    fn test_simultaneous_actions_resolve_together() {
        let bindings = FlightBindings::default();
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        press(&mut kb, KeyCode::KeyA);
        let actions = bindings.resolve(&kb);
        assert!(actions.is_active(FlightAction::ThrustForward));
        assert!(actions.is_active(FlightAction::StrafeLeft));
    }
}
