//! Flight controller for the player ship.
//!
//! The controller is a pure function from (state, active actions) to the
//! next state. Deltas are fixed per simulation tick, not frame-time scaled:
//! the loop runs ticks at a fixed 60 Hz, so holding a key moves the ship a
//! constant amount per tick. Position and rotation are unbounded.

use glam::{Mat4, Vec3};
use stardrift_input::{ActionState, FlightAction};

/// Mutable ship state: position in world units, rotation in degrees
/// (x = pitch, y = yaw; z is carried but unused by the controller).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShipState {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl ShipState {
    /// Model matrix for rendering: translate, then pitch, then yaw,
    /// matching the transform order the cone is drawn with.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
    }
}

/// Per-tick flight deltas.
#[derive(Debug, Clone, Copy)]
pub struct FlightTuning {
    /// Translation per tick while a thrust/strafe/vertical key is held.
    pub speed: f32,
    /// Rotation in degrees per tick while a turn key is held.
    pub turn_rate: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            speed: 0.1,
            turn_rate: 2.0,
        }
    }
}

/// Advance the ship by one tick. Every active action applies its delta
/// independently; no action returns the state unchanged.
#[must_use]
pub fn advance(state: ShipState, actions: &ActionState, tuning: &FlightTuning) -> ShipState {
    let mut next = state;

    if actions.is_active(FlightAction::YawLeft) {
        next.rotation.y -= tuning.turn_rate;
    }
    if actions.is_active(FlightAction::YawRight) {
        next.rotation.y += tuning.turn_rate;
    }
    if actions.is_active(FlightAction::PitchUp) {
        next.rotation.x -= tuning.turn_rate;
    }
    if actions.is_active(FlightAction::PitchDown) {
        next.rotation.x += tuning.turn_rate;
    }

    if actions.is_active(FlightAction::ThrustForward) {
        next.position.z -= tuning.speed;
    }
    if actions.is_active(FlightAction::ThrustBackward) {
        next.position.z += tuning.speed;
    }
    if actions.is_active(FlightAction::StrafeLeft) {
        next.position.x -= tuning.speed;
    }
    if actions.is_active(FlightAction::StrafeRight) {
        next.position.x += tuning.speed;
    }
    if actions.is_active(FlightAction::Ascend) {
        next.position.y += tuning.speed;
    }
    if actions.is_active(FlightAction::Descend) {
        next.position.y -= tuning.speed;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(list: &[FlightAction]) -> ActionState {
        list.iter().copied().collect()
    }

    #[test]
    fn test_no_actions_is_identity() {
        let state = ShipState::default();
        let next = advance(state, &ActionState::new(), &FlightTuning::default());
        assert_eq!(next, state);
    }

    #[test]
    fn test_yaw_right_adds_exactly_two_degrees() {
        let next = advance(
            ShipState::default(),
            &actions(&[FlightAction::YawRight]),
            &FlightTuning::default(),
        );
        assert_eq!(next.rotation, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(next.position, Vec3::ZERO);
    }

    #[test]
    fn test_yaw_left_and_pitch_signs() {
        let tuning = FlightTuning::default();
        let left = advance(
            ShipState::default(),
            &actions(&[FlightAction::YawLeft]),
            &tuning,
        );
        assert_eq!(left.rotation.y, -2.0);

        let up = advance(
            ShipState::default(),
            &actions(&[FlightAction::PitchUp]),
            &tuning,
        );
        assert_eq!(up.rotation.x, -2.0);

        let down = advance(
            ShipState::default(),
            &actions(&[FlightAction::PitchDown]),
            &tuning,
        );
        assert_eq!(down.rotation.x, 2.0);
    }

    #[test]
    fn test_forward_and_strafe_left_combine_in_one_tick() {
        let next = advance(
            ShipState::default(),
            &actions(&[FlightAction::ThrustForward, FlightAction::StrafeLeft]),
            &FlightTuning::default(),
        );
        assert!((next.position.z - -0.1).abs() < 1e-6);
        assert!((next.position.x - -0.1).abs() < 1e-6);
        assert_eq!(next.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_vertical_axis_signs() {
        let tuning = FlightTuning::default();
        let up = advance(
            ShipState::default(),
            &actions(&[FlightAction::Ascend]),
            &tuning,
        );
        assert!((up.position.y - 0.1).abs() < 1e-6);

        let down = advance(
            ShipState::default(),
            &actions(&[FlightAction::Descend]),
            &tuning,
        );
        assert!((down.position.y - -0.1).abs() < 1e-6);
    }

    #[test]
    fn test_advance_is_deterministic() {
        let state = ShipState {
            position: Vec3::new(1.0, -2.0, 3.0),
            rotation: Vec3::new(10.0, 20.0, 0.0),
        };
        let active = actions(&[FlightAction::ThrustForward, FlightAction::YawRight]);
        let tuning = FlightTuning::default();
        assert_eq!(
            advance(state, &active, &tuning),
            advance(state, &active, &tuning)
        );
    }

    #[test]
    fn test_three_tick_flight_scenario() {
        // {W}, {W}, {D} from the origin: z accumulates -0.2, x gains 0.1.
        let tuning = FlightTuning::default();
        let mut state = ShipState::default();
        state = advance(state, &actions(&[FlightAction::ThrustForward]), &tuning);
        state = advance(state, &actions(&[FlightAction::ThrustForward]), &tuning);
        state = advance(state, &actions(&[FlightAction::StrafeRight]), &tuning);

        assert!((state.position.x - 0.1).abs() < 1e-6);
        assert!((state.position.y - 0.0).abs() < 1e-6);
        assert!((state.position.z - -0.2).abs() < 1e-6);
        assert_eq!(state.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_rotation_is_unclamped() {
        let tuning = FlightTuning::default();
        let mut state = ShipState::default();
        for _ in 0..200 {
            state = advance(state, &actions(&[FlightAction::YawRight]), &tuning);
        }
        assert!((state.rotation.y - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_model_matrix_translation_only() {
        let state = ShipState {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
        };
        let m = state.model_matrix();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_model_matrix_yaw_rotates_about_y() {
        let state = ShipState {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, 90.0, 0.0),
        };
        let m = state.model_matrix();
        // +Z rotated 90 degrees about Y lands on +X.
        let p = m.transform_point3(Vec3::Z);
        assert!((p - Vec3::X).length() < 1e-5);
    }
}
