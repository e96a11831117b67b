//! Keyboard input mapped through configurable flight-action bindings.

pub mod actions;
pub mod keyboard;

pub use actions::{ActionState, FlightAction, FlightBindings};
pub use keyboard::KeyboardState;
