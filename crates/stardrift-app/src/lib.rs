//! Application shell: window and event loop, fixed-timestep simulation,
//! and the per-frame render path.

pub mod error;
pub mod game_loop;
pub mod state;
pub mod window;

pub use error::AppError;
pub use game_loop::{FIXED_DT, FramePacer, GameLoop, MAX_FRAME_TIME};
pub use state::LoopState;
pub use window::{FlythroughApp, run, window_attributes_from_config};
