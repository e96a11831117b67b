//! Fixed-timestep simulation loop and frame pacing.
//!
//! Simulation runs at a fixed 60 Hz using an accumulator ("Fix Your
//! Timestep"): each redraw measures elapsed wall time and drains it in
//! whole ticks. Ship motion therefore advances by constant per-tick deltas
//! regardless of render rate. [`FramePacer`] caps the render rate when the
//! surface is not vsynced.

use std::time::{Duration, Instant};

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame time clamp. A stall longer than this is absorbed as slowdown
/// rather than a burst of catch-up ticks.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator-based fixed-timestep loop.
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    tick_count: u64,
}

impl GameLoop {
    /// Start the loop from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            tick_count: 0,
        }
    }

    /// Measure elapsed wall time and run `step_fn` once per whole fixed
    /// tick. Returns the number of ticks executed this frame.
    pub fn tick(&mut self, mut step_fn: impl FnMut()) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        let steps = drain_accumulator(&mut self.accumulator, frame_time);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
        }
        for _ in 0..steps {
            step_fn();
            self.tick_count += 1;
        }
        steps
    }

    /// Total simulation ticks executed.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Add a (clamped) frame time to the accumulator and return how many whole
/// fixed ticks it covers. Pure so the stepping logic is testable without
/// wall-clock time.
fn drain_accumulator(accumulator: &mut f64, frame_time: f64) -> u32 {
    *accumulator += frame_time.min(MAX_FRAME_TIME);
    let mut steps = 0;
    while *accumulator >= FIXED_DT {
        *accumulator -= FIXED_DT;
        steps += 1;
    }
    steps
}

/// Blocks at the end of each frame to hold the render rate at a target
/// FPS. Only used when vsync is off; Fifo presentation paces for free.
pub struct FramePacer {
    frame_budget: Duration,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            last_frame: Instant::now(),
        }
    }

    /// Sleep out the remainder of the current frame's budget.
    pub fn wait(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_budget {
            std::thread::sleep(self.frame_budget - elapsed);
        }
        self.last_frame = Instant::now();
    }
}
