//! Fixed-step accumulator for frame-driven loops

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta accepted, in seconds
const MAX_FRAME_DT: f32 = 0.1;

/// Turns variable frame deltas into a bounded number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add a frame's elapsed time; returns how many ticks to run now
    ///
    /// At most `MAX_SUBSTEPS` ticks per frame. Backlog beyond that is dropped
    /// so a slow frame rate runs the game slower instead of catching up later.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt.min(MAX_FRAME_DT);
        }

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Leftover time not yet consumed by a tick
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}
