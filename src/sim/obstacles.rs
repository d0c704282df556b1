//! Obstacle pipeline: spawn, advance, cull
//!
//! Obstacles are kept in spawn order, which is also left-to-right order since
//! they all move at the same speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::config::WorldConfig;

/// Live obstacles plus the countdown to the next spawn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePipeline {
    /// Spawn order (= horizontal order)
    pub obstacles: Vec<Obstacle>,
    /// Ticks until the next spawn; zero means spawn this tick
    pub spawn_timer: u32,
}

impl ObstaclePipeline {
    /// Count down and spawn one obstacle when the timer is at zero
    ///
    /// From a cleared timer this spawns on ticks 1, 1+P, 1+2P, ...
    pub fn spawn_if_due<R: Rng>(&mut self, config: &WorldConfig, rng: &mut R) -> bool {
        let due = self.spawn_timer == 0;
        if due {
            let anchor = sample_gap_anchor(config, rng);
            self.obstacles.push(Obstacle::new(config.play_width, anchor));
            self.spawn_timer = config.spawn_period;
            log::debug!(
                "Spawned obstacle (anchor {:.1}, {} live)",
                anchor,
                self.obstacles.len()
            );
        }
        self.spawn_timer -= 1;
        due
    }

    /// Move every live obstacle left by one tick's distance
    pub fn advance(&mut self, config: &WorldConfig) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= config.obstacle_speed;
        }
    }

    /// Drop obstacles whose trailing edge is past the left boundary
    ///
    /// Stable: survivors keep their relative order. Returns how many went.
    pub fn cull(&mut self, config: &WorldConfig) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.trailing_edge(config) >= 0.0);
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0;
    }
}

/// Uniform gap anchor keeping the whole gap band inside the play area
pub fn sample_gap_anchor<R: Rng>(config: &WorldConfig, rng: &mut R) -> f32 {
    // validate() guarantees max >= 0
    let max = config.max_gap_anchor().max(0.0);
    rng.random_range(0.0..=max)
}
