//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; nothing is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstaclePipeline;
use crate::config::{ConfigError, WorldConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Idle,
    /// Physics, obstacles and collision active
    Running,
    /// Run ended; only restart is live
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit the body of an obstacle
    Obstacle,
    /// Fell below the floor
    Floor,
    /// Rose fully above the top edge
    Ceiling,
}

/// Something that happened during a tick, for HUD/logging consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Running
    Started,
    /// Jump impulse applied this tick
    Jumped,
    /// One obstacle entered at the right edge
    ObstacleSpawned,
    /// An obstacle was passed; carries the new score
    Scored { score: u32 },
    /// Running -> GameOver
    Crashed(CrashCause),
    /// Full reset back to Idle
    Reset,
}

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Fixed for the whole run
    x: f32,
    /// Top edge (y grows downward)
    pub y: f32,
    /// Vertical velocity per tick (negative is up)
    pub vy: f32,
}

impl Actor {
    /// Actor at its canonical start position with zero velocity
    pub fn spawn(config: &WorldConfig) -> Self {
        Self {
            x: config.actor_x,
            y: config.actor_start_y(),
            vy: 0.0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }
}

/// A pair of obstacle bodies with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    /// Top of the gap band, fixed at spawn
    gap_anchor: f32,
    scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_anchor: f32) -> Self {
        Self {
            x,
            gap_anchor,
            scored: false,
        }
    }

    #[inline]
    pub fn gap_anchor(&self) -> f32 {
        self.gap_anchor
    }

    /// Trailing (right) edge
    #[inline]
    pub fn trailing_edge(&self, config: &WorldConfig) -> f32 {
        self.x + config.obstacle_width
    }

    #[inline]
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    /// Flip the scored flag; returns false if it was already set
    pub fn mark_scored(&mut self) -> bool {
        if self.scored {
            return false;
        }
        self.scored = true;
        true
    }
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// World constants, validated at construction
    pub config: WorldConfig,
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gap anchor sampling
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub actor: Actor,
    /// Live obstacles and the spawn timer
    pub pipeline: ObstaclePipeline,
    /// Running ticks since the last reset
    pub time_ticks: u64,
    /// Cosmetic floor scroll distance (not gameplay-affecting)
    pub floor_offset: f32,
    /// Completed resets this session
    pub runs: u32,
}

impl GameState {
    /// Create a new game state; fails fast on an unsatisfiable config
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            actor: Actor::spawn(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            pipeline: ObstaclePipeline::default(),
            time_ticks: 0,
            floor_offset: 0.0,
            runs: 0,
        })
    }

    /// Reset everything a run owns and return to Idle
    ///
    /// The RNG keeps its stream so the next run sees new gap positions.
    pub fn reset(&mut self) {
        self.actor = Actor::spawn(&self.config);
        self.pipeline.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.floor_offset = 0.0;
        self.phase = GamePhase::Idle;
        self.runs += 1;
    }

    /// Live obstacles in spawn order
    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.pipeline.obstacles
    }
}
