//! Gapwing - a single-screen gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic tick simulation (physics, obstacles, collisions, phases)
//! - `config`: Validated world constants
//! - `input`: Raw input events to semantic actions
//! - `assets`: Sprite atlas with per-sprite readiness
//! - `renderer`: WebGPU rendering of a read-only snapshot
//! - `timestep`: Fixed-step accumulator for the frame loop

pub mod assets;
pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod timestep;

pub use config::{ConfigError, WorldConfig};

/// Game configuration constants (defaults for [`WorldConfig`])
pub mod consts {
    /// Nominal tick rate the physics constants are tuned for
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed simulation timestep in seconds (driver accumulator only)
    pub const SIM_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play area dimensions (world units, y grows downward)
    pub const PLAY_WIDTH: f32 = 288.0;
    pub const PLAY_HEIGHT: f32 = 512.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Upward velocity set by a jump (magnitude)
    pub const JUMP_IMPULSE: f32 = 10.0;

    /// Actor box; horizontal position is fixed for the whole run
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 30.0;
    pub const ACTOR_HEIGHT: f32 = 20.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_BODY_HEIGHT: f32 = 300.0;
    pub const GAP_HEIGHT: f32 = 30.0;
    /// Leftward obstacle movement per tick
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Ticks between obstacle spawns
    pub const SPAWN_PERIOD: u32 = 200;

    /// Cosmetic floor scroll per tick
    pub const FLOOR_SPEED: f32 = 1.0;
}
