//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only, no wall-clock time
//! - Seeded RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Resolution, actor_box, check_bounds, hits_obstacle};
pub use obstacles::ObstaclePipeline;
pub use snapshot::{ObstacleView, Snapshot};
pub use state::{Actor, CrashCause, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, Transition, on_primary_action, tick};
