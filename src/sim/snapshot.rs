//! Read-only view of a run for renderers and front-ends

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

/// One obstacle as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    /// Leading (left) edge
    pub position: f32,
    /// Top of the gap band
    pub gap_anchor: f32,
}

/// Per-frame snapshot; building one never mutates the state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Actor top-left corner
    pub actor_position: Vec2,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    /// Running ticks since the last reset
    pub tick: u64,
    /// Floor scroll distance (visual only)
    pub floor_offset: f32,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            actor_position: Vec2::new(self.actor.x(), self.actor.y),
            obstacles: self
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    position: o.x,
                    gap_anchor: o.gap_anchor(),
                })
                .collect(),
            score: self.score,
            tick: self.time_ticks,
            floor_offset: self.floor_offset,
        }
    }
}
