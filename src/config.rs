//! World configuration
//!
//! The fixed constants from [`crate::consts`] as one validated record. A run
//! never changes its config; an override can be supplied as JSON (LocalStorage
//! on web).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a [`WorldConfig`] is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("spawn_period must be at least one tick")]
    ZeroSpawnPeriod,
    #[error(
        "gap band ({band}) taller than play area ({height}); no spawn position exists"
    )]
    GapExceedsPlayArea { band: f32, height: f32 },
    #[error("actor does not fit inside the play area")]
    ActorOutsidePlayArea,
    #[error("invalid config JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// World constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub play_width: f32,
    pub play_height: f32,
    /// Added to vertical velocity every running tick
    pub gravity: f32,
    /// Magnitude of the upward velocity a jump sets
    pub jump_impulse: f32,
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub obstacle_width: f32,
    pub obstacle_body_height: f32,
    pub gap_height: f32,
    pub obstacle_speed: f32,
    /// Ticks between spawns
    pub spawn_period: u32,
    /// Floor scroll per tick (visual only)
    pub floor_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_body_height: OBSTACLE_BODY_HEIGHT,
            gap_height: GAP_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_period: SPAWN_PERIOD,
            floor_speed: FLOOR_SPEED,
        }
    }
}

impl WorldConfig {
    /// Play area as a vector
    #[inline]
    pub fn play_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.play_width, self.play_height)
    }

    /// Total passable height between an obstacle's two bodies
    #[inline]
    pub fn gap_band(&self) -> f32 {
        self.obstacle_body_height + self.gap_height
    }

    /// Largest gap anchor that keeps the whole band inside the play area
    #[inline]
    pub fn max_gap_anchor(&self) -> f32 {
        self.play_height - self.gap_band()
    }

    /// Vertical start position: actor centred in the play area
    #[inline]
    pub fn actor_start_y(&self) -> f32 {
        self.play_height / 2.0 - self.actor_height / 2.0
    }

    /// Signed velocity a jump sets (negative is up)
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        -self.jump_impulse
    }

    /// Check every constant; spawn sampling is unsatisfiable without this
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("actor_x", self.actor_x),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_body_height", self.obstacle_body_height),
            ("gap_height", self.gap_height),
            ("obstacle_speed", self.obstacle_speed),
            ("floor_speed", self.floor_speed),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        // actor_x may sit on the left edge; gravity may be zero for tests
        for (field, value) in [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("jump_impulse", self.jump_impulse),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_body_height", self.obstacle_body_height),
            ("gap_height", self.gap_height),
            ("obstacle_speed", self.obstacle_speed),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.gravity < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "gravity",
                value: self.gravity,
            });
        }

        if self.spawn_period == 0 {
            return Err(ConfigError::ZeroSpawnPeriod);
        }

        if self.gap_band() > self.play_height {
            return Err(ConfigError::GapExceedsPlayArea {
                band: self.gap_band(),
                height: self.play_height,
            });
        }

        if self.actor_x < 0.0
            || self.actor_x + self.actor_width > self.play_width
            || self.actor_height > self.play_height
        {
            return Err(ConfigError::ActorOutsidePlayArea);
        }

        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gapwing_world";

    /// Load an override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded world config override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring world config override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
