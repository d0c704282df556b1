//! Sprite atlas with per-sprite readiness
//!
//! Sprites are procedural (a size and a colour), described by a JSON manifest
//! that arrives asynchronously on web. Each sprite has its own slot; the
//! renderer asks for a sprite and skips the draw when it isn't ready yet, so a
//! slow or failed load only degrades the picture, never the tick.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Every sprite the scene uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Actor,
    ObstacleTop,
    ObstacleBottom,
    Floor,
    StartMessage,
    GameOverBanner,
}

/// Number of sprite slots
pub const SPRITE_COUNT: usize = 7;

impl SpriteId {
    pub const ALL: [SpriteId; SPRITE_COUNT] = [
        SpriteId::Background,
        SpriteId::Actor,
        SpriteId::ObstacleTop,
        SpriteId::ObstacleBottom,
        SpriteId::Floor,
        SpriteId::StartMessage,
        SpriteId::GameOverBanner,
    ];

    /// Manifest key
    pub fn name(self) -> &'static str {
        match self {
            SpriteId::Background => "background",
            SpriteId::Actor => "actor",
            SpriteId::ObstacleTop => "obstacle_top",
            SpriteId::ObstacleBottom => "obstacle_bottom",
            SpriteId::Floor => "floor",
            SpriteId::StartMessage => "start_message",
            SpriteId::GameOverBanner => "game_over",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Built-in look, used when no manifest is involved
    pub fn default_sprite(self) -> Sprite {
        match self {
            SpriteId::Background => Sprite::new(288.0, 512.0, [0.31, 0.75, 0.79, 1.0]),
            SpriteId::Actor => Sprite::new(34.0, 24.0, [0.98, 0.80, 0.18, 1.0]),
            SpriteId::ObstacleTop => Sprite::new(52.0, 320.0, [0.45, 0.75, 0.18, 1.0]),
            SpriteId::ObstacleBottom => Sprite::new(52.0, 320.0, [0.38, 0.66, 0.15, 1.0]),
            SpriteId::Floor => Sprite::new(336.0, 56.0, [0.87, 0.85, 0.58, 1.0]),
            SpriteId::StartMessage => Sprite::new(184.0, 120.0, [1.0, 1.0, 1.0, 0.85]),
            SpriteId::GameOverBanner => Sprite::new(192.0, 42.0, [0.95, 0.45, 0.15, 1.0]),
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A flat-coloured sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Natural size in world units
    pub size: Vec2,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Sprite {
    pub fn new(width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            size: Vec2::new(width, height),
            color,
        }
    }

    /// Finite positive size and finite colour channels in [0, 1]
    pub fn is_valid(&self) -> bool {
        self.size.is_finite()
            && self.size.x > 0.0
            && self.size.y > 0.0
            && self.color.iter().all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

/// Load state of one sprite
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSlot {
    Loading,
    Ready(Sprite),
    Failed(String),
}

/// All sprite slots
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    slots: [AssetSlot; SPRITE_COUNT],
}

impl Default for SpriteAtlas {
    fn default() -> Self {
        Self::loading()
    }
}

impl SpriteAtlas {
    /// Every slot pending
    pub fn loading() -> Self {
        Self {
            slots: std::array::from_fn(|_| AssetSlot::Loading),
        }
    }

    /// Every slot ready with the built-in look
    pub fn builtin() -> Self {
        let mut atlas = Self::loading();
        for id in SpriteId::ALL {
            atlas.mark_ready(id, id.default_sprite());
        }
        atlas
    }

    pub fn mark_ready(&mut self, id: SpriteId, sprite: Sprite) {
        self.slots[id.index()] = AssetSlot::Ready(sprite);
    }

    pub fn mark_failed(&mut self, id: SpriteId, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Sprite '{}' unavailable: {}", id.name(), reason);
        self.slots[id.index()] = AssetSlot::Failed(reason);
    }

    /// Fail every slot still loading (e.g. the manifest fetch failed)
    pub fn fail_pending(&mut self, reason: &str) {
        for id in SpriteId::ALL {
            if self.slots[id.index()] == AssetSlot::Loading {
                self.mark_failed(id, reason);
            }
        }
    }

    pub fn slot(&self, id: SpriteId) -> &AssetSlot {
        &self.slots[id.index()]
    }

    /// The sprite, only if it finished loading
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        match &self.slots[id.index()] {
            AssetSlot::Ready(sprite) => Some(sprite),
            _ => None,
        }
    }

    #[inline]
    pub fn is_ready(&self, id: SpriteId) -> bool {
        self.get(id).is_some()
    }

    /// Fill slots from a JSON manifest (`{"actor": {"size": [w, h], "color": [r, g, b, a]}, ...}`)
    ///
    /// Unknown names are ignored; sprites the manifest leaves out or describes
    /// with a bad size/colour are marked failed. Returns how many sprites
    /// became ready.
    pub fn apply_manifest(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let manifest: HashMap<String, Sprite> = serde_json::from_str(json)?;

        let mut loaded = 0;
        for (name, sprite) in manifest {
            match SpriteId::from_name(&name) {
                Some(id) if sprite.is_valid() => {
                    self.mark_ready(id, sprite);
                    loaded += 1;
                }
                Some(id) => self.mark_failed(id, format!("invalid sprite {:?}", sprite)),
                None => log::warn!("Unknown sprite '{}' in manifest", name),
            }
        }
        self.fail_pending("missing from manifest");

        log::info!("Sprite manifest applied ({} sprites)", loaded);
        Ok(loaded)
    }
}
