//! Scene building: snapshot + sprites -> triangle list
//!
//! Pure function of its inputs. Coordinates stay in play-area units (origin at
//! the top-left, y down); the pipeline maps them to the viewport.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::assets::{SpriteAtlas, SpriteId};
use crate::config::WorldConfig;
use crate::sim::{GamePhase, Snapshot};

/// Top of the score digits
const SCORE_TOP: f32 = 28.0;
/// Score digit cell
const SCORE_DIGIT: Vec2 = Vec2::new(20.0, 32.0);
/// Narrowest floor tile drawn, in world units
const MIN_FLOOR_TILE: f32 = 1.0;
/// Upper bound on floor tiles per frame
const MAX_FLOOR_TILES: u32 = 512;

/// Build the frame for a snapshot
///
/// Sprites that are not ready are skipped; everything else still draws.
pub fn build_scene(snapshot: &Snapshot, config: &WorldConfig, atlas: &SpriteAtlas) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(512);
    let play = Vec2::new(config.play_width, config.play_height);

    if let Some(bg) = atlas.get(SpriteId::Background) {
        shapes::rect(&mut out, Vec2::ZERO, play, bg.color);
    }

    match snapshot.phase {
        GamePhase::Idle => {
            if let Some(msg) = atlas.get(SpriteId::StartMessage) {
                centered(&mut out, play / 2.0, msg.size, msg.color);
            }
        }
        GamePhase::Running => {
            obstacles(&mut out, snapshot, config, atlas);
            floor(&mut out, snapshot.floor_offset, play, atlas);
            if let Some(actor) = atlas.get(SpriteId::Actor) {
                let min = snapshot.actor_position;
                let size = Vec2::new(config.actor_width, config.actor_height);
                shapes::rect(&mut out, min, min + size, actor.color);
            }
            score(&mut out, snapshot.score, play.x / 2.0, SCORE_TOP);
        }
        GamePhase::GameOver => {
            if let Some(banner) = atlas.get(SpriteId::GameOverBanner) {
                centered(&mut out, play / 2.0, banner.size, banner.color);
                let below = play.y / 2.0 + banner.size.y / 2.0 + 16.0;
                score(&mut out, snapshot.score, play.x / 2.0, below);
            } else {
                score(&mut out, snapshot.score, play.x / 2.0, SCORE_TOP);
            }
        }
    }

    out
}

fn centered(out: &mut Vec<Vertex>, center: Vec2, size: Vec2, color: [f32; 4]) {
    let half = size / 2.0;
    shapes::rect(out, center - half, center + half, color);
}

fn score(out: &mut Vec<Vertex>, value: u32, center_x: f32, top: f32) {
    shapes::number(
        out,
        value,
        center_x,
        top,
        SCORE_DIGIT,
        colors::SCORE_FILL,
        colors::SCORE_BORDER,
    );
}

/// Top body fills [0, anchor], bottom body fills [anchor + band, floor of play area]
fn obstacles(out: &mut Vec<Vertex>, snapshot: &Snapshot, config: &WorldConfig, atlas: &SpriteAtlas) {
    let top = atlas.get(SpriteId::ObstacleTop);
    let bottom = atlas.get(SpriteId::ObstacleBottom);
    let band = config.gap_band();

    for o in &snapshot.obstacles {
        let left = o.position;
        let right = left + config.obstacle_width;
        if let Some(sprite) = top {
            shapes::rect(
                out,
                Vec2::new(left, 0.0),
                Vec2::new(right, o.gap_anchor),
                sprite.color,
            );
        }
        if let Some(sprite) = bottom {
            shapes::rect(
                out,
                Vec2::new(left, o.gap_anchor + band),
                Vec2::new(right, config.play_height),
                sprite.color,
            );
        }
    }
}

/// Tiled floor strip along the bottom edge, scrolled left by `offset`
fn floor(out: &mut Vec<Vertex>, offset: f32, play: Vec2, atlas: &SpriteAtlas) {
    let Some(sprite) = atlas.get(SpriteId::Floor) else {
        return;
    };
    let tile = sprite.size;
    if !(tile.x >= MIN_FLOOR_TILE) || !(tile.y > 0.0) || !offset.is_finite() {
        return;
    }

    let top = play.y - tile.y;
    let start = -(offset.rem_euclid(tile.x));
    let tiles = ((play.x - start) / tile.x).ceil().clamp(0.0, MAX_FLOOR_TILES as f32) as u32;
    for i in 0..tiles {
        let x = start + i as f32 * tile.x;
        // Alternate shade so the scroll is visible on a flat colour
        let shade = if ((x + offset) / tile.x).round() as i64 % 2 == 0 {
            1.0
        } else {
            0.9
        };
        let c = sprite.color;
        let color = [c[0] * shade, c[1] * shade, c[2] * shade, c[3]];
        shapes::rect(
            out,
            Vec2::new(x, top),
            Vec2::new((x + tile.x).min(play.x), play.y),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use crate::sim::ObstacleView;

    fn snapshot(phase: GamePhase) -> Snapshot {
        Snapshot {
            phase,
            actor_position: Vec2::new(50.0, 246.0),
            obstacles: vec![ObstacleView {
                position: 150.0,
                gap_anchor: 80.0,
            }],
            score: 0,
            tick: 10,
            floor_offset: 10.0,
        }
    }

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_idle_draws_background_and_start_message() {
        let atlas = SpriteAtlas::builtin();
        let out = build_scene(&snapshot(GamePhase::Idle), &WorldConfig::default(), &atlas);
        assert_eq!(out.len(), 12);
        assert!(has_color(&out, SpriteId::StartMessage.default_sprite().color));
        assert!(!has_color(&out, SpriteId::Actor.default_sprite().color));
    }

    #[test]
    fn test_running_draws_world() {
        let atlas = SpriteAtlas::builtin();
        let out = build_scene(&snapshot(GamePhase::Running), &WorldConfig::default(), &atlas);
        for id in [SpriteId::Actor, SpriteId::ObstacleTop, SpriteId::ObstacleBottom] {
            assert!(has_color(&out, id.default_sprite().color), "{:?}", id);
        }
        assert!(has_color(&out, colors::SCORE_FILL));
        assert!(!has_color(&out, SpriteId::GameOverBanner.default_sprite().color));
        assert_eq!(out.len() % 3, 0);
    }

    #[test]
    fn test_obstacle_bodies_leave_gap_band_open() {
        let config = WorldConfig::default();
        let mut atlas = SpriteAtlas::loading();
        atlas.mark_ready(SpriteId::ObstacleTop, SpriteId::ObstacleTop.default_sprite());
        atlas.mark_ready(
            SpriteId::ObstacleBottom,
            SpriteId::ObstacleBottom.default_sprite(),
        );

        let mut snap = snapshot(GamePhase::Running);
        snap.obstacles[0].gap_anchor = 100.0;
        let out = build_scene(&snap, &config, &atlas);

        let band_top = 100.0;
        let band_bottom = 100.0 + config.gap_band();
        let bodies: Vec<&Vertex> = out
            .iter()
            .filter(|v| v.color != colors::SCORE_FILL && v.color != colors::SCORE_BORDER)
            .collect();
        assert_eq!(bodies.len(), 12);
        for v in bodies {
            let y = v.position[1];
            assert!(y <= band_top || y >= band_bottom, "vertex inside gap: {}", y);
        }
    }

    #[test]
    fn test_unready_sprites_are_skipped() {
        let atlas = SpriteAtlas::loading();
        let config = WorldConfig::default();

        assert!(build_scene(&snapshot(GamePhase::Idle), &config, &atlas).is_empty());

        // Only the score (no sprite needed) survives
        let running = build_scene(&snapshot(GamePhase::Running), &config, &atlas);
        assert!(!running.is_empty());
        assert!(
            running
                .iter()
                .all(|v| v.color == colors::SCORE_FILL || v.color == colors::SCORE_BORDER)
        );
    }

    #[test]
    fn test_game_over_shows_banner() {
        let atlas = SpriteAtlas::builtin();
        let out = build_scene(&snapshot(GamePhase::GameOver), &WorldConfig::default(), &atlas);
        assert!(has_color(&out, SpriteId::GameOverBanner.default_sprite().color));
        assert!(!has_color(&out, SpriteId::Actor.default_sprite().color));
    }

    #[test]
    fn test_floor_covers_play_width() {
        let config = WorldConfig::default();
        let mut atlas = SpriteAtlas::loading();
        atlas.mark_ready(SpriteId::Floor, SpriteId::Floor.default_sprite());

        for offset in [0.0, 10.0, 335.0, 1000.5] {
            let mut snap = snapshot(GamePhase::Running);
            snap.score = 0;
            snap.floor_offset = offset;
            let out = build_scene(&snap, &config, &atlas);
            let floor: Vec<&Vertex> = out
                .iter()
                .filter(|v| v.color != colors::SCORE_FILL && v.color != colors::SCORE_BORDER)
                .collect();
            let min_x = floor.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
            let max_x = floor.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
            assert!(min_x <= 0.0, "offset {}", offset);
            assert!(max_x >= config.play_width, "offset {}", offset);
        }
    }

    #[test]
    fn test_degenerate_floor_tile_is_skipped() {
        let config = WorldConfig::default();
        for width in [1e-7, 0.5, f32::NAN] {
            let mut atlas = SpriteAtlas::loading();
            atlas.mark_ready(SpriteId::Floor, Sprite::new(width, 56.0, [0.5, 0.5, 0.5, 1.0]));
            let out = build_scene(&snapshot(GamePhase::Running), &config, &atlas);
            assert!(
                out.iter()
                    .all(|v| v.color == colors::SCORE_FILL || v.color == colors::SCORE_BORDER),
                "width {}",
                width
            );
        }
    }

    #[test]
    fn test_narrow_floor_tile_count_is_bounded() {
        let config = WorldConfig::default();
        let mut atlas = SpriteAtlas::loading();
        atlas.mark_ready(SpriteId::Floor, Sprite::new(1.0, 56.0, [0.5, 0.5, 0.5, 1.0]));
        let out = build_scene(&snapshot(GamePhase::Running), &config, &atlas);
        let floor = out
            .iter()
            .filter(|v| v.color != colors::SCORE_FILL && v.color != colors::SCORE_BORDER)
            .count();
        assert!(floor > 0);
        assert!(floor <= MAX_FLOOR_TILES as usize * 6);
    }
}
