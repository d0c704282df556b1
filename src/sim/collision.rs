//! Collision detection and scoring
//!
//! Axis-aligned boxes in play-area coordinates (y grows downward). An obstacle
//! is two bodies with a gap band between them; the actor is safe while
//! horizontally overlapping only if its whole box sits inside the band.

use glam::Vec2;

use super::state::{Actor, CrashCause, Obstacle};
use crate::config::WorldConfig;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Open-interval overlap on x (touching edges don't overlap)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }
}

/// The actor's box at its current position
pub fn actor_box(actor: &Actor, config: &WorldConfig) -> Aabb {
    Aabb::new(
        Vec2::new(actor.x(), actor.y),
        Vec2::new(config.actor_width, config.actor_height),
    )
}

/// True if the actor box touches either body of the obstacle
///
/// Sitting exactly on the band's edge is still inside the gap.
pub fn hits_obstacle(actor: &Aabb, obstacle: &Obstacle, config: &WorldConfig) -> bool {
    if !actor.overlaps_x(obstacle.x, obstacle.trailing_edge(config)) {
        return false;
    }
    let gap_top = obstacle.gap_anchor();
    let gap_bottom = gap_top + config.gap_band();
    actor.min.y < gap_top || actor.max.y > gap_bottom
}

/// World-bounds check, independent of obstacles
pub fn check_bounds(actor: &Aabb, config: &WorldConfig) -> Option<CrashCause> {
    if actor.min.y > config.play_height {
        Some(CrashCause::Floor)
    } else if actor.max.y < 0.0 {
        Some(CrashCause::Ceiling)
    } else {
        None
    }
}

/// Outcome of one collision & scoring pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Terminal signal, if any
    pub crash: Option<CrashCause>,
    /// Obstacles passed for the first time this tick
    pub passed: u32,
}

/// Check the actor against bounds and every obstacle; mark newly passed ones
///
/// All obstacles are visited even after a hit so a pass and a crash in the
/// same tick both count.
pub fn resolve(actor: &Actor, obstacles: &mut [Obstacle], config: &WorldConfig) -> Resolution {
    let bounds = actor_box(actor, config);
    let mut resolution = Resolution {
        crash: check_bounds(&bounds, config),
        passed: 0,
    };

    for obstacle in obstacles.iter_mut() {
        if resolution.crash.is_none() && hits_obstacle(&bounds, obstacle, config) {
            resolution.crash = Some(CrashCause::Obstacle);
        }

        if actor.x() > obstacle.trailing_edge(config) && obstacle.mark_scored() {
            resolution.passed += 1;
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gap band of 60 units (40 body + 20 gap)
    fn narrow_gap_config() -> WorldConfig {
        WorldConfig {
            obstacle_body_height: 40.0,
            gap_height: 20.0,
            ..Default::default()
        }
    }

    fn actor_at(config: &WorldConfig, y: f32) -> Actor {
        let mut actor = Actor::spawn(config);
        actor.y = y;
        actor
    }

    #[test]
    fn test_inside_gap_band_is_safe() {
        let config = narrow_gap_config();
        // Band [100, 160], actor [110, 130], overlapping horizontally
        let obstacle = Obstacle::new(40.0, 100.0);
        let actor = actor_at(&config, 110.0);
        assert!(!hits_obstacle(&actor_box(&actor, &config), &obstacle, &config));
    }

    #[test]
    fn test_straddling_gap_top_collides() {
        let config = narrow_gap_config();
        let obstacle = Obstacle::new(40.0, 100.0);
        let actor = actor_at(&config, 90.0);
        assert!(hits_obstacle(&actor_box(&actor, &config), &obstacle, &config));
    }

    #[test]
    fn test_below_gap_bottom_collides() {
        let config = narrow_gap_config();
        let obstacle = Obstacle::new(40.0, 100.0);
        let actor = actor_at(&config, 145.0);
        assert!(hits_obstacle(&actor_box(&actor, &config), &obstacle, &config));
    }

    #[test]
    fn test_band_edges_are_safe() {
        let config = narrow_gap_config();
        let obstacle = Obstacle::new(40.0, 100.0);
        let top = actor_at(&config, 100.0);
        let bottom = actor_at(&config, 140.0);
        assert!(!hits_obstacle(&actor_box(&top, &config), &obstacle, &config));
        assert!(!hits_obstacle(&actor_box(&bottom, &config), &obstacle, &config));
    }

    #[test]
    fn test_no_horizontal_overlap_never_collides() {
        let config = narrow_gap_config();
        let actor = actor_at(&config, 0.0);
        let bounds = actor_box(&actor, &config);
        // Actor spans [50, 80]; leading edge touching 80 does not overlap
        let ahead = Obstacle::new(80.0, 300.0);
        // Trailing edge touching 50 does not overlap
        let behind = Obstacle::new(-30.0, 300.0);
        assert!(!hits_obstacle(&bounds, &ahead, &config));
        assert!(!hits_obstacle(&bounds, &behind, &config));
    }

    #[test]
    fn test_bounds() {
        let config = WorldConfig::default();
        let floor = actor_at(&config, config.play_height + 1.0);
        assert_eq!(
            check_bounds(&actor_box(&floor, &config), &config),
            Some(CrashCause::Floor)
        );

        let on_floor = actor_at(&config, config.play_height);
        assert_eq!(check_bounds(&actor_box(&on_floor, &config), &config), None);

        let ceiling = actor_at(&config, -config.actor_height - 0.5);
        assert_eq!(
            check_bounds(&actor_box(&ceiling, &config), &config),
            Some(CrashCause::Ceiling)
        );

        let partly_above = actor_at(&config, -10.0);
        assert_eq!(
            check_bounds(&actor_box(&partly_above, &config), &config),
            None
        );
    }

    #[test]
    fn test_resolve_scores_each_obstacle_once() {
        let config = WorldConfig::default();
        let actor = Actor::spawn(&config);
        // Trailing edges at 40 and 45: both behind the actor at x = 50
        let mut obstacles = vec![Obstacle::new(-40.0, 0.0), Obstacle::new(-35.0, 0.0)];

        let first = resolve(&actor, &mut obstacles, &config);
        assert_eq!(first.passed, 2);
        assert_eq!(first.crash, None);

        let second = resolve(&actor, &mut obstacles, &config);
        assert_eq!(second.passed, 0);
    }

    #[test]
    fn test_resolve_trailing_edge_equal_not_passed() {
        let config = WorldConfig::default();
        let actor = Actor::spawn(&config);
        let mut obstacles = vec![Obstacle::new(-30.0, 0.0)];
        assert_eq!(resolve(&actor, &mut obstacles, &config).passed, 0);
        obstacles[0].x -= 0.5;
        assert_eq!(resolve(&actor, &mut obstacles, &config).passed, 1);
    }

    #[test]
    fn test_resolve_reports_obstacle_hit() {
        let config = WorldConfig::default();
        let actor = actor_at(&config, 10.0);
        // Band [100, 430]; actor top at 10 is inside the upper body
        let mut obstacles = vec![Obstacle::new(60.0, 100.0)];
        let resolution = resolve(&actor, &mut obstacles, &config);
        assert_eq!(resolution.crash, Some(CrashCause::Obstacle));
    }

    #[test]
    fn test_resolve_bounds_win_over_obstacles() {
        let config = WorldConfig::default();
        let actor = actor_at(&config, config.play_height + 1.0);
        let mut obstacles = vec![Obstacle::new(60.0, 100.0)];
        let resolution = resolve(&actor, &mut obstacles, &config);
        assert_eq!(resolution.crash, Some(CrashCause::Floor));
    }
}
