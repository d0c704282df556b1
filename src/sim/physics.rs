//! Actor physics
//!
//! Fixed-step vertical integration. Bounds are not evaluated here; see
//! `collision::check_bounds`.

use super::state::Actor;
use crate::config::WorldConfig;

/// Integrate one running tick
///
/// A jump replaces this tick's gravity increment: velocity becomes exactly the
/// jump velocity regardless of current fall speed. No terminal velocity.
pub fn integrate(actor: &mut Actor, config: &WorldConfig, jumped: bool) {
    if jumped {
        actor.vy = config.jump_velocity();
    } else {
        actor.vy += config.gravity;
    }
    actor.y += actor.vy;
}
