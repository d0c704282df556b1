//! Demo-mode autopilot
//!
//! A pure policy over the current state: start from Idle, then jump whenever
//! the next tick would drop the actor's bottom edge below a target line near
//! the bottom of the upcoming gap. Never restarts a finished run.

use super::state::{GamePhase, GameState};

/// Clearance kept above the bottom of the gap band
const GAP_MARGIN: f32 = 20.0;
/// Target line as a fraction of play height when no obstacle is ahead
const OPEN_SKY_LINE: f32 = 0.6;

/// Whether the autopilot would press the primary action this tick
pub fn wants_action(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Idle => true,
        GamePhase::Running => {
            let config = &state.config;
            let actor = &state.actor;

            // First obstacle not yet passed, including one being flown through
            let line = state
                .obstacles()
                .iter()
                .find(|o| o.trailing_edge(config) >= actor.x())
                .map(|o| o.gap_anchor() + config.gap_band() - GAP_MARGIN)
                .unwrap_or(config.play_height * OPEN_SKY_LINE);

            let next_bottom = actor.y + config.actor_height + actor.vy + config.gravity;
            next_bottom > line
        }
        GamePhase::GameOver => false,
    }
}
