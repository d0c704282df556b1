//! Fixed-step simulation tick
//!
//! Core game loop that advances the run deterministically, one tick per call.

use super::autopilot;
use super::collision;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (one-shot flags, cleared by the driver)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click/tap/jump key
    pub primary_action: bool,
    /// Dedicated restart control
    pub restart: bool,
    /// Demo mode - autopilot plays the game
    pub autopilot: bool,
}

/// What a primary action means in a given phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Jump,
    Reset,
}

/// Phase dispatch for the primary action; every phase accepts it
pub fn on_primary_action(phase: GamePhase) -> Transition {
    match phase {
        GamePhase::Idle => Transition::Start,
        GamePhase::Running => Transition::Jump,
        GamePhase::GameOver => Transition::Reset,
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        restart(state, &mut events);
    }

    let primary = input.primary_action
        || (input.autopilot && autopilot::wants_action(state));

    let mut jumped = false;
    if primary {
        match on_primary_action(state.phase) {
            Transition::Start => {
                state.phase = GamePhase::Running;
                events.push(GameEvent::Started);
                log::info!("Run {} started", state.runs + 1);
            }
            Transition::Jump => jumped = true,
            Transition::Reset => restart(state, &mut events),
        }
    }

    // Idle and GameOver only render; nothing moves
    if state.phase == GamePhase::Running {
        simulate(state, jumped, &mut events);
    }

    events
}

/// Physics, then obstacle spawn/advance, then collision & scoring, then cull
fn simulate(state: &mut GameState, jumped: bool, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    physics::integrate(&mut state.actor, &state.config, jumped);
    if jumped {
        events.push(GameEvent::Jumped);
    }

    if state.pipeline.spawn_if_due(&state.config, &mut state.rng) {
        events.push(GameEvent::ObstacleSpawned);
    }
    state.pipeline.advance(&state.config);
    state.floor_offset += state.config.floor_speed;

    let resolution = collision::resolve(&state.actor, &mut state.pipeline.obstacles, &state.config);
    for _ in 0..resolution.passed {
        state.score += 1;
        events.push(GameEvent::Scored { score: state.score });
        log::debug!("Score {}", state.score);
    }

    // Cull after scoring so an obstacle is never dropped unscored
    state.pipeline.cull(&state.config);

    if let Some(cause) = resolution.crash {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Crashed(cause));
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            cause,
            state.time_ticks,
            state.score
        );
    }
}

fn restart(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.reset();
    events.push(GameEvent::Reset);
    log::info!("Game reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::sim::state::{Actor, CrashCause, Obstacle};
    use proptest::prelude::*;

    fn primary() -> TickInput {
        TickInput {
            primary_action: true,
            ..Default::default()
        }
    }

    fn restart_input() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    fn running_state(config: WorldConfig) -> GameState {
        let mut state = GameState::new(config, 12345).unwrap();
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_dispatch_table() {
        assert_eq!(on_primary_action(GamePhase::Idle), Transition::Start);
        assert_eq!(on_primary_action(GamePhase::Running), Transition::Jump);
        assert_eq!(on_primary_action(GamePhase::GameOver), Transition::Reset);
    }

    #[test]
    fn test_idle_ticks_do_nothing() {
        let mut state = GameState::new(WorldConfig::default(), 1).unwrap();
        let before = state.snapshot();
        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput::default()).is_empty());
        }
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.pipeline.spawn_timer, 0);
    }

    #[test]
    fn test_idle_to_running_without_jump() {
        let mut state = GameState::new(WorldConfig::default(), 1).unwrap();
        let events = tick(&mut state, &primary());

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(events[0], GameEvent::Started);
        assert!(!events.contains(&GameEvent::Jumped));
        // First running tick falls under gravity, not the impulse
        assert_eq!(state.actor.vy, 0.5);
        assert_eq!(state.obstacles().len(), 1);
    }

    #[test]
    fn test_jump_while_running() {
        let mut state = running_state(WorldConfig::default());
        state.actor.vy = 7.5;
        let y = state.actor.y;

        let events = tick(&mut state, &primary());
        assert!(events.contains(&GameEvent::Jumped));
        assert_eq!(state.actor.vy, -10.0);
        assert_eq!(state.actor.y, y - 10.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_floor_crash_fires_same_tick() {
        let mut state = running_state(WorldConfig::default());
        state.actor.y = state.config.play_height + 1.0;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::Crashed(CrashCause::Floor)));
    }

    #[test]
    fn test_obstacle_crash() {
        let mut state = running_state(WorldConfig::default());
        state.actor.y = 10.0;
        state.pipeline.spawn_timer = 50;
        state.pipeline.obstacles.push(Obstacle::new(60.0, 150.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Crashed(CrashCause::Obstacle))
        );
    }

    #[test]
    fn test_game_over_is_frozen() {
        let mut state = running_state(WorldConfig::default());
        state.pipeline.obstacles.push(Obstacle::new(200.0, 50.0));
        state.score = 4;
        state.phase = GamePhase::GameOver;
        let before = state.snapshot();
        let actor_before = state.actor.clone();

        for _ in 0..20 {
            assert!(tick(&mut state, &TickInput::default()).is_empty());
        }
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.actor, actor_before);
    }

    #[test]
    fn test_primary_in_game_over_resets_to_idle() {
        let mut state = running_state(WorldConfig::default());
        state.pipeline.obstacles.push(Obstacle::new(200.0, 50.0));
        state.score = 4;
        state.phase = GamePhase::GameOver;

        let events = tick(&mut state, &primary());
        assert_eq!(events, vec![GameEvent::Reset]);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.obstacles().is_empty());
        assert_eq!(state.actor, Actor::spawn(&state.config));
    }

    #[test]
    fn test_restart_control_from_every_phase() {
        for phase in [GamePhase::Idle, GamePhase::Running, GamePhase::GameOver] {
            let mut state = running_state(WorldConfig::default());
            for _ in 0..30 {
                tick(&mut state, &TickInput::default());
            }
            state.phase = phase;
            state.score = 2;

            let events = tick(&mut state, &restart_input());
            assert_eq!(events, vec![GameEvent::Reset]);
            assert_eq!(state.phase, GamePhase::Idle);
            assert_eq!(state.score, 0);
            assert!(state.obstacles().is_empty());
            assert_eq!(state.pipeline.spawn_timer, 0);
            assert_eq!(state.actor, Actor::spawn(&state.config));
        }
    }

    #[test]
    fn test_score_counts_once_per_obstacle() {
        let config = WorldConfig {
            gravity: 0.0,
            ..Default::default()
        };
        let mut state = running_state(config);
        state.pipeline.spawn_timer = 1000;
        // Trailing edge at 51: passes the actor (x = 50) after one tick
        state.pipeline.obstacles.push(Obstacle::new(-29.0, 0.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Scored { score: 1 }]);

        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_spawns_on_running_ticks_one_six_eleven() {
        let config = WorldConfig {
            gravity: 0.0,
            spawn_period: 5,
            ..Default::default()
        };
        let mut state = running_state(config);

        let mut spawn_ticks = Vec::new();
        for n in 1..=12u64 {
            if tick(&mut state, &TickInput::default()).contains(&GameEvent::ObstacleSpawned) {
                spawn_ticks.push(n);
            }
        }
        assert_eq!(spawn_ticks, vec![1, 6, 11]);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_restart_then_primary_in_one_tick_starts_new_run() {
        let mut state = running_state(WorldConfig::default());
        state.phase = GamePhase::GameOver;
        let input = TickInput {
            primary_action: true,
            restart: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert_eq!(events[0], GameEvent::Reset);
        assert_eq!(events[1], GameEvent::Started);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(WorldConfig::default(), 99999).unwrap();
        let mut state2 = GameState::new(WorldConfig::default(), 99999).unwrap();

        for n in 0..600u32 {
            let input = TickInput {
                primary_action: n % 17 == 0,
                ..Default::default()
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    proptest! {
        #[test]
        fn running_velocity_property(
            actions in proptest::collection::vec(any::<bool>(), 1..120),
            seed in any::<u64>(),
            stale in proptest::collection::vec(-100.0f32..40.0, 0..4),
        ) {
            let mut state = GameState::new(WorldConfig::default(), seed).unwrap();
            tick(&mut state, &primary());
            // Obstacles already near the left edge, high gap so they never hit
            for x in stale {
                state.pipeline.obstacles.push(Obstacle::new(x, 0.0));
            }

            for action in actions {
                if state.phase != GamePhase::Running {
                    break;
                }
                let vy = state.actor.vy;
                let count = state.obstacles().len();
                let score = state.score;
                // Obstacles whose trailing edge ends this tick left of 0
                let (speed, width) = (state.config.obstacle_speed, state.config.obstacle_width);
                let leaving = state
                    .obstacles()
                    .iter()
                    .filter(|o| (o.x - speed) + width < 0.0)
                    .count();
                let input = TickInput { primary_action: action, ..Default::default() };
                let events = tick(&mut state, &input);

                if action {
                    prop_assert_eq!(state.actor.vy, state.config.jump_velocity());
                } else {
                    prop_assert_eq!(state.actor.vy, vy + state.config.gravity);
                }

                // Count changes only through spawn (+1) and cull
                let spawned = events.contains(&GameEvent::ObstacleSpawned) as usize;
                prop_assert_eq!(state.obstacles().len(), count + spawned - leaving);
                prop_assert!(state.score >= score);
            }
        }
    }
}
