//! Input adapter
//!
//! Raw pointer/touch/key events become semantic actions, which accumulate as
//! one-shot flags until the driver consumes them with the next tick. Phase
//! gating is the state machine's job; this layer never looks at the phase.

use crate::sim::TickInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    ArrowUp,
    R,
    I,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "ArrowUp" => Key::ArrowUp,
            "r" | "R" => Key::R,
            "i" | "I" => Key::I,
            _ => Key::Other,
        }
    }
}

/// A raw event from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    PointerDown,
    TouchStart,
    KeyDown(Key),
    /// The dedicated restart button
    RestartButton,
}

/// Semantic action delivered to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start / jump / restart-after-game-over, depending on phase
    Primary,
    /// Reset from any phase
    Restart,
    /// Demo mode on/off
    ToggleAutopilot,
}

/// Translate one raw event; unknown keys map to nothing
pub fn translate(raw: RawInput) -> Option<Action> {
    match raw {
        RawInput::PointerDown | RawInput::TouchStart => Some(Action::Primary),
        RawInput::KeyDown(Key::Space | Key::Enter | Key::ArrowUp) => Some(Action::Primary),
        RawInput::KeyDown(Key::R) | RawInput::RestartButton => Some(Action::Restart),
        RawInput::KeyDown(Key::I) => Some(Action::ToggleAutopilot),
        RawInput::KeyDown(Key::Other) => None,
    }
}

/// Pending input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pending: TickInput,
}

impl InputState {
    /// Feed a raw event; returns the action it produced, if any
    pub fn handle(&mut self, raw: RawInput) -> Option<Action> {
        let action = translate(raw)?;
        self.push(action);
        Some(action)
    }

    pub fn push(&mut self, action: Action) {
        match action {
            Action::Primary => self.pending.primary_action = true,
            Action::Restart => self.pending.restart = true,
            Action::ToggleAutopilot => {
                self.pending.autopilot = !self.pending.autopilot;
                log::info!("Autopilot: {}", self.pending.autopilot);
            }
        }
    }

    /// Input for the next tick; one-shot flags are cleared, autopilot persists
    pub fn take(&mut self) -> TickInput {
        let input = self.pending.clone();
        self.pending.primary_action = false;
        self.pending.restart = false;
        input
    }

    pub fn autopilot(&self) -> bool {
        self.pending.autopilot
    }
}
