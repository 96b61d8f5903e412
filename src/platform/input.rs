use crate::settings::Settings;
use crate::sim::SessionStatus;

/// Raw input the host can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter / Return key
    Enter,
    /// Space bar
    Space,
    /// Mouse click or touch
    Pointer,
}

/// Discrete commands accepted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Impulse,
}

impl InputEvent {
    /// Parse a DOM `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Enter" | "NumpadEnter" => Some(InputEvent::Enter),
            "Space" => Some(InputEvent::Space),
            _ => None,
        }
    }
}

pub fn map_input(event: InputEvent, status: SessionStatus, settings: &Settings) -> Option<Command> {
    match event {
        // Enter always drives the session forward: start, then first flap
        InputEvent::Enter => match status {
            s if s.can_start() && settings.start_control.allows_key() => Some(Command::Start),
            SessionStatus::Ready => Some(Command::Impulse),
            _ => None,
        },
        InputEvent::Space => {
            (status.can_impulse() && settings.jump_control.allows_key()).then_some(Command::Impulse)
        }
        InputEvent::Pointer => {
            if status.can_start() {
                settings
                    .start_control
                    .allows_pointer()
                    .then_some(Command::Start)
            } else {
                settings
                    .jump_control
                    .allows_pointer()
                    .then_some(Command::Impulse)
            }
        }
    }
}
