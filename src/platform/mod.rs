//! Platform abstraction layer
//!
//! Handles the edges between the host and the simulation:
//! - Input events to commands
//! - The voice command channel

pub mod input;
pub mod voice;

pub use input::{Command, InputEvent, map_input};
pub use voice::{VoiceError, VoiceListener, VoiceMailbox, VoiceRecognizer, is_jump_reply};
