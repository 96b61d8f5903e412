//! Voice command channel
//!
//! A recogniser turns short recorded segments into a reply; a reply of
//! `JUMP` posts an impulse into a single-slot mailbox. The host drains the
//! mailbox right before each step, so a burst of detections within one
//! frame collapses into a single impulse.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Length of each recorded segment sent to the recogniser (ms)
pub const SEGMENT_MS: u32 = 1500;

/// Single-slot, last-write-wins impulse mailbox
#[derive(Debug, Clone, Default)]
pub struct VoiceMailbox {
    slot: Arc<AtomicBool>,
}

impl VoiceMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a detected jump
    pub fn post(&self) {
        self.slot.store(true, Ordering::Release);
    }

    /// Consume the pending jump, if any
    pub fn take(&self) -> bool {
        self.slot.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.load(Ordering::Acquire)
    }
}

/// Recogniser failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// Microphone could not be opened
    Capture(String),
    /// Transcription service failed or was unreachable
    Service(String),
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture(m) => write!(f, "voice capture failed: {m}"),
            Self::Service(m) => write!(f, "voice service failed: {m}"),
        }
    }
}

impl std::error::Error for VoiceError {}

/// External speech service: recorded audio segment in, short reply out
pub trait VoiceRecognizer {
    fn recognize(&mut self, segment: &[u8]) -> Result<String, VoiceError>;
}

/// True when the service replied with the jump keyword
pub fn is_jump_reply(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case("JUMP")
}

/// Feeds segments to a recogniser and posts detected jumps
pub struct VoiceListener<R: VoiceRecognizer> {
    recognizer: R,
    mailbox: VoiceMailbox,
    failures: u32,
}

impl<R: VoiceRecognizer> VoiceListener<R> {
    pub fn new(recognizer: R, mailbox: VoiceMailbox) -> Self {
        Self {
            recognizer,
            mailbox,
            failures: 0,
        }
    }

    /// Handle one recorded segment. Errors are logged and swallowed.
    pub fn process_segment(&mut self, segment: &[u8]) -> bool {
        match self.recognizer.recognize(segment) {
            Ok(reply) if is_jump_reply(&reply) => {
                self.mailbox.post();
                true
            }
            Ok(_) => false,
            Err(e) => {
                self.failures += 1;
                log::warn!("Voice command ignored: {}", e);
                false
            }
        }
    }

    /// Recogniser errors seen so far
    pub fn failures(&self) -> u32 {
        self.failures
    }
}
