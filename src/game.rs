//! Host driver
//!
//! Owns everything around the simulation: pending commands, the voice
//! mailbox, settings, storage and audio. The renderer calls `frame` once per
//! display refresh and then draws `state()`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::{Command, InputEvent, VoiceMailbox, map_input};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, StepInput, step};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game<S: KeyValueStore, A: AudioSink> {
    state: GameState,
    settings: Settings,
    tuning: Tuning,
    high_score: HighScore,
    rng: Pcg32,
    store: S,
    audio: A,
    mailbox: VoiceMailbox,
    /// Commands collected since the last frame
    pending: StepInput,
    autopilot: bool,
    settings_open: bool,
    frames: u64,
}

impl<S: KeyValueStore, A: AudioSink> Game<S, A> {
    pub fn new(seed: u64, store: S, audio: A) -> Self {
        Self::with_tuning(seed, Tuning::default(), store, audio)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, store: S, audio: A) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(high_score.best, &tuning, &mut rng);
        log::info!("Game ready (seed {}, best {})", seed, high_score.best);

        Self {
            state,
            settings,
            tuning,
            high_score,
            rng,
            store,
            audio,
            mailbox: VoiceMailbox::new(),
            pending: StepInput::default(),
            autopilot: false,
            settings_open: false,
            frames: 0,
        }
    }

    /// Queue a command for the next frame
    pub fn command(&mut self, command: Command) {
        match command {
            Command::Start => self.pending.start = true,
            Command::Impulse => self.pending.impulse = true,
        }
    }

    /// Map a raw input through the current bindings and queue it
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Command> {
        if self.settings_open {
            return None;
        }
        self.audio.resume();
        let command = map_input(event, self.state.status, &self.settings)?;
        self.command(command);
        Some(command)
    }

    /// Handle for the voice collaborator to post into
    pub fn voice_mailbox(&self) -> VoiceMailbox {
        self.mailbox.clone()
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Inputs are ignored while the settings panel is open
    pub fn set_settings_open(&mut self, open: bool) {
        self.settings_open = open;
    }

    /// Replace and persist the user settings
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Advance exactly one simulation step
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let mut input = std::mem::take(&mut self.pending);

        // Always drain so a stale detection never leaks into a later frame
        let voice = self.mailbox.take();
        if voice && self.settings.voice_active() && !self.settings_open {
            input.impulse = true;
        }
        input.autopilot = self.autopilot;

        let outcome = step(&self.state, &input, &self.tuning, &mut self.rng);
        self.state = outcome.state;
        self.frames += 1;

        for event in &outcome.events {
            if self.settings.sound_enabled {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }
            self.on_event(event);
        }

        outcome.events
    }

    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Started => log::info!("Session started (best {})", self.state.best),
            GameEvent::Died {
                score,
                best,
                new_best,
                cause,
            } => {
                log::info!(
                    "Session ended: score {} best {} ({:?}) after {} frames",
                    score,
                    best,
                    cause,
                    self.frames
                );
                if new_best && self.high_score.record(best) {
                    if let Err(e) = self.high_score.save(&mut self.store) {
                        log::warn!("Could not save best score: {}", e);
                    }
                }
            }
            GameEvent::Jumped | GameEvent::Scored { .. } => {}
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Frames stepped since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
