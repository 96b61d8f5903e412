//! Browser bindings
//!
//! The page owns the canvas, the render loop and the microphone. It forwards
//! DOM events here and calls `frame` once per `requestAnimationFrame`, then
//! draws whatever `state_json` returns.

use wasm_bindgen::prelude::*;

use crate::Game;
use crate::audio::AudioManager;
use crate::persistence::LocalStorageStore;
use crate::platform::InputEvent;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Skyhop starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore, AudioManager>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebGame {
        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
        WebGame {
            game: Game::new(seed, LocalStorageStore, AudioManager::new()),
        }
    }

    /// Forward a `KeyboardEvent.code`. Returns true when it mapped to a command.
    pub fn key_down(&mut self, code: &str) -> bool {
        InputEvent::from_key_code(code)
            .and_then(|event| self.game.handle_input(event))
            .is_some()
    }

    pub fn pointer_down(&mut self) -> bool {
        self.game.handle_input(InputEvent::Pointer).is_some()
    }

    /// Called by the page's speech loop when the service replied `JUMP`
    pub fn voice_jump(&self) {
        self.game.voice_mailbox().post();
    }

    /// Advance one step and return the number of events it produced
    pub fn frame(&mut self) -> usize {
        self.game.frame().len()
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.game.set_settings_open(open);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.game.set_autopilot(enabled);
    }

    /// Current settings as the stored JSON blob
    pub fn settings_json(&self) -> String {
        serde_json::to_string(self.game.settings()).unwrap_or_default()
    }

    /// Replace the settings from a JSON blob; missing fields take defaults
    pub fn apply_settings_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => {
                self.game.update_settings(settings);
                true
            }
            Err(e) => {
                log::warn!("Rejected settings: {}", e);
                false
            }
        }
    }

    /// Snapshot for the renderer
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.game.state()).unwrap_or_else(|e| {
            log::error!("Could not encode state: {}", e);
            String::new()
        })
    }
}
