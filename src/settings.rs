//! Game settings and preferences
//!
//! Persisted separately from the best score, as one JSON blob.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Which inputs may trigger an impulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JumpControl {
    Space,
    Click,
    #[default]
    Both,
    /// Only the voice channel jumps
    Voice,
}

impl JumpControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            JumpControl::Space => "Spacebar Only",
            JumpControl::Click => "Touch Only",
            JumpControl::Both => "Both (Key + Tap)",
            JumpControl::Voice => "Voice Only",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "space" | "key" => Some(JumpControl::Space),
            "click" | "touch" | "tap" => Some(JumpControl::Click),
            "both" => Some(JumpControl::Both),
            "voice" => Some(JumpControl::Voice),
            _ => None,
        }
    }

    pub fn allows_key(&self) -> bool {
        matches!(self, JumpControl::Space | JumpControl::Both)
    }

    pub fn allows_pointer(&self) -> bool {
        matches!(self, JumpControl::Click | JumpControl::Both)
    }
}

/// Which inputs may start a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartControl {
    Enter,
    Click,
    #[default]
    Both,
}

impl StartControl {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enter" | "key" => Some(StartControl::Enter),
            "click" | "touch" | "tap" => Some(StartControl::Click),
            "both" => Some(StartControl::Both),
            _ => None,
        }
    }

    pub fn allows_key(&self) -> bool {
        matches!(self, StartControl::Enter | StartControl::Both)
    }

    pub fn allows_pointer(&self) -> bool {
        matches!(self, StartControl::Click | StartControl::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Avatar colour scheme, picked by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvatarColor {
    #[default]
    Yellow,
    Red,
    Blue,
    Green,
    Purple,
    Pink,
}

impl AvatarColor {
    pub const ALL: [AvatarColor; 6] = [
        AvatarColor::Yellow,
        AvatarColor::Red,
        AvatarColor::Blue,
        AvatarColor::Green,
        AvatarColor::Purple,
        AvatarColor::Pink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarColor::Yellow => "yellow",
            AvatarColor::Red => "red",
            AvatarColor::Blue => "blue",
            AvatarColor::Green => "green",
            AvatarColor::Purple => "purple",
            AvatarColor::Pink => "pink",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // === Controls ===
    pub jump_control: JumpControl,
    pub start_control: StartControl,
    /// Let the voice channel trigger impulses
    pub voice_jump_enabled: bool,

    // === Appearance ===
    pub theme: Theme,
    pub avatar_color: AvatarColor,

    // === Audio ===
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jump_control: JumpControl::Both,
            start_control: StartControl::Both,
            voice_jump_enabled: false,
            theme: Theme::Light,
            avatar_color: AvatarColor::Yellow,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "skyhop_settings";

    /// Voice impulses are honoured
    pub fn voice_active(&self) -> bool {
        self.voice_jump_enabled || self.jump_control == JumpControl::Voice
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
