//! Editor settings
//!
//! Supplied by the host page as JSON; never written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::KeyBindings;

/// Host-configurable editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keys bound to jump/left/right
    pub bindings: KeyBindings,
    /// Map width in pages when the editor opens
    pub initial_width: usize,
    /// Map height in pages when the editor opens
    pub initial_height: usize,
    /// Warn before playing a map that has no end marker
    pub warn_missing_end: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            initial_width: MIN_MAP_PAGES,
            initial_height: MIN_MAP_PAGES,
            warn_missing_end: true,
        }
    }
}

impl Settings {
    /// Parse settings, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_map_size();
        Ok(settings)
    }

    /// Keep the initial map size within the supported range
    fn clamp_map_size(&mut self) {
        let (width, height) =
            crate::editor::clamp_map_size(self.initial_width, self.initial_height);
        self.initial_width = width;
        self.initial_height = height;
    }

    /// Element holding the page's settings JSON
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json.map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from page");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Environment variable holding the settings JSON (native only)
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "TILE_HOPPER_SETTINGS";

    /// Load settings from the environment (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR).map(|json| Self::from_json(&json)) {
            Ok(Ok(settings)) => {
                log::info!("Loaded settings from {}", Self::ENV_VAR);
                settings
            }
            Ok(Err(e)) => {
                log::warn!("Invalid {} ({e}), using defaults", Self::ENV_VAR);
                Self::default()
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
