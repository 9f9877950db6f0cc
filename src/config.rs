//! UI Configuration
//!
//! Timings and endpoint root. The page may override any field by defining
//! a global `KANBAN_CONFIG` object before the bundle loads.

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::ConfigError;
use crate::toast::ToastTiming;

/// Name of the optional page global holding overrides
const CONFIG_GLOBAL: &str = "KANBAN_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Prefix for every endpoint path, e.g. `""` or `"/board"`
    pub api_base: String,
    /// Typing pause before an auto-save
    pub autosave_delay_ms: u32,
    /// Delay between a field losing focus and the save it triggers
    pub blur_save_delay_ms: u32,
    /// Typing pause before the search filter applies
    pub search_delay_ms: u32,
    pub toast_duration_ms: u32,
    pub toast_enter_delay_ms: u32,
    pub toast_exit_ms: u32,
    /// Settle/bounce/enter animations
    pub animation_ms: u32,
    /// Shrink/fade before a deleted card or item leaves the DOM
    pub leave_animation_ms: u32,
    /// Title given to cards created by `n` or the column "+" button
    pub new_card_title: String,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            autosave_delay_ms: 1000,
            blur_save_delay_ms: 100,
            search_delay_ms: 300,
            toast_duration_ms: 3000,
            toast_enter_delay_ms: 10,
            toast_exit_ms: 300,
            animation_ms: 150,
            leave_animation_ms: 200,
            new_card_title: "New Card".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl UiConfig {
    /// Read overrides from the page, falling back to defaults when absent
    pub fn load() -> Result<Self, ConfigError> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|e| ConfigError::Invalid(format!("{:?}", e)))?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub fn toast_timing(&self) -> ToastTiming {
        ToastTiming {
            enter_delay_ms: self.toast_enter_delay_ms,
            duration_ms: self.toast_duration_ms,
            exit_ms: self.toast_exit_ms,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
