use super::state::Tab;
use crate::constants::*;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runtime knobs read from `window.ARDebugConfig`. Missing keys fall back to
/// the defaults in `constants.rs`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub max_logs: usize,
    pub log_view_limit: usize,
    pub fps_sample_ms: f64,
    pub drag_margin_px: f64,
    pub scene_selector: String,
    pub marker_selector: String,
    pub capture_console: bool,
    pub observe_new_markers: bool,
    pub start_open: bool,
    pub initial_tab: Tab,
    pub global_name: String,
    pub toggle_key: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_logs: MAX_LOGS,
            log_view_limit: LOG_VIEW_LIMIT,
            fps_sample_ms: FPS_SAMPLE_MS,
            drag_margin_px: DRAG_MARGIN_PX,
            scene_selector: SCENE_SELECTOR.to_string(),
            marker_selector: MARKER_SELECTOR.to_string(),
            capture_console: true,
            observe_new_markers: true,
            start_open: false,
            initial_tab: Tab::Logs,
            global_name: GLOBAL_NAME.to_string(),
            toggle_key: String::new(),
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: OverlayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if self.max_logs == 0 {
            return invalid("maxLogs", "must be at least 1");
        }
        if self.log_view_limit == 0 {
            return invalid("logViewLimit", "must be at least 1");
        }
        if !(self.fps_sample_ms.is_finite() && self.fps_sample_ms > 0.0) {
            return invalid("fpsSampleMs", "must be a positive number");
        }
        if !(self.drag_margin_px.is_finite() && self.drag_margin_px >= 0.0) {
            return invalid("dragMarginPx", "must be zero or positive");
        }
        if self.scene_selector.trim().is_empty() {
            return invalid("sceneSelector", "must not be empty");
        }
        if self.marker_selector.trim().is_empty() {
            return invalid("markerSelector", "must not be empty");
        }
        if self.global_name.trim().is_empty() {
            return invalid("globalName", "must not be empty");
        }
        Ok(())
    }
}

/// Whether a `keydown` with `key` should toggle the panel. An empty
/// configured key disables the shortcut. Letters compare case-insensitively.
#[inline]
pub fn is_toggle_key(key: &str, configured: &str) -> bool {
    !configured.is_empty() && key.eq_ignore_ascii_case(configured)
}
