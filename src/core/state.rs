use super::fps::FpsSampler;
use super::logs::{LogBuffer, LogEntry, LogLevel};
use super::markers::VisibleMarkers;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Logs,
    Stats,
    Markers,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Logs, Tab::Stats, Tab::Markers];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Logs => "logs",
            Tab::Stats => "stats",
            Tab::Markers => "markers",
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Tab::Logs => "Logs",
            Tab::Stats => "Stats",
            Tab::Markers => "Markers",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logs" => Ok(Tab::Logs),
            "stats" => Ok(Tab::Stats),
            "markers" => Ok(Tab::Markers),
            _ => Err(UnknownTab(s.to_string())),
        }
    }
}

/// Everything the panel shows, independent of the DOM.
///
/// Mutators return whether the view owned by the event should be
/// re-rendered, which is the case only while that view's tab is active.
#[derive(Clone, Debug)]
pub struct PanelState {
    pub open: bool,
    pub active_tab: Tab,
    pub fps: FpsSampler,
    pub logs: LogBuffer,
    pub markers: VisibleMarkers,
    log_view_limit: usize,
}

impl PanelState {
    pub fn new(max_logs: usize, log_view_limit: usize, fps_window_ms: f64, start_ms: f64) -> Self {
        Self {
            open: false,
            active_tab: Tab::Logs,
            fps: FpsSampler::new(fps_window_ms, start_ms),
            logs: LogBuffer::new(max_logs),
            markers: VisibleMarkers::default(),
            log_view_limit,
        }
    }

    /// Returns `true` if the flag actually changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        if self.open == open {
            return false;
        }
        self.open = open;
        true
    }

    /// Flip the open flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    #[inline]
    pub fn is_active(&self, tab: Tab) -> bool {
        self.active_tab == tab
    }

    pub fn push_log(&mut self, level: LogLevel, text: impl Into<String>) -> bool {
        self.logs.push(LogEntry::new(level, text));
        self.is_active(Tab::Logs)
    }

    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.fps.frame(now_ms).is_some() && self.is_active(Tab::Stats)
    }

    pub fn marker_found(&mut self, id: &str) -> bool {
        self.markers.insert(id);
        self.is_active(Tab::Markers)
    }

    pub fn marker_lost(&mut self, id: &str) -> bool {
        self.markers.remove(id);
        self.is_active(Tab::Markers)
    }

    /// A visible marker left the scene. `None` when it was not visible,
    /// otherwise whether the Markers view needs a re-render.
    pub fn marker_removed(&mut self, id: &str) -> Option<bool> {
        self.markers
            .remove(id)
            .then(|| self.is_active(Tab::Markers))
    }

    /// Entries the Logs view shows: the newest `log_view_limit`, oldest first.
    pub fn visible_logs(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs.recent(self.log_view_limit)
    }

    #[inline]
    pub fn log_view_limit(&self) -> usize {
        self.log_view_limit
    }
}

impl Default for PanelState {
    fn default() -> Self {
        use crate::constants::{FPS_SAMPLE_MS, LOG_VIEW_LIMIT, MAX_LOGS};
        Self::new(MAX_LOGS, LOG_VIEW_LIMIT, FPS_SAMPLE_MS, 0.0)
    }
}
