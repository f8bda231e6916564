use log::warn;
use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigurationError;

/// How much of the window height the carousel region takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeightPreset {
    /// 52% of the window, clamped to 460..560px.
    #[default]
    Standard,
    /// 60% of the window, clamped to 360..680px.
    Tall,
    /// The whole window.
    Fill,
}

impl HeightPreset {
    /// Region height in pixels for a window of the given height. Never taller than the window.
    pub fn resolve(self, window_height: f32) -> f32 {
        let height = match self {
            HeightPreset::Standard => (window_height * 0.52).clamp(460.0, 560.0),
            HeightPreset::Tall => (window_height * 0.60).clamp(360.0, 680.0),
            HeightPreset::Fill => window_height,
        };
        height.min(window_height).max(0.0)
    }
}

/// Carousel behaviour settings, usually read from the `[carousel]` table of a slide manifest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub autoplay_interval_ms: i64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub pause_on_hover: bool,
    pub height_preset: HeightPreset,
    pub transition_ms: i64,
    pub draggable: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_MS as i64,
            looping: true,
            pause_on_hover: true,
            height_preset: HeightPreset::default(),
            transition_ms: DEFAULT_TRANSITION_MS as i64,
            draggable: true,
        }
    }
}

impl CarouselConfig {
    /// Autoplay interval with invalid values replaced by the default.
    pub fn effective_interval_ms(&self) -> u64 {
        positive_or(self.autoplay_interval_ms, DEFAULT_AUTOPLAY_MS)
    }

    pub fn effective_transition_ms(&self) -> u64 {
        positive_or(self.transition_ms, DEFAULT_TRANSITION_MS)
    }

    pub fn validate(&self) -> Vec<ConfigurationError> {
        let mut problems = Vec::new();
        if self.autoplay_interval_ms <= 0 {
            problems.push(ConfigurationError::InvalidInterval(self.autoplay_interval_ms));
        }
        if self.transition_ms <= 0 {
            problems.push(ConfigurationError::InvalidTransition(self.transition_ms));
        }
        problems
    }

    /// Logs every configuration problem and returns a copy with defaults substituted.
    pub fn sanitized(&self) -> Self {
        for problem in self.validate() {
            warn!("{}, using default", problem);
        }
        Self {
            autoplay_interval_ms: self.effective_interval_ms() as i64,
            transition_ms: self.effective_transition_ms() as i64,
            ..self.clone()
        }
    }
}

pub(crate) fn positive_or(value: i64, default: u64) -> u64 {
    if value > 0 { value as u64 } else { default }
}
