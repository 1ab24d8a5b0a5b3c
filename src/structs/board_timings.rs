use std::time::Duration;
use crate::config::constants::{
    DEFAULT_FLIP_DURATION_MS, DEFAULT_OVERLAY_CLOSE_DELAY_MS, DEFAULT_OVERLAY_OPEN_DELAY_MS,
    DEFAULT_PLACEHOLDER_ROWS,
};
use crate::structs::config::board_config::BoardConfig;

/// Timing and sizing knobs shared by every board component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTimings {
    pub flip_duration: Duration,
    pub overlay_open_delay: Duration,
    pub overlay_close_delay: Duration,
    pub placeholder_rows: usize,
}

impl BoardTimings {
    /// Zero-length animations; every transition completes on the next tick.
    pub fn instant() -> Self {
        Self {
            flip_duration: Duration::ZERO,
            overlay_open_delay: Duration::ZERO,
            overlay_close_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for BoardTimings {
    fn default() -> Self {
        Self {
            flip_duration: Duration::from_millis(DEFAULT_FLIP_DURATION_MS),
            overlay_open_delay: Duration::from_millis(DEFAULT_OVERLAY_OPEN_DELAY_MS),
            overlay_close_delay: Duration::from_millis(DEFAULT_OVERLAY_CLOSE_DELAY_MS),
            placeholder_rows: DEFAULT_PLACEHOLDER_ROWS,
        }
    }
}

impl From<&BoardConfig> for BoardTimings {
    fn from(config: &BoardConfig) -> Self {
        Self {
            flip_duration: Duration::from_millis(config.flip_duration_ms),
            overlay_open_delay: Duration::from_millis(config.overlay_open_delay_ms),
            overlay_close_delay: Duration::from_millis(config.overlay_close_delay_ms),
            placeholder_rows: config.placeholder_rows,
        }
    }
}
