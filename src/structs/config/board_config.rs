use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    #[serde(default = "ConfigHelper::default_flip_duration_ms")]
    pub flip_duration_ms: u64,

    #[serde(default = "ConfigHelper::default_placeholder_rows")]
    pub placeholder_rows: usize,

    #[serde(default = "ConfigHelper::default_overlay_open_delay_ms")]
    pub overlay_open_delay_ms: u64,

    #[serde(default = "ConfigHelper::default_overlay_close_delay_ms")]
    pub overlay_close_delay_ms: u64,

    #[serde(default = "ConfigHelper::default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            flip_duration_ms: ConfigHelper::default_flip_duration_ms(),
            placeholder_rows: ConfigHelper::default_placeholder_rows(),
            overlay_open_delay_ms: ConfigHelper::default_overlay_open_delay_ms(),
            overlay_close_delay_ms: ConfigHelper::default_overlay_close_delay_ms(),
            frame_interval_ms: ConfigHelper::default_frame_interval_ms(),
        }
    }
}
