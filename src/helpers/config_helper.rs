use crate::config::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_FLIP_DURATION_MS, DEFAULT_FRAME_INTERVAL_MS,
    DEFAULT_MODEL, DEFAULT_OVERLAY_CLOSE_DELAY_MS, DEFAULT_OVERLAY_OPEN_DELAY_MS,
    DEFAULT_PLACEHOLDER_ROWS, DEFAULT_PROVIDER, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_IDLE_MINUTES,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_provider() -> String {
        DEFAULT_PROVIDER.to_string()
    }

    pub fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }

    pub fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    pub fn default_api_key_env() -> String {
        DEFAULT_API_KEY_ENV.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn default_temperature() -> f32 {
        0.0
    }

    pub fn default_flip_duration_ms() -> u64 {
        DEFAULT_FLIP_DURATION_MS
    }

    pub fn default_placeholder_rows() -> usize {
        DEFAULT_PLACEHOLDER_ROWS
    }

    pub fn default_overlay_open_delay_ms() -> u64 {
        DEFAULT_OVERLAY_OPEN_DELAY_MS
    }

    pub fn default_overlay_close_delay_ms() -> u64 {
        DEFAULT_OVERLAY_CLOSE_DELAY_MS
    }

    pub fn default_frame_interval_ms() -> u64 {
        DEFAULT_FRAME_INTERVAL_MS
    }

    pub fn default_server_port() -> u16 {
        DEFAULT_SERVER_PORT
    }

    pub fn default_open_browser() -> bool {
        true
    }

    pub fn default_session_idle_minutes() -> u64 {
        DEFAULT_SESSION_IDLE_MINUTES
    }
}
