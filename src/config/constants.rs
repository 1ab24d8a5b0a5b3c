use std::time::Duration;

pub const DEFAULT_FLIP_DURATION_MS: u64 = 300;
pub const DEFAULT_OVERLAY_OPEN_DELAY_MS: u64 = 50;
pub const DEFAULT_OVERLAY_CLOSE_DELAY_MS: u64 = 400;
pub const DEFAULT_PLACEHOLDER_ROWS: usize = 5;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 50;

pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 30;
pub const MAX_SESSION_ID_LENGTH: usize = 64;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;
pub const SESSION_CLEANUP_POLL_INTERVAL_SECS: u64 = 60;
pub const MAX_REQUEST_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const CONFIG_DIR_NAME: &str = "specboard";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const MISSING_SPECS_MESSAGE: &str = "Both source and destination specifications are required.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response format from comparison engine.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while comparing specifications.";

pub const PLACEHOLDER_GLYPHS: &str = "---";
pub const BOARD_COLUMNS: [&str; 5] = ["Action", "Method", "Endpoint", "Description", "Impact"];
pub const EMPTY_STATE_MESSAGE: &str =
    "NO DELAYS DETECTED. SYSTEM STATUS NOMINAL.\nUPLOAD SPECIFICATIONS TO BEGIN COMPARISON.";
pub const STATUS_PROCESSING: &str = "STATUS: PROCESSING...";
pub const STATUS_READY: &str = "STATUS: READY";
pub const SUBMIT_LABEL_IDLE: &str = "Analyze Changes";
pub const SUBMIT_LABEL_PENDING: &str = "Processing...";
pub const SERVICE_TERMINAL_LABEL: &str = "SERVICE TERMINAL: OPENAPI-DIFF-01";
pub const GATE_LABEL: &str = "GATE: V2.5-ALPHA";
pub const OVERLAY_CLOSE_LABEL: &str = "[X]";

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}

pub fn idle_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_duration_saturates_instead_of_overflowing() {
        assert_eq!(idle_duration(30), Duration::from_secs(1800));
        assert_eq!(idle_duration(u64::MAX), Duration::from_secs(u64::MAX));
    }
}
