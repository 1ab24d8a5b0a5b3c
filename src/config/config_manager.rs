use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{SpecBoardError, SpecBoardResult};
use crate::structs::config::ai_config::AiConfig;
use crate::structs::config::config::Config;

const SUPPORTED_PROVIDERS: [&str; 1] = ["gemini"];

const SAMPLE_CONFIG: &str = r#"# SpecBoard Configuration

# Comparison engine
[ai]
provider = "gemini"
model = "gemini-3-pro-preview"
base_url = "https://generativelanguage.googleapis.com/v1beta"
# Environment variable holding the API key
api_key_env = "GEMINI_API_KEY"
# Upper bound for one comparison request
request_timeout_secs = 120
temperature = 0.0

# Departure board animation
[board]
flip_duration_ms = 300
placeholder_rows = 5
overlay_open_delay_ms = 50
overlay_close_delay_ms = 400
# Terminal redraw interval while animating
frame_interval_ms = 50

# `specboard serve`
[server]
port = 8080
open_browser = true
# Browser sessions idle longer than this are dropped
session_idle_minutes = 30
"#;

pub struct ConfigManager;

impl ConfigManager {

    /// `~/specboard/config.toml` unless an explicit path is given.
    pub fn config_path(override_path: Option<&Path>) -> SpecBoardResult<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }

        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| SpecBoardError::config_error(
                "Could not determine home directory",
                None,
                Some("Pass --config with an explicit path"),
            ))
    }

    /// Missing default file means defaults; a missing explicit file is an error.
    pub fn load(override_path: Option<&Path>) -> SpecBoardResult<Config> {
        let path = Self::config_path(override_path)?;

        if !path.exists() {
            if override_path.is_some() {
                return Err(SpecBoardError::ConfigurationFileError {
                    path: path.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(&path)
            .map_err(|e| SpecBoardError::file_error(&path.display().to_string(), "read", &e.to_string()))?;
        let config: Config = toml::from_str(&content).map_err(|e| SpecBoardError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        Ok(config)
    }

    pub fn create_sample_config(override_path: Option<&Path>) -> SpecBoardResult<PathBuf> {
        let path = Self::config_path(override_path)?;

        if path.exists() {
            return Err(SpecBoardError::config_error(
                &format!("Config already exists at {}", path.display()),
                None,
                Some("Edit the existing file or remove it first"),
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, SAMPLE_CONFIG)?;
        log::info!("✅ Created sample config at: {}", path.display());
        Ok(path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !SUPPORTED_PROVIDERS.contains(&config.ai.provider.as_str()) {
            errors.push(format!("Unsupported AI provider: {}", config.ai.provider));
        }
        if config.ai.model.trim().is_empty() {
            errors.push("AI model must not be empty".to_string());
        }
        if !config.ai.base_url.starts_with("http://") && !config.ai.base_url.starts_with("https://") {
            errors.push(format!("AI base_url must be an http(s) URL: {}", config.ai.base_url));
        }
        if config.ai.api_key_env.trim().is_empty() {
            errors.push("AI api_key_env must name an environment variable".to_string());
        }
        if config.ai.request_timeout_secs == 0 {
            errors.push("AI request_timeout_secs must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&config.ai.temperature) {
            errors.push(format!("AI temperature must be between 0.0 and 2.0, got {}", config.ai.temperature));
        }

        if config.board.placeholder_rows == 0 {
            errors.push("Board placeholder_rows must be at least 1".to_string());
        }
        if config.board.frame_interval_ms == 0 {
            errors.push("Board frame_interval_ms must be greater than zero".to_string());
        }

        if config.server.port == 0 {
            errors.push("Server port must be greater than zero".to_string());
        }
        if config.server.session_idle_minutes == 0 {
            errors.push("Server session_idle_minutes must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The API key is mandatory for `compare` and `serve`.
    pub fn resolve_api_key(ai: &AiConfig) -> SpecBoardResult<String> {
        match std::env::var(&ai.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(SpecBoardError::config_error(
                &format!("{} environment variable is not set", ai.api_key_env),
                Some("ai.api_key_env"),
                Some(&format!("export {}=<your key>", ai.api_key_env)),
            )),
        }
    }
}
