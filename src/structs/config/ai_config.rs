use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AiConfig {
    #[serde(default = "ConfigHelper::default_provider")]
    pub provider: String,

    #[serde(default = "ConfigHelper::default_model")]
    pub model: String,

    #[serde(default = "ConfigHelper::default_base_url")]
    pub base_url: String,

    #[serde(default = "ConfigHelper::default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_temperature")]
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ConfigHelper::default_provider(),
            model: ConfigHelper::default_model(),
            base_url: ConfigHelper::default_base_url(),
            api_key_env: ConfigHelper::default_api_key_env(),
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
            temperature: ConfigHelper::default_temperature(),
        }
    }
}
