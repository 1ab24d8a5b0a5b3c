use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "ConfigHelper::default_server_port")]
    pub port: u16,

    #[serde(default = "ConfigHelper::default_open_browser")]
    pub open_browser: bool,

    #[serde(default = "ConfigHelper::default_session_idle_minutes")]
    pub session_idle_minutes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: ConfigHelper::default_server_port(),
            open_browser: ConfigHelper::default_open_browser(),
            session_idle_minutes: ConfigHelper::default_session_idle_minutes(),
        }
    }
}
