use serde::{Deserialize, Serialize};
use crate::structs::config::ai_config::AiConfig;
use crate::structs::config::board_config::BoardConfig;
use crate::structs::config::server_config::ServerConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub server: ServerConfig,
}
