pub mod ai_config;
pub mod board_config;
pub mod config;
pub mod server_config;
