pub mod ai_provider_error;
pub mod board_color;
pub mod board_row;
pub mod change_type;
pub mod commands;
pub mod flap_state;
pub mod http_method;
pub mod impact_level;
pub mod overlay_phase;
pub mod request_status;
pub mod validation_error;
