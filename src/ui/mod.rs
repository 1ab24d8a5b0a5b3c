pub mod board_controller;
pub mod board_server;
pub mod board_session;
pub mod detail_overlay;
pub mod flap_cell;
pub mod session_manager;
