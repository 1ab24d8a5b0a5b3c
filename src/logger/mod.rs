pub mod animated_logger;
pub mod board_printer;
