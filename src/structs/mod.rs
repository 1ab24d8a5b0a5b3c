pub mod ai;
pub mod board_snapshot;
pub mod board_timings;
pub mod cell_view;
pub mod cli;
pub mod compare_request;
pub mod comparison_result;
pub mod config;
pub mod overlay_view;
pub mod request_handle;
pub mod row_view;
pub mod scheduled_timer;
pub mod select_request;
pub mod spec_change;
