use serde::{Deserialize, Serialize};
use crate::structs::overlay_view::OverlayView;
use crate::structs::row_view::RowView;

/// Everything a surface needs to draw one frame of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub status_line: String,
    pub loading: bool,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub columns: Vec<String>,
    pub rows: Vec<RowView>,
    pub summary: Option<String>,
    pub error: Option<String>,
    pub updated_at: Option<String>,
    pub overlay: Option<OverlayView>,
}

impl BoardSnapshot {
    pub fn selectable_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.selectable).count()
    }
}
