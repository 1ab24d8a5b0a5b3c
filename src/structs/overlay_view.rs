use serde::{Deserialize, Serialize};
use crate::enums::board_color::BoardColor;
use crate::enums::overlay_phase::OverlayPhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayView {
    pub entry: usize,
    pub phase: OverlayPhase,
    pub visible: bool,
    pub title: String,
    pub badge: String,
    pub color: BoardColor,
    pub impact_label: String,
    pub heading: String,
    pub description: String,
    pub technical_detail: String,
    pub close_label: String,
}
