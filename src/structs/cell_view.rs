use serde::{Deserialize, Serialize};
use crate::enums::board_color::BoardColor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub column: String,
    pub text: String,
    pub flipping: bool,
    pub color: BoardColor,
}
