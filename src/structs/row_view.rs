use serde::{Deserialize, Serialize};
use crate::enums::board_row::RowKind;
use crate::structs::cell_view::CellView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub kind: RowKind,
    /// 1-based entry number for change rows.
    pub entry: Option<usize>,
    pub selectable: bool,
    pub message: Option<String>,
    pub cells: Vec<CellView>,
}
