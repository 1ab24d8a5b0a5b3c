use serde::{Deserialize, Serialize};
use crate::structs::spec_change::SpecChange;

/// One logical board line, before any cell animation is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardRow {
    Placeholder,
    EmptyState,
    Change { index: usize, change: SpecChange },
}

impl BoardRow {
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Change { .. })
    }

    pub fn kind(&self) -> RowKind {
        match self {
            Self::Placeholder => RowKind::Placeholder,
            Self::EmptyState => RowKind::EmptyState,
            Self::Change { .. } => RowKind::Change,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Placeholder,
    EmptyState,
    Change,
}
