use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::enums::board_color::BoardColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Breaking,
}

impl ChangeType {
    pub const ALL: [ChangeType; 4] = [Self::Added, Self::Removed, Self::Modified, Self::Breaking];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Removed => "REMOVED",
            Self::Modified => "MODIFIED",
            Self::Breaking => "BREAKING",
        }
    }

    pub fn color(&self) -> BoardColor {
        match self {
            Self::Added => BoardColor::Green,
            Self::Removed => BoardColor::Red,
            Self::Breaking => BoardColor::Orange,
            Self::Modified => BoardColor::Amber,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = String;

    /// Exact match only; `"added"` is rejected like any other unknown tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|change_type| change_type.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
