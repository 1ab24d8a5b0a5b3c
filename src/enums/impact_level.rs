use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::enums::board_color::BoardColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::High)
    }

    pub fn color(&self) -> BoardColor {
        if self.is_high() {
            BoardColor::Red
        } else {
            BoardColor::Gray
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImpactLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|impact| impact.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
