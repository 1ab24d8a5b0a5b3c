use serde::{Deserialize, Serialize};

/// Colour roles used by both the terminal and the browser board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardColor {
    #[default]
    Amber,
    Green,
    Red,
    Orange,
    Gray,
}

impl BoardColor {
    pub fn ansi_code(&self) -> &'static str {
        match self {
            Self::Amber => "\x1b[38;5;214m",
            Self::Green => "\x1b[32m",
            Self::Red => "\x1b[31m",
            Self::Orange => "\x1b[38;5;208m",
            Self::Gray => "\x1b[90m",
        }
    }
}
