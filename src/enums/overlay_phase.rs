use serde::{Deserialize, Serialize};

/// Detail overlay lifecycle: Closed → Opening → Open → Closing → Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}
